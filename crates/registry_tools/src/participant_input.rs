#![forbid(unsafe_code)]

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use registry_kernel_contracts::{ContractViolation, Participant, RegistryError};

pub const BIRTH_YEAR_MIN: i32 = 1900;

/// Collects a participant's fields for `reference_id` from an operator.
///
/// Prompts are written to `out` and answers read one line each from `input`
/// in the order phone, address, day, month, year. Birth date components are
/// range-checked here; the store itself only checks the reference id.
pub fn collect_participant<R: BufRead, W: Write>(
    reference_id: &str,
    input: &mut R,
    out: &mut W,
    current_year: i32,
) -> Result<Participant, RegistryError> {
    if reference_id.is_empty() {
        return Err(RegistryError::invalid_argument(
            "reference number is required for a participant",
        ));
    }

    writeln!(out, "collecting information for participant ({reference_id})").map_err(io_err)?;
    let phone = prompt(input, out, "enter phone number:")?;
    let address = prompt(input, out, "enter address:")?;
    let day = prompt_number(input, out, "enter birthdate day (DD)", "birth_day", 1, 31)?;
    let month = prompt_number(input, out, "enter birthdate month (MM)", "birth_month", 1, 12)?;
    let year = prompt_number(
        input,
        out,
        "enter birthdate year (YYYY)",
        "birth_year",
        i64::from(BIRTH_YEAR_MIN),
        i64::from(current_year),
    )?;

    // Ranges above keep every component well inside i32/u32.
    let date_of_birth = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        .ok_or_else(|| {
            RegistryError::invalid_argument(format!(
                "birthdate {year:04}-{month:02}-{day:02} is not a calendar date"
            ))
        })?;

    Ok(Participant::v1(reference_id, date_of_birth, phone, address)?)
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<String, RegistryError> {
    writeln!(out, "{message}").map_err(io_err)?;
    out.flush().map_err(io_err)?;
    let mut line = String::new();
    input.read_line(&mut line).map_err(io_err)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
    field: &'static str,
    min: i64,
    max: i64,
) -> Result<i64, RegistryError> {
    let raw = prompt(input, out, message)?;
    let got: i64 = raw.trim().parse().map_err(|_| {
        RegistryError::invalid_argument(format!("could not collect {field}: '{}' is not a number", raw.trim()))
    })?;
    if !(min..=max).contains(&got) {
        return Err(ContractViolation::InvalidRange {
            field,
            min,
            max,
            got,
        }
        .into());
    }
    Ok(got)
}

fn io_err(err: std::io::Error) -> RegistryError {
    RegistryError::invalid_argument(format!("could not collect participant input: {err}"))
}
