#![forbid(unsafe_code)]

use chrono::{DateTime, NaiveDate};
use registry_kernel_contracts::{Participant, RegistryError};
use tonic::Status;

use crate::grpc_api;

pub fn participant_from_wire(p: Option<grpc_api::Participant>) -> Result<Participant, RegistryError> {
    let p = p.ok_or_else(|| RegistryError::invalid_argument("participant is required"))?;
    let dob = p
        .dob
        .ok_or_else(|| RegistryError::invalid_argument("participant.dob is required"))?;
    Ok(Participant {
        reference_id: p.id,
        date_of_birth: date_from_timestamp(&dob)?,
        phone: p.phone,
        address: p.address,
    })
}

pub fn participant_to_wire(p: Participant) -> grpc_api::Participant {
    grpc_api::Participant {
        id: p.reference_id,
        dob: Some(date_to_timestamp(p.date_of_birth)),
        phone: p.phone,
        address: p.address,
    }
}

/// UTC calendar date of the instant.
pub fn date_from_timestamp(ts: &prost_types::Timestamp) -> Result<NaiveDate, RegistryError> {
    let nanos = u32::try_from(ts.nanos)
        .map_err(|_| RegistryError::invalid_argument("participant.dob nanos out of range"))?;
    DateTime::from_timestamp(ts.seconds, nanos)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| RegistryError::invalid_argument("participant.dob is not a valid instant"))
}

/// Midnight UTC of the date.
pub fn date_to_timestamp(date: NaiveDate) -> prost_types::Timestamp {
    let seconds = date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default();
    prost_types::Timestamp { seconds, nanos: 0 }
}

pub fn status_from_error(err: RegistryError) -> Status {
    let message = err.to_string();
    match err {
        RegistryError::UnsupportedVersion { .. } => Status::unimplemented(message),
        RegistryError::AlreadyExists { .. } => Status::already_exists(message),
        RegistryError::NotFound { .. } => Status::not_found(message),
        RegistryError::InvalidArgument { .. } => Status::invalid_argument(message),
        RegistryError::LockPoisoned => Status::internal(message),
    }
}
