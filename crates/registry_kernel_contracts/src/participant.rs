#![forbid(unsafe_code)]

use chrono::NaiveDate;

use crate::{ContractViolation, Validate};

/// A registry participant keyed by its caller-assigned reference number.
///
/// `reference_id` is the store key and never changes once created; an update
/// replaces every other field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Participant {
    pub reference_id: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: String,
}

impl Participant {
    pub fn v1(
        reference_id: impl Into<String>,
        date_of_birth: NaiveDate,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, ContractViolation> {
        let p = Self {
            reference_id: reference_id.into(),
            date_of_birth,
            phone: phone.into(),
            address: address.into(),
        };
        p.validate()?;
        Ok(p)
    }
}

pub fn validate_reference_id(value: &str) -> Result<(), ContractViolation> {
    if value.is_empty() {
        return Err(ContractViolation::InvalidValue {
            field: "participant.reference_id",
            reason: "must not be empty",
        });
    }
    Ok(())
}

// Phone and address are free text.
impl Validate for Participant {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_reference_id(&self.reference_id)
    }
}
