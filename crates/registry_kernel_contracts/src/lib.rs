#![forbid(unsafe_code)]

pub mod common;
pub mod error;
pub mod participant;

pub use common::{ApiVersion, ContractViolation, Validate};
pub use error::RegistryError;
pub use participant::Participant;
