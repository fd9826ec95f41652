#![forbid(unsafe_code)]

use thiserror::Error;

use crate::ContractViolation;

/// Typed failures returned by the registry to its immediate caller.
///
/// Every variant is a pure function of the request and the current store
/// state; none of them leaves the store partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(
        "unsupported API version requested: current service implements version '{implemented}', but version '{requested}' was requested"
    )]
    UnsupportedVersion {
        implemented: String,
        requested: String,
    },

    #[error("reference number in use: participant already exists in the registry for {id}")]
    AlreadyExists { id: String },

    #[error("reference number not found: no participant entry exists in the registry for {id}")]
    NotFound { id: String },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A writer panicked inside its critical section.
    #[error("participant store lock poisoned")]
    LockPoisoned,
}

impl RegistryError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        RegistryError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl From<ContractViolation> for RegistryError {
    fn from(v: ContractViolation) -> Self {
        RegistryError::InvalidArgument {
            reason: v.to_string(),
        }
    }
}
