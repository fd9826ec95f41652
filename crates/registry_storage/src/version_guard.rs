#![forbid(unsafe_code)]

use registry_kernel_contracts::{ApiVersion, RegistryError};

/// Exact-match check of a request's protocol version against the single
/// version this store implements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGuard {
    implemented: ApiVersion,
}

impl VersionGuard {
    pub fn new(implemented: ApiVersion) -> Self {
        Self { implemented }
    }

    pub fn implemented(&self) -> &ApiVersion {
        &self.implemented
    }

    pub fn check(&self, requested: &str) -> Result<(), RegistryError> {
        if self.implemented.as_str() != requested {
            return Err(RegistryError::UnsupportedVersion {
                implemented: self.implemented.as_str().to_string(),
                requested: requested.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for VersionGuard {
    fn default() -> Self {
        Self::new(ApiVersion::current())
    }
}
