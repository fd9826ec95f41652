#![forbid(unsafe_code)]

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use registry_kernel_contracts::participant::validate_reference_id;
use registry_kernel_contracts::{ApiVersion, Participant, RegistryError, Validate};

use crate::version_guard::VersionGuard;

/// In-memory participant registry.
///
/// Every check-then-act sequence runs inside a single lock acquisition, so a
/// concurrent reader never observes a half-applied create, update or delete.
/// Callers only ever receive clones of stored rows.
#[derive(Debug, Default)]
pub struct ParticipantStore {
    guard: VersionGuard,
    records: RwLock<BTreeMap<String, Participant>>,
}

impl ParticipantStore {
    pub fn new_in_memory() -> Self {
        Self::with_version(ApiVersion::current())
    }

    pub fn with_version(version: ApiVersion) -> Self {
        Self {
            guard: VersionGuard::new(version),
            records: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn version(&self) -> &ApiVersion {
        self.guard.implemented()
    }

    /// Guard check alone, for callers that must reject a request before
    /// decoding its body.
    pub fn check_version(&self, api_version: &str) -> Result<(), RegistryError> {
        self.guard.check(api_version)
    }

    pub fn create(&self, api_version: &str, record: Participant) -> Result<(), RegistryError> {
        self.guard.check(api_version)?;
        record.validate()?;

        let mut records = self.write()?;
        match records.entry(record.reference_id.clone()) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyExists {
                id: record.reference_id,
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    pub fn retrieve(
        &self,
        api_version: &str,
        reference_id: &str,
    ) -> Result<Participant, RegistryError> {
        self.guard.check(api_version)?;
        validate_reference_id(reference_id)?;

        self.read()?
            .get(reference_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                id: reference_id.to_string(),
            })
    }

    /// Full replacement of every field except the key.
    pub fn update(&self, api_version: &str, record: Participant) -> Result<(), RegistryError> {
        self.guard.check(api_version)?;
        record.validate()?;

        let mut records = self.write()?;
        if records.remove(&record.reference_id).is_none() {
            return Err(RegistryError::NotFound {
                id: record.reference_id,
            });
        }
        records.insert(record.reference_id.clone(), record);
        Ok(())
    }

    pub fn delete(&self, api_version: &str, reference_id: &str) -> Result<(), RegistryError> {
        self.guard.check(api_version)?;
        validate_reference_id(reference_id)?;

        match self.write()?.remove(reference_id) {
            Some(_) => Ok(()),
            None => Err(RegistryError::NotFound {
                id: reference_id.to_string(),
            }),
        }
    }

    pub fn len(&self) -> Result<usize, RegistryError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Participant>>, RegistryError> {
        self.records
            .read()
            .map_err(|_| RegistryError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Participant>>, RegistryError> {
        self.records
            .write()
            .map_err(|_| RegistryError::LockPoisoned)
    }
}
