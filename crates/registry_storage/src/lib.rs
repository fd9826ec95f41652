#![forbid(unsafe_code)]

pub mod participants;
pub mod version_guard;

pub use participants::ParticipantStore;
pub use version_guard::VersionGuard;
