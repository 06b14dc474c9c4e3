//! Core domain logic for the parcel tracker.
//! This crate owns the package record, its JSON store and the tracker
//! operations; hosting layers only translate calls and text.

pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LOG_DIR_ENV};
pub use model::package::{
    Eta, Package, PackageStatus, PackageValidationError, Timestamp, ETA_FORMAT,
};
pub use repo::package_repo::{
    InMemoryRepository, JsonFileRepository, LoadedPackages, PackageRepository, RepoError,
    RepoResult, StoreRecovery, UnreadableRecord,
};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::tracker_service::{NewPackage, PackageTracker, TrackerError, TrackerResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
