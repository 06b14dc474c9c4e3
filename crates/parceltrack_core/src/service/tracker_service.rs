//! Package tracker use-case service.
//!
//! # Responsibility
//! - Provide the add/update/list/overdue/delivered entry points.
//! - Each call loads the full collection, applies its logic and, for
//!   mutations, saves the full collection back. No state is kept between
//!   calls.
//!
//! # Invariants
//! - Rejected mutations (bad ETA, unknown tracking number, empty fields)
//!   never reach `PackageRepository::save`.
//! - Only the first record matching a tracking number is updated.
//! - Caller text is stored and matched exactly as given; nothing is
//!   trimmed.

use crate::model::package::{Eta, Package, PackageStatus, PackageValidationError};
use crate::repo::package_repo::{LoadedPackages, PackageRepository, RepoError};
use crate::service::clock::{Clock, SystemClock};
use chrono::NaiveDate;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors surfaced by tracker operations.
#[derive(Debug)]
pub enum TrackerError {
    /// ETA input was not a `YYYY-MM-DD` date.
    InvalidEta(String),
    /// No record carries the requested tracking number.
    NotFound(String),
    Validation(PackageValidationError),
    Repo(RepoError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEta(raw) => write!(f, "invalid ETA `{raw}`; expected YYYY-MM-DD"),
            Self::NotFound(tracking_number) => {
                write!(f, "package not found: {tracking_number}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEta(_) | Self::NotFound(_) => None,
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<PackageValidationError> for TrackerError {
    fn from(value: PackageValidationError) -> Self {
        match value {
            PackageValidationError::InvalidEta(raw) => Self::InvalidEta(raw),
            other => Self::Validation(other),
        }
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::from(err),
            other => Self::Repo(other),
        }
    }
}

/// Request model for adding a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPackage {
    pub name: String,
    pub courier: String,
    pub tracking_number: String,
    /// Raw ETA text; `None` or `""` means no ETA.
    pub eta: Option<String>,
}

/// Use-case service over a package repository.
pub struct PackageTracker<R: PackageRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: PackageRepository> PackageTracker<R> {
    /// Creates a tracker reading the system local clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: PackageRepository, C: Clock> PackageTracker<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Loads the full collection together with its recovery signal.
    pub fn load_all(&self) -> TrackerResult<LoadedPackages> {
        Ok(self.repo.load()?)
    }

    /// Appends a new not-yet-shipped package.
    ///
    /// # Contract
    /// - Empty ETA is treated as absent; whitespace is an invalid ETA.
    /// - An invalid ETA aborts before any write.
    /// - Returns the stored record.
    pub fn add_package(&self, request: &NewPackage) -> TrackerResult<Package> {
        let mut contents = self.repo.load()?;

        let eta = match request.eta.as_deref() {
            Some(raw) => Eta::parse_input(raw).inspect_err(|_| {
                info!("event=package_add module=service status=rejected reason=invalid_eta");
            })?,
            None => None,
        };

        let mut package = Package::new(
            request.name.as_str(),
            request.courier.as_str(),
            request.tracking_number.as_str(),
            self.clock.now(),
        )?;
        package.eta = eta;

        contents.packages.push(package.clone());
        self.repo.save(&contents)?;
        info!(
            "event=package_add module=service status=ok count={} has_eta={}",
            contents.packages.len(),
            package.eta.is_some()
        );
        Ok(package)
    }

    /// Sets the status of the first package with `tracking_number`.
    ///
    /// Matching is exact and case-sensitive. The new status is stored as
    /// given.
    pub fn update_status(&self, tracking_number: &str, new_status: &str) -> TrackerResult<Package> {
        if new_status.is_empty() {
            return Err(TrackerError::Validation(PackageValidationError::EmptyStatus));
        }

        let mut contents = self.repo.load()?;
        let Some(package) = contents
            .packages
            .iter_mut()
            .find(|package| package.tracking_number == tracking_number)
        else {
            info!("event=status_update module=service status=not_found");
            return Err(TrackerError::NotFound(tracking_number.to_string()));
        };

        package.set_status(PackageStatus::parse(new_status), self.clock.now());
        let updated = package.clone();
        self.repo.save(&contents)?;
        info!(
            "event=status_update module=service status=ok delivered={}",
            updated.status.is_delivered()
        );
        Ok(updated)
    }

    /// Returns every package in insertion order.
    pub fn list_packages(&self) -> TrackerResult<Vec<Package>> {
        Ok(self.repo.load()?.packages)
    }

    /// Returns undelivered packages whose ETA is before the clock's today.
    pub fn overdue_packages(&self) -> TrackerResult<Vec<Package>> {
        self.overdue_packages_on(self.clock.today())
    }

    /// Returns undelivered packages whose ETA is before `today`.
    ///
    /// Unparsed ETAs are skipped silently.
    pub fn overdue_packages_on(&self, today: NaiveDate) -> TrackerResult<Vec<Package>> {
        let overdue = self
            .repo
            .load()?
            .packages
            .into_iter()
            .filter(|package| package.is_overdue_on(today))
            .collect::<Vec<_>>();
        debug!(
            "event=overdue_scan module=service status=ok overdue={}",
            overdue.len()
        );
        Ok(overdue)
    }

    /// Returns packages whose status is delivered.
    pub fn delivered_packages(&self) -> TrackerResult<Vec<Package>> {
        Ok(self
            .repo
            .load()?
            .packages
            .into_iter()
            .filter(|package| package.status.is_delivered())
            .collect())
    }
}
