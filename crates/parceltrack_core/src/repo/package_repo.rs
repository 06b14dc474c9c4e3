//! Package repository contracts and JSON file implementation.
//!
//! # Responsibility
//! - Load and persist the ordered package collection.
//! - Heal missing or non-array store files by resetting them to `[]`.
//!
//! # Invariants
//! - Every record in `LoadedPackages::packages` has passed
//!   `Package::validate()`. Array entries that fail are kept aside as
//!   `UnreadableRecord`s and written back unchanged; one bad record never
//!   discards the others.
//! - Every saved record has passed `Package::validate()` before any bytes
//!   are written.
//! - File saves are write-to-temp then rename, so readers never observe a
//!   half-written store. There is no locking: concurrent writers race and
//!   the last save wins.

use crate::model::package::{Package, PackageValidationError};
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for store I/O and encoding failures.
///
/// Corruption is not an error here; it is healed and reported through
/// [`StoreRecovery`].
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: std::io::Error },
    Serialize(serde_json::Error),
    Validation(PackageValidationError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "package store `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode packages: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<PackageValidationError> for RepoError {
    fn from(value: PackageValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// How a load obtained its collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRecovery {
    /// Store existed and was a JSON array.
    Clean,
    /// Store did not exist and was created empty.
    Initialized,
    /// Store was not a JSON array and was overwritten with `[]`.
    ResetCorrupt { reason: String },
}

/// Array entry that could not be read as a package.
///
/// Kept verbatim and written back at its original position on save.
#[derive(Debug, Clone, PartialEq)]
pub struct UnreadableRecord {
    /// Position in the stored array.
    pub index: usize,
    pub raw: Value,
    pub reason: String,
}

/// Full store contents as loaded, and as handed back for saving.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPackages {
    /// Readable records in insertion order.
    pub packages: Vec<Package>,
    /// Records skipped by queries but preserved in the store.
    pub unreadable: Vec<UnreadableRecord>,
    pub recovery: StoreRecovery,
}

impl LoadedPackages {
    pub fn clean(packages: Vec<Package>) -> Self {
        Self {
            packages,
            unreadable: Vec::new(),
            recovery: StoreRecovery::Clean,
        }
    }

    fn empty(recovery: StoreRecovery) -> Self {
        Self {
            packages: Vec::new(),
            unreadable: Vec::new(),
            recovery,
        }
    }

    /// Interleaves unreadable records back at their original positions.
    fn records(&self) -> Vec<StoreRecord<'_>> {
        let mut records = self
            .packages
            .iter()
            .map(StoreRecord::Package)
            .collect::<Vec<_>>();
        let mut unreadable = self.unreadable.iter().collect::<Vec<_>>();
        unreadable.sort_by_key(|record| record.index);
        for record in unreadable {
            let at = record.index.min(records.len());
            records.insert(at, StoreRecord::Raw(&record.raw));
        }
        records
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum StoreRecord<'a> {
    Package(&'a Package),
    Raw(&'a Value),
}

/// Repository interface over the whole package collection.
///
/// Callers save the value they loaded, so records they cannot read are
/// carried through unchanged.
pub trait PackageRepository {
    fn load(&self) -> RepoResult<LoadedPackages>;
    fn save(&self, contents: &LoadedPackages) -> RepoResult<()>;
}

/// JSON-file-backed package repository.
///
/// The file holds a pretty-printed JSON array of package objects.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn write_atomically(&self, contents: &str) -> RepoResult<()> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(&dir).map_err(|err| self.io_error(err))?;

        let mut staged = NamedTempFile::new_in(&dir).map_err(|err| self.io_error(err))?;
        staged
            .write_all(contents.as_bytes())
            .map_err(|err| self.io_error(err))?;
        staged.flush().map_err(|err| self.io_error(err))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }

    fn reset(&self) -> RepoResult<()> {
        self.write_atomically("[]")
    }
}

impl PackageRepository for JsonFileRepository {
    fn load(&self) -> RepoResult<LoadedPackages> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.reset()?;
                info!("event=store_init module=repo status=ok");
                return Ok(LoadedPackages::empty(StoreRecovery::Initialized));
            }
            Err(err) => {
                error!("event=store_load module=repo status=error error={err}");
                return Err(self.io_error(err));
            }
        };

        match serde_json::from_str::<Vec<Value>>(&contents) {
            Ok(entries) => {
                let loaded = decode_entries(entries);
                if !loaded.unreadable.is_empty() {
                    warn!(
                        "event=store_load module=repo status=warn unreadable={}",
                        loaded.unreadable.len()
                    );
                }
                debug!(
                    "event=store_load module=repo status=ok count={}",
                    loaded.packages.len()
                );
                Ok(loaded)
            }
            Err(err) => {
                let reason = format!("not a JSON array: {err}");
                self.reset()?;
                warn!("event=store_heal module=repo status=warn reason={reason}");
                Ok(LoadedPackages::empty(StoreRecovery::ResetCorrupt {
                    reason,
                }))
            }
        }
    }

    fn save(&self, contents: &LoadedPackages) -> RepoResult<()> {
        for package in &contents.packages {
            package.validate()?;
        }
        let encoded = serde_json::to_string_pretty(&contents.records())?;
        self.write_atomically(&encoded)?;
        debug!(
            "event=store_save module=repo status=ok count={} unreadable={}",
            contents.packages.len(),
            contents.unreadable.len()
        );
        Ok(())
    }
}

/// In-memory package repository for tests and embedding.
///
/// Tracks the number of saves so callers can assert that rejected
/// operations performed no write.
#[derive(Debug)]
pub struct InMemoryRepository {
    contents: RefCell<LoadedPackages>,
    saves: Cell<usize>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::with_packages(Vec::new())
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packages(packages: Vec<Package>) -> Self {
        Self {
            contents: RefCell::new(LoadedPackages::clean(packages)),
            saves: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> Vec<Package> {
        self.contents.borrow().packages.clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl PackageRepository for InMemoryRepository {
    fn load(&self) -> RepoResult<LoadedPackages> {
        Ok(self.contents.borrow().clone())
    }

    fn save(&self, contents: &LoadedPackages) -> RepoResult<()> {
        for package in &contents.packages {
            package.validate()?;
        }
        let mut stored = contents.clone();
        stored.recovery = StoreRecovery::Clean;
        *self.contents.borrow_mut() = stored;
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<R: PackageRepository + ?Sized> PackageRepository for &R {
    fn load(&self) -> RepoResult<LoadedPackages> {
        (**self).load()
    }

    fn save(&self, contents: &LoadedPackages) -> RepoResult<()> {
        (**self).save(contents)
    }
}

fn decode_entries(entries: Vec<Value>) -> LoadedPackages {
    let mut loaded = LoadedPackages::clean(Vec::new());
    for (index, raw) in entries.into_iter().enumerate() {
        let decoded = serde_json::from_value::<Package>(raw.clone())
            .map_err(|err| err.to_string())
            .and_then(|package| {
                package.validate().map_err(|err| err.to_string())?;
                Ok(package)
            });
        match decoded {
            Ok(package) => loaded.packages.push(package),
            Err(reason) => loaded.unreadable.push(UnreadableRecord { index, raw, reason }),
        }
    }
    loaded
}
