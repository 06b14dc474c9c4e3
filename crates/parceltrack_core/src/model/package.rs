//! Package domain model.
//!
//! # Responsibility
//! - Define the package record and its wire shape in the JSON store.
//! - Model delivery status, ETA and update time as typed values instead of
//!   raw strings.
//!
//! # Invariants
//! - `name`, `courier`, `tracking_number` and status text are never empty.
//! - A new `eta` is always a valid `YYYY-MM-DD` calendar date.
//! - `last_updated` is refreshed on creation and on every status change.
//! - Typed values keep the exact text they were parsed from and write it
//!   back verbatim, so loading and saving never rewrites untouched fields.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Calendar format accepted for ETA input and used on the wire.
pub const ETA_FORMAT: &str = "%Y-%m-%d";

const LAST_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const LAST_UPDATED_SPACED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const NOT_YET_SHIPPED: &str = "Not yet shipped";

/// Delivery state of a package.
///
/// Serialized as the plain status text so the store stays readable and
/// compatible with free-form statuses written by other tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageStatus {
    /// Default for newly added packages.
    #[default]
    NotYetShipped,
    /// Terminal state. Holds the caller's spelling of "delivered" in any case.
    Delivered(String),
    /// Any other courier-reported status, kept verbatim.
    Other(String),
}

impl PackageStatus {
    /// Parses user or store text into a status.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("delivered") {
            Self::Delivered(value.to_string())
        } else if value == NOT_YET_SHIPPED {
            Self::NotYetShipped
        } else {
            Self::Other(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NotYetShipped => NOT_YET_SHIPPED,
            Self::Delivered(text) | Self::Other(text) => text.as_str(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

impl Display for PackageStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PackageStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PackageStatus> for String {
    fn from(value: PackageStatus) -> Self {
        match value {
            PackageStatus::NotYetShipped => NOT_YET_SHIPPED.to_string(),
            PackageStatus::Delivered(text) | PackageStatus::Other(text) => text,
        }
    }
}

/// Expected delivery date.
///
/// `Unparsed` only comes from stores edited outside this crate; it is
/// preserved on save and ignored by the overdue check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Eta {
    /// Valid date together with the text it was written as.
    Date { date: NaiveDate, raw: String },
    Unparsed(String),
}

impl Eta {
    /// Validates caller input.
    ///
    /// Only the empty string means "no ETA" and returns `Ok(None)`.
    ///
    /// # Errors
    /// - Returns `InvalidEta` when the text is not a `YYYY-MM-DD` date,
    ///   including whitespace-only text.
    pub fn parse_input(raw: &str) -> Result<Option<Self>, PackageValidationError> {
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, ETA_FORMAT)
            .map(|date| {
                Some(Self::Date {
                    date,
                    raw: raw.to_string(),
                })
            })
            .map_err(|_| PackageValidationError::InvalidEta(raw.to_string()))
    }

    /// Builds a date ETA written in canonical `YYYY-MM-DD` form.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date {
            date,
            raw: date.format(ETA_FORMAT).to_string(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date { date, .. } => Some(*date),
            Self::Unparsed(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Date { raw, .. } | Self::Unparsed(raw) => raw.as_str(),
        }
    }
}

impl Display for Eta {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Eta {
    fn from(value: String) -> Self {
        match NaiveDate::parse_from_str(&value, ETA_FORMAT) {
            Ok(date) => Self::Date { date, raw: value },
            Err(_) => Self::Unparsed(value),
        }
    }
}

impl From<Eta> for String {
    fn from(value: Eta) -> Self {
        match value {
            Eta::Date { raw, .. } | Eta::Unparsed(raw) => raw,
        }
    }
}

/// Local wall-clock time of a record's last mutation.
///
/// Accepts `T`- or space-separated ISO-8601 text and RFC 3339 with an
/// offset; serializes back to the text it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    at: NaiveDateTime,
    raw: String,
}

impl Timestamp {
    /// Stamps `at` in the store's canonical ISO-8601 form.
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            at,
            raw: at.format(LAST_UPDATED_FORMAT).to_string(),
        }
    }

    pub fn at(&self) -> NaiveDateTime {
        self.at
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl TryFrom<String> for Timestamp {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let at = NaiveDateTime::parse_from_str(&raw, LAST_UPDATED_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, LAST_UPDATED_SPACED_FORMAT))
            .or_else(|_| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|value| value.with_timezone(&Local).naive_local())
            })
            .map_err(|_| format!("invalid last_updated `{raw}`"))?;
        Ok(Self { at, raw })
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.raw
    }
}

/// Validation errors for package records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageValidationError {
    EmptyName,
    EmptyCourier,
    EmptyTrackingNumber,
    EmptyStatus,
    InvalidEta(String),
}

impl Display for PackageValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "package name cannot be empty"),
            Self::EmptyCourier => write!(f, "courier cannot be empty"),
            Self::EmptyTrackingNumber => write!(f, "tracking number cannot be empty"),
            Self::EmptyStatus => write!(f, "status cannot be empty"),
            Self::InvalidEta(raw) => {
                write!(f, "invalid ETA `{raw}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for PackageValidationError {}

/// Canonical record stored in the package file.
///
/// Field order matches the persisted JSON objects; `eta` is omitted
/// entirely when unset rather than written as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub courier: String,
    /// Lookup key for status updates. Not enforced unique.
    pub tracking_number: String,
    pub status: PackageStatus,
    pub last_updated: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<Eta>,
}

impl Package {
    /// Creates a not-yet-shipped package stamped with `now`.
    ///
    /// Fields are stored exactly as given.
    ///
    /// # Errors
    /// - Returns a validation error when a required field is empty.
    pub fn new(
        name: impl Into<String>,
        courier: impl Into<String>,
        tracking_number: impl Into<String>,
        now: NaiveDateTime,
    ) -> Result<Self, PackageValidationError> {
        let package = Self {
            name: name.into(),
            courier: courier.into(),
            tracking_number: tracking_number.into(),
            status: PackageStatus::NotYetShipped,
            last_updated: Timestamp::new(now),
            eta: None,
        };
        package.validate()?;
        Ok(package)
    }

    /// Replaces status and refreshes `last_updated`.
    pub fn set_status(&mut self, status: PackageStatus, now: NaiveDateTime) {
        self.status = status;
        self.last_updated = Timestamp::new(now);
    }

    /// Returns whether the package is undelivered with an ETA before `today`.
    ///
    /// Packages with an unparsed ETA are never overdue.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        if self.status.is_delivered() {
            return false;
        }
        self.eta
            .as_ref()
            .and_then(Eta::date)
            .is_some_and(|due| due < today)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), PackageValidationError> {
        if self.name.is_empty() {
            return Err(PackageValidationError::EmptyName);
        }
        if self.courier.is_empty() {
            return Err(PackageValidationError::EmptyCourier);
        }
        if self.tracking_number.is_empty() {
            return Err(PackageValidationError::EmptyTrackingNumber);
        }
        if self.status.as_str().is_empty() {
            return Err(PackageValidationError::EmptyStatus);
        }
        Ok(())
    }
}
