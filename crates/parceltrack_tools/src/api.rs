//! Text-returning tracker operations for tool hosts.
//!
//! # Responsibility
//! - Expose the six tracker operations as plain functions returning text.
//! - Dispatch host calls by tool name with JSON arguments.
//!
//! # Invariants
//! - Operations never panic and never return structured errors; every
//!   outcome, including storage failures, becomes a human-readable string.
//! - Each call opens the store fresh; nothing is cached between calls.

use crate::catalog::DELIVERED_RESOURCE_URI;
use crate::config::resolve_store_path;
use log::warn;
use parceltrack_core::report;
use parceltrack_core::{
    JsonFileRepository, NewPackage, PackageTracker, StoreRecovery, TrackerError,
};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Host-facing error for malformed `invoke` calls.
///
/// Tracker outcomes are never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    UnknownTool(String),
    MissingArgument(&'static str),
    InvalidArgument { name: &'static str, reason: String },
}

impl Display for InvokeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTool(name) => write!(f, "unknown tool `{name}`"),
            Self::MissingArgument(name) => write!(f, "missing required argument `{name}`"),
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument `{name}`: {reason}")
            }
        }
    }
}

impl Error for InvokeError {}

/// Tracker operations bound to one store file.
#[derive(Debug, Clone)]
pub struct PackageTools {
    store_path: PathBuf,
}

impl PackageTools {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    /// Uses `PARCELTRACK_STORE_PATH` or the default store file.
    pub fn from_env() -> Self {
        Self::new(resolve_store_path(None))
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Adds a package. Empty or absent `eta` means no ETA.
    pub fn add_package(
        &self,
        name: &str,
        courier: &str,
        tracking_number: &str,
        eta: Option<&str>,
    ) -> String {
        let request = NewPackage {
            name: name.to_string(),
            courier: courier.to_string(),
            tracking_number: tracking_number.to_string(),
            eta: eta.map(str::to_string),
        };
        match self.tracker().add_package(&request) {
            Ok(package) => report::package_added(&package),
            Err(err) => describe_error(&err),
        }
    }

    pub fn update_status(&self, tracking_number: &str, new_status: &str) -> String {
        match self.tracker().update_status(tracking_number, new_status) {
            Ok(package) => report::status_updated(&package),
            Err(err) => describe_error(&err),
        }
    }

    pub fn list_all_packages(&self) -> String {
        match self.tracker().load_all() {
            Ok(loaded) => {
                note_recovery(&loaded.recovery);
                report::package_listing(&loaded.packages)
            }
            Err(err) => describe_error(&err),
        }
    }

    pub fn check_overdue_packages(&self) -> String {
        match self.tracker().overdue_packages() {
            Ok(overdue) => report::overdue_listing(&overdue),
            Err(err) => describe_error(&err),
        }
    }

    /// Content of the `packages://delivered` resource.
    pub fn delivered_packages(&self) -> String {
        match self.tracker().delivered_packages() {
            Ok(delivered) => report::delivered_listing(&delivered),
            Err(err) => describe_error(&err),
        }
    }

    /// Prompt text summarizing every package for a downstream agent.
    pub fn delivery_summary_prompt(&self) -> String {
        match self.tracker().list_packages() {
            Ok(packages) => report::delivery_summary(&packages),
            Err(err) => describe_error(&err),
        }
    }

    /// Dispatches a host call by tool name, resource URI or prompt name.
    ///
    /// # Errors
    /// - `UnknownTool` when `name` is not in the catalog.
    /// - `MissingArgument` / `InvalidArgument` for malformed `args`.
    pub fn invoke(&self, name: &str, args: &Value) -> Result<String, InvokeError> {
        match name {
            "add_package" => Ok(self.add_package(
                required_str(args, "name")?,
                required_str(args, "courier")?,
                required_str(args, "tracking_number")?,
                optional_str(args, "eta")?,
            )),
            "update_status" => Ok(self.update_status(
                required_str(args, "tracking_number")?,
                required_str(args, "new_status")?,
            )),
            "list_all_packages" => Ok(self.list_all_packages()),
            "check_overdue_packages" => Ok(self.check_overdue_packages()),
            DELIVERED_RESOURCE_URI | "delivered_packages" => Ok(self.delivered_packages()),
            "delivery_summary_prompt" => Ok(self.delivery_summary_prompt()),
            other => Err(InvokeError::UnknownTool(other.to_string())),
        }
    }

    fn tracker(&self) -> PackageTracker<JsonFileRepository> {
        PackageTracker::new(JsonFileRepository::new(&self.store_path))
    }
}

fn describe_error(err: &TrackerError) -> String {
    match err {
        TrackerError::InvalidEta(_) => report::INVALID_ETA.to_string(),
        TrackerError::NotFound(_) => report::NOT_FOUND.to_string(),
        TrackerError::Validation(err) => format!("Invalid input: {err}."),
        TrackerError::Repo(err) => {
            warn!("event=tool_call module=tools status=error error_code=storage");
            format!("Storage error: {err}")
        }
    }
}

fn note_recovery(recovery: &StoreRecovery) {
    if let StoreRecovery::ResetCorrupt { .. } = recovery {
        warn!("event=tool_call module=tools status=warn store=reset_corrupt");
    }
}

fn required_str<'a>(args: &'a Value, name: &'static str) -> Result<&'a str, InvokeError> {
    optional_str(args, name)?.ok_or(InvokeError::MissingArgument(name))
}

fn optional_str<'a>(args: &'a Value, name: &'static str) -> Result<Option<&'a str>, InvokeError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(InvokeError::InvalidArgument {
            name,
            reason: format!("expected string, got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{InvokeError, PackageTools};
    use parceltrack_core::report;
    use serde_json::json;
    use std::fs;

    fn tools() -> (tempfile::TempDir, PackageTools) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let tools = PackageTools::new(dir.path().join("packages.json"));
        (dir, tools)
    }

    #[test]
    fn empty_store_messages() {
        let (_dir, tools) = tools();
        assert_eq!(tools.list_all_packages(), "No packages found.");
        assert_eq!(tools.check_overdue_packages(), "No overdue packages found.");
        assert_eq!(tools.delivered_packages(), "No packages delivered yet.");
        assert_eq!(
            tools.delivery_summary_prompt(),
            "There are no packages being tracked currently."
        );
    }

    #[test]
    fn add_reports_eta_and_format_errors() {
        let (_dir, tools) = tools();
        assert_eq!(
            tools.add_package("Widget", "FastShip", "TN1", Some("2030-01-02")),
            "Added package 'Widget' with tracking number 'TN1' and ETA 2030-01-02"
        );
        assert_eq!(
            tools.add_package("Gadget", "FastShip", "TN2", Some("2024-13-01")),
            "Invalid ETA format. Use YYYY-MM-DD."
        );
        assert!(!tools.list_all_packages().contains("Gadget"));
    }

    #[test]
    fn update_reports_confirmation_and_not_found() {
        let (_dir, tools) = tools();
        tools.add_package("Widget", "FastShip", "TN1", None);
        assert_eq!(
            tools.update_status("TN1", "In transit"),
            "Status updated to 'In transit' for 'Widget'."
        );
        assert_eq!(tools.update_status("TN9", "Lost"), "Package not found.");
        assert_eq!(
            tools.update_status("TN1", "delivered"),
            "Status updated to 'delivered' for 'Widget'."
        );
        assert_eq!(tools.update_status(" TN1 ", "Lost"), "Package not found.");
    }

    #[test]
    fn empty_required_field_is_reported_not_stored() {
        let (_dir, tools) = tools();
        let message = tools.add_package("", "FastShip", "TN1", None);
        assert!(message.starts_with("Invalid input:"), "{message}");
        assert_eq!(tools.list_all_packages(), report::NO_PACKAGES);
    }

    #[test]
    fn end_to_end_overdue_then_delivered() {
        let (_dir, tools) = tools();
        tools.add_package("Widget", "FastShip", "TN123", Some("2000-01-01"));

        let overdue = tools.check_overdue_packages();
        assert!(overdue.starts_with("Overdue packages:\n"), "{overdue}");
        assert!(overdue.contains("- Widget (FastShip) was due on 2000-01-01"));

        tools.update_status("TN123", "Delivered");
        assert_eq!(tools.check_overdue_packages(), "No overdue packages found.");
        assert!(tools.delivered_packages().contains("- Widget (FastShip)"));

        let summary = tools.delivery_summary_prompt();
        assert!(summary.contains("Widget (FastShip): Delivered, ETA: 2000-01-01"));
        assert!(summary.ends_with("Are any of these delayed or need follow-up?"));
    }

    #[test]
    fn corrupt_store_lists_empty_and_is_rewritten() {
        let (_dir, tools) = tools();
        fs::write(tools.store_path(), "not json").unwrap();
        assert_eq!(tools.delivered_packages(), "No packages delivered yet.");
        assert_eq!(fs::read_to_string(tools.store_path()).unwrap(), "[]");
    }

    #[test]
    fn invoke_dispatches_by_name_and_uri() {
        let (_dir, tools) = tools();
        let added = tools
            .invoke(
                "add_package",
                &json!({
                    "name": "Widget",
                    "courier": "FastShip",
                    "tracking_number": "TN1",
                    "eta": null
                }),
            )
            .unwrap();
        assert_eq!(added, "Added package 'Widget' with tracking number 'TN1'.");

        tools
            .invoke(
                "update_status",
                &json!({"tracking_number": "TN1", "new_status": "delivered"}),
            )
            .unwrap();
        assert_eq!(
            tools.invoke("packages://delivered", &json!({})).unwrap(),
            "- Widget (FastShip)"
        );
    }

    #[test]
    fn invoke_rejects_malformed_calls() {
        let (_dir, tools) = tools();
        assert_eq!(
            tools.invoke("delete_package", &json!({})).unwrap_err(),
            InvokeError::UnknownTool("delete_package".to_string())
        );
        assert_eq!(
            tools
                .invoke("update_status", &json!({"tracking_number": "TN1"}))
                .unwrap_err(),
            InvokeError::MissingArgument("new_status")
        );
        assert!(matches!(
            tools.invoke("add_package", &json!({"name": 7})).unwrap_err(),
            InvokeError::InvalidArgument { name: "name", .. }
        ));
    }
}
