//! Human-readable text for tracker results.
//!
//! Every tracker operation answers with plain text meant for a
//! language-driven caller. These functions are the single place where that
//! wording lives.

use crate::model::package::Package;

pub const NO_PACKAGES: &str = "No packages found.";
pub const NO_OVERDUE: &str = "No overdue packages found.";
pub const NO_DELIVERED: &str = "No packages delivered yet.";
pub const NO_TRACKED: &str = "There are no packages being tracked currently.";
pub const NOT_FOUND: &str = "Package not found.";
pub const INVALID_ETA: &str = "Invalid ETA format. Use YYYY-MM-DD.";
pub const SUMMARY_FOLLOW_UP: &str = "Are any of these delayed or need follow-up?";

const LAST_UPDATE_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn package_added(package: &Package) -> String {
    match &package.eta {
        Some(eta) => format!(
            "Added package '{}' with tracking number '{}' and ETA {eta}",
            package.name, package.tracking_number
        ),
        None => format!(
            "Added package '{}' with tracking number '{}'.",
            package.name, package.tracking_number
        ),
    }
}

pub fn status_updated(package: &Package) -> String {
    format!(
        "Status updated to '{}' for '{}'.",
        package.status, package.name
    )
}

/// One line per package with status, last-update date and optional ETA.
pub fn package_listing(packages: &[Package]) -> String {
    if packages.is_empty() {
        return NO_PACKAGES.to_string();
    }
    packages
        .iter()
        .map(|package| {
            let mut line = format!(
                "- {} ({}) — {} (Last update: {})",
                package.name,
                package.courier,
                package.status,
                package.last_updated.at().format(LAST_UPDATE_DATE_FORMAT)
            );
            push_eta(&mut line, package);
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn overdue_listing(overdue: &[Package]) -> String {
    if overdue.is_empty() {
        return NO_OVERDUE.to_string();
    }
    let lines = overdue
        .iter()
        .filter_map(|package| {
            package.eta.as_ref().map(|eta| {
                format!(
                    "- {} ({}) was due on {eta}",
                    package.name, package.courier
                )
            })
        })
        .collect::<Vec<_>>();
    format!("Overdue packages:\n{}", lines.join("\n"))
}

pub fn delivered_listing(delivered: &[Package]) -> String {
    if delivered.is_empty() {
        return NO_DELIVERED.to_string();
    }
    delivered
        .iter()
        .map(|package| format!("- {} ({})", package.name, package.courier))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Status digest followed by a follow-up question for a conversational agent.
pub fn delivery_summary(packages: &[Package]) -> String {
    if packages.is_empty() {
        return NO_TRACKED.to_string();
    }
    let summary = packages
        .iter()
        .map(|package| {
            let mut line = format!("{} ({}): {}", package.name, package.courier, package.status);
            push_eta(&mut line, package);
            line
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("Here are my packages and their statuses:\n{summary}\n\n{SUMMARY_FOLLOW_UP}")
}

fn push_eta(line: &mut String, package: &Package) {
    if let Some(eta) = &package.eta {
        line.push_str(&format!(", ETA: {eta}"));
    }
}

#[cfg(test)]
mod tests {
    use super::{delivery_summary, overdue_listing, package_added, package_listing};
    use crate::model::package::{Eta, Package, PackageStatus};
    use chrono::{NaiveDate, NaiveDateTime};

    fn package(name: &str, eta: Option<&str>) -> Package {
        let now =
            NaiveDateTime::parse_from_str("2024-06-01T09:15:30", "%Y-%m-%dT%H:%M:%S").unwrap();
        let mut package = Package::new(name, "FastShip", "TN1", now).unwrap();
        package.eta = eta.map(|value| {
            Eta::from_date(NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap())
        });
        package
    }

    #[test]
    fn listing_strips_time_of_day_and_appends_eta() {
        let text = package_listing(&[
            package("Widget", Some("2024-06-05")),
            package("Gadget", None),
        ]);
        assert_eq!(
            text,
            "- Widget (FastShip) — Not yet shipped (Last update: 2024-06-01), ETA: 2024-06-05\n\
             - Gadget (FastShip) — Not yet shipped (Last update: 2024-06-01)"
        );
    }

    #[test]
    fn added_message_mentions_eta_only_when_present() {
        assert_eq!(
            package_added(&package("Widget", None)),
            "Added package 'Widget' with tracking number 'TN1'."
        );
        assert_eq!(
            package_added(&package("Widget", Some("2024-06-05"))),
            "Added package 'Widget' with tracking number 'TN1' and ETA 2024-06-05"
        );
    }

    #[test]
    fn overdue_listing_has_header() {
        assert_eq!(
            overdue_listing(&[package("Widget", Some("2000-01-01"))]),
            "Overdue packages:\n- Widget (FastShip) was due on 2000-01-01"
        );
    }

    #[test]
    fn summary_ends_with_follow_up_question() {
        let mut delivered = package("Gadget", None);
        delivered.status = PackageStatus::parse("Delivered");
        let text = delivery_summary(&[package("Widget", Some("2024-06-05")), delivered]);
        assert_eq!(
            text,
            "Here are my packages and their statuses:\n\
             Widget (FastShip): Not yet shipped, ETA: 2024-06-05\n\
             Gadget (FastShip): Delivered\n\n\
             Are any of these delayed or need follow-up?"
        );
    }
}
