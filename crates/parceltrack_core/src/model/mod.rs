//! Domain model for tracked shipments.
//!
//! # Responsibility
//! - Define the canonical package record persisted by the store.
//! - Parse status and date values once at the boundary.
//!
//! # Invariants
//! - Records are identified for updates by `tracking_number` (first match wins).
//! - Records are never deleted; only status and `last_updated` change.

pub mod package;
