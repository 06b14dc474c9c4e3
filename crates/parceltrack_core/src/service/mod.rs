//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository load/save into the tracker operations.
//! - Keep tool-hosting and CLI layers decoupled from storage details.

pub mod clock;
pub mod tracker_service;
