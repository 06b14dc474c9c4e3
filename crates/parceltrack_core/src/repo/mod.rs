//! Repository layer for the package store.
//!
//! # Responsibility
//! - Define the load/save contract over the full package collection.
//! - Keep file-format and recovery details out of the service layer.
//!
//! # Invariants
//! - Saves always replace the whole collection; there are no partial writes.
//! - Loads never fail on a missing or corrupt store; they heal it to `[]`
//!   and report the recovery through `StoreRecovery`.

pub mod package_repo;
