//! Pure domain logic for the Lancer marketplace backend.
//!
//! Nothing in this crate touches the network or the database; the `db` and
//! `api` crates depend on it for the error taxonomy, shared type aliases,
//! invoice arithmetic, assignment reconciliation, and upload validation.

pub mod error;
pub mod invoice;
pub mod reconcile;
pub mod types;
pub mod upload;
