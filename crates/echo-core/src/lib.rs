//! echo-core
//!
//! Pure domain types, identifier conventions, and document collection paths.
//! No AWS SDK dependency. This is the shared vocabulary of the Dr. Echo system.

pub mod collections;
pub mod error;
pub mod ids;
pub mod models;
