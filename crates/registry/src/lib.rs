//! The job registry: a concurrent map from job id to job record.
//!
//! Single source of truth for "is it ready". One writer per job by
//! construction (the submitter writes the initial record, that job's
//! worker writes the terminal record), arbitrarily many concurrent
//! readers.

pub mod retention;
pub mod store;

pub use store::{JobRegistry, RegistryError};
