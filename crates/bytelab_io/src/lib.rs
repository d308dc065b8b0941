//! # ByteLab IO
//!
//! Persistence layer for ByteLab.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - Validated JSON helpers
//! - The on-disk lab store (properties, raw genome generations, statistics)

/// Error types and result aliases for I/O operations
pub mod error;
/// Validated serialization helpers for JSON files
pub mod serialization;
/// Append-only storage of generations for a single lab
pub mod store;

pub use error::{IoError, Result};
pub use serialization::{from_json, read_json_file, to_json, to_json_pretty, write_json_file};
pub use store::LabStore;
