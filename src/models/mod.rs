//! Data models for the Librato snapshot API
//!
//! Each model maps one-to-one onto a JSON object sent to or returned by the API.

pub mod snapshot;

// Re-export commonly used types for convenience
pub use snapshot::{ChartReference, ChartSnapshot, ChartSnapshotSubject};
