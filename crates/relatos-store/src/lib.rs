//! Relatos Store - Persistence ports and adapters
//!
//! This crate defines the persistence ports for reporters and reports and
//! provides JSON-file and in-memory adapter implementations.

pub mod json;
pub mod memory;
pub mod ports;

pub use json::{JsonReportStore, JsonReporterStore};
pub use memory::{MemoryReportStore, MemoryReporterStore};
pub use ports::{LoadStatus, Loaded, ReportStore, ReporterStore};
