//! Relatos Registry - Reporter and report registration and lookup
//!
//! This crate owns the in-memory reporter mapping and report sequence,
//! gates new reports on distance from the central point, and answers
//! type, period and proximity queries.

pub mod registry;
pub mod reporters;
pub mod reports;

pub use registry::{Registry, StorageStatus, StoreState};
pub use reporters::ReporterBook;
pub use reports::ReportLog;
