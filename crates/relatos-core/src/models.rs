pub mod coordinate;
pub mod report;
pub mod reporter;

pub use coordinate::Coordinate;
pub use report::{parse_date, Report, ReportDraft, DATE_FORMAT};
pub use reporter::{Reporter, ReporterMap, ReporterSnapshot};
