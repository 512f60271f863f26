//! Error types for Relatos

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelatosError {
    // Reporter errors
    #[error("Reporter already registered with document {document}")]
    DuplicateDocument { document: String },

    #[error("Invalid reporter: {reason}")]
    InvalidReporter { reason: String },

    #[error("Reporter with document '{document}' not found")]
    ReporterNotFound { document: String },

    // Report errors
    #[error(
        "Report location is {distance_km:.2} km from the central point, outside the {radius_km} km radius"
    )]
    OutOfRadius { distance_km: f64, radius_km: f64 },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDateFormat { value: String },

    // Storage errors
    #[error("Storage file {path} is unreadable: {reason}")]
    StorageUnreadable { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RelatosError {
    /// Whether this error is a business-rule outcome rather than a system failure
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RelatosError::DuplicateDocument { .. }
                | RelatosError::InvalidReporter { .. }
                | RelatosError::ReporterNotFound { .. }
                | RelatosError::OutOfRadius { .. }
                | RelatosError::InvalidDateFormat { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RelatosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rules_are_rejections() {
        let duplicate = RelatosError::DuplicateDocument { document: "123".to_string() };
        let out_of_radius = RelatosError::OutOfRadius { distance_km: 12.5, radius_km: 10.0 };
        let io = RelatosError::Io(std::io::Error::other("disk full"));

        assert!(duplicate.is_rejection());
        assert!(out_of_radius.is_rejection());
        assert!(!io.is_rejection());
    }

    #[test]
    fn test_out_of_radius_message() {
        let err = RelatosError::OutOfRadius { distance_km: 12.345, radius_km: 10.0 };
        assert_eq!(
            err.to_string(),
            "Report location is 12.35 km from the central point, outside the 10 km radius"
        );
    }
}
