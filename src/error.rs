//! Error types for report rendering.
//!
//! Missing input fields are never errors: they default silently when the
//! payload is deserialized. Everything here is either a render failure
//! (the whole document is abandoned) or the Quick variant's "no data" case.

use thiserror::Error;

/// Main error type for report generation
#[derive(Error, Debug)]
pub enum ReportError {
    /// A section, table or layout step could not be produced
    #[error("Render error: {0}")]
    Render(String),

    /// Quick report requested but the history store holds no records
    #[error("No data available: no uploads have been recorded yet")]
    NoData,

    /// Payload or appendix (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PDF object model rejected the document
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Reading inputs or writing the artifact failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReportError {
    /// True for the recoverable "nothing to report" condition.
    pub fn is_no_data(&self) -> bool {
        matches!(self, ReportError::NoData)
    }
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_is_distinct_from_render_failure() {
        assert!(ReportError::NoData.is_no_data());
        assert!(!ReportError::Render("layout".to_string()).is_no_data());
    }

    #[test]
    fn test_error_messages() {
        let err = ReportError::Render("table row has 4 cells, header has 3".to_string());
        assert_eq!(err.to_string(), "Render error: table row has 4 cells, header has 3");
        assert!(ReportError::NoData.to_string().contains("No data"));
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ReportError = json_err.into();
        assert!(matches!(err, ReportError::Json(_)));
    }
}
