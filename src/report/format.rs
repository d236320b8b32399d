//! Format dispatch and the outermost error boundary.
//!
//! Every render, detailed or quick, goes through [`render`]. Failures are
//! logged here once with full detail and returned to the caller; no partial
//! document ever escapes.

use super::detailed::compose_detailed;
use super::quick::compose_quick;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::layout::{LaidOutDocument, layout_document};
use crate::pdf::write_pdf;
use crate::types::{AnalysisSummary, HistoryRecord, ReportMetadata};
use chrono::{DateTime, Local};
use log::{error, info};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Filename of every quick report
pub const QUICK_FILENAME: &str = "report.pdf";

/// The supported report variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Multi-section paginated analysis
    Detailed,
    /// Single page from the latest upload
    Quick,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Detailed => "detailed",
            ReportFormat::Quick => "quick",
        }
    }
}

/// Inputs for one render
#[derive(Debug, Clone, Copy)]
pub enum ReportRequest<'a> {
    Detailed {
        summary: &'a AnalysisSummary,
        /// Caller order is kept; only the first rows are shown
        history: &'a [HistoryRecord],
        /// Falls back to the requester when absent
        preparer: Option<&'a str>,
    },
    Quick {
        /// Newest first
        history: &'a [HistoryRecord],
    },
}

impl ReportRequest<'_> {
    pub fn format(&self) -> ReportFormat {
        match self {
            ReportRequest::Detailed { .. } => ReportFormat::Detailed,
            ReportRequest::Quick { .. } => ReportFormat::Quick,
        }
    }
}

/// A finished artifact ready for download or archival
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
    pub page_count: usize,
}

impl RenderedReport {
    /// Value for a `Content-Disposition` response header
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Render a report stamped with the current local time.
pub fn render(request: ReportRequest<'_>, requester: &str, config: &ReportConfig) -> Result<RenderedReport> {
    render_at(request, requester, config, Local::now())
}

/// Render a report as of `now`, which drives both the "Generated" line and
/// the filename.
pub fn render_at(
    request: ReportRequest<'_>,
    requester: &str,
    config: &ReportConfig,
    now: DateTime<Local>,
) -> Result<RenderedReport> {
    let format = request.format();
    match render_inner(request, requester, config, now) {
        Ok(report) => {
            info!(
                "Rendered {} report '{}': {} pages, {} bytes",
                format.as_str(),
                report.filename,
                report.page_count,
                report.bytes.len()
            );
            Ok(report)
        }
        Err(e) if e.is_no_data() => {
            info!("No {} report produced: {}", format.as_str(), e);
            Err(e)
        }
        Err(e) => {
            error!("Failed to render {} report for '{}': {:?}", format.as_str(), requester, e);
            Err(e)
        }
    }
}

fn render_inner(
    request: ReportRequest<'_>,
    requester: &str,
    config: &ReportConfig,
    now: DateTime<Local>,
) -> Result<RenderedReport> {
    config.validate()?;

    let (laid, filename): (LaidOutDocument, String) = match request {
        ReportRequest::Detailed { summary, history, preparer } => {
            let meta = ReportMetadata::new(now, preparer, requester, &config.version_label);
            let doc = compose_detailed(summary, history, &meta, config)?;
            (layout_document(&doc, &config.page)?, detailed_filename(&config.filename_prefix, now))
        }
        ReportRequest::Quick { history } => (compose_quick(history, &config.page)?, QUICK_FILENAME.to_string()),
    };

    let bytes = write_pdf(&laid)?;
    Ok(RenderedReport { bytes, filename, content_type: PDF_CONTENT_TYPE, page_count: laid.page_count() })
}

/// `<prefix>_<YYYYMMDD>_<HHMMSS>.pdf`
pub fn detailed_filename(prefix: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.pdf", prefix, at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 4, 14, 5, 9).unwrap()
    }

    #[test]
    fn test_detailed_filename() {
        assert_eq!(detailed_filename("ChemViz_Report", at()), "ChemViz_Report_20260304_140509.pdf");
    }

    #[test]
    fn test_content_disposition() {
        let report = RenderedReport {
            bytes: vec![],
            filename: "report.pdf".to_string(),
            content_type: PDF_CONTENT_TYPE,
            page_count: 1,
        };
        assert_eq!(report.content_disposition(), "attachment; filename=\"report.pdf\"");
    }

    #[test]
    fn test_request_format() {
        let summary = AnalysisSummary::default();
        let detailed = ReportRequest::Detailed { summary: &summary, history: &[], preparer: None };
        assert_eq!(detailed.format(), ReportFormat::Detailed);
        assert_eq!(ReportRequest::Quick { history: &[] }.format(), ReportFormat::Quick);
    }

    #[test]
    fn test_render_detailed_empty_inputs() {
        let summary = AnalysisSummary::default();
        let request = ReportRequest::Detailed { summary: &summary, history: &[], preparer: None };
        let report = render_at(request, "operator", &ReportConfig::default(), at()).unwrap();

        assert!(report.bytes.starts_with(b"%PDF-"));
        assert_eq!(report.content_type, "application/pdf");
        assert_eq!(report.filename, "ChemViz_Report_20260304_140509.pdf");
        assert!(report.page_count >= 3);
    }

    #[test]
    fn test_render_quick_without_history_is_no_data() {
        let err = render(ReportRequest::Quick { history: &[] }, "operator", &ReportConfig::default()).unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_render_quick_filename() {
        let history = vec![HistoryRecord::default()];
        let report = render(ReportRequest::Quick { history: &history }, "operator", &ReportConfig::default()).unwrap();
        assert_eq!(report.filename, "report.pdf");
        assert_eq!(report.page_count, 1);
    }

    #[test]
    fn test_invalid_config_fails_render() {
        let config = ReportConfig { filename_prefix: String::new(), ..ReportConfig::default() };
        let history = vec![HistoryRecord::default()];
        assert!(render(ReportRequest::Quick { history: &history }, "operator", &config).is_err());
    }
}
