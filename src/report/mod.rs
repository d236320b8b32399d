//! Report generation module - Document composition and format dispatch.
//!
//! This module handles:
//! - Composing the fixed-section detailed report from a summary and history
//! - Building styled tables from pre-formatted strings
//! - Derived metrics (distribution percentages, estimated peak flowrate)
//! - Truncating and escaping the raw JSON appendix
//! - The single-page quick report
//! - Dispatching a request to its variant and producing the PDF artifact
//!
//! Page placement is handled by the layout module; byte output by the pdf module.
//!
//! # Module Organization
//!
//! - `types` - Document model (RichText, Block, Section, PageFooter, Document)
//! - `table` - TableBuilder and table style presets
//! - `metrics` - Percentages, peak estimate, number formatting
//! - `appendix` - JSON appendix formatter
//! - `detailed` - Nine-section composer
//! - `quick` - Fixed-position single page
//! - `format` - ReportFormat, render boundary, filenames

mod appendix;
mod detailed;
mod format;
mod metrics;
mod quick;
mod table;
mod types;

// Re-export document model
pub use types::{Block, Document, FooterField, Inline, PageFooter, Paragraph, RichText, Section, SectionKind, Span, SpanStyle};

// Re-export table builder
pub use table::{Table, TableBuilder, TableStyle};

// Re-export metrics
pub use metrics::{
    DistributionShare, PEAK_FLOW_FACTOR, distribution_shares, estimated_peak_flowrate, fixed2, percent1, percentage,
};

// Re-export appendix formatting
pub use appendix::{APPENDIX_LINE_LIMIT, NBSP, appendix_lines, format_appendix, serialize_summary};

// Re-export composers
pub use detailed::{HISTORY_ROW_LIMIT, KEY_METRIC_STATUS, NO_DISTRIBUTION_TEXT, NO_HISTORY_TEXT, RECOMMENDATIONS, compose_detailed};
pub use quick::{QUICK_TITLE, compose_quick, quick_lines};

// Re-export the render boundary
pub use format::{
    PDF_CONTENT_TYPE, QUICK_FILENAME, RenderedReport, ReportFormat, ReportRequest, detailed_filename, render, render_at,
};
