//! Raw data appendix formatting.
//!
//! The summary is re-serialized as indented JSON, cut to its first
//! [`APPENDIX_LINE_LIMIT`] lines, and every space is swapped for a
//! non-breaking space so layout keeps the indentation. Truncation is silent.

use crate::error::Result;
use crate::types::AnalysisSummary;

/// Maximum number of serialized lines shown in the appendix
pub const APPENDIX_LINE_LIMIT: usize = 50;

/// Replacement for ' ' in appendix lines
pub const NBSP: char = '\u{a0}';

/// Serialize the summary the way the appendix shows it: two-space indent.
pub fn serialize_summary(summary: &AnalysisSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Keep the first `limit` lines and protect their spaces.
pub fn appendix_lines(serialized: &str, limit: usize) -> Vec<String> {
    serialized.lines().take(limit).map(|line| line.replace(' ', &NBSP.to_string())).collect()
}

/// Appendix lines for a summary, capped at [`APPENDIX_LINE_LIMIT`].
pub fn format_appendix(summary: &AnalysisSummary) -> Result<Vec<String>> {
    let serialized = serialize_summary(summary)?;
    Ok(appendix_lines(&serialized, APPENDIX_LINE_LIMIT))
}
