/// Core data structures for report inputs
///
/// This module defines the records handed to the engine by its collaborators:
/// the per-upload aggregate produced by the CSV aggregator, the upload history
/// kept by the history store, and the request payload that bundles them.
/// Every field defaults when absent; the engine never rejects a payload for
/// missing keys.
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-upload aggregate statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSummary {
    pub total_equipment: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    /// Equipment type label -> count. Ordered by label for display.
    pub type_distribution: BTreeMap<String, u64>,
}

/// One prior upload, as shown in the historical trends table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    /// Pre-formatted upload time, display only ("15-10-2026 14:05")
    #[serde(rename = "time", alias = "timestamp")]
    pub timestamp: String,
    pub total_equipment: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
}

impl Default for HistoryRecord {
    fn default() -> Self {
        Self {
            timestamp: "N/A".to_string(),
            total_equipment: 0,
            avg_flowrate: 0.0,
            avg_pressure: 0.0,
            avg_temperature: 0.0,
        }
    }
}

/// Request body for the detailed report: `{results, history, username}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedPayload {
    pub results: AnalysisSummary,
    pub history: Vec<HistoryRecord>,
    /// Preparer shown on the title page; falls back to the requesting identity
    pub username: Option<String>,
}

/// Title-page metadata, captured at render time
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Local>,
    pub preparer: String,
    pub product_label: String,
}

impl ReportMetadata {
    /// Resolve the preparer: the payload's name when present (even if empty), else the requester.
    pub fn new(generated_at: DateTime<Local>, preparer: Option<&str>, requester: &str, product_label: &str) -> Self {
        let preparer = preparer.unwrap_or(requester).to_string();
        Self { generated_at, preparer, product_label: product_label.to_string() }
    }

    /// "October 15, 2026 at 02:05 PM"
    pub fn generated_display(&self) -> String {
        self.generated_at.format("%B %d, %Y at %I:%M %p").to_string()
    }
}

/// Read-only view of the upload history store.
///
/// Records are ordered newest first, the way the store hands them out.
pub trait HistoryStore {
    /// Most recent upload, if any has been recorded
    fn latest(&self) -> Option<&HistoryRecord>;
}

impl HistoryStore for [HistoryRecord] {
    fn latest(&self) -> Option<&HistoryRecord> {
        self.first()
    }
}

impl HistoryStore for Vec<HistoryRecord> {
    fn latest(&self) -> Option<&HistoryRecord> {
        self.first()
    }
}

#[cfg(test)]
#[path = "data_structures_test.rs"]
mod data_structures_test;
