//! Quick report: one page, fixed positions, latest upload only.
//!
//! Bypasses the section composer and the flow layout entirely; the lines are
//! placed directly as draw operations and handed to the PDF writer.

use super::metrics::fixed2;
use crate::error::{ReportError, Result};
use crate::fonts::Font;
use crate::layout::{DrawOp, LaidOutDocument, Page, PageGeometry};
use crate::style::Palette;
use crate::types::{HistoryRecord, HistoryStore};
use log::debug;

pub const QUICK_TITLE: &str = "ChemViz Equipment Report";

const LEFT: f32 = 72.0;
const TITLE_BASELINE: f32 = 750.0;
const TITLE_SIZE: f32 = 16.0;
const LINE_SIZE: f32 = 12.0;
const LINE_STEP: f32 = 30.0;

/// Lay out the quick report from the newest record in `store`.
///
/// Returns [`ReportError::NoData`] when nothing has been uploaded yet.
pub fn compose_quick<S>(store: &S, geometry: &PageGeometry) -> Result<LaidOutDocument>
where
    S: HistoryStore + ?Sized,
{
    let record = store.latest().ok_or(ReportError::NoData)?;
    debug!("Composing quick report from upload at {}", record.timestamp);

    let mut ops = vec![text(TITLE_BASELINE, Font::HelveticaBold, TITLE_SIZE, QUICK_TITLE.to_string())];
    for (i, line) in quick_lines(record).into_iter().enumerate() {
        let y = TITLE_BASELINE - LINE_STEP * (i + 1) as f32;
        ops.push(text(y, Font::Helvetica, LINE_SIZE, line));
    }

    Ok(LaidOutDocument {
        title: QUICK_TITLE.to_string(),
        geometry: geometry.clone(),
        pages: vec![Page { number: 1, ops }],
    })
}

/// Body lines under the title, top to bottom
pub fn quick_lines(record: &HistoryRecord) -> Vec<String> {
    vec![
        format!("Uploaded: {}", record.timestamp),
        format!("Total Equipment: {}", record.total_equipment),
        format!("Average Flowrate: {}", fixed2(record.avg_flowrate)),
        format!("Average Pressure: {}", fixed2(record.avg_pressure)),
        format!("Average Temperature: {}", fixed2(record.avg_temperature)),
    ]
}

fn text(y: f32, font: Font, size: f32, text: String) -> DrawOp {
    DrawOp::Text { x: LEFT, y, font, size, color: Palette::BLACK, text }
}
