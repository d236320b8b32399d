//! Detailed report composition.
//!
//! Builds the fixed nine-section document from a summary and a history
//! window. Sections and page breaks never move; only the data inside them
//! varies. All string formatting happens here, never in the table builder.

use super::appendix::format_appendix;
use super::metrics::{distribution_shares, estimated_peak_flowrate, fixed2, percent1};
use super::table::{TableBuilder, TableStyle};
use super::types::{Block, Document, PageFooter, RichText, Section, SectionKind};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::layout::INCH;
use crate::style::StyleName;
use crate::types::{AnalysisSummary, HistoryRecord, ReportMetadata};
use log::debug;

/// Maximum history rows shown in the trends table
pub const HISTORY_ROW_LIMIT: usize = 10;

/// Status column of the key metrics table. Presentation constants, not thresholds.
pub const KEY_METRIC_STATUS: [&str; 4] = ["✓ Operational", "↑ Stable", "→ Normal", "✓ Optimal"];

pub const NO_DISTRIBUTION_TEXT: &str = "No equipment distribution data available.";
pub const NO_HISTORY_TEXT: &str = "No historical data available for trend analysis.";

pub const RECOMMENDATIONS: [&str; 5] = [
    "Continue regular monitoring of all equipment metrics to establish baseline performance patterns",
    "Schedule preventive maintenance based on flowrate and temperature trend analysis",
    "Implement automated alerts for metrics falling outside normal operating ranges",
    "Review equipment with consistently high temperature readings for potential cooling system improvements",
    "Maintain detailed logs of all maintenance activities for correlation with performance data",
];

const END_OF_REPORT: &str = "—— End of Report ——";
const PORTAL_BYLINE: &str = "ChemViz Systems • Industrial Equipment Analytics Portal";

/// Compose the detailed report.
///
/// The summary and history are only read. Any failure aborts the whole
/// document; there is no per-section recovery.
pub fn compose_detailed(
    summary: &AnalysisSummary,
    history: &[HistoryRecord],
    meta: &ReportMetadata,
    config: &ReportConfig,
) -> Result<Document> {
    let sections = vec![
        title_page(meta, config),
        executive_summary(summary),
        key_metrics(summary)?,
        distribution(summary)?,
        technical_analysis(summary),
        historical_trends(history)?,
        recommendations(),
        raw_data_appendix(summary)?,
        closing(),
    ];

    debug!(
        "Composed detailed report: {} sections, {} blocks",
        sections.len(),
        sections.iter().map(|s| s.blocks.len()).sum::<usize>()
    );

    Ok(Document {
        title: format!("{} {}", config.product_name, config.subtitle),
        sections,
        footer: if config.page_numbers { Some(PageFooter::page_numbers()) } else { None },
    })
}

fn heading(section: &mut Section, text: &str) {
    section.paragraph(StyleName::SectionHeading, RichText::plain(text));
}

fn body(section: &mut Section, content: RichText) {
    section.paragraph(StyleName::Body, content);
}

fn title_page(meta: &ReportMetadata, config: &ReportConfig) -> Section {
    let mut section = Section::new(SectionKind::TitlePage);
    section.spacer(50.0);
    section.push(Block::Emblem(StyleName::Emblem));
    section.spacer(20.0);
    section.paragraph(StyleName::Title, RichText::plain(&config.product_name));
    section.paragraph(StyleName::Subtitle, RichText::plain(&config.subtitle));
    section.spacer(30.0);
    section.paragraph(
        StyleName::Metadata,
        RichText::new()
            .strong("Generated:")
            .text(format!(" {}", meta.generated_display()))
            .line_break()
            .strong("Prepared by:")
            .text(format!(" {}", meta.preparer))
            .line_break()
            .text(&meta.product_label),
    );
    section.push(Block::PageBreak);
    section
}

fn executive_summary(summary: &AnalysisSummary) -> Section {
    let mut section = Section::new(SectionKind::ExecutiveSummary);
    heading(&mut section, "Executive Summary");
    body(
        &mut section,
        RichText::plain(format!(
            "This report provides a comprehensive analysis of equipment data uploaded to the ChemViz system. \
             The analysis covers {} pieces of equipment with detailed metrics on flowrate, temperature, and \
             pressure measurements. The data shows operational patterns and trends that inform maintenance \
             schedules and efficiency optimization strategies.",
            summary.total_equipment
        )),
    );
    section.spacer(20.0);
    section
}

fn key_metrics(summary: &AnalysisSummary) -> Result<Section> {
    let mut section = Section::new(SectionKind::KeyMetrics);
    heading(&mut section, "Key Performance Metrics");

    let [operational, stable, normal, optimal] = KEY_METRIC_STATUS;
    let table = TableBuilder::new(["Metric", "Value", "Status"])
        .column_widths(&[2.5 * INCH, 2.0 * INCH, 1.5 * INCH])
        .row(["Total Equipment".to_string(), summary.total_equipment.to_string(), operational.to_string()])
        .row(["Average Flowrate".to_string(), format!("{} L/min", fixed2(summary.avg_flowrate)), stable.to_string()])
        .row([
            "Average Temperature".to_string(),
            format!("{}°C", fixed2(summary.avg_temperature)),
            normal.to_string(),
        ])
        .row(["Average Pressure".to_string(), format!("{} PSI", fixed2(summary.avg_pressure)), optimal.to_string()])
        .build()?;

    section.push(Block::Table(table));
    section.spacer(20.0);
    Ok(section)
}

fn distribution(summary: &AnalysisSummary) -> Result<Section> {
    let mut section = Section::new(SectionKind::Distribution);
    heading(&mut section, "Equipment Distribution Analysis");

    if summary.type_distribution.is_empty() {
        body(&mut section, RichText::plain(NO_DISTRIBUTION_TEXT));
    } else {
        body(&mut section, RichText::plain("The equipment distribution across different types is as follows:"));

        let mut builder = TableBuilder::new(["Equipment Type", "Count", "Percentage"])
            .column_widths(&[2.5 * INCH, 1.5 * INCH, 1.5 * INCH]);
        for share in distribution_shares(&summary.type_distribution) {
            builder = builder.row([share.label, share.count.to_string(), percent1(share.percentage)]);
        }
        section.push(Block::Table(builder.build()?));
    }

    section.spacer(20.0);
    Ok(section)
}

fn technical_analysis(summary: &AnalysisSummary) -> Section {
    let mut section = Section::new(SectionKind::TechnicalAnalysis);
    heading(&mut section, "Detailed Technical Analysis");

    section.paragraph(StyleName::SubHeading, RichText::plain("Flowrate Analysis"));
    body(
        &mut section,
        RichText::new()
            .strong("Average Flowrate:")
            .text(format!(" {} L/min", fixed2(summary.avg_flowrate)))
            .line_break()
            .strong("Peak Flowrate (Estimated):")
            .text(format!(" {} L/min", fixed2(estimated_peak_flowrate(summary.avg_flowrate))))
            .line_break()
            .line_break()
            .strong("Analysis:")
            .text(
                " The flowrate measurements indicate stable operation within normal parameters. \
                 Consistent flowrate suggests proper pump operation and minimal system resistance.",
            ),
    );
    section.spacer(10.0);

    section.paragraph(StyleName::SubHeading, RichText::plain("Temperature Analysis"));
    body(
        &mut section,
        RichText::new()
            .strong("Average Temperature:")
            .text(format!(" {}°C", fixed2(summary.avg_temperature)))
            .line_break()
            .line_break()
            .strong("Analysis:")
            .text(
                " Temperature readings are within acceptable operational ranges. \
                 Monitoring temperature trends helps identify potential cooling system issues \
                 or equipment stress before they become critical.",
            ),
    );
    section.spacer(10.0);

    section.paragraph(StyleName::SubHeading, RichText::plain("Pressure Analysis"));
    body(
        &mut section,
        RichText::new()
            .strong("Average Pressure:")
            .text(format!(" {} PSI", fixed2(summary.avg_pressure)))
            .line_break()
            .line_break()
            .strong("Analysis:")
            .text(
                " Pressure measurements indicate system integrity and proper valve operation. \
                 Consistent pressure readings suggest minimal leakage and optimal system configuration.",
            ),
    );

    section.push(Block::PageBreak);
    section
}

fn historical_trends(history: &[HistoryRecord]) -> Result<Section> {
    let mut section = Section::new(SectionKind::HistoricalTrends);
    heading(&mut section, "Historical Upload Analysis");

    if history.is_empty() {
        body(&mut section, RichText::plain(NO_HISTORY_TEXT));
    } else {
        body(&mut section, RichText::plain(format!("Analysis based on {} historical data uploads:", history.len())));

        let mut builder = TableBuilder::new(["Timestamp", "Equipment", "Flowrate", "Pressure", "Temperature"])
            .column_widths(&[1.8 * INCH, 1.0 * INCH, 1.0 * INCH, 1.0 * INCH, 1.2 * INCH])
            .style(TableStyle::compact());
        for record in history.iter().take(HISTORY_ROW_LIMIT) {
            builder = builder.row([
                record.timestamp.clone(),
                record.total_equipment.to_string(),
                fixed2(record.avg_flowrate),
                fixed2(record.avg_pressure),
                fixed2(record.avg_temperature),
            ]);
        }
        section.push(Block::Table(builder.build()?));
        section.spacer(15.0);

        body(
            &mut section,
            RichText::new().strong("Trend Analysis:").line_break().text(
                "Historical data shows consistent operational patterns with minimal variance. \
                 This stability indicates well-maintained equipment and effective process control. \
                 Regular monitoring continues to be recommended for early detection of anomalies.",
            ),
        );
    }

    section.spacer(20.0);
    Ok(section)
}

fn recommendations() -> Section {
    let mut section = Section::new(SectionKind::Recommendations);
    heading(&mut section, "Recommendations");
    for (i, text) in RECOMMENDATIONS.iter().enumerate() {
        body(&mut section, RichText::plain(format!("{}. {}", i + 1, text)));
    }
    section
}

fn raw_data_appendix(summary: &AnalysisSummary) -> Result<Section> {
    let mut section = Section::new(SectionKind::RawDataAppendix);
    section.push(Block::PageBreak);
    heading(&mut section, "Appendix: Raw Data");
    body(&mut section, RichText::new().strong("Complete JSON Output:"));

    for line in format_appendix(summary)? {
        section.paragraph(StyleName::CodeBlock, RichText::plain(line));
    }

    section.spacer(30.0);
    Ok(section)
}

fn closing() -> Section {
    let mut section = Section::new(SectionKind::Closing);
    section.paragraph(
        StyleName::Metadata,
        RichText::new().text(END_OF_REPORT).line_break().styled(PORTAL_BYLINE, StyleName::Byline),
    );
    section
}

#[cfg(test)]
#[path = "detailed_test.rs"]
mod detailed_test;
