//! Table builder for report sections.
//!
//! Tables are purely presentational: cells arrive pre-formatted from the
//! composer and come out unchanged. Every table gets the same treatment:
//! accent header band with inverse text, zebra-striped body rows and a
//! uniform grid.

use crate::error::{ReportError, Result};
use crate::fonts::Font;
use crate::style::{Alignment, Color, Palette};

/// Visual parameters for a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub header_font: Font,
    pub header_size: f32,
    pub body_font: Font,
    pub body_size: f32,
    /// Alignment of every cell, header included
    pub alignment: Alignment,
    pub header_background: Color,
    pub header_text: Color,
    pub body_text: Color,
    /// Body row backgrounds, picked by row index parity
    pub stripes: [Color; 2],
    pub grid: Color,
    pub grid_width: f32,
    /// Cell padding on all sides
    pub padding: f32,
    /// Extra space under header text
    pub header_bottom_padding: f32,
}

impl TableStyle {
    /// Left-aligned, 12pt header, 10pt body
    pub fn standard() -> Self {
        Self {
            header_font: Font::HelveticaBold,
            header_size: 12.0,
            body_font: Font::Helvetica,
            body_size: 10.0,
            alignment: Alignment::Left,
            header_background: Palette::ACCENT,
            header_text: Palette::WHITESMOKE,
            body_text: Palette::BLACK,
            stripes: [Palette::WHITE, Palette::SKY_50],
            grid: Palette::GRID,
            grid_width: 1.0,
            padding: 6.0,
            header_bottom_padding: 12.0,
        }
    }

    /// Centered, smaller type for wide tables
    pub fn compact() -> Self {
        Self { header_size: 10.0, body_size: 9.0, alignment: Alignment::Center, ..Self::standard() }
    }
}

/// A finished table block
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column widths in points; empty means equal shares of the frame
    pub column_widths: Vec<f32>,
    pub style: TableStyle,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Background of body row `index` (0-based, header excluded)
    pub fn row_background(&self, index: usize) -> Color {
        self.style.stripes[index % 2]
    }

    /// Widths resolved against the available frame width
    pub fn resolved_widths(&self, frame_width: f32) -> Vec<f32> {
        if self.column_widths.is_empty() {
            let n = self.column_count().max(1);
            vec![frame_width / n as f32; n]
        } else {
            self.column_widths.clone()
        }
    }
}

/// Accumulates header, rows and width hints, then validates into a [`Table`]
#[derive(Debug, Clone)]
pub struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<f32>,
    style: TableStyle,
}

impl TableBuilder {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            column_widths: Vec::new(),
            style: TableStyle::standard(),
        }
    }

    pub fn column_widths(mut self, widths: &[f32]) -> Self {
        self.column_widths = widths.to_vec();
        self
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Validate shape and produce the table.
    ///
    /// Short rows are padded with empty cells; a row wider than the header,
    /// or width hints that do not match the column count, are errors.
    pub fn build(self) -> Result<Table> {
        let columns = self.header.len();
        if columns == 0 {
            return Err(ReportError::Render("table has no columns".to_string()));
        }
        if !self.column_widths.is_empty() && self.column_widths.len() != columns {
            return Err(ReportError::Render(format!(
                "table has {} columns but {} width hints",
                columns,
                self.column_widths.len()
            )));
        }
        if let Some(w) = self.column_widths.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(ReportError::Render(format!("invalid column width {}", w)));
        }

        let mut rows = Vec::with_capacity(self.rows.len());
        for (i, mut row) in self.rows.into_iter().enumerate() {
            if row.len() > columns {
                return Err(ReportError::Render(format!(
                    "table row {} has {} cells, header has {}",
                    i,
                    row.len(),
                    columns
                )));
            }
            row.resize(columns, String::new());
            rows.push(row);
        }

        Ok(Table { header: self.header, rows, column_widths: self.column_widths, style: self.style })
    }
}
