/// Page layout module - flows a composed document onto physical pages
///
/// This module handles:
/// - Page geometry (size and margins)
/// - Word wrapping of rich text with base-14 font metrics
/// - Table placement with header band, zebra rows and grid
/// - Page breaks, both forced and on overflow
/// - Resolving footer placeholders once the page count is known
///
/// It accepts a `Document` from the report module and produces positioned
/// drawing operations; the PDF writer only serializes what it is given.
use crate::error::{ReportError, Result};
use crate::fonts::{Font, text_width};
use crate::report::{Block, Document, Inline, PageFooter, Paragraph, RichText, SpanStyle, Table};
use crate::style::{Alignment, Color, StyleDescriptor, registry};
use log::debug;
use serde::{Deserialize, Serialize};

/// Points per inch
pub const INCH: f32 = 72.0;

// Tolerance for float comparisons against the frame edges
const EPSILON: f32 = 0.01;

/// Page size and margins, in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Baseline of the running footer, measured from the bottom edge
    pub footer_baseline: f32,
}

impl PageGeometry {
    /// US Letter, one-inch side and top margins
    pub fn letter() -> Self {
        Self {
            width: 8.5 * INCH,
            height: 11.0 * INCH,
            margin_left: INCH,
            margin_right: INCH,
            margin_top: INCH,
            margin_bottom: 0.75 * INCH,
            footer_baseline: 30.0,
        }
    }

    pub fn frame_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn frame_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Y coordinate of the top of the content frame
    pub fn frame_top(&self) -> f32 {
        self.height - self.margin_top
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

/// A positioned drawing instruction, PDF user space (origin bottom-left)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline starting at (x, y)
    Text { x: f32, y: f32, font: Font, size: f32, color: Color, text: String },
    FillRect { x: f32, y: f32, width: f32, height: f32, color: Color },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color },
    /// Product emblem in a `size` square whose bottom edge is centered on (center_x, y)
    Emblem { center_x: f32, y: f32, size: f32, color: Color },
}

/// One physical page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Every text run on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Text runs joined with newlines, for searching
    pub fn text_content(&self) -> String {
        self.texts().collect::<Vec<_>>().join("\n")
    }
}

/// Pages ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lay a document out onto pages and resolve its footer.
pub fn layout_document(doc: &Document, geometry: &PageGeometry) -> Result<LaidOutDocument> {
    if geometry.frame_width() <= 0.0 || geometry.frame_height() <= 0.0 {
        return Err(ReportError::Render(format!(
            "page frame is empty ({}x{} pt)",
            geometry.frame_width(),
            geometry.frame_height()
        )));
    }

    let mut flow = Flow::new(geometry);
    for block in doc.blocks() {
        match block {
            Block::Paragraph(p) => flow.paragraph(p),
            Block::Table(t) => flow.table(t),
            Block::Spacer(h) => flow.spacer(*h),
            Block::PageBreak => flow.page_break(),
            Block::Emblem(style) => flow.emblem(registry().get(*style)),
        }
    }
    let mut pages = flow.finish();

    if let Some(footer) = &doc.footer {
        apply_footer(&mut pages, footer, geometry);
    }

    debug!("Laid out '{}' onto {} pages", doc.title, pages.len());
    Ok(LaidOutDocument { title: doc.title.clone(), geometry: geometry.clone(), pages })
}

/// Second pass: the page count is final, so placeholders can be filled.
fn apply_footer(pages: &mut [Page], footer: &PageFooter, geometry: &PageGeometry) {
    let style = registry().get(footer.style);
    let count = pages.len();
    for page in pages.iter_mut() {
        if let Some(text) = footer.resolve(page.number, count) {
            let width = text_width(&text, style.font, style.size);
            page.ops.push(DrawOp::Text {
                x: (geometry.width - width) / 2.0,
                y: geometry.footer_baseline,
                font: style.font,
                size: style.size,
                color: style.color,
                text,
            });
        }
    }
}

//
// Word wrapping
//

/// A word (or piece of one) with its resolved style
#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    text: String,
    font: Font,
    size: f32,
    color: Color,
    width: f32,
    /// Separated from the previous fragment by a space
    space_before: bool,
    space_width: f32,
}

impl Fragment {
    fn new(text: String, font: Font, size: f32, color: Color, space_before: bool) -> Self {
        let width = text_width(&text, font, size);
        Self { text, font, size, color, width, space_before, space_width: text_width(" ", font, size) }
    }

    fn same_style(&self, other: &Fragment) -> bool {
        self.font == other.font && self.size == other.size && self.color == other.color
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(Fragment),
    Break,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Line {
    words: Vec<Fragment>,
    width: f32,
    /// Ends at a forced break or the end of the paragraph; never justified
    last: bool,
}

impl Line {
    fn gap_before(&self, word: &Fragment) -> f32 {
        if self.words.is_empty() || !word.space_before { 0.0 } else { word.space_width }
    }

    fn push(&mut self, word: Fragment) {
        self.width += self.gap_before(&word) + word.width;
        self.words.push(word);
    }

    fn height(&self, base_leading: f32) -> f32 {
        self.words.iter().map(|w| w.size * 1.2).fold(base_leading, f32::max)
    }

    fn max_size(&self, base_size: f32) -> f32 {
        self.words.iter().map(|w| w.size).fold(base_size, f32::max)
    }

    fn gaps(&self) -> usize {
        self.words.iter().skip(1).filter(|w| w.space_before).count()
    }
}

fn span_style(style: SpanStyle, base: &StyleDescriptor) -> (Font, f32, Color) {
    match style {
        SpanStyle::Inherit => (base.font, base.size, base.color),
        SpanStyle::Strong => (base.font.bold(), base.size, base.color),
        SpanStyle::Named(name) => {
            let named = registry().get(name);
            (named.font, named.size, named.color)
        }
    }
}

/// Split rich text into styled words. ASCII whitespace separates words and
/// collapses; non-breaking spaces stay inside words.
fn tokenize(content: &RichText, base: &StyleDescriptor) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pending_space = false;

    for inline in &content.inlines {
        let span = match inline {
            Inline::LineBreak => {
                tokens.push(Token::Break);
                pending_space = false;
                continue;
            }
            Inline::Span(span) => span,
        };

        let (font, size, color) = span_style(span.style, base);
        let mut word = String::new();
        for c in span.text.chars() {
            if c.is_ascii_whitespace() {
                if !word.is_empty() {
                    tokens.push(Token::Word(Fragment::new(std::mem::take(&mut word), font, size, color, pending_space)));
                }
                pending_space = true;
            } else {
                word.push(c);
            }
        }
        if !word.is_empty() {
            tokens.push(Token::Word(Fragment::new(word, font, size, color, pending_space)));
            pending_space = false;
        }
    }

    tokens
}

/// Hard-split a fragment wider than `avail` into pieces that fit.
fn split_to_fit(fragment: Fragment, avail: f32) -> Vec<Fragment> {
    if fragment.width <= avail + EPSILON {
        return vec![fragment];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut space_before = fragment.space_before;
    for c in fragment.text.chars() {
        let mut candidate = current.clone();
        candidate.push(c);
        if !current.is_empty() && text_width(&candidate, fragment.font, fragment.size) > avail + EPSILON {
            pieces.push(Fragment::new(
                std::mem::take(&mut current),
                fragment.font,
                fragment.size,
                fragment.color,
                space_before,
            ));
            space_before = false;
            current.push(c);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        pieces.push(Fragment::new(current, fragment.font, fragment.size, fragment.color, space_before));
    }
    pieces
}

/// Greedy line filling
fn wrap(tokens: Vec<Token>, avail: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();

    for token in tokens {
        match token {
            Token::Break => {
                line.last = true;
                lines.push(std::mem::take(&mut line));
            }
            Token::Word(fragment) => {
                for piece in split_to_fit(fragment, avail) {
                    if !line.words.is_empty() && line.width + line.gap_before(&piece) + piece.width > avail + EPSILON {
                        lines.push(std::mem::take(&mut line));
                    }
                    line.push(piece);
                }
            }
        }
    }

    if !line.words.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    if let Some(final_line) = lines.last_mut() {
        final_line.last = true;
    }
    lines
}

/// Wrap a single-style string, as used in table cells.
fn wrap_plain(text: &str, font: Font, size: f32, color: Color, avail: f32) -> Vec<Line> {
    let base = StyleDescriptor {
        name: crate::style::StyleName::Body,
        font,
        size,
        color,
        alignment: Alignment::Left,
        space_before: 0.0,
        space_after: 0.0,
        leading: size * 1.2,
        left_indent: 0.0,
    };
    wrap(tokenize(&RichText::plain(text), &base), avail)
}

/// Text ops for one line whose baseline is at `y`.
///
/// Adjacent words sharing a style are merged into one run unless the line is
/// justified, in which case every word is placed individually.
fn line_ops(line: &Line, x0: f32, avail: f32, y: f32, alignment: Alignment) -> Vec<DrawOp> {
    let slack = (avail - line.width).max(0.0);
    let gaps = line.gaps();
    let (start_x, extra) = match alignment {
        Alignment::Left => (x0, 0.0),
        Alignment::Center => (x0 + slack / 2.0, 0.0),
        Alignment::Right => (x0 + slack, 0.0),
        Alignment::Justify if !line.last && gaps > 0 => (x0, slack / gaps as f32),
        Alignment::Justify => (x0, 0.0),
    };

    let mut ops: Vec<DrawOp> = Vec::new();
    let mut x = start_x;
    let mut prev: Option<&Fragment> = None;
    for word in &line.words {
        let gap = if prev.is_some() && word.space_before { word.space_width + extra } else { 0.0 };
        x += gap;

        let merge = extra == 0.0 && prev.is_some_and(|p| p.same_style(word));
        if merge && let Some(DrawOp::Text { text, .. }) = ops.last_mut() {
            if word.space_before {
                text.push(' ');
            }
            text.push_str(&word.text);
        } else {
            ops.push(DrawOp::Text {
                x,
                y,
                font: word.font,
                size: word.size,
                color: word.color,
                text: word.text.clone(),
            });
        }

        x += word.width;
        prev = Some(word);
    }
    ops
}

//
// Flow
//

/// Places blocks top to bottom, starting new pages as needed
struct Flow<'a> {
    geometry: &'a PageGeometry,
    pages: Vec<Page>,
    ops: Vec<DrawOp>,
    /// Top of the remaining free space on the current page
    y: f32,
}

impl<'a> Flow<'a> {
    fn new(geometry: &'a PageGeometry) -> Self {
        Self { geometry, pages: Vec::new(), ops: Vec::new(), y: geometry.frame_top() }
    }

    fn at_top(&self) -> bool {
        self.y >= self.geometry.frame_top() - EPSILON
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= self.geometry.margin_bottom - EPSILON
    }

    fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page { number, ops: std::mem::take(&mut self.ops) });
        self.y = self.geometry.frame_top();
    }

    /// Break unless the current page is still untouched
    fn page_break(&mut self) {
        if !self.at_top() {
            self.new_page();
        }
    }

    /// Move to a new page if `height` does not fit, unless already at the top
    fn reserve(&mut self, height: f32) {
        if !self.fits(height) && !self.at_top() {
            self.new_page();
        }
    }

    fn spacer(&mut self, height: f32) {
        if self.fits(height) {
            self.y -= height;
        } else {
            self.new_page();
        }
    }

    fn emblem(&mut self, style: &StyleDescriptor) {
        self.reserve(style.size);
        self.ops.push(DrawOp::Emblem {
            center_x: self.geometry.margin_left + self.geometry.frame_width() / 2.0,
            y: self.y - style.size,
            size: style.size,
            color: style.color,
        });
        self.y -= style.size;
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let style = registry().get(paragraph.style);
        let x0 = self.geometry.margin_left + style.left_indent;
        let avail = self.geometry.frame_width() - style.left_indent;
        let lines = wrap(tokenize(&paragraph.content, style), avail);

        if !self.at_top() {
            self.y -= style.space_before;
        }
        for line in &lines {
            let height = line.height(style.leading);
            self.reserve(height);
            let baseline = self.y - line.max_size(style.size);
            self.ops.extend(line_ops(line, x0, avail, baseline, style.alignment));
            self.y -= height;
        }
        self.y -= style.space_after;
    }

    fn table(&mut self, table: &Table) {
        let st = &table.style;
        let widths = table.resolved_widths(self.geometry.frame_width());
        let total: f32 = widths.iter().sum();
        let x0 = self.geometry.margin_left + ((self.geometry.frame_width() - total) / 2.0).max(0.0);

        let header = TableRow {
            cells: &table.header,
            font: st.header_font,
            size: st.header_size,
            text: st.header_text,
            background: st.header_background,
            bottom_padding: st.header_bottom_padding,
        };
        self.table_row(table, &widths, x0, &header);

        for (i, cells) in table.rows.iter().enumerate() {
            let row = TableRow {
                cells,
                font: st.body_font,
                size: st.body_size,
                text: st.body_text,
                background: table.row_background(i),
                bottom_padding: st.padding,
            };
            self.table_row(table, &widths, x0, &row);
        }
    }

    /// Draw one row. A row taller than the space left on a fresh page is
    /// continued on the next page, a slice of its cell lines at a time.
    fn table_row(&mut self, table: &Table, widths: &[f32], x0: f32, row: &TableRow) {
        let st = &table.style;
        let leading = row.size * 1.2;
        let cell_lines: Vec<Vec<Line>> = row
            .cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| wrap_plain(cell, row.font, row.size, row.text, (w - 2.0 * st.padding).max(1.0)))
            .collect();
        let max_lines = cell_lines.iter().map(|l| l.len()).max().unwrap_or(1).max(1);
        let chrome = st.padding + row.bottom_padding;

        let mut first = 0;
        loop {
            let remaining = max_lines - first;
            self.reserve(chrome + remaining as f32 * leading);

            let room = self.y - self.geometry.margin_bottom - chrome + EPSILON;
            let capacity = (room / leading + 1e-3).floor().max(1.0) as usize;
            let count = remaining.min(capacity);
            if count < remaining {
                debug!("Table row of {} lines split after line {}", max_lines, first + count);
            }

            self.row_slice(table, widths, x0, row, &cell_lines, first..first + count);
            first += count;
            if first >= max_lines {
                break;
            }
            self.new_page();
        }
    }

    /// Band, text and grid for lines `range` of a row, starting at the current y
    fn row_slice(
        &mut self,
        table: &Table,
        widths: &[f32],
        x0: f32,
        row: &TableRow,
        cell_lines: &[Vec<Line>],
        range: std::ops::Range<usize>,
    ) {
        let st = &table.style;
        let leading = row.size * 1.2;
        let height = st.padding + range.len() as f32 * leading + row.bottom_padding;
        let top = self.y;
        let bottom = top - height;
        let total: f32 = widths.iter().sum();

        self.ops.push(DrawOp::FillRect { x: x0, y: bottom, width: total, height, color: row.background });

        let alignment = if st.alignment == Alignment::Justify { Alignment::Left } else { st.alignment };
        let mut x = x0;
        for (lines, w) in cell_lines.iter().zip(widths) {
            for (n, line) in lines.iter().skip(range.start).take(range.len()).enumerate() {
                let baseline = top - st.padding - row.size - n as f32 * leading;
                self.ops.extend(line_ops(line, x + st.padding, w - 2.0 * st.padding, baseline, alignment));
            }
            x += w;
        }

        // Grid: top and bottom edges, then every column boundary
        for y in [top, bottom] {
            self.ops.push(DrawOp::Line { x1: x0, y1: y, x2: x0 + total, y2: y, width: st.grid_width, color: st.grid });
        }
        let mut x = x0;
        for w in std::iter::once(&0.0).chain(widths.iter()) {
            x += w;
            self.ops.push(DrawOp::Line { x1: x, y1: top, x2: x, y2: bottom, width: st.grid_width, color: st.grid });
        }

        self.y = bottom;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

/// Per-row parameters shared by header and body rows
struct TableRow<'r> {
    cells: &'r [String],
    font: Font,
    size: f32,
    text: Color,
    background: Color,
    bottom_padding: f32,
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;
