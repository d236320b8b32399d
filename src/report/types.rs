//! Report type definitions for the document model.
//!
//! The composer produces a [`Document`]: an ordered list of [`Section`]s, each
//! an ordered list of [`Block`]s. Nothing here knows about pages or
//! coordinates; that is the layout stage's job.

use super::table::Table;
use crate::style::StyleName;

/// How a span is styled relative to its paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// Paragraph style as-is
    Inherit,
    /// Bold face of the paragraph font
    Strong,
    /// A different registry style (font, size and color)
    Named(StyleName),
}

/// A run of text with one style reference
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

/// Piece of rich text: a span or a forced line break
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Span(Span),
    LineBreak,
}

/// Styled text as (span, style reference) pairs.
///
/// Replaces inline markup: the composer appends spans instead of writing tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichText {
    pub inlines: Vec<Inline>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single unstyled span
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().text(text)
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.push(text, SpanStyle::Inherit)
    }

    pub fn strong(self, text: impl Into<String>) -> Self {
        self.push(text, SpanStyle::Strong)
    }

    pub fn styled(self, text: impl Into<String>, style: StyleName) -> Self {
        self.push(text, SpanStyle::Named(style))
    }

    pub fn line_break(mut self) -> Self {
        self.inlines.push(Inline::LineBreak);
        self
    }

    fn push(mut self, text: impl Into<String>, style: SpanStyle) -> Self {
        self.inlines.push(Inline::Span(Span { text: text.into(), style }));
        self
    }

    /// Text content with line breaks as `\n`, styles dropped
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Span(span) => out.push_str(&span.text),
                Inline::LineBreak => out.push('\n'),
            }
        }
        out
    }
}

/// A block of rich text set in one base style
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub style: StyleName,
    pub content: RichText,
}

impl Paragraph {
    pub fn new(style: StyleName, content: RichText) -> Self {
        Self { style, content }
    }

    pub fn plain(style: StyleName, text: impl Into<String>) -> Self {
        Self::new(style, RichText::plain(text))
    }
}

/// Renderable unit within a section
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    /// Vertical gap in points
    Spacer(f32),
    /// Continue on a fresh page
    PageBreak,
    /// Product emblem, sized by the given style
    Emblem(StyleName),
}

/// The fixed sections of the detailed report, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    TitlePage,
    ExecutiveSummary,
    KeyMetrics,
    Distribution,
    TechnicalAnalysis,
    HistoricalTrends,
    Recommendations,
    RawDataAppendix,
    Closing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self { kind, blocks: Vec::new() }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn paragraph(&mut self, style: StyleName, content: RichText) {
        self.push(Block::Paragraph(Paragraph::new(style, content)));
    }

    pub fn spacer(&mut self, height: f32) {
        self.push(Block::Spacer(height));
    }

    /// All paragraphs of this section, in order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// All tables of this section, in order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }
}

/// Piece of the running footer
#[derive(Debug, Clone, PartialEq)]
pub enum FooterField {
    Text(String),
    /// Placeholder for the physical page number, filled in during layout
    PageNumber,
    /// Placeholder for the total page count, known only once layout finishes
    PageCount,
}

/// Footer template drawn on every page
#[derive(Debug, Clone, PartialEq)]
pub struct PageFooter {
    pub fields: Vec<FooterField>,
    pub style: StyleName,
    /// Leave the first (title) page without a footer
    pub skip_first_page: bool,
}

impl PageFooter {
    /// "Page N" on every page after the first
    pub fn page_numbers() -> Self {
        Self {
            fields: vec![FooterField::Text("Page ".to_string()), FooterField::PageNumber],
            style: StyleName::FooterNumber,
            skip_first_page: true,
        }
    }

    /// Footer text for a 1-based page number, or None when the page has no footer
    pub fn resolve(&self, page_number: usize, page_count: usize) -> Option<String> {
        if self.skip_first_page && page_number == 1 {
            return None;
        }
        let mut out = String::new();
        for field in &self.fields {
            match field {
                FooterField::Text(text) => out.push_str(text),
                FooterField::PageNumber => out.push_str(&page_number.to_string()),
                FooterField::PageCount => out.push_str(&page_count.to_string()),
            }
        }
        Some(out)
    }
}

/// A composed report, ready for layout
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Written into the PDF info dictionary
    pub title: String,
    pub sections: Vec<Section>,
    pub footer: Option<PageFooter>,
}

impl Document {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Every block in document order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }
}
