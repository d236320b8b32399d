//! Centralized presentation styles for rendered reports
//!
//! A single source of truth for every color, font and spacing value the
//! composer uses. Styles are referenced by [`StyleName`]; composer code never
//! builds a descriptor ad hoc. The registry is built once on first use and
//! shared read-only by every render.

use crate::fonts::Font;
use lazy_static::lazy_static;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// RGB color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal
    pub const fn hex(value: u32) -> Self {
        Self { r: ((value >> 16) & 0xff) as u8, g: ((value >> 8) & 0xff) as u8, b: (value & 0xff) as u8 }
    }

    /// Channels scaled to 0.0..=1.0 for PDF color operators
    pub fn components(&self) -> [f32; 3] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }
}

/// Report color palette
pub struct Palette;

impl Palette {
    /// Brand accent: headings, title, table header band
    pub const ACCENT: Color = Color::hex(0x0ea5e9);

    /// Subtitle and code text
    pub const SLATE_500: Color = Color::hex(0x64748b);

    /// Sub-headings
    pub const SLATE_600: Color = Color::hex(0x475569);

    /// Metadata and page numbers
    pub const SLATE_400: Color = Color::hex(0x94a3b8);

    /// Footer byline
    pub const SLATE_300: Color = Color::hex(0xcbd5e1);

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Inverse text on the header band
    pub const WHITESMOKE: Color = Color::rgb(245, 245, 245);

    /// Alternate zebra row
    pub const SKY_50: Color = Color::hex(0xf0f9ff);

    /// Table grid lines
    pub const GRID: Color = Color::rgb(128, 128, 128);
}

// =============================================================================
// STYLE DESCRIPTORS
// =============================================================================

/// Horizontal text alignment within the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    /// Stretch inter-word gaps on every line but the last of a paragraph
    Justify,
}

/// Names of the fixed style set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleName {
    Title,
    Subtitle,
    SectionHeading,
    SubHeading,
    Body,
    Metadata,
    CodeBlock,
    Emblem,
    Byline,
    FooterNumber,
}

impl StyleName {
    /// Every style, in registry order
    pub const ALL: [StyleName; 10] = [
        StyleName::Title,
        StyleName::Subtitle,
        StyleName::SectionHeading,
        StyleName::SubHeading,
        StyleName::Body,
        StyleName::Metadata,
        StyleName::CodeBlock,
        StyleName::Emblem,
        StyleName::Byline,
        StyleName::FooterNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleName::Title => "Title",
            StyleName::Subtitle => "Subtitle",
            StyleName::SectionHeading => "SectionHeading",
            StyleName::SubHeading => "SubHeading",
            StyleName::Body => "Body",
            StyleName::Metadata => "Metadata",
            StyleName::CodeBlock => "CodeBlock",
            StyleName::Emblem => "Emblem",
            StyleName::Byline => "Byline",
            StyleName::FooterNumber => "FooterNumber",
        }
    }
}

/// A named, immutable presentation descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDescriptor {
    pub name: StyleName,
    pub font: Font,
    /// Font size in points
    pub size: f32,
    pub color: Color,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
    /// Baseline-to-baseline distance
    pub leading: f32,
    pub left_indent: f32,
}

impl StyleDescriptor {
    fn new(name: StyleName, font: Font, size: f32, color: Color, alignment: Alignment) -> Self {
        Self {
            name,
            font,
            size,
            color,
            alignment,
            space_before: 0.0,
            space_after: 0.0,
            leading: size * 1.2,
            left_indent: 0.0,
        }
    }

    fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    fn indent(mut self, left: f32) -> Self {
        self.left_indent = left;
        self
    }
}

/// Lookup table of every [`StyleDescriptor`], indexed by [`StyleName`]
#[derive(Debug)]
pub struct StyleRegistry {
    styles: Vec<StyleDescriptor>,
}

impl StyleRegistry {
    /// The report house style
    pub fn standard() -> Self {
        use Alignment::*;
        use StyleName::*;

        let styles = vec![
            StyleDescriptor::new(Title, Font::HelveticaBold, 36.0, Palette::ACCENT, Center).spacing(0.0, 12.0),
            StyleDescriptor::new(Subtitle, Font::Helvetica, 18.0, Palette::SLATE_500, Center).spacing(0.0, 30.0),
            StyleDescriptor::new(SectionHeading, Font::HelveticaBold, 16.0, Palette::ACCENT, Left).spacing(12.0, 12.0),
            StyleDescriptor::new(SubHeading, Font::HelveticaBold, 14.0, Palette::SLATE_600, Left).spacing(10.0, 10.0),
            StyleDescriptor::new(Body, Font::Helvetica, 11.0, Palette::BLACK, Justify).spacing(0.0, 12.0),
            StyleDescriptor::new(Metadata, Font::Helvetica, 10.0, Palette::SLATE_400, Center).spacing(0.0, 6.0),
            StyleDescriptor::new(CodeBlock, Font::Courier, 8.0, Palette::SLATE_500, Left).spacing(0.0, 6.0).indent(20.0),
            StyleDescriptor::new(Emblem, Font::Helvetica, 72.0, Palette::ACCENT, Center),
            StyleDescriptor::new(Byline, Font::Helvetica, 8.0, Palette::SLATE_300, Center),
            StyleDescriptor::new(FooterNumber, Font::Helvetica, 9.0, Palette::SLATE_400, Center),
        ];

        Self { styles }
    }

    /// Look up a descriptor. Total over the fixed set.
    pub fn get(&self, name: StyleName) -> &StyleDescriptor {
        &self.styles[name as usize]
    }
}

lazy_static! {
    static ref REGISTRY: StyleRegistry = StyleRegistry::standard();
}

/// Shared registry, built on first use
pub fn registry() -> &'static StyleRegistry {
    &REGISTRY
}
