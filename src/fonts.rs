/// Base-14 font metrics and glyph resolution
///
/// This module handles:
/// - Glyph advance widths for the standard PDF fonts (from the Adobe AFM files)
/// - Mapping Unicode text onto single-byte font encodings (WinAnsi, Symbol, ZapfDingbats)
/// - Falling back to Symbol/ZapfDingbats for arrows and check marks
///
/// Layout measures with the same resolution the PDF writer encodes with, so a
/// line that fits when measured also fits when drawn.
use log::debug;

/// The fonts a report may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
    Symbol,
    ZapfDingbats,
}

impl Font {
    /// Every font, in resource order
    pub const ALL: [Font; 6] =
        [Font::Helvetica, Font::HelveticaBold, Font::Courier, Font::CourierBold, Font::Symbol, Font::ZapfDingbats];

    /// PostScript name used as `/BaseFont`
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::Courier => "Courier",
            Font::CourierBold => "Courier-Bold",
            Font::Symbol => "Symbol",
            Font::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Name of the font in the page resource dictionary
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::Courier => "F3",
            Font::CourierBold => "F4",
            Font::Symbol => "F5",
            Font::ZapfDingbats => "F6",
        }
    }

    /// Symbolic fonts carry their own built-in encoding
    pub fn uses_winansi(&self) -> bool {
        !matches!(self, Font::Symbol | Font::ZapfDingbats)
    }

    /// Bold face of the same family
    pub fn bold(&self) -> Font {
        match self {
            Font::Helvetica | Font::HelveticaBold => Font::HelveticaBold,
            Font::Courier | Font::CourierBold => Font::CourierBold,
            other => *other,
        }
    }

    /// Advance width of an encoded byte, in 1/1000 em
    fn byte_width(&self, byte: u8) -> u16 {
        match self {
            Font::Courier | Font::CourierBold => 600,
            Font::Helvetica => latin_width(&HELVETICA_WIDTHS, byte, LATIN_EXTRA),
            Font::HelveticaBold => latin_width(&HELVETICA_BOLD_WIDTHS, byte, LATIN_EXTRA),
            Font::Symbol => match byte {
                0xAC | 0xAE => 987,
                0xAD | 0xAF => 603,
                _ => 500,
            },
            Font::ZapfDingbats => match byte {
                0x33 => 834,
                0x34 => 874,
                _ => 788,
            },
        }
    }
}

/// A character resolved to a concrete font and byte code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub font: Font,
    pub code: u8,
}

/// Resolve one character, falling back to a symbolic font when the base
/// font cannot encode it and to `?` when nothing can.
pub fn resolve_glyph(c: char, base: Font) -> Glyph {
    if let Some(code) = winansi_code(c) {
        return Glyph { font: base, code };
    }
    if let Some(code) = symbol_code(c) {
        return Glyph { font: Font::Symbol, code };
    }
    if let Some(code) = dingbat_code(c) {
        return Glyph { font: Font::ZapfDingbats, code };
    }
    debug!("No glyph for {:?} (U+{:04X}), substituting '?'", c, c as u32);
    Glyph { font: base, code: b'?' }
}

/// Split text into runs that share a font, with each run's encoded bytes.
pub fn encode_runs(text: &str, base: Font) -> Vec<(Font, Vec<u8>)> {
    let mut runs: Vec<(Font, Vec<u8>)> = Vec::new();
    for c in text.chars() {
        let glyph = resolve_glyph(c, base);
        match runs.last_mut() {
            Some((font, bytes)) if *font == glyph.font => bytes.push(glyph.code),
            _ => runs.push((glyph.font, vec![glyph.code])),
        }
    }
    runs
}

/// Width of `text` in points when set in `font` at `size`.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let glyph = resolve_glyph(c, font);
            glyph.font.byte_width(glyph.code) as u32
        })
        .sum();
    units as f32 * size / 1000.0
}

/// WinAnsiEncoding (PDF 1.7, Annex D) for the characters reports use
fn winansi_code(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0x20..=0x7E => Some(cp as u8),
        0xA0..=0xFF => Some(cp as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

fn symbol_code(c: char) -> Option<u8> {
    match c {
        '←' => Some(0xAC),
        '↑' => Some(0xAD),
        '→' => Some(0xAE),
        '↓' => Some(0xAF),
        _ => None,
    }
}

fn dingbat_code(c: char) -> Option<u8> {
    match c {
        '✓' => Some(0x33),
        '✔' => Some(0x34),
        _ => None,
    }
}

fn latin_width(ascii: &[u16; 95], byte: u8, extra: &[(u8, u16)]) -> u16 {
    match byte {
        0x20..=0x7E => ascii[(byte - 0x20) as usize],
        _ => extra.iter().find(|(b, _)| *b == byte).map(|(_, w)| *w).unwrap_or(556),
    }
}

// Widths for 0x20..=0x7E
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// Non-ASCII WinAnsi codes that differ from the 556 default (same in both weights)
const LATIN_EXTRA: &[(u8, u16)] = &[(0xA0, 278), (0xB0, 400), (0x95, 350), (0x96, 556), (0x97, 1000), (0x85, 1000)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        // "Page" = P(667) + a(556) + g(556) + e(556) = 2335
        let w = text_width("Page", Font::Helvetica, 10.0);
        assert!((w - 23.35).abs() < 0.001);
    }

    #[test]
    fn test_courier_is_monospaced() {
        assert_eq!(text_width("iiii", Font::Courier, 10.0), text_width("WWWW", Font::Courier, 10.0));
        assert!((text_width("abc", Font::Courier, 8.0) - 14.4).abs() < 0.001);
    }

    #[test]
    fn test_degree_sign_and_nbsp_stay_in_base_font() {
        assert_eq!(resolve_glyph('°', Font::Helvetica), Glyph { font: Font::Helvetica, code: 0xB0 });
        assert_eq!(resolve_glyph('\u{a0}', Font::Courier), Glyph { font: Font::Courier, code: 0xA0 });
        assert_eq!(resolve_glyph('—', Font::Helvetica), Glyph { font: Font::Helvetica, code: 0x97 });
    }

    #[test]
    fn test_status_marks_fall_back_to_symbol_fonts() {
        assert_eq!(resolve_glyph('✓', Font::Helvetica).font, Font::ZapfDingbats);
        assert_eq!(resolve_glyph('↑', Font::Helvetica).font, Font::Symbol);
        assert_eq!(resolve_glyph('→', Font::Helvetica), Glyph { font: Font::Symbol, code: 0xAE });
    }

    #[test]
    fn test_unknown_glyph_becomes_question_mark() {
        assert_eq!(resolve_glyph('⚗', Font::Helvetica), Glyph { font: Font::Helvetica, code: b'?' });
    }

    #[test]
    fn test_encode_runs_groups_by_font() {
        let runs = encode_runs("✓ Optimal", Font::Helvetica);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], (Font::ZapfDingbats, vec![0x33]));
        assert_eq!(runs[1], (Font::Helvetica, b" Optimal".to_vec()));
    }

    #[test]
    fn test_bold_variant() {
        assert_eq!(Font::Helvetica.bold(), Font::HelveticaBold);
        assert_eq!(Font::Courier.bold(), Font::CourierBold);
        assert_eq!(Font::Symbol.bold(), Font::Symbol);
    }
}
