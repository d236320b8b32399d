/// PDF serialization module
///
/// Turns laid-out pages into a PDF byte stream with lopdf. Every page shares
/// one resource dictionary declaring the six base-14 fonts; text is encoded
/// per font run so arrows and check marks land in Symbol/ZapfDingbats.
use crate::error::Result;
use crate::fonts::{Font, encode_runs};
use crate::layout::{DrawOp, LaidOutDocument, Page};
use crate::style::Color;
use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

const PDF_VERSION: &str = "1.5";
const PRODUCER: &str = concat!("chemviz-report ", env!("CARGO_PKG_VERSION"));

/// Serialize a laid-out document.
pub fn write_pdf(doc: &LaidOutDocument) -> Result<Vec<u8>> {
    let mut pdf = Document::with_version(PDF_VERSION);
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let id = pdf.add_object(font_dictionary(font));
        fonts.set(font.resource_name(), id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let content = Content { operations: page_operations(page) };
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), doc.geometry.width.into(), doc.geometry.height.into()],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = info_dictionary(&mut pdf, &doc.title);
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;
    debug!("Wrote PDF '{}': {} pages, {} bytes", doc.title, page_count, bytes.len());
    Ok(bytes)
}

fn font_dictionary(font: Font) -> Dictionary {
    let mut dict = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
    };
    if font.uses_winansi() {
        dict.set("Encoding", "WinAnsiEncoding");
    }
    dict
}

fn info_dictionary(pdf: &mut Document, title: &str) -> ObjectId {
    pdf.add_object(dictionary! {
        "Title" => text_string(title),
        "Producer" => text_string(PRODUCER),
    })
}

/// PDF text string: ASCII as-is, anything else as UTF-16BE behind a byte order mark.
fn text_string(s: &str) -> Object {
    if s.is_ascii() {
        return literal(s.as_bytes().to_vec());
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(s.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn literal(bytes: Vec<u8>) -> Object {
    Object::String(bytes, StringFormat::Literal)
}

fn color_operands(color: Color) -> Vec<Object> {
    color.components().iter().map(|c| Object::Real(*c)).collect()
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, font, size, color, text } => text_operations(&mut ops, *x, *y, *font, *size, *color, text),
            DrawOp::FillRect { x, y, width, height, color } => {
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new("re", vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()]));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Line { x1, y1, x2, y2, width, color } => {
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), (*y1).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (*y2).into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Emblem { center_x, y, size, color } => emblem_operations(&mut ops, *center_x, *y, *size, *color),
        }
    }
    ops
}

/// One text object; the font switches between runs and the viewer advances
/// the pen by each run's real glyph widths.
fn text_operations(ops: &mut Vec<Operation>, x: f32, y: f32, font: Font, size: f32, color: Color, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("rg", color_operands(color)));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    for (run_font, bytes) in encode_runs(text, font) {
        ops.push(Operation::new("Tf", vec![run_font.resource_name().into(), size.into()]));
        ops.push(Operation::new("Tj", vec![literal(bytes)]));
    }
    ops.push(Operation::new("ET", vec![]));
}

/// Erlenmeyer flask: a filled conical body under a narrow neck with a lip,
/// plus a lighter liquid line. Drawn in a `size` square.
fn emblem_operations(ops: &mut Vec<Operation>, center_x: f32, y: f32, size: f32, color: Color) {
    let s = size / 72.0;
    let neck_half = 7.0 * s;
    let base_half = 28.0 * s;
    let shoulder = 34.0 * s;
    let top = 62.0 * s;

    // Body and neck as one closed path
    ops.push(Operation::new("rg", color_operands(color)));
    let outline = [
        (center_x - base_half, y + 2.0 * s),
        (center_x + base_half, y + 2.0 * s),
        (center_x + neck_half, y + shoulder),
        (center_x + neck_half, y + top),
        (center_x - neck_half, y + top),
        (center_x - neck_half, y + shoulder),
    ];
    let mut points = outline.iter();
    if let Some((px, py)) = points.next() {
        ops.push(Operation::new("m", vec![(*px).into(), (*py).into()]));
    }
    for (px, py) in points {
        ops.push(Operation::new("l", vec![(*px).into(), (*py).into()]));
    }
    ops.push(Operation::new("h", vec![]));
    ops.push(Operation::new("f", vec![]));

    // Lip
    let lip_half = 11.0 * s;
    ops.push(Operation::new("re", vec![(center_x - lip_half).into(), (y + top).into(), (2.0 * lip_half).into(), (4.0 * s).into()]));
    ops.push(Operation::new("f", vec![]));

    // Liquid surface
    ops.push(Operation::new("RG", color_operands(Color::rgb(255, 255, 255))));
    ops.push(Operation::new("w", vec![(2.0 * s).into()]));
    ops.push(Operation::new("m", vec![(center_x - 18.0 * s).into(), (y + 16.0 * s).into()]));
    ops.push(Operation::new("l", vec![(center_x + 18.0 * s).into(), (y + 16.0 * s).into()]));
    ops.push(Operation::new("S", vec![]));
}
