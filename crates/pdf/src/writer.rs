//! Serializes composed pages to PDF bytes with `printpdf`.

use crate::compose::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::fonts::{FontRole, FontSet, SharedFontData};
use crate::output::{DrawCmd, Page, Rgb};
use printpdf::font::ParsedFont;
use printpdf::graphics::{LinePoint, Polygon, PolygonRing, WindingOrder};
use printpdf::text::TextItem;
use printpdf::{
    BuiltinFont, FontId, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt,
    TextMatrix,
};
use sha2::{Digest, Sha256};

/// An embedded face, or the built-in face standing in for an absent one.
#[derive(Clone)]
enum WriterFace {
    Embedded(FontId),
    Builtin(BuiltinFont),
}

pub struct PdfWriter {
    document: PdfDocument,
    regular: WriterFace,
    bold: WriterFace,
    cjk: WriterFace,
}

impl PdfWriter {
    /// Embeds whichever faces resolved; absent or unparseable faces fall
    /// back to the built-in Helvetica family with a logged warning.
    pub fn new(title: &str, fonts: &FontSet) -> Self {
        let mut document = PdfDocument::new(title);
        let regular = embed_face(
            &mut document,
            fonts.face_data(FontRole::Regular),
            "regular",
            BuiltinFont::Helvetica,
        );
        let bold = embed_face(
            &mut document,
            fonts.face_data(FontRole::Bold),
            "bold",
            BuiltinFont::HelveticaBold,
        );
        // The composer only emits the CJK role when the face loaded, but
        // map it defensively onto the regular face anyway.
        let cjk = match fonts.face_data(FontRole::Cjk) {
            Some(_) => embed_face(
                &mut document,
                fonts.face_data(FontRole::Cjk),
                "cjk",
                BuiltinFont::Helvetica,
            ),
            None => regular.clone(),
        };
        Self {
            document,
            regular,
            bold,
            cjk,
        }
    }

    /// Serializes the composed pages into a complete PDF. Identical
    /// pages always serialize to identical bytes.
    pub fn write(mut self, pages: &[Page]) -> Vec<u8> {
        for page in pages {
            let mut ops = Vec::new();
            for cmd in &page.commands {
                self.write_cmd(cmd, &mut ops);
            }
            if let Some(footer) = &page.footer {
                self.write_text(
                    &mut ops,
                    footer.x,
                    footer.y,
                    footer.size,
                    FontRole::Regular,
                    Rgb::new(120, 120, 120),
                    &footer.text,
                );
            }
            let pdf_page = PdfPage::new(page_width_mm(), page_height_mm(), ops);
            self.document.pages.push(pdf_page);
        }
        let mut warnings = Vec::new();
        let bytes = self.document.save(&PdfSaveOptions::default(), &mut warnings);
        normalize_volatile_metadata(bytes)
    }

    fn write_cmd(&self, cmd: &DrawCmd, ops: &mut Vec<Op>) {
        match cmd {
            DrawCmd::Text {
                x,
                y,
                size,
                role,
                color,
                text,
            } => self.write_text(ops, *x, *y, *size, *role, *color, text),
            DrawCmd::Rule {
                x,
                y,
                width,
                thickness,
                color,
            } => draw_box(ops, *x, *y, *width, *thickness, Some(*color), None),
            DrawCmd::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => draw_box(ops, *x, *y, *width, *height, *fill, *stroke),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn write_text(
        &self,
        ops: &mut Vec<Op>,
        x: f32,
        y: f32,
        size: f32,
        role: FontRole,
        color: Rgb,
        text: &str,
    ) {
        // Flip from top-left layout coordinates to PDF's bottom-left
        // origin; the baseline sits one font-size below the top of the
        // line box.
        let pdf_y = PAGE_HEIGHT - y - size;
        ops.push(Op::SetFillColor {
            col: pdf_color(color),
        });
        ops.push(Op::StartTextSection);
        let matrix = TextMatrix::Translate(Pt(x), Pt(pdf_y));
        match self.face(role) {
            WriterFace::Embedded(font) => {
                ops.push(Op::SetFontSize {
                    size: Pt(size),
                    font: font.clone(),
                });
                ops.push(Op::SetTextMatrix { matrix });
                ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.to_string())],
                    font: font.clone(),
                });
            }
            WriterFace::Builtin(font) => {
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(size),
                    font: *font,
                });
                ops.push(Op::SetTextMatrix { matrix });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.to_string())],
                    font: *font,
                });
            }
        }
        ops.push(Op::EndTextSection);
    }

    fn face(&self, role: FontRole) -> &WriterFace {
        match role {
            FontRole::Regular => &self.regular,
            FontRole::Bold => &self.bold,
            FontRole::Cjk => &self.cjk,
        }
    }
}

/// The serializer stamps a process-global random trailer ID and
/// wall-clock info dates into every document, so back-to-back saves of
/// the same pages differ. Rewrite both to values derived from the
/// document content.
fn normalize_volatile_metadata(bytes: Vec<u8>) -> Vec<u8> {
    match rewrite_trailer_and_dates(&bytes) {
        Ok(normalized) => normalized,
        Err(e) => {
            log::warn!("could not normalize document metadata: {e}");
            bytes
        }
    }
}

fn rewrite_trailer_and_dates(bytes: &[u8]) -> lopdf::Result<Vec<u8>> {
    let mut doc = lopdf::Document::load_mem(bytes)?;
    strip_info_dates(&mut doc);
    doc.trailer.remove(b"ID");

    // Serialize once without the ID, then derive it from that stable
    // form. lopdf's own serialization is deterministic.
    let mut stable = Vec::new();
    doc.save_to(&mut stable)?;
    let digest = Sha256::digest(&stable);
    let id = digest[..16].to_vec();
    doc.trailer.set(
        "ID",
        lopdf::Object::Array(vec![
            lopdf::Object::String(id.clone(), lopdf::StringFormat::Hexadecimal),
            lopdf::Object::String(id, lopdf::StringFormat::Hexadecimal),
        ]),
    );

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn strip_info_dates(doc: &mut lopdf::Document) {
    let info_id = match doc.trailer.get(b"Info") {
        Ok(lopdf::Object::Reference(id)) => *id,
        _ => return,
    };
    if let Ok(info) = doc.get_object_mut(info_id)
        && let Ok(dict) = info.as_dict_mut()
    {
        dict.remove(b"CreationDate");
        dict.remove(b"ModDate");
    }
}

fn embed_face(
    document: &mut PdfDocument,
    data: Option<&SharedFontData>,
    face_name: &str,
    fallback: BuiltinFont,
) -> WriterFace {
    let Some(data) = data else {
        return WriterFace::Builtin(fallback);
    };
    let mut warnings = Vec::new();
    match ParsedFont::from_bytes(data, 0, &mut warnings) {
        Some(font) => WriterFace::Embedded(document.add_font(&font)),
        None => {
            log::warn!("could not parse {face_name} font, falling back to the built-in face");
            WriterFace::Builtin(fallback)
        }
    }
}

fn draw_box(
    ops: &mut Vec<Op>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fill: Option<Rgb>,
    stroke: Option<Rgb>,
) {
    if fill.is_none() && stroke.is_none() {
        return;
    }
    let pdf_y = PAGE_HEIGHT - y - height;
    let points = vec![
        corner(x, pdf_y),
        corner(x + width, pdf_y),
        corner(x + width, pdf_y + height),
        corner(x, pdf_y + height),
    ];

    if let Some(color) = fill {
        ops.push(Op::SetFillColor {
            col: pdf_color(color),
        });
    }
    if let Some(color) = stroke {
        ops.push(Op::SetOutlineColor {
            col: pdf_color(color),
        });
        ops.push(Op::SetOutlineThickness { pt: Pt(0.75) });
    }
    let mode = match (fill.is_some(), stroke.is_some()) {
        (true, true) => PaintMode::FillStroke,
        (false, true) => PaintMode::Stroke,
        _ => PaintMode::Fill,
    };
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing { points }],
            mode,
            winding_order: WindingOrder::NonZero,
        },
    });
}

fn corner(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn pdf_color(color: Rgb) -> printpdf::color::Color {
    printpdf::color::Color::Rgb(printpdf::Rgb::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        None,
    ))
}

fn page_width_mm() -> Mm {
    Pt(PAGE_WIDTH).into()
}

fn page_height_mm() -> Mm {
    Pt(PAGE_HEIGHT).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Footer;

    fn page_with_line(text: &str) -> Page {
        Page {
            commands: vec![DrawCmd::Text {
                x: 40.0,
                y: 40.0,
                size: 10.0,
                role: FontRole::Regular,
                color: Rgb::new(0, 0, 0),
                text: text.to_string(),
            }],
            footer: Some(Footer {
                text: "Page 1".to_string(),
                x: 500.0,
                y: 820.0,
                size: 8.0,
            }),
        }
    }

    #[test]
    fn writes_one_pdf_page_per_composed_page() {
        let writer = PdfWriter::new("test", &FontSet::empty());
        let bytes = writer.write(&[page_with_line("first"), page_with_line("second")]);

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn builtin_only_font_set_produces_a_valid_document() {
        let writer = PdfWriter::new("fallback", &FontSet::empty());
        let bytes = writer.write(&[page_with_line("ข้อความ 上涨 mixed")]);
        assert!(lopdf::Document::load_mem(&bytes).is_ok());
    }

    #[test]
    fn identical_pages_serialize_to_identical_bytes() {
        let pages = [page_with_line("deterministic"), page_with_line("output")];
        let first = PdfWriter::new("same", &FontSet::empty()).write(&pages);
        let second = PdfWriter::new("same", &FontSet::empty()).write(&pages);
        assert_eq!(first, second);
    }

    #[test]
    fn normalized_documents_keep_their_pages() {
        let bytes = PdfWriter::new("kept", &FontSet::empty())
            .write(&[page_with_line("a"), page_with_line("b")]);
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        assert!(doc.trailer.get(b"ID").is_ok());
    }

    #[test]
    fn garbage_font_bytes_fall_back_instead_of_failing() {
        let fonts = FontSet::new(Some(std::sync::Arc::new(vec![0u8; 2000])), None, None);
        let writer = PdfWriter::new("garbage", &fonts);
        let bytes = writer.write(&[page_with_line("still renders")]);
        assert!(lopdf::Document::load_mem(&bytes).is_ok());
    }
}
