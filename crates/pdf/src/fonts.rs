//! Script detection, font selection, and text measurement.

use std::sync::Arc;

/// Immutable font bytes shared across the pipeline without copying.
pub type SharedFontData = Arc<Vec<u8>>;

/// Writing system of a text run, as far as face selection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Thai,
    Cjk,
}

/// Scans a text run for Thai and CJK codepoints. Thai wins when both
/// scripts are present, since the text face covers Thai and Latin
/// together while the CJK face covers neither.
pub fn detect_script(text: &str) -> Script {
    let mut saw_cjk = false;
    for c in text.chars() {
        match c {
            '\u{0E00}'..='\u{0E7F}' => return Script::Thai,
            '\u{4E00}'..='\u{9FFF}' => saw_cjk = true,
            _ => {}
        }
    }
    if saw_cjk { Script::Cjk } else { Script::Latin }
}

/// The face a draw command references. Resolution to an actual font
/// (embedded or built-in) happens in the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Regular,
    Bold,
    Cjk,
}

/// The set of faces that resolved for one export. Any slot may be
/// absent; selection degrades rather than fails.
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    regular: Option<SharedFontData>,
    bold: Option<SharedFontData>,
    cjk: Option<SharedFontData>,
}

impl FontSet {
    pub fn new(
        regular: Option<SharedFontData>,
        bold: Option<SharedFontData>,
        cjk: Option<SharedFontData>,
    ) -> Self {
        Self { regular, bold, cjk }
    }

    /// No embedded faces at all; everything renders with the built-in
    /// fallback family.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Picks the face for a text run. CJK runs use the CJK face only
    /// when it actually loaded (it has no bold variant). A bold request
    /// silently degrades to regular when the text family loaded without
    /// its bold face; when no text family loaded at all, the built-in
    /// fallback family provides both weights.
    pub fn select(&self, text: &str, bold: bool) -> FontRole {
        if detect_script(text) == Script::Cjk && self.cjk.is_some() {
            return FontRole::Cjk;
        }
        if bold && (self.bold.is_some() || self.regular.is_none()) {
            FontRole::Bold
        } else {
            FontRole::Regular
        }
    }

    /// Embedded bytes for a role, when that slot loaded.
    pub fn face_data(&self, role: FontRole) -> Option<&SharedFontData> {
        match role {
            FontRole::Regular => self.regular.as_ref(),
            FontRole::Bold => self.bold.as_ref(),
            FontRole::Cjk => self.cjk.as_ref(),
        }
    }

    /// Width in points of `text` at `size` using the given face's glyph
    /// advances. Falls back to a per-character approximation when the
    /// face is absent or unparseable.
    pub fn measure(&self, text: &str, size: f32, role: FontRole) -> f32 {
        let parsed = self
            .face_data(role)
            .and_then(|data| ttf_parser::Face::parse(data, 0).ok());
        let Some(face) = parsed else {
            return approximate_width(text, size);
        };

        let units_per_em = face.units_per_em() as f32;
        text.chars()
            .map(|c| match face.glyph_index(c).and_then(|g| face.glyph_hor_advance(g)) {
                Some(advance) => advance as f32 * size / units_per_em,
                None => APPROX_CHAR_FACTOR * size,
            })
            .sum()
    }

    /// Measures `text` with the face [`select`](Self::select) would pick.
    pub fn measure_line(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.measure(text, size, self.select(text, bold))
    }
}

const APPROX_CHAR_FACTOR: f32 = 0.6;

fn approximate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * APPROX_CHAR_FACTOR * size
}
