//! Font validation and concurrent resolution.

use crate::fetcher::{FontFetcher, SharedFontData};

/// Smallest byte count accepted as a plausible font file. Anything
/// shorter is treated as a failed download (an error page, a truncated
/// body) and discarded.
pub const MIN_FONT_BYTES: usize = 1000;

/// Where to fetch each face from. A `None` source means the face is
/// intentionally not provided and the built-in fallback is used.
#[derive(Debug, Clone, Default)]
pub struct FontSources {
    /// Regular Latin/Thai text face.
    pub regular: Option<String>,
    /// Bold Latin/Thai text face.
    pub bold: Option<String>,
    /// CJK face, used for Chinese-script runs.
    pub cjk: Option<String>,
}

/// Fonts that actually arrived. Each face is independently optional;
/// a missing face downgrades rendering but never fails the export.
#[derive(Debug, Clone, Default)]
pub struct ResolvedFonts {
    pub regular: Option<SharedFontData>,
    pub bold: Option<SharedFontData>,
    pub cjk: Option<SharedFontData>,
}

impl ResolvedFonts {
    /// True when no embeddable face arrived at all.
    pub fn is_empty(&self) -> bool {
        self.regular.is_none() && self.bold.is_none() && self.cjk.is_none()
    }
}

/// Fetches one face and validates its size. Failures are logged and
/// absorbed: the caller only sees presence or absence.
pub async fn load_font(
    fetcher: &dyn FontFetcher,
    source: Option<&str>,
    face_name: &str,
) -> Option<SharedFontData> {
    let source = source?;
    match fetcher.fetch(source).await {
        Ok(data) if data.len() >= MIN_FONT_BYTES => {
            log::debug!("loaded font '{}' ({} bytes) via {}", face_name, data.len(), fetcher.name());
            Some(data)
        }
        Ok(data) => {
            log::warn!(
                "font '{}' from '{}' is only {} bytes, discarding as invalid",
                face_name,
                source,
                data.len()
            );
            None
        }
        Err(e) => {
            log::warn!("failed to load font '{face_name}': {e}");
            None
        }
    }
}

/// Resolves all configured faces concurrently. Each face settles on its
/// own; one failure never discards another face's bytes.
pub async fn resolve_fonts(fetcher: &dyn FontFetcher, sources: &FontSources) -> ResolvedFonts {
    let (regular, bold, cjk) = tokio::join!(
        load_font(fetcher, sources.regular.as_deref(), "regular"),
        load_font(fetcher, sources.bold.as_deref(), "bold"),
        load_font(fetcher, sources.cjk.as_deref(), "cjk"),
    );
    ResolvedFonts { regular, bold, cjk }
}
