//! Font acquisition for the Dossier export pipeline.
//!
//! Fonts are fetched asynchronously through the [`FontFetcher`] trait,
//! then validated and assembled by [`resolve_fonts`]. A fetcher that
//! fails or returns a truncated file never aborts an export; the
//! affected face is simply absent and the composer falls back to a
//! built-in face.
//!
//! ## Available fetchers
//!
//! - [`HttpFontFetcher`]: downloads faces over HTTPS
//! - [`FilesystemFontFetcher`]: loads faces from a confined directory
//! - [`InMemoryFontFetcher`]: pre-populated storage, mostly for tests

mod fetcher;
mod filesystem;
mod resolver;

pub use fetcher::{FetchError, FontFetcher, HttpFontFetcher, InMemoryFontFetcher, SharedFontData};
pub use filesystem::FilesystemFontFetcher;
pub use resolver::{FontSources, MIN_FONT_BYTES, ResolvedFonts, load_font, resolve_fonts};
