//! The export target: paginated PDF layout and serialization.
//!
//! Rendering is a two-stage pipeline. [`Composer`] walks the classified
//! content tree and emits positioned draw commands into [`Page`]s, which
//! can be inspected and asserted against directly. [`PdfWriter`] then
//! serializes those pages to PDF bytes with `printpdf`. Keeping the
//! stages apart means page-flow invariants are testable without parsing
//! the produced document.

mod compose;
mod cursor;
mod fonts;
mod labels;
mod output;
mod writer;

pub use compose::{Composer, INLINE_VALUE_MAX_CHARS, LINE_HEIGHT, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
pub use cursor::{DocumentCursor, PageFlow};
pub use fonts::{FontRole, FontSet, Script, SharedFontData, detect_script};
pub use labels::{Labels, Language};
pub use output::{DrawCmd, Footer, Page, Rgb};
pub use writer::PdfWriter;
