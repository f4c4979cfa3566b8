//! Dossier: dual-target rendering engine for multi-agent analysis
//! reports.
//!
//! The upstream pipeline hands over an ordered list of report sections
//! holding a mix of prose, markdown-ish text, and arbitrarily nested
//! JSON. Both targets consume the same classified tree:
//!
//! - `dossier-view` renders an in-memory nested view tree for a host UI,
//! - `dossier-pdf` composes and serializes a paginated, multi-script PDF.
//!
//! This crate ties them together: [`ExportPipeline`] resolves fonts,
//! composes, serializes, and names the output artifact.

pub mod pipeline;

pub use pipeline::{
    ExportPipeline, ExportPipelineBuilder, ExportedDocument, ReportFile, document_file_name,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("report parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
