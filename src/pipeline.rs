//! The export pipeline: font resolution, composition, serialization,
//! and artifact naming.

use crate::PipelineError;
use dossier_content::{ReportMeta, ReportSection, ReportView};
use dossier_pdf::{Composer, FontSet, Language, PdfWriter};
use dossier_resource::{FontFetcher, FontSources, HttpFontFetcher, resolve_fonts};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// A complete report file as produced by the upstream pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportFile {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub sections: Vec<ReportSection>,
}

/// A fully materialized export. The caller decides what to do with the
/// bytes; nothing is written to disk during export itself.
#[derive(Debug)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub page_count: usize,
}

/// One configured export path. Fonts are resolved fresh per export;
/// every export owns an independent cursor, so concurrent exports
/// cannot corrupt each other's page state.
pub struct ExportPipeline {
    fetcher: Arc<dyn FontFetcher>,
    sources: FontSources,
    language: Language,
    view: Option<ReportView>,
}

impl ExportPipeline {
    pub fn builder() -> ExportPipelineBuilder {
        ExportPipelineBuilder::new()
    }

    /// Renders a report to PDF bytes. All font fetches settle before
    /// the first draw call; failures degrade typography, never the
    /// export.
    pub async fn export(&self, meta: &ReportMeta, sections: &[ReportSection]) -> ExportedDocument {
        let resolved = resolve_fonts(self.fetcher.as_ref(), &self.sources).await;
        if resolved.is_empty() {
            log::warn!("no fonts resolved, exporting with the built-in fallback family");
        }
        let fonts = FontSet::new(resolved.regular, resolved.bold, resolved.cjk);

        let file_name = document_file_name(meta, self.view, self.language);
        let selected = self.select_sections(sections);
        let pages = Composer::new(fonts.clone(), self.language).compose(meta, &selected);
        let page_count = pages.len();
        let bytes = PdfWriter::new(&file_name, &fonts).write(&pages);
        log::info!("exported {file_name}: {page_count} pages, {} bytes", bytes.len());

        ExportedDocument {
            bytes,
            file_name,
            page_count,
        }
    }

    /// Exports and writes the artifact into `dir` under its canonical
    /// file name, returning the document.
    pub async fn export_to_dir(
        &self,
        meta: &ReportMeta,
        sections: &[ReportSection],
        dir: &Path,
    ) -> Result<ExportedDocument, PipelineError> {
        let document = self.export(meta, sections).await;
        std::fs::write(dir.join(&document.file_name), &document.bytes)?;
        Ok(document)
    }

    /// The summary view keeps only sections marked as summary material;
    /// the full view (and an unlabeled export) keeps everything.
    fn select_sections(&self, sections: &[ReportSection]) -> Vec<ReportSection> {
        match self.view {
            Some(ReportView::Summary) => sections
                .iter()
                .filter(|s| s.report_type == "summary")
                .cloned()
                .collect(),
            _ => sections.to_vec(),
        }
    }
}

pub struct ExportPipelineBuilder {
    fetcher: Option<Arc<dyn FontFetcher>>,
    sources: FontSources,
    language: Language,
    view: Option<ReportView>,
}

impl ExportPipelineBuilder {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            sources: FontSources::default(),
            language: Language::En,
            view: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: impl FontFetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    pub fn with_font_sources(mut self, sources: FontSources) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Labels the export as a section-subset view; the label appears in
    /// the output file name.
    pub fn with_view(mut self, view: ReportView) -> Self {
        self.view = Some(view);
        self
    }

    pub fn build(self) -> ExportPipeline {
        ExportPipeline {
            fetcher: self
                .fetcher
                .unwrap_or_else(|| Arc::new(HttpFontFetcher::new())),
            sources: self.sources,
            language: self.language,
            view: self.view,
        }
    }
}

impl Default for ExportPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical artifact name:
/// `<Product>_<Ticker>_<AnalysisDate>[_<ViewLabel>][_<LanguageTag>].pdf`.
/// The view label appears only for subset-labelled exports and the
/// language tag only for translated variants.
pub fn document_file_name(meta: &ReportMeta, view: Option<ReportView>, language: Language) -> String {
    let mut parts = vec![
        file_part(&meta.product),
        file_part(&meta.ticker),
        file_part(&meta.analysis_date),
    ];
    if let Some(view) = view {
        parts.push(view.label().to_string());
    }
    if let Some(tag) = language.tag() {
        parts.push(tag.to_string());
    }
    format!("{}.pdf", parts.join("_"))
}

fn file_part(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ReportMeta {
        ReportMeta {
            product: "Dossier".to_string(),
            ticker: "AAPL".to_string(),
            analysis_date: "2026-08-21".to_string(),
            decision: None,
        }
    }

    #[test]
    fn plain_export_name_has_no_optional_parts() {
        assert_eq!(
            document_file_name(&meta(), None, Language::En),
            "Dossier_AAPL_2026-08-21.pdf"
        );
    }

    #[test]
    fn view_label_and_language_tag_are_appended_in_order() {
        assert_eq!(
            document_file_name(&meta(), Some(ReportView::Summary), Language::Th),
            "Dossier_AAPL_2026-08-21_Summary_TH.pdf"
        );
        assert_eq!(
            document_file_name(&meta(), Some(ReportView::Full), Language::En),
            "Dossier_AAPL_2026-08-21_Full.pdf"
        );
    }

    #[test]
    fn spaces_in_metadata_do_not_break_the_file_name() {
        let mut meta = meta();
        meta.product = "Dossier Research".to_string();
        assert_eq!(
            document_file_name(&meta, None, Language::En),
            "Dossier-Research_AAPL_2026-08-21.pdf"
        );
    }

    #[test]
    fn report_file_deserializes_flattened_metadata() {
        let raw = r#"{
            "product": "Dossier",
            "ticker": "NVDA",
            "analysis_date": "2026-08-21",
            "decision": "HOLD",
            "sections": [
                {"key": "news", "label": "News Analysis", "text": "headlines"}
            ]
        }"#;
        let report: ReportFile = serde_json::from_str(raw).unwrap();
        assert_eq!(report.meta.ticker, "NVDA");
        assert_eq!(report.meta.decision.as_deref(), Some("HOLD"));
        assert_eq!(report.sections.len(), 1);
    }
}
