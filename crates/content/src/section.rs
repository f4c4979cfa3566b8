//! Report sections and their canonical ordering.

use serde::Deserialize;
use serde_json::Value;

/// One finalized section of an analysis report, as produced by the
/// upstream pipeline. Immutable once handed to the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSection {
    pub key: String,
    pub label: String,
    /// Either prose or an arbitrarily nested JSON value; the classifier
    /// decides which.
    pub text: Value,
    #[serde(default)]
    pub report_type: String,
}

/// Metadata about the report being exported.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportMeta {
    /// Product name used in the document header and output file name.
    pub product: String,
    pub ticker: String,
    pub analysis_date: String,
    /// Headline decision, shown under the document header when present.
    #[serde(default)]
    pub decision: Option<String>,
}

/// Which section subset was rendered. Appears in the output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    Summary,
    Full,
}

impl ReportView {
    pub fn label(&self) -> &'static str {
        match self {
            ReportView::Summary => "Summary",
            ReportView::Full => "Full",
        }
    }
}

/// Canonical ordering of section labels. Sections matching an entry are
/// emitted first, in this order; unmatched sections follow in first-seen
/// order.
pub const REPORT_ORDER: &[&str] = &[
    "Fundamentals Review",
    "Market Analysis",
    "Social Sentiment",
    "News Analysis",
    "Bull Case",
    "Bear Case",
    "Risk: Conservative",
    "Risk: Aggressive",
    "Risk: Neutral",
    "Trader Plan",
    "Research Team Decision",
    "Portfolio Management Decision",
];

/// Orders sections by [`REPORT_ORDER`], keeping unmatched sections in
/// first-seen order after the matched ones.
pub fn order_sections(sections: &[ReportSection]) -> Vec<&ReportSection> {
    let mut ordered: Vec<&ReportSection> = Vec::with_capacity(sections.len());
    for label in REPORT_ORDER {
        ordered.extend(sections.iter().filter(|s| s.label == *label));
    }
    ordered.extend(
        sections
            .iter()
            .filter(|s| !REPORT_ORDER.contains(&s.label.as_str())),
    );
    ordered
}
