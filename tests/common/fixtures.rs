//! Shared report fixtures for integration tests.

use dossier_content::{ReportMeta, ReportSection};
use serde_json::{Value, json};

pub fn sample_meta() -> ReportMeta {
    ReportMeta {
        product: "Dossier".to_string(),
        ticker: "AAPL".to_string(),
        analysis_date: "2026-08-21".to_string(),
        decision: Some("BUY".to_string()),
    }
}

pub fn section(label: &str, text: Value) -> ReportSection {
    section_typed(label, text, "")
}

pub fn section_typed(label: &str, text: Value, report_type: &str) -> ReportSection {
    serde_json::from_value(json!({
        "key": label.to_lowercase().replace([' ', ':'], "_"),
        "label": label,
        "text": text,
        "report_type": report_type,
    }))
    .expect("fixture section deserializes")
}

/// A realistic multi-section report: prose, nested records, a card
/// list, and a tag list.
pub fn sample_sections() -> Vec<ReportSection> {
    vec![
        section(
            "Market Analysis",
            json!("### Technical Overview\nMomentum remains positive.\n- RSI near 60\n- MACD crossover confirmed"),
        ),
        section(
            "News Analysis",
            json!([
                {"headline": "Fed holds rates steady", "impact": "neutral", "source": "wire"},
                {"headline": "Supply chain pressure easing", "impact": "positive", "source": "wire"}
            ]),
        ),
        section("Social Sentiment", json!(["bullish", "momentum", "earnings"])),
        section_typed(
            "Portfolio Management Decision",
            json!({"decision": "BUY", "summary": "Strong earnings with improving margins", "confidence": "high"}),
            "summary",
        ),
    ]
}

/// A report long enough to spill onto several pages.
pub fn long_sections(count: usize) -> Vec<ReportSection> {
    let paragraph = "A reasonably long paragraph of analysis prose that wraps across several lines. "
        .repeat(30);
    (0..count)
        .map(|i| section(&format!("Extended Analysis {i}"), json!(paragraph.clone())))
        .collect()
}
