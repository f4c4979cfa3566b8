mod common;

use common::fixtures::{long_sections, sample_meta, sample_sections};
use common::{ExportedPdf, TestResult, init_test_logging};
use dossier::ExportPipeline;
use dossier_content::ReportView;
use dossier_pdf::Language;
use dossier_resource::{FontSources, InMemoryFontFetcher, MIN_FONT_BYTES};

fn pipeline() -> ExportPipeline {
    // No font sources configured: exports with the built-in fallback.
    ExportPipeline::builder()
        .with_fetcher(InMemoryFontFetcher::new())
        .build()
}

#[tokio::test]
async fn exports_a_valid_pdf() -> TestResult {
    init_test_logging();
    let document = pipeline().export(&sample_meta(), &sample_sections()).await;

    let pdf = ExportedPdf::from_bytes(document.bytes)?;
    assert!(pdf.page_count() >= 1);
    assert_eq!(document.file_name, "Dossier_AAPL_2026-08-21.pdf");
    Ok(())
}

#[tokio::test]
async fn page_count_matches_the_serialized_document() -> TestResult {
    let document = pipeline().export(&sample_meta(), &long_sections(10)).await;
    assert!(document.page_count > 1, "expected a multi-page export");

    let pdf = ExportedPdf::from_bytes(document.bytes)?;
    assert_eq!(pdf.page_count(), document.page_count);
    Ok(())
}

#[tokio::test]
async fn summary_view_filters_sections_and_labels_the_file() -> TestResult {
    let pipeline = ExportPipeline::builder()
        .with_fetcher(InMemoryFontFetcher::new())
        .with_view(ReportView::Summary)
        .build();
    let document = pipeline.export(&sample_meta(), &sample_sections()).await;

    assert_eq!(document.file_name, "Dossier_AAPL_2026-08-21_Summary.pdf");
    // Only one section is marked as summary material, so the export
    // stays on a single page.
    assert_eq!(document.page_count, 1);
    ExportedPdf::from_bytes(document.bytes)?;
    Ok(())
}

#[tokio::test]
async fn thai_variant_tags_the_file_name() -> TestResult {
    let pipeline = ExportPipeline::builder()
        .with_fetcher(InMemoryFontFetcher::new())
        .with_language(Language::Th)
        .build();
    let document = pipeline.export(&sample_meta(), &sample_sections()).await;

    assert_eq!(document.file_name, "Dossier_AAPL_2026-08-21_TH.pdf");
    ExportedPdf::from_bytes(document.bytes)?;
    Ok(())
}

#[tokio::test]
async fn undersized_fonts_degrade_without_failing_the_export() -> TestResult {
    init_test_logging();
    let mut fetcher = InMemoryFontFetcher::new();
    fetcher.insert("fonts/regular.ttf", vec![0u8; MIN_FONT_BYTES - 1]);

    let pipeline = ExportPipeline::builder()
        .with_fetcher(fetcher)
        .with_font_sources(FontSources {
            regular: Some("fonts/regular.ttf".into()),
            bold: Some("fonts/missing-bold.ttf".into()),
            cjk: None,
        })
        .build();

    let document = pipeline.export(&sample_meta(), &sample_sections()).await;
    ExportedPdf::from_bytes(document.bytes)?;
    Ok(())
}

#[tokio::test]
async fn exports_to_a_directory_under_the_canonical_name() -> TestResult {
    let dir = tempfile::tempdir()?;
    let document = pipeline()
        .export_to_dir(&sample_meta(), &sample_sections(), dir.path())
        .await?;

    let written = std::fs::read(dir.path().join(&document.file_name))?;
    assert_eq!(written, document.bytes);
    Ok(())
}

#[tokio::test]
async fn concurrent_exports_do_not_interfere() -> TestResult {
    let pipeline = pipeline();
    let meta = sample_meta();
    let sections = long_sections(6);

    let (a, b) = tokio::join!(
        pipeline.export(&meta, &sections),
        pipeline.export(&meta, &sections)
    );
    assert_eq!(a.page_count, b.page_count);
    // Identical tree, metadata, and fonts produce byte-identical output.
    assert_eq!(a.bytes, b.bytes);
    assert_eq!(ExportedPdf::from_bytes(a.bytes)?.page_count(), a.page_count);
    Ok(())
}
