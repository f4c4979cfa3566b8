use dossier::{ExportPipeline, PipelineError, ReportFile};
use dossier_pdf::Language;
use dossier_resource::FontSources;
use std::env;
use std::fs;

/// A simple CLI to export an analysis report JSON file as a PDF.
#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Export a finalized analysis report as a paginated PDF.");
        eprintln!();
        eprintln!("Usage: {} <path/to/report.json> <path/to/output.pdf> [en|th]", args[0]);
        std::process::exit(1);
    }

    let report_path = &args[1];
    let output_path = &args[2];
    let language = match args.get(3).map(String::as_str) {
        Some("th") => Language::Th,
        _ => Language::En,
    };

    println!("Loading report from {report_path}");
    let raw = fs::read_to_string(report_path)?;
    let report: ReportFile = serde_json::from_str(&raw)?;

    let pipeline = ExportPipeline::builder()
        .with_font_sources(font_sources_from_env())
        .with_language(language)
        .build();

    println!("Exporting {} sections...", report.sections.len());
    let document = pipeline.export(&report.meta, &report.sections).await;
    fs::write(output_path, &document.bytes)?;

    println!(
        "Successfully wrote {output_path} ({} pages, canonical name {})",
        document.page_count, document.file_name
    );
    Ok(())
}

/// Font URLs come from the environment so the binary works without any
/// configuration file; unset slots degrade to the built-in face.
fn font_sources_from_env() -> FontSources {
    FontSources {
        regular: env::var("DOSSIER_FONT_REGULAR").ok(),
        bold: env::var("DOSSIER_FONT_BOLD").ok(),
        cjk: env::var("DOSSIER_FONT_CJK").ok(),
    }
}
