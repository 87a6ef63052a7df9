use anyhow::{Context, Result};
use clap::Parser;
use pagetree::config::DEFAULT_CONFIG_FILE;
use pagetree::{load_documents, logging, write_json, write_report, AppConfig, Document, Segmenter};
use std::path::PathBuf;
use std::time::Instant;
use tracing::error;

/// Rebuild chapter/section trees from paginated plain-text documents
#[derive(Parser, Debug)]
#[command(name = "pagetree", version, about)]
struct Cli {
    /// TOML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory with one sub-directory per document (overrides config)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Artifacts directory (overrides config)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also write a JSON tree per document
    #[arg(long)]
    json: bool,

    /// Skip the text contents reports
    #[arg(long)]
    no_report: bool,

    /// Print the first document's tree to stdout
    #[arg(long)]
    print: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn print_tree(document: &Document) {
    println!("From book {}", document.name);
    for chapter in &document.chapters {
        println!(" Chapter: {}", chapter.name);
        let mut pending: Vec<_> = chapter.sections.iter().rev().map(|&id| (id, 2)).collect();
        while let Some((id, indent)) = pending.pop() {
            let Some(section) = document.section(id) else {
                continue;
            };
            println!("{}Section: {}", " ".repeat(indent), section.name);
            for paragraph in section.paragraphs() {
                println!("{}Content: {}", " ".repeat(indent + 1), paragraph);
            }
            pending.extend(section.children.iter().rev().map(|&child| (child, indent + 1)));
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let start_time = Instant::now();
    let mut config = AppConfig::load(&cli.config);
    if let Some(data) = cli.data {
        config.data.documents_path = data;
    }
    if let Some(out) = cli.out {
        config.output.artifacts_path = out;
    }
    config.output.json |= cli.json;
    config.output.report &= !cli.no_report;

    println!("=== pagetree: document segmentation ===\n");

    // Step 1: Load documents
    let step1_start = Instant::now();
    println!("Step 1: Loading documents...");
    let documents = load_documents(&config.data.documents_path, &config.data.extensions)
        .context("Failed to load documents")?;
    let page_count: usize = documents.iter().map(|d| d.pages.len()).sum();
    let step1_duration = step1_start.elapsed();
    println!(
        "✓ Loaded {} documents ({} pages) [{:.2}s]\n",
        documents.len(),
        page_count,
        step1_duration.as_secs_f64()
    );

    // Step 2: Segment into chapters and sections
    let step2_start = Instant::now();
    println!("Step 2: Segmenting documents...");
    let segmenter = Segmenter::new(config.segmenter.clone());
    let mut segmented = Vec::new();
    let mut failed = 0;
    for result in segmenter.segment_all(documents) {
        match result {
            Ok(document) => segmented.push(document),
            Err(e) => {
                error!(error = %e, "Skipping document");
                failed += 1;
            }
        }
    }
    let step2_duration = step2_start.elapsed();
    println!(
        "✓ Segmented {} documents, {} skipped [{:.2}s]\n",
        segmented.len(),
        failed,
        step2_duration.as_secs_f64()
    );

    // Step 3: Export
    let step3_start = Instant::now();
    println!("Step 3: Exporting...");
    let artifacts = &config.output.artifacts_path;
    for document in &segmented {
        if config.output.report {
            write_report(document, artifacts)?;
        }
        if config.output.json {
            write_json(document, artifacts)?;
        }
    }
    let step3_duration = step3_start.elapsed();
    println!(
        "✓ Wrote results to {} [{:.2}s]\n",
        artifacts.display(),
        step3_duration.as_secs_f64()
    );

    if cli.print {
        if let Some(document) = segmented.first() {
            print_tree(document);
            println!();
        }
    }

    // Statistics
    let sum = |f: &dyn Fn(&Document) -> usize| segmented.iter().map(f).sum::<usize>();
    println!("=== Statistics ===");
    println!("Documents:            {}", segmented.len());
    println!("Pages:                {}", page_count);
    println!("Chapters:             {}", sum(&|d| d.chapters.len()));
    println!("Sections:             {}", sum(&|d| d.sections.len()));
    println!("Paragraphs:           {}", sum(&|d| d.contents.len()));
    println!("Orphan paragraphs:    {}", sum(&|d| d.orphan_contents.len()));
    println!("Orphan sections:      {}", sum(&|d| d.orphan_sections.len()));

    let total_duration = start_time.elapsed();
    println!("\n=== Timing Breakdown ===");
    println!(
        "Step 1 (Loading):     {:.3}s",
        step1_duration.as_secs_f64()
    );
    println!(
        "Step 2 (Segmenting):  {:.3}s",
        step2_duration.as_secs_f64()
    );
    println!(
        "Step 3 (Exporting):   {:.3}s",
        step3_duration.as_secs_f64()
    );
    println!("─────────────────────────────────");
    println!("Total execution:      {:.3}s", total_duration.as_secs_f64());

    Ok(())
}
