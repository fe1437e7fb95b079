use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use splitcmp::discovery::{self, DiscoveryConfig};
use splitcmp::export::export_dir_for;
use splitcmp::pipeline::{CompareConfig, Comparator, DocumentComparison, DEFAULT_CACHE_CAPACITY};
use splitcmp::presenter;
use splitcmp::reader::{DocumentReader, ReaderConfig};
use splitcmp::report::{SampleWindow, DEFAULT_WINDOW_END, DEFAULT_WINDOW_START, HISTOGRAM_BINS};
use splitcmp::sentence_detector::SharedTokenizer;
use splitcmp::stats::{DocumentStats, RunStats};
use splitcmp::PdfTextExtractor;

#[derive(Parser, Debug)]
#[command(name = "splitcmp")]
#[command(about = "Compare naive and abbreviation-aware sentence splitting of PDF text")]
#[command(version)]
struct Args {
    /// PDF file, or directory scanned recursively for *.pdf
    input: PathBuf,

    /// JSON sentence model (language, abbreviations, closing_punctuation)
    #[arg(long)]
    model: Option<PathBuf>,

    /// First naive fragment index of the sample window
    #[arg(long, default_value_t = DEFAULT_WINDOW_START)]
    window_start: usize,

    /// Exclusive end of the sample window
    #[arg(long, default_value_t = DEFAULT_WINDOW_END)]
    window_end: usize,

    /// Bins of the words-per-sentence histogram
    #[arg(long, default_value_t = HISTOGRAM_BINS)]
    histogram_bins: usize,

    /// Documents whose extracted text stays cached (0 disables the cache)
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// Write tokenized_sentences.txt for each document below this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,

    /// Use memory-mapped I/O instead of async buffered
    #[arg(long)]
    use_mmap: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Do not print comparison tables
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting splitcmp");
    info!(?args, "Parsed CLI arguments");

    if !args.input.exists() {
        anyhow::bail!("Input does not exist: {}", args.input.display());
    }

    let tokenizer = match &args.model {
        Some(path) => SharedTokenizer::from_file(path),
        None => SharedTokenizer::english(),
    };
    // WHY: surface a broken model once, up front, instead of once per document
    tokenizer
        .initialize()
        .context("Sentence model could not be initialized")?;

    let config = CompareConfig {
        window: SampleWindow::new(args.window_start, args.window_end),
        histogram_bins: args.histogram_bins,
        cache_capacity: args.cache_capacity,
    };
    let comparator = Arc::new(Comparator::new(
        Box::new(PdfTextExtractor::new()),
        Arc::new(tokenizer),
        config,
    ));

    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
    };
    let files = discovery::collect_pdf_files(&args.input, discovery_config).await?;
    if files.is_empty() {
        println!("No PDF files found under {}", args.input.display());
        return Ok(());
    }

    let reader = DocumentReader::new(ReaderConfig {
        use_mmap: args.use_mmap,
        ..ReaderConfig::default()
    });

    let progress = if args.no_progress || files.len() < 2 {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let mut run_stats = RunStats::default();
    for path in &files {
        progress.set_message(path.display().to_string());
        let start_time = Instant::now();

        let result = match process_document(&reader, &comparator, path).await {
            Ok(comparison) => match &args.export_dir {
                Some(dir) => {
                    let target_dir = export_dir_for(dir, &args.input, path);
                    let export = comparison.export();
                    let written = export.write_into(&target_dir).await;
                    written.map(|_| comparison)
                }
                None => Ok(comparison),
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(comparison) => {
                if !args.quiet {
                    progress.suspend(|| {
                        println!("{}", presenter::render_comparison(&path.display().to_string(), &comparison));
                    });
                }
                let elapsed = start_time.elapsed().as_millis() as u64;
                run_stats.record(DocumentStats::success(path, &comparison, elapsed));
            }
            Err(e) => {
                if args.fail_fast {
                    progress.abandon();
                    return Err(e.context(format!("Failed to process {}", path.display())));
                }
                warn!("Failed to compare {}: {:#}", path.display(), e);
                let elapsed = start_time.elapsed().as_millis() as u64;
                run_stats.record(DocumentStats::failure(path, format!("{e:#}"), elapsed));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    run_stats.save(&args.stats_out).await?;

    println!("splitcmp v{} - comparison complete", env!("CARGO_PKG_VERSION"));
    println!("  Documents compared: {}", run_stats.documents_processed);
    if run_stats.documents_failed > 0 {
        println!("  Documents failed: {}", run_stats.documents_failed);
    }
    println!("  Stats written to {}", args.stats_out.display());

    info!(
        "Run completed: {} successful, {} failed",
        run_stats.documents_processed, run_stats.documents_failed
    );
    Ok(())
}

async fn process_document(
    reader: &DocumentReader,
    comparator: &Arc<Comparator>,
    path: &Path,
) -> Result<DocumentComparison> {
    let (bytes, _stats) = reader.read_document(path).await?;

    // WHY: PDF parsing and tokenizing are CPU-bound; keep them off the async workers.
    // The bytes move in as read, so a memory map is never copied
    let comparator = Arc::clone(comparator);
    let comparison = tokio::task::spawn_blocking(move || comparator.compare(&bytes)).await??;
    Ok(comparison)
}
