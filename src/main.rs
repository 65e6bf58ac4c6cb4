use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use vocab_harvest::annotation::{Annotator, ConlluReader};
use vocab_harvest::parallel_processing::{
    classify_parallel, default_workers, write_report, FileStats, ReportFormat, RunStats,
};
use vocab_harvest::{
    detect_boundaries, discovery, extract_sentences, incremental, pipeline, AppConfig, Classifier,
    ClassificationCounts, Document, FailurePolicy, ReferenceData, SentenceSegmenter,
};

#[derive(Parser, Debug)]
#[command(name = "vocab-harvest")]
#[command(about = "Frequency-ranked vocabulary extraction from paginated Spanish text")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Known-word list (one word per line)
    #[arg(long, global = true)]
    known_words: Option<PathBuf>,

    /// Proper-noun list (one name per line)
    #[arg(long, global = true)]
    proper_nouns: Option<PathBuf>,

    /// Irregular verb mapping (YAML lemma: replacement)
    #[arg(long, global = true)]
    mappings: Option<PathBuf>,

    /// Suppress console progress bars
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the running header/footer patterns detected in page-text files
    Patterns {
        /// Page-text files (pages separated by form feeds) or directories of them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Extract cleaned sentences into `<stem>_sentences.txt` next to each input
    Sentences {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Rebuild sentence caches that already exist
        #[arg(long)]
        overwrite: bool,
    },
    /// Classify tagged sentences (CoNLL-U) and write a vocabulary report per input
    Classify {
        /// CoNLL-U files or directories of them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Carry totals across inputs; each report then holds the running totals
        #[arg(long)]
        combined: bool,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Yaml)]
        format: ReportFormat,

        /// Abort a document on its first unusable sentence
        #[arg(long)]
        fail_fast: bool,

        /// Classification workers (default: number of CPUs)
        #[arg(long)]
        workers: Option<usize>,

        /// Stats output file path
        #[arg(long, default_value = "run_stats.json")]
        stats_out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let cli = Cli::parse();
    info!(?cli, "Parsed CLI arguments");

    let config = resolve_config(&cli.global).await?;

    match cli.command {
        Command::Patterns { inputs } => run_patterns(&inputs, &config).await,
        Command::Sentences { inputs, overwrite } => run_sentences(&inputs, &config, overwrite).await,
        Command::Classify {
            inputs,
            combined,
            format,
            fail_fast,
            workers,
            stats_out,
        } => {
            let options = ClassifyOptions {
                combined,
                format,
                policy: if fail_fast { FailurePolicy::FailFast } else { FailurePolicy::Skip },
                workers: workers.unwrap_or_else(default_workers),
                stats_out,
                progress: !cli.global.no_progress,
            };
            run_classify(&inputs, &config, options).await
        }
    }
}

/// Defaults, then the config file, then command-line overrides
async fn resolve_config(global: &GlobalArgs) -> Result<AppConfig> {
    let mut config = match &global.config {
        Some(path) => AppConfig::load(path).await?,
        None => AppConfig::default(),
    };
    if let Some(path) = &global.known_words {
        config.reference.known_words = path.clone();
    }
    if let Some(path) = &global.proper_nouns {
        config.reference.proper_nouns = path.clone();
    }
    if let Some(path) = &global.mappings {
        config.reference.mappings = path.clone();
    }
    Ok(config)
}

async fn run_patterns(inputs: &[PathBuf], config: &AppConfig) -> Result<()> {
    for path in discovery::discover_inputs(inputs, "txt")? {
        let document = Document::load(&path).await?;
        let patterns = detect_boundaries(&document.sample(config.boundary.sample_pages), &config.boundary)?;

        println!("{}", path.display());
        println!("  header=\"{}\"", patterns.header.as_ref().map(|p| p.literal()).unwrap_or(""));
        println!("  footer=\"{}\"", patterns.footer.as_ref().map(|p| p.literal()).unwrap_or(""));
        println!("  header pattern: {}", patterns.header_pattern().unwrap_or("(none)"));
        println!("  footer pattern: {}", patterns.footer_pattern().unwrap_or("(none)"));
    }
    Ok(())
}

async fn run_sentences(inputs: &[PathBuf], config: &AppConfig, overwrite: bool) -> Result<()> {
    let segmenter = SentenceSegmenter::new()?;

    for path in discovery::discover_inputs(inputs, "txt")? {
        if !overwrite && incremental::aux_file_exists(&path) {
            info!("Sentence cache present for {}, skipping", path.display());
            println!("{}: cached", path.display());
            continue;
        }

        let document = Document::load(&path).await?;
        let extraction = extract_sentences(&document, &config.boundary, &segmenter)?;
        info!(
            header_pattern = extraction.patterns.header_pattern().unwrap_or(""),
            footer_pattern = extraction.patterns.footer_pattern().unwrap_or(""),
            "Applied boundary patterns to {}",
            path.display()
        );

        let aux_path = incremental::create_complete_aux_file(&path, &extraction.sentences)?;
        println!(
            "{}: {} sentences -> {}",
            path.display(),
            extraction.sentences.len(),
            aux_path.display()
        );
    }
    Ok(())
}

struct ClassifyOptions {
    combined: bool,
    format: ReportFormat,
    policy: FailurePolicy,
    workers: usize,
    stats_out: PathBuf,
    progress: bool,
}

async fn run_classify(inputs: &[PathBuf], config: &AppConfig, options: ClassifyOptions) -> Result<()> {
    let inputs = discovery::discover_inputs(inputs, "conllu")?;
    let reference = Arc::new(ReferenceData::load(&config.reference).await);
    let classifier = Arc::new(Classifier::new(reference, config.classifier.clone()));

    let progress = if options.progress {
        let bar = ProgressBar::new(inputs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut running = ClassificationCounts::new();
    let mut run_stats = RunStats::default();

    for path in &inputs {
        progress.set_message(path.display().to_string());
        let start_time = Instant::now();

        match classify_file(path, &classifier, &options).await {
            Ok((counts, classified, skipped)) => {
                let elapsed_ms = start_time.elapsed().as_millis() as u64;
                run_stats.record(FileStats::success(path, classified, skipped, &counts, elapsed_ms));

                let report = if options.combined {
                    running.merge(&counts);
                    running.report()
                } else {
                    counts.report()
                };
                let report_path = incremental::generate_report_path(path, options.format.extension());
                write_report(&report_path, &report, options.format).await?;
                info!(
                    "Classified {}: {} sentences, {} skipped, words={}, verbs={}, errors={}",
                    path.display(),
                    classified,
                    skipped,
                    report.words.count,
                    report.verbs.count,
                    report.errors.count
                );
            }
            Err(e) => {
                warn!("Failed to classify {}: {:#}", path.display(), e);
                run_stats.record(FileStats::failed(path, &e, start_time.elapsed().as_millis() as u64));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    run_stats.write(&options.stats_out).await?;
    println!(
        "Classified {} files ({} failed); stats in {}",
        run_stats.files_processed,
        run_stats.files_failed,
        options.stats_out.display()
    );
    Ok(())
}

async fn classify_file(
    path: &Path,
    classifier: &Arc<Classifier>,
    options: &ClassifyOptions,
) -> Result<(ClassificationCounts, usize, usize)> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read annotations {}", path.display()))?;
    let results = ConlluReader::new().annotate(&content);
    let (sentences, skipped) = pipeline::partition_annotations(results, options.policy)?;
    let classified = sentences.len();
    let counts = classify_parallel(Arc::clone(classifier), sentences, options.workers).await?;
    Ok((counts, classified, skipped))
}
