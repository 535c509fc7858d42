use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use wc_roster::convert::Converter;
use wc_roster::settings::Settings;
use wc_roster::{parser, sink, summary};

const USAGE_HINT: &str = "Please call the tool in the format of: wc_roster parse '2*WC.pdf'";

#[derive(Parser)]
#[command(name = "wc_roster", about = "Extract player rosters from World Cup squad lists")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract players from every PDF matching a glob and append them to the CSV
    Parse {
        /// Glob of roster PDFs, e.g. '2*WC.pdf'
        pattern: String,
        /// Output CSV (default: WC_OUTPUT or World_Cup_Players_Data.csv)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Remove the output file before appending
        #[arg(long)]
        fresh: bool,
        /// Use an existing .txt rendition instead of converting again
        #[arg(long)]
        reuse_text: bool,
    },
    /// Show which layout a file would be parsed with
    Layout {
        file: PathBuf,
    },
    /// Aggregate an output CSV: players per year and per zodiac sign
    Summary {
        /// CSV to read (default: the configured output)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load WC_* settings")?;

    let result = match cli.command {
        Commands::Parse {
            pattern,
            out,
            fresh,
            reuse_text,
        } => {
            if let Some(out) = out {
                settings.output = out;
            }
            settings.reuse_text |= reuse_text;

            let paths = match expand_pattern(&pattern) {
                Ok(p) if !p.is_empty() => p,
                Ok(_) => {
                    println!("No files match {:?}", pattern);
                    println!("{}", USAGE_HINT);
                    return Ok(());
                }
                Err(e) => {
                    println!("{:#}", e);
                    println!("{}", USAGE_HINT);
                    return Ok(());
                }
            };

            if fresh && settings.output.exists() {
                std::fs::remove_file(&settings.output).with_context(|| {
                    format!("Failed to remove {}", settings.output.display())
                })?;
                info!(path = %settings.output.display(), "removed previous output");
            }

            let converter = Converter::new(settings.converter.clone());
            println!("Parsing {} files into {}", paths.len(), settings.output.display());
            let counts = process_documents(&paths, &settings, &converter, true);
            counts.print();
            Ok(())
        }
        Commands::Layout { file } => {
            match parser::layout::select(&file.to_string_lossy(), &settings.paginated_marker) {
                Ok(layout) => println!("{}: {}", file.display(), layout),
                Err(e) => println!("{}: {}", file.display(), e),
            }
            Ok(())
        }
        Commands::Summary { input, json } => {
            let path = input.unwrap_or_else(|| settings.output.clone());
            let s = summary::summarize(&path)
                .with_context(|| format!("Failed to summarize {}", path.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&s)?);
            } else {
                summary::print_table(&s);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn expand_pattern(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern {:?}", pattern))? {
        match entry {
            Ok(p) if p.is_file() => paths.push(p),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "unreadable glob entry"),
        }
    }
    paths.sort();
    Ok(paths)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct BatchCounts {
    documents: usize,
    failed: usize,
    records: usize,
    warnings: usize,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Saved {} players from {} documents ({} failed, {} warnings).",
            self.records, self.documents, self.failed, self.warnings,
        );
    }
}

/// One document at a time: extract, then append to the sink and close it
/// before moving on. A failing document is reported and skipped.
fn process_documents(
    paths: &[PathBuf],
    settings: &Settings,
    converter: &Converter,
    show_progress: bool,
) -> BatchCounts {
    let pb = if show_progress {
        ProgressBar::new(paths.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut counts = BatchCounts::default();
    for path in paths {
        counts.documents += 1;
        match process_one(path, settings, converter) {
            Ok(report) => {
                counts.records += report.records;
                counts.warnings += report.warnings;
                pb.suspend(|| println!("{}", report.line));
            }
            Err(e) => {
                counts.failed += 1;
                debug!(path = %path.display(), error = ?e, "document failed");
                pb.suspend(|| println!("{}: {:#}", path.display(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    counts
}

struct DocumentReport {
    line: String,
    records: usize,
    warnings: usize,
}

fn process_one(
    path: &Path,
    settings: &Settings,
    converter: &Converter,
) -> anyhow::Result<DocumentReport> {
    let (layout, extraction) = parser::extract_document(path, settings, converter)?;
    let written = sink::write_records(&settings.output, &extraction.records)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    let mut line = format!("{}: {} records ({})", path.display(), written, layout);
    if let Some(country) = &extraction.unterminated {
        line.push_str(&format!(", last section {} not closed by a header", country));
    }
    Ok(DocumentReport {
        line,
        records: written,
        warnings: extraction.warnings.len(),
    })
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
