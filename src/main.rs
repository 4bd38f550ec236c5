mod error;
mod parser;
mod report;
mod scoring;
mod settings;
mod states;
mod suitability;
mod table;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;

use parser::extract::Windows;
use report::ReportType;
use settings::Settings;
use suitability::MissingComponents;
use table::Table;

#[derive(Parser)]
#[command(
    name = "aqua_suitability",
    about = "State-by-state aquaculture regulatory scoring and suitability index"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract law status, fees and review timeframe per state from a report
    Parse {
        /// Report category (selects the section header)
        #[arg(value_enum)]
        report_type: ReportType,
        /// Report text file; writes <input>_parsed.csv
        input: PathBuf,
    },
    /// Normalize parsed fields and compute the regulatory access score
    Score {
        /// Parsed CSV; writes <input>_scored.csv
        input: PathBuf,
    },
    /// Parse + score each given report in one go
    Run {
        #[arg(long)]
        algae: Option<PathBuf>,
        #[arg(long)]
        finfish: Option<PathBuf>,
        #[arg(long)]
        shellfish: Option<PathBuf>,
    },
    /// Combine scored reports with state indicators into the suitability index
    Merge {
        /// Scored CSVs, one per report category
        #[arg(short, long, required = true, num_args = 1..)]
        regulatory: Vec<PathBuf>,
        /// CSV with state, env_quality, sales, programs, open_coast_km2, ports
        #[arg(short, long)]
        indicators: PathBuf,
        #[arg(short, long, default_value = "aquaculture_suitability_full.csv")]
        output: PathBuf,
        /// Rescale weights over present components instead of zero-filling
        #[arg(long)]
        renormalize: bool,
    },
    /// States ranked by a score column
    Rank {
        input: PathBuf,
        #[arg(short, long, default_value = scoring::SCORE_COL)]
        column: String,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
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
    let settings = Settings::load().context("loading settings")?;
    tracing::debug!(?settings, "settings loaded");

    let result = match cli.command {
        Commands::Parse { report_type, input } => {
            let out = parse_report(&input, report_type, &settings)?;
            println!("Parsed all {} states. Saved to {}", states::ALL_STATES.len(), out.display());
            Ok(())
        }
        Commands::Score { input } => {
            let out = score_parsed(&input, &settings)?;
            println!("Processed '{}', saved scored data to '{}'", input.display(), out.display());
            Ok(())
        }
        Commands::Run {
            algae,
            finfish,
            shellfish,
        } => {
            let jobs: Vec<(ReportType, PathBuf)> = [
                (ReportType::Algae, algae),
                (ReportType::Finfish, finfish),
                (ReportType::Shellfish, shellfish),
            ]
            .into_iter()
            .filter_map(|(kind, path)| path.map(|p| (kind, p)))
            .collect();
            if jobs.is_empty() {
                bail!("give at least one of --algae, --finfish, --shellfish");
            }
            run_reports(&jobs, &settings)
        }
        Commands::Merge {
            regulatory,
            indicators,
            output,
            renormalize,
        } => {
            let missing = if renormalize {
                MissingComponents::Renormalize
            } else {
                MissingComponents::ZeroFill
            };
            merge_suitability(&regulatory, &indicators, &output, missing, &settings)?;
            println!("Saved suitability index for {} states to {}", states::ALL_STATES.len(), output.display());
            Ok(())
        }
        Commands::Rank {
            input,
            column,
            limit,
            json,
        } => rank(&input, &column, limit, json),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn parse_report(input: &Path, report_type: ReportType, settings: &Settings) -> anyhow::Result<PathBuf> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading report {}", input.display()))?;
    let windows = Windows {
        fees: settings.fee_window,
        timeframe: settings.timeframe_window,
    };
    let records = parser::process_report(&text, report_type, windows);
    let out = report::parsed_csv_path(input);
    table::parsed_table(&records).write(&out)?;
    Ok(out)
}

fn score_parsed(input: &Path, settings: &Settings) -> anyhow::Result<PathBuf> {
    let parsed = Table::read(input)?;
    let scored = scoring::score_table(parsed, input, &settings.weights)?;
    let out = report::scored_csv_path(input);
    scored.write(&out)?;
    Ok(out)
}

fn run_reports(jobs: &[(ReportType, PathBuf)], settings: &Settings) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut outputs = Vec::with_capacity(jobs.len());
    for (kind, input) in jobs {
        pb.set_message(kind.to_string());
        let parsed = parse_report(input, *kind, settings)?;
        let scored = score_parsed(&parsed, settings)?;
        outputs.push((*kind, scored));
        pb.inc(1);
    }
    pb.finish_and_clear();

    for (kind, path) in &outputs {
        println!("{:<10} -> {}", kind, path.display());
    }
    Ok(())
}

fn merge_suitability(
    regulatory: &[PathBuf],
    indicators: &Path,
    output: &Path,
    missing: MissingComponents,
    settings: &Settings,
) -> anyhow::Result<()> {
    let mut categories = Vec::with_capacity(regulatory.len());
    for path in regulatory {
        let table = Table::read(path)?;
        categories.push(scoring::read_scores(&table, path, scoring::SCORE_COL)?);
    }
    let means = suitability::mean_regulatory(&categories);

    let indicator_table = Table::read(indicators)?;
    let values = suitability::read_indicators(&indicator_table, indicators)?;

    let rows = suitability::merge(&means, &values, &settings.suitability, missing);
    suitability::suitability_table(&rows).write(output)?;
    Ok(())
}

#[derive(Serialize)]
struct RankedState {
    rank: usize,
    state: String,
    score: Option<f64>,
}

fn rank(input: &Path, column: &str, limit: usize, json: bool) -> anyhow::Result<()> {
    let table = Table::read(input)?;
    let mut scores = scoring::read_scores(&table, input, column)?;
    // Highest first, missing scores last.
    scores.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    let ranked: Vec<RankedState> = scores
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (state, score))| RankedState {
            rank: i + 1,
            state,
            score,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }
    if ranked.is_empty() {
        println!("No rows in {}.", input.display());
        return Ok(());
    }

    println!("{:>3} | {:<16} | {:>8}", "#", "State", "Score");
    println!("{}", "-".repeat(33));
    for r in &ranked {
        let score = r.score.map(|s| format!("{:.3}", s)).unwrap_or_else(|| "N/A".into());
        println!("{:>3} | {:<16} | {:>8}", r.rank, truncate(&r.state, 16), score);
    }
    println!("\n{} states | column: {}", ranked.len(), column);
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

// ── Tests ──
