//! Command-line interface: run the server or sample from a predictions file

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::dataset::Dataset;
use crate::selector::{RandomSource, RngSource, RowSelector, SelectionOutcome};
use crate::server::ServerConfig;

// ─── Styling helpers ───────────────────────────────────────────────────────────

const W: usize = 58; // box inner width

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }
fn bad(s: &str) -> ColoredString    { s.truecolor(230, 100, 100) }

fn line_box_top()    { println!("  {}", dim("┌─────────────────────────────────────────────────────────┐")); }
fn line_box_bottom() { println!("  {}", dim("└─────────────────────────────────────────────────────────┘")); }
fn line_box_sep()    { println!("  {}", dim("├─────────────────────────────────────────────────────────┤")); }

fn line_box(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let pad = W.saturating_sub(visible_len);
    println!("  {}  {}{} {}", dim("│"), content, " ".repeat(pad), dim("│"));
}

fn line_box_center(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let total_pad = W.saturating_sub(visible_len);
    let left = total_pad / 2;
    let right = total_pad - left;
    println!("  {}  {}{}{} {}", dim("│"), " ".repeat(left), content, " ".repeat(right), dim("│"));
}

fn line_box_empty() { line_box(""); }

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' { in_escape = true; continue; }
        if in_escape { if c == 'm' { in_escape = false; } continue; }
        out.push(c);
    }
    out
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "bankruptcy-explorer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse precomputed bankruptcy predictions one company at a time")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Server port
        #[arg(short, long)]
        port: Option<u16>,

        /// Server host
        #[arg(long)]
        host: Option<String>,

        /// Application base directory holding data/predictions.csv
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Pick one company and print it
    Sample {
        /// Predictions CSV (defaults to the configured data path)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Row index to avoid
        #[arg(short, long)]
        exclude: Option<usize>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show dataset information and schema check
    Info {
        /// Predictions CSV (defaults to the configured data path)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

fn resolve_data_path(data: Option<PathBuf>) -> PathBuf {
    data.unwrap_or_else(|| ServerConfig::default().data_path())
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_sample(data: Option<PathBuf>, exclude: Option<usize>, seed: Option<u64>) -> anyhow::Result<()> {
    let path = resolve_data_path(data);
    section("Sample");

    let start = Instant::now();
    let dataset = Dataset::from_csv(&path)?;
    println!("  {:<12} {}", muted("File"), path.display());
    println!("  {:<12} {} rows in {:?}", muted("Loaded"), dataset.len(), start.elapsed());

    let selector = RowSelector::default();
    let mut rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::thread()),
    };
    let result = selector.select(&dataset, exclude, rng.as_mut())?;

    println!("  {:<12} {}", muted("Index"), result.index.to_string().white().bold());
    match result.outcome {
        SelectionOutcome::Fresh { attempts } => {
            println!("  {:<12} {}", muted("Attempts"), attempts);
        }
        SelectionOutcome::Fallback { attempts } => {
            println!("  {:<12} {} {}", muted("Attempts"), attempts, dim("(fell back to next row)"));
        }
        SelectionOutcome::Repeated => {
            println!("  {:<12} {}", muted("Attempts"), dim("single row, exclusion not possible"));
        }
    }
    println!();

    for feature in &result.features {
        println!("  {:<58} {:>10.2}", feature.name, feature.value);
    }
    println!("  {}", dim(&"─".repeat(70)));

    let verdict = if result.prediction_matches() { ok("correct") } else { bad("wrong") };
    println!("  {:<12} {}", muted("y_true"), result.y_true);
    println!("  {:<12} {}  {}", muted("y_pred"), result.y_pred, verdict);
    println!();
    Ok(())
}

pub fn cmd_info(data: Option<PathBuf>) -> anyhow::Result<()> {
    let path = resolve_data_path(data);
    section("Data Info");

    let dataset = Dataset::from_csv(&path)?;
    print_info(&path, &dataset);
    Ok(())
}

fn print_info(path: &Path, dataset: &Dataset) {
    let df = dataset.frame();
    println!("  {:<12} {}", muted("File"), path.display());
    println!("  {:<12} {}", muted("Rows"), df.height());
    println!("  {:<12} {}", muted("Columns"), df.width());
    println!();

    println!("  {:<58} {:<12} {:>6}", muted("Column"), muted("Type"), muted("Nulls"));
    println!("  {}", dim(&"─".repeat(78)));
    for col in df.get_columns() {
        println!(
            "  {:<58} {:<12} {:>6}",
            col.name().as_str(),
            format!("{:?}", col.dtype()).truecolor(140, 140, 140),
            col.null_count()
        );
    }
    println!();

    let selector = RowSelector::default();
    let missing = dataset.missing_columns(&selector.required_columns());
    if missing.is_empty() {
        println!("  {} all {} required columns present", ok("✓"), selector.required_columns().len());
    } else {
        for name in missing {
            println!("  {} missing column: {}", bad("✗"), name);
        }
    }
    println!();
}

// ─── Serve ─────────────────────────────────────────────────────────────────────

pub async fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    base_dir: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    use crate::server::run_server;

    let mut config = ServerConfig::default();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(base_dir) = base_dir {
        config.base_dir = base_dir;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    println!();
    line_box_top();
    line_box_empty();
    line_box_center(&format!("{}", "Bankruptcy Explorer".white().bold()));
    line_box_center(&format!("{}", dim(&format!("v{}", env!("CARGO_PKG_VERSION")))));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box(&kv("Web UI ", &format!("http://{}:{}", config.host, config.port)));
    line_box(&kv("Health ", &format!("http://{}:{}/api/health", config.host, config.port)));
    line_box(&kv("Data   ", &config.data_path().display().to_string()));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box_center(&format!("{}", dim("ctrl+c to stop")));
    line_box_empty();
    line_box_bottom();
    println!();

    run_server(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sample_command() {
        let cli = Cli::try_parse_from(["bankruptcy-explorer", "sample", "--exclude", "4", "--seed", "9"]).unwrap();
        match cli.command {
            Some(Commands::Sample { data, exclude, seed }) => {
                assert!(data.is_none());
                assert_eq!(exclude, Some(4));
                assert_eq!(seed, Some(9));
            }
            _ => panic!("expected sample command"),
        }
    }

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["bankruptcy-explorer"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_strip_ansi() {
        let colored = format!("{}", "hi".red());
        assert_eq!(strip_ansi(&colored), "hi");
    }
}
