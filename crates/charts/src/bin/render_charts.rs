use anyhow::{Context, Result};
use charts::{render_all, render_text};
use clap::Parser;
use extract::{snapshot_from_answer, SpanStrategy};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Turn a saved QA answer into balance-sheet bar charts.
#[derive(Debug, Parser)]
#[command(name = "render_charts", version)]
struct Cli {
    /// File holding the raw answer text (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// How the JSON payload is located in the answer
    #[arg(long, default_value = "balanced", value_parser = parse_strategy)]
    strategy: SpanStrategy,

    /// Print snapshot and bar descriptors as JSON instead of text bars
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Width of a full-length bar in terminal cells
    #[arg(long, default_value_t = 40)]
    width: usize,

    /// Also write one PNG per chart into this directory
    #[cfg(feature = "png")]
    #[arg(long, value_name = "DIR")]
    png_dir: Option<PathBuf>,
}

fn parse_strategy(s: &str) -> Result<SpanStrategy, String> {
    s.parse()
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let answer = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read answer from stdin")?;
            buf
        }
    };

    let snapshot = match snapshot_from_answer(&answer, cli.strategy) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(kind = e.kind(), error = %e, "extraction failed");
            eprintln!("{}", e.user_message());
            eprintln!("  ({})", e);
            return Ok(ExitCode::from(2));
        }
    };

    let charts = render_all(&snapshot);

    if cli.json {
        let out = serde_json::json!({ "snapshot": snapshot, "charts": charts });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if charts.is_empty() {
        println!("No chartable metrics in the answer.");
    } else {
        for chart in &charts {
            println!("{}", render_text(chart, cli.width));
        }
    }

    #[cfg(feature = "png")]
    if let Some(dir) = &cli.png_dir {
        charts::generate_plots(&charts, dir)?;
    }

    Ok(ExitCode::SUCCESS)
}
