use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use wxq_config::AppConfig;
use wxq_ingest::CsvLayout;

#[derive(Debug, Parser)]
#[command(name = "wxq", version, about = "Station temperature queries and nested-list flattening")]
struct Cli {
    /// TOML config file (defaults to $WXQ_CONFIG or ./wxq.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lowest reading and most fluctuating stations of a readings CSV
    Report {
        /// Readings CSV (falls back to [dataset].path)
        path: Option<PathBuf>,

        /// Only score the first N distinct stations
        #[arg(long)]
        station_limit: Option<usize>,
    },
    /// Flatten a nested JSON list (reads stdin without a path)
    Flatten { path: Option<PathBuf> },
}

fn layout(cfg: &AppConfig) -> CsvLayout {
    CsvLayout {
        station_column: cfg.station_column(),
        date_column: cfg.date_column(),
        temperature_column: cfg.temperature_column(),
        date_format: cfg.date_format(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;

    wxq_obs::init("wxq", &cfg.log_filter(), cfg.log_json());

    match cli.command {
        Command::Report {
            path,
            station_limit,
        } => {
            let path = path
                .or_else(|| cfg.dataset_path())
                .context("No readings file given and [dataset].path is not set")?;
            let dataset = wxq_ingest::load_dataset(&path, &layout(&cfg))
                .with_context(|| format!("Failed to load readings from {}", path.display()))?;

            let report = wxq_cli::build_report(&dataset, station_limit.or(cfg.station_limit()));
            let rendered = if cli.json || cfg.report_json() {
                wxq_cli::render_report_json(&report)?
            } else {
                wxq_cli::render_report(&report)
            };
            println!("{rendered}");
        }
        Command::Flatten { path } => {
            let document = match path {
                Some(path) => wxq_ingest::load_document(&path)
                    .with_context(|| format!("Failed to load document from {}", path.display()))?,
                None => wxq_ingest::read_document(io::stdin().lock())
                    .context("Failed to read document from stdin")?,
            };

            let rendered = wxq_cli::render_leaves(&document, cli.json)?;
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
    }

    Ok(())
}
