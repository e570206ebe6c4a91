//! CLI for reconciling a pasted spreadsheet column without the HTTP server.
//!
//! Reads one identifier per line from a file or stdin, runs it through the
//! same services as the API and prints one tab-separated line per input
//! line, so the output pastes straight back next to the source column.
//!
//! # Usage
//!
//! ```bash
//! # Marketplace order numbers to order codes, Merchize first
//! cargo run --bin reconcile -- order-codes orders.txt
//!
//! # Dreamship first, reading stdin
//! pbpaste | cargo run --bin reconcile -- order-codes --primary dreamship
//!
//! # Tracking, provider detected per line
//! cargo run --bin reconcile -- track codes.txt --platform auto
//! ```
//!
//! # Output Columns
//!
//! - `order-codes`: code, status, provider, error
//! - `track`: tracking, carrier, time, address, status, error
//!
//! The summary goes to stderr so stdout stays clean TSV.
//!
//! # Environment Variables
//!
//! Same as the server (`MERCHIZE_BASE_URL`, `MERCHIZE_ACCESS_TOKEN`,
//! `DREAMSHIP_ACCESS_TOKEN`, ...), read from `.env` when present.

use order_reconciler::api::dto::rows::{OrderCodeRow, RowsResponse, TrackingRow};
use order_reconciler::application::services::{OrderCodeService, TrackingService};
use order_reconciler::config;
use order_reconciler::domain::entities::{Platform, Provider, parse_rows};
use order_reconciler::server::build_providers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::io::Read;
use std::path::PathBuf;

/// Reconcile pasted order identifiers against Merchize and Dreamship.
#[derive(Parser)]
#[command(name = "reconcile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve marketplace order numbers to provider order codes
    OrderCodes {
        /// Input file, one order number per line (stdin when omitted)
        input: Option<PathBuf>,

        /// Provider queried first; the other one is the fallback
        #[arg(short, long, value_enum, default_value_t = PrimaryArg::Merchize)]
        primary: PrimaryArg,
    },

    /// Fetch tracking and the latest shipment event
    Track {
        /// Input file, one order code per line (stdin when omitted)
        input: Option<PathBuf>,

        /// Provider of every line, or `auto` to detect it per line
        #[arg(short, long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PrimaryArg {
    Merchize,
    Dreamship,
}

impl From<PrimaryArg> for Provider {
    fn from(arg: PrimaryArg) -> Self {
        match arg {
            PrimaryArg::Merchize => Provider::Merchize,
            PrimaryArg::Dreamship => Provider::Dreamship,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    Auto,
    Merchize,
    Printway,
    Dreamship,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Auto => Platform::Auto,
            PlatformArg::Merchize => Platform::Merchize,
            PlatformArg::Printway => Platform::Printway,
            PlatformArg::Dreamship => Platform::Dreamship,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let providers = build_providers(&config)?;

    match cli.command {
        Commands::OrderCodes { input, primary } => {
            let text = read_input(input.as_ref())?;
            let service = OrderCodeService::new(providers);
            let outcomes = service.reconcile(parse_rows(&text), primary.into()).await;
            let response = RowsResponse::new(outcomes, OrderCodeRow::from);

            for row in &response.rows {
                println!("{}", order_code_line(row));
            }
            print_summary(&response);
        }
        Commands::Track { input, platform } => {
            let text = read_input(input.as_ref())?;
            let service = TrackingService::new(providers);
            let outcomes = service.track_rows(parse_rows(&text), platform.into()).await;
            let response = RowsResponse::new(outcomes, TrackingRow::from);

            for row in &response.rows {
                println!("{}", tracking_line(row));
            }
            print_summary(&response);
        }
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    // A trailing newline ends the last line rather than starting a new one.
    Ok(text
        .strip_suffix('\n')
        .map(|t| t.strip_suffix('\r').unwrap_or(t))
        .unwrap_or(&text)
        .to_string())
}

/// Keeps one value in one cell.
fn cell(value: Option<&str>) -> String {
    value
        .unwrap_or_default()
        .replace(['\t', '\r', '\n'], " ")
}

/// Blank input lines produce blank output lines.
fn error_cell(input: &str, error: Option<&str>) -> String {
    if input.trim().is_empty() {
        String::new()
    } else {
        cell(error)
    }
}

fn order_code_line(row: &OrderCodeRow) -> String {
    [
        cell(row.code.as_deref()),
        cell(row.status.as_deref()),
        cell(row.provider.map(Provider::display_name)),
        error_cell(&row.input, row.error.as_deref()),
    ]
    .join("\t")
}

fn tracking_line(row: &TrackingRow) -> String {
    [
        cell(row.tracking.as_deref()),
        cell(row.carrier.as_deref()),
        cell(row.history.time.as_deref()),
        cell(row.history.address.as_deref()),
        cell(row.history.status_order.as_deref()),
        error_cell(&row.input, row.error.as_deref()),
    ]
    .join("\t")
}

fn print_summary<T>(response: &RowsResponse<T>) {
    let failed = response.non_empty - response.resolved;

    eprintln!();
    eprintln!("{}", "Summary".bright_blue().bold());
    eprintln!("  Lines:     {}", response.total.to_string().bright_white());
    eprintln!("  Non-empty: {}", response.non_empty.to_string().bright_white());
    eprintln!("  Resolved:  {}", response.resolved.to_string().green().bold());
    if failed > 0 {
        eprintln!("  Failed:    {}", failed.to_string().red().bold());
    } else {
        eprintln!("  Failed:    {}", "0".bright_black());
    }
}
