//! # A-Share Daily Briefing
//!
//! Fetches the vendor's daily A-share market review document and renders
//! it as a Markdown briefing on standard output.
//!
//! ## Pipeline
//!
//! One linear pass per run:
//! 1. **Resolve** the report id from the date and edition suffix
//! 2. **Fetch** the JSON document with a single timed GET
//! 3. **Parse** it into a typed, ordered section model
//! 4. **Render** each section to Markdown and print the lines
//!
//! Diagnostics go to stderr via `tracing`; stdout carries nothing but the
//! briefing, so the output can be piped straight into a pager, a file, or
//! a downstream notifier.
//!
//! ## Usage
//!
//! ```sh
//! ashare_briefing                 # today's evening review
//! ashare_briefing --date 20251230 # a specific trading day
//! ```
//!
//! A run either emits the whole briefing or nothing: fetch and parse
//! failures are logged and abort with a nonzero exit, never a partial
//! report.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod error;
mod fetch;
mod models;
mod render;
mod utils;

use cli::Cli;
use fetch::FetchConfig;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        // stdout is reserved for the briefing itself
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("ashare_briefing starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let report_id = utils::report_id(date, &args.edition);
    info!(%report_id, %date, edition = %args.edition, "Resolved report id");

    let config = FetchConfig {
        endpoint: args.endpoint,
        user_agent: args.user_agent,
        timeout: Duration::from_secs(args.timeout_secs),
    };

    let report = match fetch::fetch_report(&config, &report_id).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, %report_id, "Failed to fetch daily report; no briefing emitted");
            return Err(e.into());
        }
    };
    info!(sections = report.sections.len(), "Parsed daily report");

    for line in render::render_report(&report, &report_id) {
        println!("{line}");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        sections = report.sections.len(),
        "Execution complete"
    );

    Ok(())
}
