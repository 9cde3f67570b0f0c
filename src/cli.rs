//! Command-line interface definitions for the briefing renderer.
//!
//! All configuration is injected here at startup: the vendor endpoint,
//! report date and edition, timeout, and user-agent. Every flag has an
//! environment-variable fallback so a cron job needs no arguments at all.

use chrono::NaiveDate;
use clap::Parser;

/// Default vendor endpoint serving the daily review document.
pub const DEFAULT_ENDPOINT: &str =
    "https://snp.tenpay.com/cgi/cgi-bin/snp/newsDailyInfo/getPushDailyDetail";

/// Command-line arguments for the briefing renderer.
///
/// # Examples
///
/// ```sh
/// # Today's evening review on stdout
/// ashare_briefing
///
/// # Re-render a past date
/// ashare_briefing --date 20251230
///
/// # Point at a mirror of the feed
/// ashare_briefing --endpoint https://mirror.example.com/daily
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Vendor endpoint serving the daily report JSON
    #[arg(long, env = "BRIEFING_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Report date as YYYYMMDD (defaults to today, local time)
    #[arg(short, long, value_parser = parse_report_date)]
    pub date: Option<NaiveDate>,

    /// Two-digit edition suffix appended to the date
    #[arg(short, long, env = "BRIEFING_EDITION", default_value = "02")]
    pub edition: String,

    /// HTTP timeout in seconds
    #[arg(long, env = "BRIEFING_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,

    /// User-Agent header sent with the request
    #[arg(long, env = "BRIEFING_USER_AGENT", default_value = "Mozilla/5.0")]
    pub user_agent: String,
}

fn parse_report_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map_err(|e| format!("expected YYYYMMDD, got {raw:?}: {e}"))
}
