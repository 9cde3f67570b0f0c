//! Error taxonomy for a briefing run.
//!
//! Every failure here is fatal: the briefing is all-or-nothing, so the
//! binary logs the error and exits without printing a partial report.
//! Sections that merely lack a `tab_title` are not errors — they are
//! dropped silently at parse time (see [`crate::models`]).

use thiserror::Error;

/// Everything that can abort a briefing run.
#[derive(Debug, Error)]
pub enum BriefingError {
    /// The configured endpoint string is not a valid URL.
    #[error("invalid endpoint URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connection, DNS, or timeout failure talking to the vendor.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The vendor answered with a non-2xx status.
    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but does not have the shape of a daily report.
    #[error("unexpected daily report shape: {0}")]
    Shape(String),
}
