//! HTTP retrieval of the vendor's daily review document.
//!
//! One blocking point per run: a single GET with the report id as the `id`
//! query parameter, a browser-style user-agent, and a fixed overall
//! timeout. There is no retry; a failed fetch fails the whole run.

use std::time::Duration;

use reqwest::Client;
use tracing::{info, instrument};
use url::Url;

use crate::error::BriefingError;
use crate::models::{self, DailyReport};

/// Network settings injected at startup; see [`crate::cli::Cli`].
#[derive(Debug)]
pub struct FetchConfig {
    /// Vendor endpoint serving the daily report JSON.
    pub endpoint: String,
    /// User-Agent header value sent with the request.
    pub user_agent: String,
    /// Overall request timeout.
    pub timeout: Duration,
}

/// Fetch and parse the daily report identified by `report_id`.
///
/// # Errors
///
/// - [`BriefingError::InvalidUrl`] if the configured endpoint is not a URL
/// - [`BriefingError::Network`] on connection or timeout failure
/// - [`BriefingError::Status`] on a non-2xx response
/// - [`BriefingError::Json`] / [`BriefingError::Shape`] when the body is
///   not a daily report
#[instrument(level = "info", skip_all, fields(%report_id))]
pub async fn fetch_report(
    config: &FetchConfig,
    report_id: &str,
) -> Result<DailyReport, BriefingError> {
    let endpoint = Url::parse(&config.endpoint).map_err(|source| BriefingError::InvalidUrl {
        url: config.endpoint.clone(),
        source,
    })?;

    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout)
        .build()
        .map_err(|source| BriefingError::Network {
            url: endpoint.to_string(),
            source,
        })?;

    let response = client
        .get(endpoint.clone())
        .query(&[("id", report_id)])
        .send()
        .await
        .map_err(|source| BriefingError::Network {
            url: endpoint.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BriefingError::Status {
            url: endpoint.to_string(),
            status,
        });
    }

    let body = response.text().await.map_err(|source| BriefingError::Network {
        url: endpoint.to_string(),
        source,
    })?;
    info!(bytes = body.len(), %status, "Fetched daily report document");

    models::parse_report(&body)
}
