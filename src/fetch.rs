use rayon::prelude::*;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::date::DayRange;
use crate::endpoints::EndpointTemplate;
use crate::error::{Result, TimesheetError};
use crate::model::{CommitEnvelope, CommitRecord};

const USER_AGENT: &str = concat!("timesheet/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the shared HTTP client used by every fetch unit.
pub fn new_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Deserializes a commit-listing body into records.
pub fn parse_commits(body: &str) -> Result<Vec<CommitRecord>> {
    let envelopes: Vec<CommitEnvelope> = serde_json::from_str(body)?;
    Ok(envelopes.into_iter().map(CommitRecord::from).collect())
}

/// Fetches one repository's commits for the bound day.
///
/// Transport failures are fatal and name the endpoint. A non-2xx status or
/// a body that does not deserialize is reported and yields zero records, so
/// one broken repository cannot take down the rest of the report.
pub fn fetch_commits(
    client: &Client,
    endpoint: &EndpointTemplate,
    range: &DayRange,
    token: &str,
) -> Result<Vec<CommitRecord>> {
    let url = endpoint.bind(range);
    let transport = |source: reqwest::Error| TimesheetError::Transport {
        endpoint: endpoint.display_name().to_string(),
        source,
    };

    let start_time = Instant::now();
    let response = client
        .get(&url)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .send()
        .map_err(transport)?;

    let status = response.status();
    let body = response.text().map_err(transport)?;
    let records = handle_response(endpoint.display_name(), status, &body);

    info!(
        action = "complete",
        component = "commit_fetch",
        endpoint = endpoint.display_name(),
        commit_count = records.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Fetched endpoint"
    );

    Ok(records)
}

/// Applies the per-repository degradation contract to one response: a
/// non-success status or a body that does not deserialize is reported and
/// yields zero records.
fn handle_response(endpoint_name: &str, status: StatusCode, body: &str) -> Vec<CommitRecord> {
    if !status.is_success() {
        warn!(
            action = "fetch",
            component = "commit_fetch",
            endpoint = endpoint_name,
            status = status.as_u16(),
            "Endpoint returned a non-success status, skipping its commits"
        );
        return Vec::new();
    }

    match parse_commits(body) {
        Ok(records) => records,
        Err(e) => {
            warn!(
                action = "parse",
                component = "commit_fetch",
                endpoint = endpoint_name,
                error = %e,
                "Response body did not deserialize, skipping its commits"
            );
            Vec::new()
        }
    }
}

/// Fans out one fetch unit per endpoint and collects each unit's records
/// into its own slot; the merge happens single-threaded after `collect`
/// joins all units. The first transport failure aborts the run.
pub fn fetch_all(
    client: &Client,
    endpoints: &[EndpointTemplate],
    range: &DayRange,
    token: &str,
) -> anyhow::Result<Vec<Vec<CommitRecord>>> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "fetch_fan_out",
        endpoint_count = endpoints.len(),
        "Fetching all endpoints"
    );

    // One worker per endpoint so no fetch waits behind another.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(endpoints.len().max(1))
        .build()?;

    let per_endpoint: Vec<Vec<CommitRecord>> = pool.install(|| {
        endpoints
            .par_iter()
            .map(|endpoint| fetch_commits(client, endpoint, range, token))
            .collect::<Result<Vec<_>>>()
    })?;

    info!(
        action = "complete",
        component = "fetch_fan_out",
        total_commits = per_endpoint.iter().map(Vec::len).sum::<usize>(),
        duration_ms = start_time.elapsed().as_millis(),
        "All endpoints fetched"
    );

    Ok(per_endpoint)
}
