use anyhow::Result;
use std::fs;
use std::time::Instant;
use tracing::{info, warn};

use crate::date;
use crate::endpoints;
use crate::error::TimesheetError;
use crate::fetch;
use crate::report;
use crate::Args;

/// Runs the whole pipeline: resolve the day, fetch every endpoint in
/// parallel, merge, render, write, then echo the written file.
pub fn build_timesheet(args: &Args) -> Result<()> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "pipeline", "Building timesheet");

    let token = args.token.as_deref().unwrap_or_default().trim();
    if token.is_empty() {
        return Err(TimesheetError::MissingCredential.into());
    }

    let endpoints = endpoints::load_endpoints(args.repos.as_deref())?;

    let input = match &args.date {
        Some(date) => date.clone(),
        None => date::prompt_for_date()?,
    };
    let range = date::day_bounds(&input, args.year)?;

    let client = fetch::new_client();
    let per_endpoint = fetch::fetch_all(&client, &endpoints, &range, token)?;

    let records = report::merge_and_sort(per_endpoint);
    info!(
        action = "aggregate",
        component = "pipeline",
        commit_count = records.len(),
        "Merged and sorted commits"
    );

    let rendered = report::render_report(&records);
    report::write_report(&args.output, &rendered)?;

    println!("\nCommits extracted successfully.\n");

    // Convenience echo of the written file; its failure is not the run's.
    match fs::read_to_string(&args.output) {
        Ok(contents) => print!("{contents}"),
        Err(e) => warn!(
            action = "echo",
            component = "pipeline",
            error = %e,
            "Could not read the report back for display"
        ),
    }

    info!(
        action = "complete",
        component = "pipeline",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Timesheet completed"
    );

    Ok(())
}
