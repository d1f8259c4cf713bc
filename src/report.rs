use chrono::FixedOffset;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::error::{Result, TimesheetError};
use crate::model::CommitRecord;

/// The report shows commit times in São Paulo civil time, fixed at UTC-3.
const REPORT_ZONE_SECONDS: i32 = -3 * 3600;

/// 24-hour clock plus a meridiem suffix, e.g. `09:30 AM`, `14:05 PM`.
const REPORT_TIME_FORMAT: &str = "%H:%M %p";

fn report_zone() -> FixedOffset {
    FixedOffset::east_opt(REPORT_ZONE_SECONDS).expect("report offset is in range")
}

/// Flattens every endpoint's records into one collection sorted newest
/// first. The sort is stable, so equal timestamps keep their fetch order.
pub fn merge_and_sort(per_endpoint: Vec<Vec<CommitRecord>>) -> Vec<CommitRecord> {
    let mut records: Vec<CommitRecord> = per_endpoint.into_iter().flatten().collect();
    records.sort_by(|a, b| b.author_date.cmp(&a.author_date));
    records
}

/// Renders the two report blocks: the chronological log, then the URL list
/// in the same order.
pub fn render_report(records: &[CommitRecord]) -> String {
    let mut content = String::new();

    for record in records {
        let local_time = record.author_date.with_timezone(&report_zone());
        content.push_str(&format!(
            "{} - {}\n",
            local_time.format(REPORT_TIME_FORMAT),
            record.message
        ));
    }

    content.push_str("\nCommits:\n");

    for record in records {
        content.push_str(&record.web_url);
        content.push('\n');
    }

    content
}

/// Writes the rendered report, replacing any prior file at the same path.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    let start_time = Instant::now();

    fs::write(path, content).map_err(|source| TimesheetError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        action = "write",
        component = "report_file",
        path = ?path,
        bytes = content.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Report written"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn record(date: &str, message: &str, url: &str) -> CommitRecord {
        CommitRecord {
            message: message.to_string(),
            author_name: "Jo Dev".to_string(),
            author_email: "jo@example.com".to_string(),
            author_date: date.parse::<DateTime<Utc>>().unwrap(),
            web_url: url.to_string(),
        }
    }

    #[test]
    fn merge_keeps_every_record_and_sorts_newest_first() {
        let merged = merge_and_sort(vec![
            vec![record("2024-03-05T09:00:00Z", "early", "https://x/1")],
            vec![
                record("2024-03-05T12:30:00Z", "late", "https://x/2"),
                record("2024-03-05T10:15:00Z", "middle", "https://x/3"),
            ],
        ]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].message, "late");
        assert_eq!(merged[1].message, "middle");
        assert_eq!(merged[2].message, "early");
        assert!(merged.windows(2).all(|w| w[0].author_date >= w[1].author_date));
    }

    #[test]
    fn equal_timestamps_keep_their_input_order() {
        let merged = merge_and_sort(vec![
            vec![record("2024-03-05T10:00:00Z", "first", "https://x/1")],
            vec![record("2024-03-05T10:00:00Z", "second", "https://x/2")],
        ]);

        assert_eq!(merged[0].message, "first");
        assert_eq!(merged[1].message, "second");
    }

    #[test]
    fn empty_endpoints_contribute_nothing() {
        let merged = merge_and_sort(vec![
            vec![],
            vec![record("2024-03-05T09:00:00Z", "only", "https://x/1")],
            vec![],
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].message, "only");
    }

    #[test]
    fn commit_times_render_in_sao_paulo_time() {
        let report = render_report(&[record("2024-03-05T12:30:00Z", "fix bug", "https://x/1")]);
        assert!(report.starts_with("09:30 AM - fix bug\n"));
    }

    #[test]
    fn afternoon_times_keep_the_24_hour_clock() {
        let report = render_report(&[record("2024-03-05T17:45:00Z", "deploy", "https://x/1")]);
        assert!(report.starts_with("14:45 PM - deploy\n"));
    }

    #[test]
    fn report_has_the_log_then_the_url_block_in_the_same_order() {
        let report = render_report(&[
            record("2024-03-05T12:30:00Z", "late", "https://x/2"),
            record("2024-03-05T09:00:00Z", "early", "https://x/1"),
        ]);

        let (log, urls) = report.split_once("\nCommits:\n").unwrap();
        assert_eq!(log.lines().count(), 2);
        assert!(log.contains("late"));
        assert!(log.contains("early"));
        assert_eq!(urls, "https://x/2\nhttps://x/1\n");
    }

    #[test]
    fn empty_record_set_still_renders_the_separator() {
        assert_eq!(render_report(&[]), "\nCommits:\n");
    }

    #[test]
    fn rendering_is_deterministic() {
        let records = vec![
            record("2024-03-05T12:30:00Z", "one", "https://x/1"),
            record("2024-03-05T09:00:00Z", "two", "https://x/2"),
        ];
        assert_eq!(render_report(&records), render_report(&records));
    }

    #[test]
    fn write_replaces_any_prior_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");

        fs::write(&path, "stale report that is much longer than the new one").unwrap();
        write_report(&path, "fresh\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn write_failure_names_the_path() {
        let err = write_report(Path::new("/nonexistent-dir/output.txt"), "x").unwrap_err();
        assert!(matches!(err, TimesheetError::OutputWrite { .. }));
    }
}
