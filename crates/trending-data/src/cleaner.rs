//! Row validation: date parsing and count coercion.
//!
//! Rows whose dates do not match the configured layouts are dropped; bad
//! counts are zero-filled. Neither is reported as an error.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};
use trending_core::models::{RawVideoRecord, VideoRecord};
use trending_core::settings::{DEFAULT_PUBLISH_TIME_FORMAT, DEFAULT_TRENDING_DATE_FORMAT};

/// Outcome counts for one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_in: usize,
    pub rows_kept: usize,
    /// Rows excluded because a date could not be parsed.
    pub rows_dropped: usize,
    /// Count cells that were negative or non-numeric and zero-filled.
    pub counts_coerced: usize,
}

/// Converts raw CSV rows into [`VideoRecord`]s using one fixed date layout
/// per column.
#[derive(Debug, Clone)]
pub struct Cleaner {
    trending_date_format: String,
    publish_time_format: String,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(DEFAULT_TRENDING_DATE_FORMAT, DEFAULT_PUBLISH_TIME_FORMAT)
    }
}

impl Cleaner {
    pub fn new(
        trending_date_format: impl Into<String>,
        publish_time_format: impl Into<String>,
    ) -> Self {
        Self {
            trending_date_format: trending_date_format.into(),
            publish_time_format: publish_time_format.into(),
        }
    }

    /// Clean every row, preserving input order among the kept rows.
    pub fn clean(&self, rows: &[RawVideoRecord]) -> (Vec<VideoRecord>, CleanReport) {
        let mut report = CleanReport {
            rows_in: rows.len(),
            ..CleanReport::default()
        };

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match self.clean_row(row, &mut report.counts_coerced) {
                Some(record) => records.push(record),
                None => {
                    debug!(
                        "Dropping row {} ({}): unparsable date trending='{}' publish='{}'",
                        index + 1,
                        row.video_id,
                        row.trending_date,
                        row.publish_time
                    );
                    report.rows_dropped += 1;
                }
            }
        }
        report.rows_kept = records.len();

        info!(
            "Cleaned {} rows: {} kept, {} dropped, {} counts coerced",
            report.rows_in, report.rows_kept, report.rows_dropped, report.counts_coerced
        );
        if report.rows_in > 0 && report.rows_kept == 0 {
            warn!(
                "No row matched the date layouts '{}' / '{}'",
                self.trending_date_format, self.publish_time_format
            );
        }

        (records, report)
    }

    /// Clean a single row; `None` when either date is unparsable.
    pub fn clean_record(&self, row: &RawVideoRecord) -> Option<VideoRecord> {
        let mut coerced = 0;
        self.clean_row(row, &mut coerced)
    }

    /// Render a clean record back into its raw textual form using the same
    /// layouts, so that `clean(to_raw(r)) == r`.
    pub fn to_raw(&self, record: &VideoRecord) -> RawVideoRecord {
        RawVideoRecord {
            video_id: record.video_id.clone(),
            trending_date: record
                .trending_date
                .format(&self.trending_date_format)
                .to_string(),
            title: record.title.clone(),
            channel_title: record.channel_title.clone(),
            category_id: record
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            publish_time: record
                .publish_time
                .format(&self.publish_time_format)
                .to_string(),
            tags: record.tags.clone(),
            views: record.views.to_string(),
            likes: record.likes.to_string(),
            dislikes: record.dislikes.map(|v| v.to_string()).unwrap_or_default(),
            comment_count: record
                .comment_count
                .map(|v| v.to_string())
                .unwrap_or_default(),
            thumbnail_link: record.thumbnail_link.clone(),
            comments_disabled: format_flag(record.comments_disabled),
            ratings_disabled: format_flag(record.ratings_disabled),
            video_error_or_removed: format_flag(record.video_error_or_removed),
            description: record.description.clone(),
        }
    }

    fn clean_row(&self, row: &RawVideoRecord, coerced: &mut usize) -> Option<VideoRecord> {
        let trending_date =
            NaiveDate::parse_from_str(row.trending_date.trim(), &self.trending_date_format).ok()?;
        let publish_time =
            NaiveDateTime::parse_from_str(row.publish_time.trim(), &self.publish_time_format)
                .ok()?;

        let mut count = |cell: &str| {
            let (value, ok) = parse_count(cell);
            if !ok {
                *coerced += 1;
            }
            value
        };

        let views = count(&row.views);
        let likes = count(&row.likes);
        let dislikes = (!row.dislikes.trim().is_empty()).then(|| count(&row.dislikes));
        let comment_count =
            (!row.comment_count.trim().is_empty()).then(|| count(&row.comment_count));

        Some(VideoRecord {
            video_id: row.video_id.clone(),
            title: row.title.clone(),
            channel_title: row.channel_title.clone(),
            category_id: row.category_id.trim().parse::<u32>().ok(),
            publish_time,
            trending_date,
            views,
            likes,
            dislikes,
            comment_count,
            tags: row.tags.clone(),
            thumbnail_link: row.thumbnail_link.clone(),
            description: row.description.clone(),
            comments_disabled: parse_flag(&row.comments_disabled),
            ratings_disabled: parse_flag(&row.ratings_disabled),
            video_error_or_removed: parse_flag(&row.video_error_or_removed),
        })
    }
}

// ── Cell helpers ──────────────────────────────────────────────────────────────

/// Parse a non-negative count. Returns `(value, true)` on success and
/// `(0, false)` for negative, fractional, out-of-range, non-numeric or blank
/// cells.
///
/// Integral floats such as `"1234.0"` are accepted.
fn parse_count(cell: &str) -> (u64, bool) {
    let trimmed = cell.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return (value, true);
    }
    match trimmed.parse::<f64>() {
        // `u64::MAX as f64` rounds up to 2^64, which is itself out of range.
        Ok(value) if value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 => {
            (value as u64, true)
        }
        _ => (0, false),
    }
}

fn parse_flag(cell: &str) -> bool {
    cell.trim().eq_ignore_ascii_case("true")
}

fn format_flag(flag: bool) -> String {
    let text = if flag { "True" } else { "False" };
    text.to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(video_id: &str, trending: &str, publish: &str) -> RawVideoRecord {
        RawVideoRecord {
            video_id: video_id.to_string(),
            trending_date: trending.to_string(),
            title: format!("Title {video_id}"),
            channel_title: "Channel".to_string(),
            category_id: "1".to_string(),
            publish_time: publish.to_string(),
            views: "1000".to_string(),
            likes: "100".to_string(),
            dislikes: "5".to_string(),
            comment_count: "20".to_string(),
            comments_disabled: "False".to_string(),
            ratings_disabled: "False".to_string(),
            video_error_or_removed: "False".to_string(),
            ..RawVideoRecord::default()
        }
    }

    fn good(video_id: &str) -> RawVideoRecord {
        raw(video_id, "17.14.11", "2017-11-13T17:13:01.000Z")
    }

    // ── Dates ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_clean_parses_export_date_layouts() {
        let record = Cleaner::default().clean_record(&good("a")).unwrap();
        assert_eq!(
            record.trending_date,
            NaiveDate::from_ymd_opt(2017, 11, 14).unwrap()
        );
        assert_eq!(
            record.publish_time,
            NaiveDate::from_ymd_opt(2017, 11, 13)
                .unwrap()
                .and_hms_opt(17, 13, 1)
                .unwrap()
        );
    }

    #[test]
    fn test_clean_drops_unparsable_trending_date() {
        let rows = vec![good("a"), raw("b", "not-a-date", "2017-11-13T17:13:01.000Z"), good("c")];
        let (records, report) = Cleaner::default().clean(&rows);

        assert_eq!(records.len(), rows.len() - 1);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(report.rows_kept, 2);
        let ids: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_clean_drops_unparsable_publish_time() {
        let rows = vec![raw("b", "17.14.11", "13/11/2017"), good("a")];
        let (records, report) = Cleaner::default().clean(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(report.rows_dropped, 1);
    }

    #[test]
    fn test_clean_rejects_impossible_calendar_date() {
        // Month 13 does not exist.
        assert!(Cleaner::default()
            .clean_record(&raw("x", "17.14.13", "2017-11-13T17:13:01.000Z"))
            .is_none());
    }

    #[test]
    fn test_clean_custom_formats() {
        let cleaner = Cleaner::new("%Y-%m-%d", "%Y-%m-%d %H:%M:%S");
        let record = cleaner
            .clean_record(&raw("x", "2018-01-02", "2018-01-01 08:00:00"))
            .unwrap();
        assert_eq!(
            record.trending_date,
            NaiveDate::from_ymd_opt(2018, 1, 2).unwrap()
        );
    }

    // ── Counts ────────────────────────────────────────────────────────────────

    #[test]
    fn test_clean_coerces_bad_counts_to_zero() {
        let mut row = good("a");
        row.views = "-15".to_string();
        row.likes = "lots".to_string();
        let (records, report) = Cleaner::default().clean(&[row]);

        assert_eq!(records[0].views, 0);
        assert_eq!(records[0].likes, 0);
        assert_eq!(report.counts_coerced, 2);
        assert_eq!(report.rows_dropped, 0);
    }

    #[test]
    fn test_clean_blank_optional_counts_are_none() {
        let mut row = good("a");
        row.dislikes = String::new();
        row.comment_count = "  ".to_string();
        let record = Cleaner::default().clean_record(&row).unwrap();
        assert_eq!(record.dislikes, None);
        assert_eq!(record.comment_count, None);
    }

    #[test]
    fn test_clean_accepts_integral_floats() {
        let mut row = good("a");
        row.views = "1234.0".to_string();
        assert_eq!(Cleaner::default().clean_record(&row).unwrap().views, 1234);
    }

    #[test]
    fn test_clean_category_id_non_numeric_is_none() {
        let mut row = good("a");
        row.category_id = "music".to_string();
        assert_eq!(Cleaner::default().clean_record(&row).unwrap().category_id, None);
    }

    #[test]
    fn test_clean_flags_case_insensitive() {
        let mut row = good("a");
        row.comments_disabled = "TRUE".to_string();
        row.ratings_disabled = "yes".to_string();
        let record = Cleaner::default().clean_record(&row).unwrap();
        assert!(record.comments_disabled);
        assert!(!record.ratings_disabled);
    }

    // ── Idempotence ───────────────────────────────────────────────────────────

    #[test]
    fn test_cleaning_is_idempotent() {
        let mut odd = good("b");
        odd.views = "-3".to_string();
        odd.dislikes = String::new();
        odd.category_id = String::new();
        odd.publish_time = "2017-11-12T05:00:00.250Z".to_string();
        let rows = vec![
            good("a"),
            odd,
            raw("c", "bogus", "2017-11-13T17:13:01.000Z"),
        ];

        let cleaner = Cleaner::default();
        let (first, _) = cleaner.clean(&rows);
        let rendered: Vec<RawVideoRecord> = first.iter().map(|r| cleaner.to_raw(r)).collect();
        let (second, report) = cleaner.clean(&rendered);

        assert_eq!(first, second);
        assert_eq!(report.rows_dropped, 0);
        assert_eq!(report.counts_coerced, 0);
    }

    // ── parse_count ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_count_variants() {
        assert_eq!(parse_count("42"), (42, true));
        assert_eq!(parse_count(" 7 "), (7, true));
        assert_eq!(parse_count("-1"), (0, false));
        assert_eq!(parse_count("NaN"), (0, false));
        assert_eq!(parse_count(""), (0, false));
    }

    #[test]
    fn test_parse_count_rejects_fractional_and_out_of_range_floats() {
        assert_eq!(parse_count("12.7"), (0, false));
        assert_eq!(parse_count("1e30"), (0, false));
        assert_eq!(parse_count("inf"), (0, false));
        assert_eq!(parse_count("1e19"), (10_000_000_000_000_000_000, true));
    }

    #[test]
    fn test_clean_counts_fractional_views_as_coerced() {
        let mut row = good("a");
        row.views = "12.7".to_string();
        row.likes = "1e30".to_string();
        let (records, report) = Cleaner::default().clean(&[row]);

        assert_eq!(records[0].views, 0);
        assert_eq!(records[0].likes, 0);
        assert_eq!(report.counts_coerced, 2);
    }
}
