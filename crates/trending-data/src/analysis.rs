//! Main analysis pipeline for the trending dashboard.
//!
//! Loads the two input files, cleans and enriches the rows, then applies the
//! record filter, returning an [`AnalysisResult`] ready for the UI layer.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;
use trending_core::error::DataLoadError;
use trending_core::models::EnrichedRecord;

use crate::cleaner::Cleaner;
use crate::enricher::enrich;
use crate::filter::RecordFilter;
use crate::reader::load_dataset;

// ── Public types ──────────────────────────────────────────────────────────────

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub data_file: PathBuf,
    pub category_file: PathBuf,
    pub cleaner: Cleaner,
    pub filter: RecordFilter,
}

impl AnalysisOptions {
    /// Options with the default date layouts and no filtering.
    pub fn new(data_file: impl Into<PathBuf>, category_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            category_file: category_file.into(),
            cleaner: Cleaner::default(),
            filter: RecordFilter::default(),
        }
    }
}

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// CSV rows read before cleaning.
    pub rows_loaded: usize,
    /// Rows excluded for unparsable dates.
    pub rows_dropped: usize,
    /// Count cells zero-filled by the cleaner.
    pub counts_coerced: usize,
    pub records_enriched: usize,
    /// Records left after filtering.
    pub records_shown: usize,
    pub categories_loaded: usize,
    /// Wall-clock seconds spent reading both files.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent cleaning, enriching and filtering.
    pub transform_time_seconds: f64,
}

/// The complete output of [`analyze`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Every enriched record, in file order.
    pub records: Vec<EnrichedRecord>,
    /// The records that pass the filter, in file order.
    pub filtered: Vec<EnrichedRecord>,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline.
///
/// 1. Load the videos CSV and the category mapping.
/// 2. Clean the rows, dropping those with unparsable dates.
/// 3. Enrich every clean record.
/// 4. Apply the record filter.
///
/// Viral scores are computed over the full cleaned table, so filtering never
/// changes a record's score.
pub fn analyze(options: &AnalysisOptions) -> Result<AnalysisResult, DataLoadError> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let (rows, categories) = load_dataset(&options.data_file, &options.category_file)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Steps 2-4: Clean, enrich, filter ──────────────────────────────────────
    let transform_start = std::time::Instant::now();
    let (clean, report) = options.cleaner.clean(&rows);
    let records = enrich(&clean, &categories);
    let filtered = options.filter.apply(&records);
    let transform_time = transform_start.elapsed().as_secs_f64();

    info!(
        "Analysis complete: {} records enriched, {} shown ({})",
        records.len(),
        filtered.len(),
        options.filter.describe()
    );

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        rows_loaded: report.rows_in,
        rows_dropped: report.rows_dropped,
        counts_coerced: report.counts_coerced,
        records_enriched: records.len(),
        records_shown: filtered.len(),
        categories_loaded: categories.len(),
        load_time_seconds: load_time,
        transform_time_seconds: transform_time,
    };

    Ok(AnalysisResult {
        records,
        filtered,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADER: &str = "video_id,trending_date,title,channel_title,category_id,publish_time,views,likes,dislikes,comment_count";

    fn write_fixtures(dir: &Path, rows: &[&str]) -> AnalysisOptions {
        let csv_path = dir.join("USvideos.csv");
        let mut content = format!("{HEADER}\n");
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        std::fs::write(&csv_path, content).unwrap();

        let cats_path = dir.join("US_category_id.json");
        std::fs::write(
            &cats_path,
            r#"{"items": [
                {"id": "1", "snippet": {"title": "Film"}},
                {"id": "2", "snippet": {"title": "Autos"}}
            ]}"#,
        )
        .unwrap();

        AnalysisOptions::new(csv_path, cats_path)
    }

    const ROW_A: &str = "a,17.14.11,A,Chan,1,2017-11-13T17:13:01.000Z,1000,100,1,10";
    const ROW_B: &str = "b,17.15.11,B,Chan,2,2017-11-11T08:00:00.000Z,0,5,0,0";
    const ROW_C: &str = "c,17.16.11,C,Other,999,2017-11-15T08:00:00.000Z,3000,10,0,1";

    #[test]
    fn test_analyze_end_to_end() {
        let dir = TempDir::new().unwrap();
        let options = write_fixtures(dir.path(), &[ROW_A, ROW_B, ROW_C]);

        let result = analyze(&options).unwrap();
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.filtered.len(), 3);
        assert_eq!(result.metadata.rows_loaded, 3);
        assert_eq!(result.metadata.rows_dropped, 0);
        assert_eq!(result.metadata.categories_loaded, 2);

        let a = &result.records[0];
        assert_eq!(a.category, "Film");
        assert!((a.engagement_ratio - 0.1).abs() < 1e-12);
        assert_eq!(result.records[1].engagement_ratio, 0.0);
        assert_eq!(result.records[2].category, "Unknown");
    }

    #[test]
    fn test_analyze_bad_date_drops_exactly_one() {
        let dir = TempDir::new().unwrap();
        let good = write_fixtures(dir.path(), &[ROW_A, ROW_B, ROW_C]);
        let baseline = analyze(&good).unwrap().records.len();

        let bad_dir = TempDir::new().unwrap();
        let bad_row = "b,not-a-date,B,Chan,2,2017-11-11T08:00:00.000Z,0,5,0,0";
        let bad = write_fixtures(bad_dir.path(), &[ROW_A, bad_row, ROW_C]);
        let result = analyze(&bad).unwrap();

        assert_eq!(result.records.len(), baseline - 1);
        assert_eq!(result.metadata.rows_dropped, 1);
    }

    #[test]
    fn test_analyze_filter_applies_after_enrichment() {
        let dir = TempDir::new().unwrap();
        let mut options = write_fixtures(dir.path(), &[ROW_A, ROW_B, ROW_C]);
        options.filter = RecordFilter::new(vec!["Film".to_string()], 0.0, vec![]);

        let result = analyze(&options).unwrap();
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.filtered.len(), 1);
        assert_eq!(result.metadata.records_shown, 1);
        assert_eq!(result.filtered[0], result.records[0]);
    }

    #[test]
    fn test_analyze_missing_csv_fails() {
        let dir = TempDir::new().unwrap();
        let mut options = write_fixtures(dir.path(), &[ROW_A]);
        options.data_file = dir.path().join("absent.csv");
        assert!(matches!(
            analyze(&options).unwrap_err(),
            DataLoadError::FileRead { .. }
        ));
    }

    #[test]
    fn test_analyze_missing_views_column_fails() {
        let dir = TempDir::new().unwrap();
        let options = write_fixtures(dir.path(), &[]);
        std::fs::write(
            &options.data_file,
            "video_id,trending_date,title,channel_title,category_id,publish_time,likes,dislikes,comment_count\n",
        )
        .unwrap();
        assert!(matches!(
            analyze(&options).unwrap_err(),
            DataLoadError::MissingColumn { .. }
        ));
    }
}
