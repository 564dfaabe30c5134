//! Category join and derived metrics.

use std::collections::HashMap;

use chrono::Datelike;
use tracing::debug;
use trending_core::calculations::{engagement_ratio, engagement_score, trend_days, viral_score};
use trending_core::models::{CategoryMap, EnrichedRecord, VideoRecord, UNKNOWN_CATEGORY};

/// Join category labels onto `records` and compute every derived column.
///
/// Output order matches input order. Viral scores are relative to the mean
/// views of each category label over the whole of `records`.
pub fn enrich(records: &[VideoRecord], categories: &CategoryMap) -> Vec<EnrichedRecord> {
    let labels: Vec<&str> = records
        .iter()
        .map(|r| categories.resolve(r.category_id))
        .collect();

    let unknown = labels.iter().filter(|l| **l == UNKNOWN_CATEGORY).count();
    if unknown > 0 {
        debug!("{} records have no known category", unknown);
    }

    let means = category_mean_views(records, &labels);

    records
        .iter()
        .zip(labels)
        .map(|(record, label)| {
            let mean = means.get(label).copied().unwrap_or(0.0);
            enrich_record(record, label, mean)
        })
        .collect()
}

/// Build one [`EnrichedRecord`] from a resolved label and the mean views of
/// that label's category.
pub fn enrich_record(
    record: &VideoRecord,
    category: &str,
    category_mean_views: f64,
) -> EnrichedRecord {
    EnrichedRecord {
        category: category.to_string(),
        engagement_ratio: engagement_ratio(record.likes, record.views),
        engagement_score: engagement_score(record.likes, record.comment_count, record.views),
        viral_score: viral_score(record.views, category_mean_views),
        trend_days: trend_days(record.publish_date(), record.trending_date),
        publish_weekday: record.publish_time.weekday(),
        record: record.clone(),
    }
}

/// Mean views per category label.
fn category_mean_views<'a>(
    records: &[VideoRecord],
    labels: &[&'a str],
) -> HashMap<&'a str, f64> {
    let mut sums: HashMap<&'a str, (u128, u64)> = HashMap::new();
    for (record, label) in records.iter().zip(labels) {
        let entry = sums.entry(*label).or_default();
        entry.0 += u128::from(record.views);
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(label, (total, count))| (label, total as f64 / count as f64))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
