//! Descriptive aggregates consumed by the dashboard charts.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use trending_core::calculations::{log_histogram, DescriptiveStats, HistogramBin};
use trending_core::formatting::percentage;
use trending_core::models::EnrichedRecord;

// ── Aggregate rows ────────────────────────────────────────────────────────────

/// Number of trending records in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

/// A category's share of all shown records.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub label: String,
    pub count: u64,
    /// Percentage of the total, rounded to one decimal.
    pub percent: f64,
}

/// Likes-vs-views points of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    /// `(views, likes)` pairs.
    pub points: Vec<(f64, f64)>,
}

/// Trending records observed on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Mean engagement score of a channel's trending records.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelEngagement {
    pub channel: String,
    pub mean_engagement_score: f64,
    pub records: u64,
}

/// Number of trending records of one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelCount {
    pub channel: String,
    pub count: u64,
}

/// Headline numbers for the shown records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSummary {
    pub records: usize,
    pub unique_videos: usize,
    pub channels: usize,
    pub categories: usize,
    pub total_views: u64,
    pub mean_engagement_ratio: f64,
    pub views: Option<DescriptiveStats>,
}

// ── TrendingAggregator ────────────────────────────────────────────────────────

/// Stateless helper that groups enriched records for the charts.
pub struct TrendingAggregator;

impl TrendingAggregator {
    /// Record count per category label, largest first, ties by label.
    pub fn category_counts(records: &[EnrichedRecord]) -> Vec<CategoryCount> {
        let counts = count_by(records, |r| r.category.as_str());
        sorted_desc(counts)
            .into_iter()
            .map(|(label, count)| CategoryCount {
                label: label.to_string(),
                count,
            })
            .collect()
    }

    /// The `n` largest categories and their share of all `records`.
    pub fn top_category_share(records: &[EnrichedRecord], n: usize) -> Vec<CategoryShare> {
        let total = records.len() as f64;
        Self::category_counts(records)
            .into_iter()
            .take(n)
            .map(|c| CategoryShare {
                percent: percentage(c.count as f64, total, 1),
                label: c.label,
                count: c.count,
            })
            .collect()
    }

    /// Log-spaced histogram of view counts.
    pub fn views_histogram(records: &[EnrichedRecord], bins: usize) -> Vec<HistogramBin> {
        let views: Vec<u64> = records.iter().map(|r| r.record.views).collect();
        log_histogram(&views, bins)
    }

    /// `(views, likes)` points grouped by category, series ordered like
    /// [`Self::category_counts`].
    pub fn scatter_points(records: &[EnrichedRecord]) -> Vec<ScatterSeries> {
        let mut by_label: HashMap<&str, Vec<(f64, f64)>> = HashMap::new();
        for r in records {
            by_label
                .entry(r.category.as_str())
                .or_default()
                .push((r.record.views as f64, r.record.likes as f64));
        }
        Self::category_counts(records)
            .into_iter()
            .map(|c| ScatterSeries {
                points: by_label.remove(c.label.as_str()).unwrap_or_default(),
                label: c.label,
            })
            .collect()
    }

    /// Records per trending date, ascending by date.
    pub fn trend_over_time(records: &[EnrichedRecord]) -> Vec<DailyCount> {
        let mut map: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for r in records {
            *map.entry(r.record.trending_date).or_default() += 1;
        }
        map.into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect()
    }

    /// The `n` channels with the highest mean engagement score.
    pub fn top_channels_by_engagement(
        records: &[EnrichedRecord],
        n: usize,
    ) -> Vec<ChannelEngagement> {
        let mut sums: HashMap<&str, (f64, u64)> = HashMap::new();
        for r in records {
            let entry = sums.entry(r.record.channel_title.as_str()).or_default();
            entry.0 += r.engagement_score;
            entry.1 += 1;
        }

        let mut channels: Vec<ChannelEngagement> = sums
            .into_iter()
            .map(|(channel, (total, count))| ChannelEngagement {
                channel: channel.to_string(),
                mean_engagement_score: total / count as f64,
                records: count,
            })
            .collect();
        channels.sort_by(|a, b| {
            b.mean_engagement_score
                .total_cmp(&a.mean_engagement_score)
                .then_with(|| a.channel.cmp(&b.channel))
        });
        channels.truncate(n);
        channels
    }

    /// The `n` channels with the most trending records.
    pub fn channel_counts(records: &[EnrichedRecord], n: usize) -> Vec<ChannelCount> {
        let counts = count_by(records, |r| r.record.channel_title.as_str());
        sorted_desc(counts)
            .into_iter()
            .take(n)
            .map(|(channel, count)| ChannelCount {
                channel: channel.to_string(),
                count,
            })
            .collect()
    }

    /// Headline numbers over `records`.
    pub fn summarize(records: &[EnrichedRecord]) -> DatasetSummary {
        if records.is_empty() {
            return DatasetSummary::default();
        }
        let unique_videos = count_by(records, |r| r.record.video_id.as_str()).len();
        let channels = count_by(records, |r| r.record.channel_title.as_str()).len();
        let categories = count_by(records, |r| r.category.as_str()).len();
        let views: Vec<f64> = records.iter().map(|r| r.record.views as f64).collect();

        DatasetSummary {
            records: records.len(),
            unique_videos,
            channels,
            categories,
            total_views: records
                .iter()
                .fold(0u64, |total, r| total.saturating_add(r.record.views)),
            mean_engagement_ratio: records.iter().map(|r| r.engagement_ratio).sum::<f64>()
                / records.len() as f64,
            views: DescriptiveStats::from_values(&views),
        }
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

fn count_by<'a>(
    records: &'a [EnrichedRecord],
    key_fn: impl Fn(&'a EnrichedRecord) -> &'a str,
) -> HashMap<&'a str, u64> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for r in records {
        *counts.entry(key_fn(r)).or_default() += 1;
    }
    counts
}

/// Sort by count descending, then key ascending for a stable display order.
fn sorted_desc(counts: HashMap<&str, u64>) -> Vec<(&str, u64)> {
    let mut items: Vec<(&str, u64)> = counts.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    items
}

// ── Tests ─────────────────────────────────────────────────────────────────────
