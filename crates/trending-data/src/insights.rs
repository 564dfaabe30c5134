//! Short textual findings shown under every dashboard tab.

use trending_core::calculations::{pearson_correlation, DescriptiveStats};
use trending_core::formatting::format_compact;
use trending_core::models::EnrichedRecord;

use crate::aggregator::TrendingAggregator;

pub const NO_MATCHES: &str = "No records match the current filters";

/// Mean views above this multiple of the median count as heavy-tailed.
const HEAVY_TAIL_FACTOR: f64 = 2.0;

/// Ordered findings over `records`.
pub fn key_findings(records: &[EnrichedRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec![NO_MATCHES.to_string()];
    }

    let mut findings = Vec::new();

    let shares = TrendingAggregator::top_category_share(records, 2);
    match shares.as_slice() {
        [first, second, ..] => findings.push(format!(
            "{} and {} dominate with {:.1}% and {:.1}% of trending records",
            first.label, second.label, first.percent, second.percent
        )),
        [only] => findings.push(format!(
            "All shown records belong to {} ({} records)",
            only.label, only.count
        )),
        [] => {}
    }

    let views: Vec<f64> = records.iter().map(|r| r.record.views as f64).collect();
    if let Some(stats) = DescriptiveStats::from_values(&views) {
        if stats.median > 0.0 && stats.mean > stats.median * HEAVY_TAIL_FACTOR {
            findings.push(format!(
                "Views are heavy-tailed: mean {} vs median {}",
                format_compact(stats.mean),
                format_compact(stats.median)
            ));
        } else {
            findings.push(format!(
                "Views are fairly even: mean {} vs median {}",
                format_compact(stats.mean),
                format_compact(stats.median)
            ));
        }
    }

    let pairs: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.record.views as f64, r.record.likes as f64))
        .collect();
    if let Some(r) = pearson_correlation(&pairs) {
        findings.push(format!(
            "Likes and views are {} correlated (r = {:.2})",
            correlation_strength(r),
            r
        ));
    }

    let days: Vec<f64> = records.iter().map(|r| r.trend_days as f64).collect();
    if let Some(stats) = DescriptiveStats::from_values(&days) {
        findings.push(format!(
            "Videos take a median of {:.0} days to trend (max {:.0})",
            stats.median, stats.max
        ));
    }

    if let Some(top) = TrendingAggregator::top_channels_by_engagement(records, 1).first() {
        findings.push(format!(
            "Top channel by engagement: {} (mean score {})",
            top.channel,
            format_compact(top.mean_engagement_score)
        ));
    }

    findings
}

fn correlation_strength(r: f64) -> &'static str {
    match r.abs() {
        a if a >= 0.7 => "strongly",
        a if a >= 0.4 => "moderately",
        _ => "weakly",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
