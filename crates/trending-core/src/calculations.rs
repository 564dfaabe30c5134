use chrono::NaiveDate;

// ── Per-record metrics ────────────────────────────────────────────────────────

/// Weights of the engagement score blend: likes, comments, views.
pub const ENGAGEMENT_WEIGHTS: (f64, f64, f64) = (0.4, 0.4, 0.2);

/// Likes per view.
///
/// Returns `0.0` when `views` is zero, so the ratio is always finite and
/// non-negative.
pub fn engagement_ratio(likes: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    likes as f64 / views as f64
}

/// Weighted engagement blend `likes*0.4 + comments*0.4 + views*0.2`.
///
/// Missing comment counts contribute nothing.
pub fn engagement_score(likes: u64, comments: Option<u64>, views: u64) -> f64 {
    let (w_likes, w_comments, w_views) = ENGAGEMENT_WEIGHTS;
    likes as f64 * w_likes + comments.unwrap_or(0) as f64 * w_comments + views as f64 * w_views
}

/// Views relative to the mean views of the record's category.
///
/// The `+ 1` keeps the denominator positive for empty or all-zero categories.
pub fn viral_score(views: u64, category_mean_views: f64) -> f64 {
    views as f64 / (category_mean_views.max(0.0) + 1.0)
}

/// Whole days from publishing to trending, floored at zero.
///
/// Videos can be listed as trending on the day they were published in a
/// later timezone, which would otherwise yield negative spans.
pub fn trend_days(published: NaiveDate, trending: NaiveDate) -> i64 {
    (trending - published).num_days().max(0)
}

// ── Descriptive statistics ────────────────────────────────────────────────────

/// Summary statistics for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Compute statistics over `values`. Non-finite values are ignored.
    ///
    /// Returns `None` for an empty input.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Some(Self {
            count,
            mean,
            median,
            min: sorted[0],
            max: sorted[count - 1],
            std_dev: variance.sqrt(),
        })
    }
}

/// Pearson correlation coefficient of paired samples.
///
/// Returns `None` with fewer than two pairs or when either series is
/// constant.
pub fn pearson_correlation(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

// ── Histogram ─────────────────────────────────────────────────────────────────

/// One histogram bucket covering `[lower, upper)`; the last bucket is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

/// Bucket `values` into `bins` logarithmically spaced bins between the
/// smallest and largest positive value.
///
/// Zero values land in the first bin so that every value is counted.
/// Returns an empty vector when `bins` is zero or `values` is empty.
pub fn log_histogram(values: &[u64], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 || values.is_empty() {
        return Vec::new();
    }

    let positive = values.iter().copied().filter(|v| *v > 0);
    let min = positive.clone().min().unwrap_or(1) as f64;
    let max = positive.max().unwrap_or(1) as f64;

    let log_min = min.log10();
    // Widen a degenerate range so a single distinct value still gets a bin.
    let log_max = if max > min { max.log10() } else { log_min + 1.0 };
    let step = (log_max - log_min) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: 10_f64.powf(log_min + step * i as f64),
            upper: 10_f64.powf(log_min + step * (i + 1) as f64),
            count: 0,
        })
        .collect();

    for &value in values {
        let index = if value == 0 {
            0
        } else {
            let position = ((value as f64).log10() - log_min) / step;
            (position.floor().max(0.0) as usize).min(bins - 1)
        };
        result[index].count += 1;
    }

    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────
