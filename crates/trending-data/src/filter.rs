//! Record selection by category, viral score and publish weekday.

use chrono::Weekday;
use trending_core::models::EnrichedRecord;

/// Criteria a record must meet to be shown. Empty sets mean "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Category labels to keep, compared case-insensitively.
    pub categories: Vec<String>,
    /// Records with a lower viral score are hidden.
    pub min_viral_score: f64,
    /// Publish weekdays to keep.
    pub weekdays: Vec<Weekday>,
}

impl RecordFilter {
    pub fn new(categories: Vec<String>, min_viral_score: f64, weekdays: Vec<Weekday>) -> Self {
        Self {
            categories,
            min_viral_score,
            weekdays,
        }
    }

    /// Whether any criterion actually restricts the records.
    pub fn is_active(&self) -> bool {
        !self.categories.is_empty() || self.min_viral_score > 0.0 || !self.weekdays.is_empty()
    }

    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        let category_ok = self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(&record.category));
        let weekday_ok =
            self.weekdays.is_empty() || self.weekdays.contains(&record.publish_weekday);

        category_ok && weekday_ok && record.viral_score >= self.min_viral_score
    }

    /// Keep the matching records, preserving order.
    pub fn apply(&self, records: &[EnrichedRecord]) -> Vec<EnrichedRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    /// Short human-readable description for the dashboard header.
    pub fn describe(&self) -> String {
        if !self.is_active() {
            return "all records".to_string();
        }
        let mut parts = Vec::new();
        if !self.categories.is_empty() {
            parts.push(format!("categories: {}", self.categories.join(", ")));
        }
        if self.min_viral_score > 0.0 {
            parts.push(format!("viral ≥ {:.2}", self.min_viral_score));
        }
        if !self.weekdays.is_empty() {
            let days: Vec<String> = self.weekdays.iter().map(|d| d.to_string()).collect();
            parts.push(format!("weekdays: {}", days.join(", ")));
        }
        parts.join(" | ")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
