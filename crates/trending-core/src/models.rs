use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label used when a record's category id is absent from the mapping.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Columns the tabular input must carry. Descriptive text columns
/// (tags, thumbnail link, description, flags) are optional.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "video_id",
    "trending_date",
    "title",
    "channel_title",
    "category_id",
    "publish_time",
    "views",
    "likes",
    "dislikes",
    "comment_count",
];

/// One CSV row exactly as read from disk, every cell kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVideoRecord {
    pub video_id: String,
    pub trending_date: String,
    pub title: String,
    pub channel_title: String,
    pub category_id: String,
    pub publish_time: String,
    #[serde(default)]
    pub tags: String,
    pub views: String,
    pub likes: String,
    pub dislikes: String,
    pub comment_count: String,
    #[serde(default)]
    pub thumbnail_link: String,
    #[serde(default)]
    pub comments_disabled: String,
    #[serde(default)]
    pub ratings_disabled: String,
    #[serde(default)]
    pub video_error_or_removed: String,
    #[serde(default)]
    pub description: String,
}

/// A validated trending-video observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Platform video identifier.
    pub video_id: String,
    pub title: String,
    /// Channel display name.
    pub channel_title: String,
    /// Numeric category code; `None` when the cell was blank or not a number.
    pub category_id: Option<u32>,
    /// Publish timestamp with the timezone stripped.
    pub publish_time: NaiveDateTime,
    /// Calendar date on which the video appeared in the trending list.
    pub trending_date: NaiveDate,
    pub views: u64,
    pub likes: u64,
    /// `None` when the cell was blank.
    pub dislikes: Option<u64>,
    /// `None` when the cell was blank.
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub thumbnail_link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments_disabled: bool,
    #[serde(default)]
    pub ratings_disabled: bool,
    #[serde(default)]
    pub video_error_or_removed: bool,
}

impl VideoRecord {
    /// Calendar date of publication.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish_time.date()
    }
}

/// Category id → human-readable label, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    labels: HashMap<u32, String>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label for `id`, replacing any previous label.
    pub fn insert(&mut self, id: u32, label: impl Into<String>) {
        self.labels.insert(id, label.into());
    }

    /// Direct lookup; `None` when the id is unmapped.
    pub fn get(&self, id: u32) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    /// Resolve a record's label, falling back to [`UNKNOWN_CATEGORY`] for
    /// missing ids, unmapped ids and blank labels.
    pub fn resolve(&self, id: Option<u32>) -> &str {
        id.and_then(|id| self.get(id))
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<(u32, String)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

/// A [`VideoRecord`] joined with its category label and derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub record: VideoRecord,
    /// Resolved category label; never empty.
    pub category: String,
    /// `likes / views`, `0.0` when there are no views.
    pub engagement_ratio: f64,
    /// Weighted blend of likes, comments and views.
    pub engagement_score: f64,
    /// Views relative to the mean views of the record's category.
    pub viral_score: f64,
    /// Whole days between publishing and trending, floored at zero.
    pub trend_days: i64,
    pub publish_weekday: Weekday,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> CategoryMap {
        [(1, "Film".to_string()), (2, "Autos".to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_category_map_resolves_known_id() {
        let map = sample_map();
        assert_eq!(map.resolve(Some(1)), "Film");
        assert_eq!(map.resolve(Some(2)), "Autos");
    }

    #[test]
    fn test_category_map_unknown_id_falls_back() {
        let map = sample_map();
        assert_eq!(map.resolve(Some(999)), UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_category_map_missing_id_falls_back() {
        let map = sample_map();
        assert_eq!(map.resolve(None), UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_category_map_blank_label_falls_back() {
        let mut map = sample_map();
        map.insert(3, "   ");
        assert_eq!(map.resolve(Some(3)), UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_category_map_insert_replaces() {
        let mut map = CategoryMap::new();
        assert!(map.is_empty());
        map.insert(10, "Music");
        map.insert(10, "Musik");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(10), Some("Musik"));
    }

    #[test]
    fn test_publish_date_strips_time() {
        let record = VideoRecord {
            video_id: "abc".to_string(),
            title: "t".to_string(),
            channel_title: "c".to_string(),
            category_id: Some(1),
            publish_time: NaiveDate::from_ymd_opt(2017, 11, 13)
                .unwrap()
                .and_hms_opt(17, 13, 1)
                .unwrap(),
            trending_date: NaiveDate::from_ymd_opt(2017, 11, 14).unwrap(),
            views: 10,
            likes: 1,
            dislikes: None,
            comment_count: None,
            tags: String::new(),
            thumbnail_link: String::new(),
            description: String::new(),
            comments_disabled: false,
            ratings_disabled: false,
            video_error_or_removed: false,
        };
        assert_eq!(
            record.publish_date(),
            NaiveDate::from_ymd_opt(2017, 11, 13).unwrap()
        );
    }
}
