use crate::themes::Theme;
use ratatui::text::{Line, Span};
use trending_core::formatting::format_count;
use trending_data::analysis::AnalysisMetadata;

pub const TITLE: &str = " ▶ YOUTUBE TRENDING DASHBOARD ◀ ";

/// Dashboard header:
///
/// 1. Application title.
/// 2. A 60-column `=` separator.
/// 3. `[ shown of enriched | dropped | filter ]` summary.
pub struct Header<'a> {
    pub metadata: &'a AnalysisMetadata,
    /// Human-readable description of the active filter.
    pub filter: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(metadata: &'a AnalysisMetadata, filter: &'a str, theme: &'a Theme) -> Self {
        Self {
            metadata,
            filter,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let m = self.metadata;
        let dropped_style = if m.rows_dropped > 0 {
            self.theme.warning
        } else {
            self.theme.success
        };

        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(format_count(m.records_shown as u64), self.theme.value),
                Span::styled(" of ", self.theme.label),
                Span::styled(format_count(m.records_enriched as u64), self.theme.value),
                Span::styled(" records | dropped ", self.theme.label),
                Span::styled(format_count(m.rows_dropped as u64), dropped_style),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.filter.to_string(), self.theme.info),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(dropped: usize) -> AnalysisMetadata {
        AnalysisMetadata {
            generated_at: "2017-11-20T00:00:00+00:00".to_string(),
            rows_loaded: 40_950,
            rows_dropped: dropped,
            counts_coerced: 0,
            records_enriched: 40_949,
            records_shown: 1_234,
            categories_loaded: 32,
            load_time_seconds: 0.5,
            transform_time_seconds: 0.1,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_line_count() {
        let theme = Theme::dark();
        let meta = metadata(0);
        assert_eq!(Header::new(&meta, "all records", &theme).to_lines().len(), 3);
    }

    #[test]
    fn test_header_title_and_separator() {
        let theme = Theme::dark();
        let meta = metadata(0);
        let lines = Header::new(&meta, "all records", &theme).to_lines();
        assert!(text(&lines[0]).contains("YOUTUBE TRENDING DASHBOARD"));
        let sep = text(&lines[1]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_summary_line() {
        let theme = Theme::dark();
        let meta = metadata(1);
        let lines = Header::new(&meta, "categories: Music", &theme).to_lines();
        assert_eq!(
            text(&lines[2]),
            "[ 1,234 of 40,949 records | dropped 1 | categories: Music ]"
        );
    }

    #[test]
    fn test_header_highlights_dropped_rows() {
        let theme = Theme::dark();
        let clean = metadata(0);
        let dirty = metadata(3);
        let clean_lines = Header::new(&clean, "", &theme).to_lines();
        let dirty_lines = Header::new(&dirty, "", &theme).to_lines();
        assert_eq!(clean_lines[2].spans[5].style, theme.success);
        assert_eq!(dirty_lines[2].spans[5].style, theme.warning);
    }
}
