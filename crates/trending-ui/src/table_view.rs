//! Tabular views: the dataset preview and the channel engagement table.
//!
//! Both render a bordered [`ratatui::widgets::Table`] with alternating row
//! styles. Cell text is clipped to the column's display width.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use trending_core::formatting::{format_compact, format_count, format_ratio_percent};
use trending_core::models::EnrichedRecord;
use trending_data::aggregator::ChannelEngagement;

use crate::themes::Theme;

/// Rows shown in the dataset preview.
pub const PREVIEW_ROWS: usize = 10;

/// Clip `text` to at most `max_width` terminal columns, ending in `…` when
/// anything was cut. Wide glyphs count as two columns.
pub fn fit_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn row_style(theme: &Theme, index: usize) -> ratatui::style::Style {
    if index % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

/// Render the first [`PREVIEW_ROWS`] records of `records`.
pub fn render_preview_table(
    frame: &mut Frame,
    area: Rect,
    records: &[EnrichedRecord],
    theme: &Theme,
) {
    const TITLE_WIDTH: u16 = 40;
    const CHANNEL_WIDTH: u16 = 20;
    const CATEGORY_WIDTH: u16 = 16;

    let header = Row::new(
        [
            "Title", "Channel", "Category", "Trending", "Views", "Likes", "Ratio", "Viral",
        ]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header)),
    );

    let rows: Vec<Row> = records
        .iter()
        .take(PREVIEW_ROWS)
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(fit_width(&r.record.title, TITLE_WIDTH as usize)),
                Cell::from(fit_width(&r.record.channel_title, CHANNEL_WIDTH as usize)),
                Cell::from(fit_width(&r.category, CATEGORY_WIDTH as usize)),
                Cell::from(r.record.trending_date.format("%Y-%m-%d").to_string()),
                Cell::from(format_count(r.record.views)),
                Cell::from(format_count(r.record.likes)),
                Cell::from(format_ratio_percent(r.engagement_ratio)),
                Cell::from(format!("{:.2}", r.viral_score)).style(theme.viral_style(r.viral_score)),
            ])
            .style(row_style(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(TITLE_WIDTH),
        Constraint::Length(CHANNEL_WIDTH),
        Constraint::Length(CATEGORY_WIDTH),
        Constraint::Length(10),
        Constraint::Length(13),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let title = format!(
        " Dataset preview ({} of {}) ",
        rows.len(),
        format_count(records.len() as u64)
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(title),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render channels ranked by mean engagement score.
pub fn render_channel_engagement_table(
    frame: &mut Frame,
    area: Rect,
    channels: &[ChannelEngagement],
    theme: &Theme,
) {
    const CHANNEL_WIDTH: u16 = 30;

    let header = Row::new(
        ["#", "Channel", "Mean score", "Records"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );

    let rows: Vec<Row> = channels
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(fit_width(&c.channel, CHANNEL_WIDTH as usize)),
                Cell::from(format_compact(c.mean_engagement_score)),
                Cell::from(format_count(c.records)),
            ])
            .style(row_style(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(CHANNEL_WIDTH),
        Constraint::Length(11),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" Top {} channels by engagement score ", channels.len())),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Placeholder shown when no record passes the filter.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No records to display", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Relax --category, --min-viral-score or --weekday and try again.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Trending Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use trending_core::models::VideoRecord;
    use trending_data::enricher::enrich_record;

    pub(crate) fn make_records(n: usize) -> Vec<EnrichedRecord> {
        let categories = ["Music", "Gaming", "Comedy", "Entertainment"];
        (0..n)
            .map(|i| {
                let record = VideoRecord {
                    video_id: format!("vid{i}"),
                    title: format!("A rather long trending video title number {i}"),
                    channel_title: format!("Channel {}", i % 5),
                    category_id: Some(i as u32 % 4),
                    publish_time: NaiveDate::from_ymd_opt(2017, 11, 1 + (i % 7) as u32)
                        .unwrap()
                        .and_hms_opt(12, 0, 0)
                        .unwrap(),
                    trending_date: NaiveDate::from_ymd_opt(2017, 11, 10 + (i % 5) as u32)
                        .unwrap(),
                    views: 1_000 * (i as u64 + 1).pow(2),
                    likes: 50 * (i as u64 + 1),
                    dislikes: Some(i as u64),
                    comment_count: Some(10 * i as u64),
                    tags: String::new(),
                    thumbnail_link: String::new(),
                    description: String::new(),
                    comments_disabled: false,
                    ratings_disabled: false,
                    video_error_or_removed: false,
                };
                enrich_record(&record, categories[i % categories.len()], 20_000.0)
            })
            .collect()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── fit_width ─────────────────────────────────────────────────────────────

    #[test]
    fn test_fit_width_short_text_unchanged() {
        assert_eq!(fit_width("Music", 10), "Music");
        assert_eq!(fit_width("Music", 5), "Music");
    }

    #[test]
    fn test_fit_width_truncates_with_ellipsis() {
        assert_eq!(fit_width("Entertainment", 6), "Enter…");
        assert_eq!(fit_width("Entertainment", 0), "");
    }

    #[test]
    fn test_fit_width_counts_wide_glyphs() {
        // Each CJK glyph is two columns wide.
        let clipped = fit_width("日本語のタイトル", 7);
        assert_eq!(clipped, "日本語…");
        assert!(clipped.width() <= 7);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_preview_table_shows_title() {
        let backend = TestBackend::new(140, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let records = make_records(25);

        terminal
            .draw(|frame| render_preview_table(frame, frame.area(), &records, &theme))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Dataset preview (10 of 25)"));
        assert!(text.contains("Channel 0"));
    }

    #[test]
    fn test_render_preview_table_small_area_does_not_panic() {
        let backend = TestBackend::new(20, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        let records = make_records(3);

        terminal
            .draw(|frame| render_preview_table(frame, frame.area(), &records, &theme))
            .unwrap();
    }

    #[test]
    fn test_render_channel_engagement_table() {
        let backend = TestBackend::new(80, 15);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let channels = vec![
            ChannelEngagement {
                channel: "Alpha".to_string(),
                mean_engagement_score: 12_345.0,
                records: 4,
            },
            ChannelEngagement {
                channel: "Beta".to_string(),
                mean_engagement_score: 900.0,
                records: 1,
            },
        ];

        terminal
            .draw(|frame| render_channel_engagement_table(frame, frame.area(), &channels, &theme))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Alpha"));
        assert!(text.contains("Top 2 channels"));
    }

    #[test]
    fn test_render_no_data() {
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| render_no_data(frame, frame.area(), &theme))
            .unwrap();

        assert!(buffer_text(&terminal).contains("No records to display"));
    }
}
