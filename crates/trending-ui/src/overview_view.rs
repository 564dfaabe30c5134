//! Overview tab: dataset summary, distribution charts and a preview table.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use trending_core::formatting::{format_compact, format_count, format_ratio_percent};
use trending_data::aggregator::DatasetSummary;

use crate::app::DashboardData;
use crate::components::charts;
use crate::table_view;
use crate::themes::Theme;

/// One-line headline numbers.
pub fn summary_line<'a>(summary: &DatasetSummary, theme: &Theme) -> Line<'a> {
    let median = summary
        .views
        .as_ref()
        .map(|v| format_compact(v.median))
        .unwrap_or_else(|| "-".to_string());

    let pairs = [
        ("Records", format_count(summary.records as u64)),
        ("Videos", format_count(summary.unique_videos as u64)),
        ("Channels", format_count(summary.channels as u64)),
        ("Categories", format_count(summary.categories as u64)),
        ("Total views", format_compact(summary.total_views as f64)),
        ("Median views", median),
        ("Mean like ratio", format_ratio_percent(summary.mean_engagement_ratio)),
    ];

    let mut spans = Vec::with_capacity(pairs.len() * 3);
    for (i, (label, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", theme.separator));
        }
        spans.push(Span::styled(format!("{label} "), theme.label));
        spans.push(Span::styled(value, theme.value));
    }
    Line::from(spans)
}

pub fn render_overview(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let [summary_area, top, middle, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(33),
        Constraint::Percentage(33),
        Constraint::Min(5),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(summary_line(&data.summary, theme)),
        summary_area,
    );

    let [categories, histogram] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(top);
    charts::render_category_bars(frame, categories, &data.category_counts, theme);
    charts::render_views_histogram(frame, histogram, &data.views_histogram, theme);

    let [scatter, trend, share] = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
    ])
    .areas(middle);
    charts::render_likes_vs_views(frame, scatter, &data.scatter, theme);
    charts::render_trend_over_time(frame, trend, &data.trend, theme);
    charts::render_category_share(frame, share, &data.category_share, theme);

    table_view::render_preview_table(frame, bottom, &data.records, theme);
}
