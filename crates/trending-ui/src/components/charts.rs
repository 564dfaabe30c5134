//! Chart widgets for the overview and channel tabs.
//!
//! Each `render_*` function owns the point buffers its widget borrows, so
//! callers only pass the precomputed aggregates.

use ratatui::{
    layout::{Direction, Rect},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use trending_core::calculations::HistogramBin;
use trending_core::formatting::{format_compact, format_count};
use trending_data::aggregator::{
    CategoryCount, CategoryShare, ChannelCount, DailyCount, ScatterSeries,
};

use crate::table_view::fit_width;
use crate::themes::Theme;

const LABEL_WIDTH: usize = 16;

fn chart_block<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(title, theme.header))
}

/// Horizontal bars, one per `(label, value)`, as many as fit in `area`.
fn render_horizontal_bars(
    frame: &mut Frame,
    area: Rect,
    title: String,
    items: &[(String, u64)],
    theme: &Theme,
) {
    let capacity = area.height.saturating_sub(2) as usize;
    let bars: Vec<Bar> = items
        .iter()
        .take(capacity)
        .map(|(label, value)| {
            Bar::default()
                .value(*value)
                .label(Line::from(fit_width(label, LABEL_WIDTH)))
                .text_value(format_count(*value))
                .style(theme.bar)
                .value_style(theme.value)
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title, theme))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Trending records per category.
pub fn render_category_bars(
    frame: &mut Frame,
    area: Rect,
    counts: &[CategoryCount],
    theme: &Theme,
) {
    let items: Vec<(String, u64)> = counts.iter().map(|c| (c.label.clone(), c.count)).collect();
    render_horizontal_bars(
        frame,
        area,
        " Videos per category ".to_string(),
        &items,
        theme,
    );
}

/// Most frequently trending channels.
pub fn render_channel_counts(
    frame: &mut Frame,
    area: Rect,
    counts: &[ChannelCount],
    theme: &Theme,
) {
    let items: Vec<(String, u64)> = counts
        .iter()
        .map(|c| (c.channel.clone(), c.count))
        .collect();
    render_horizontal_bars(
        frame,
        area,
        format!(" Most consistent channels (top {}) ", counts.len()),
        &items,
        theme,
    );
}

/// Log-scale histogram of view counts. The bin range goes in the title.
pub fn render_views_histogram(
    frame: &mut Frame,
    area: Rect,
    bins: &[HistogramBin],
    theme: &Theme,
) {
    let title = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => format!(
            " Views distribution, log scale ({} to {}) ",
            format_compact(first.lower),
            format_compact(last.upper)
        ),
        _ => " Views distribution ".to_string(),
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = if bins.is_empty() {
        1
    } else {
        (inner_width / bins.len()).max(1) as u16
    };

    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::default()
                .value(b.count)
                .text_value(String::new())
                .style(theme.histogram)
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title, theme))
        .bar_width(bar_width)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Upper bound of a log10 axis, at least one decade.
fn log_ceiling(max: f64) -> f64 {
    max.ceil().max(1.0)
}

/// Axis labels `10^0 .. 10^top` at three evenly spaced decades.
fn log_labels(top: f64) -> Vec<String> {
    [0.0, top / 2.0, top]
        .iter()
        .map(|exp| format_compact(10_f64.powf(exp.round())))
        .collect()
}

/// Likes against views, both on log10 axes, one series per category.
pub fn render_likes_vs_views(
    frame: &mut Frame,
    area: Rect,
    series: &[ScatterSeries],
    theme: &Theme,
) {
    let points: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|(views, likes)| ((views + 1.0).log10(), (likes + 1.0).log10()))
                .collect()
        })
        .collect();

    let max_x = points.iter().flatten().map(|p| p.0).fold(0.0, f64::max);
    let max_y = points.iter().flatten().map(|p| p.1).fold(0.0, f64::max);
    let (top_x, top_y) = (log_ceiling(max_x), log_ceiling(max_y));

    let datasets: Vec<Dataset> = series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (s, data))| {
            Dataset::default()
                .name(fit_width(&s.label, LABEL_WIDTH))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(ratatui::style::Style::default().fg(theme.series_color(i)))
                .data(data)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(chart_block(" Likes vs views (log) ".to_string(), theme))
        .x_axis(
            Axis::default()
                .title(Span::styled("views", theme.label))
                .style(theme.axis)
                .bounds([0.0, top_x])
                .labels(log_labels(top_x)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("likes", theme.label))
                .style(theme.axis)
                .bounds([0.0, top_y])
                .labels(log_labels(top_y)),
        );

    frame.render_widget(chart, area);
}

/// Trending records per day as a line.
pub fn render_trend_over_time(
    frame: &mut Frame,
    area: Rect,
    days: &[DailyCount],
    theme: &Theme,
) {
    let data: Vec<(f64, f64)> = days
        .iter()
        .enumerate()
        .map(|(i, d)| (i as f64, d.count as f64))
        .collect();
    let max_count = days.iter().map(|d| d.count).max().unwrap_or(0).max(1) as f64;
    let span = days.len().saturating_sub(1).max(1) as f64;

    let x_labels: Vec<String> = match (days.first(), days.last()) {
        (Some(first), Some(last)) => vec![
            first.date.format("%m-%d").to_string(),
            last.date.format("%m-%d").to_string(),
        ],
        _ => Vec::new(),
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.trend_line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(chart_block(" Trending records per day ".to_string(), theme))
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, span])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, max_count])
                .labels(vec!["0".to_string(), format_compact(max_count)]),
        );

    frame.render_widget(chart, area);
}

/// Share of the largest categories, drawn as labelled proportion bars.
/// Whatever the listed categories leave over is shown as "Other".
pub fn render_category_share(
    frame: &mut Frame,
    area: Rect,
    shares: &[CategoryShare],
    theme: &Theme,
) {
    // label + space + bar + " 100.0%"
    let bar_space = (area.width.saturating_sub(2) as usize).saturating_sub(LABEL_WIDTH + 9);

    let mut rows: Vec<(String, f64, ratatui::style::Style)> = shares
        .iter()
        .enumerate()
        .map(|(i, s)| {
            (
                s.label.clone(),
                s.percent,
                ratatui::style::Style::default().fg(theme.series_color(i)),
            )
        })
        .collect();
    let listed: f64 = shares.iter().map(|s| s.percent).sum();
    let other = (100.0 - listed).max(0.0);
    if !shares.is_empty() && other >= 0.05 {
        rows.push(("Other".to_string(), other, theme.dim));
    }

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, percent, style)| {
            let label = fit_width(&label, LABEL_WIDTH);
            let pad = " ".repeat(LABEL_WIDTH.saturating_sub(label.width()));
            let filled = ((percent / 100.0) * bar_space as f64).round() as usize;
            Line::from(vec![
                Span::styled(format!("{label}{pad} "), theme.label),
                Span::styled("█".repeat(filled.min(bar_space)), style),
                Span::styled(format!(" {percent:.1}%"), theme.value),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(chart_block(
            format!(" Top {} category share ", shares.len()),
            theme,
        )),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
