//! Channels tab: engagement ranking next to trending frequency.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::DashboardData;
use crate::components::charts;
use crate::table_view;
use crate::themes::Theme;

pub fn render_channels(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let [engagement, counts] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    table_view::render_channel_engagement_table(frame, engagement, &data.top_channels, theme);
    charts::render_channel_counts(frame, counts, &data.channel_counts, theme);
}
