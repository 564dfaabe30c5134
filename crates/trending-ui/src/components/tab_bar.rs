use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

use crate::app::ViewMode;
use crate::themes::Theme;

/// Tab strip with the active view highlighted and its number key shown.
pub fn tab_bar<'a>(active: ViewMode, theme: &Theme) -> Tabs<'a> {
    let titles: Vec<Line> = ViewMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), theme.dim),
                Span::raw(mode.title()),
            ])
        })
        .collect();

    Tabs::new(titles)
        .select(active.index())
        .style(theme.tab_inactive)
        .highlight_style(theme.tab_active)
        .divider(Span::styled("│", theme.separator))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border),
        )
}
