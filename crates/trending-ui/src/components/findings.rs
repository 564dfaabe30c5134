use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::table_view::fit_width;
use crate::themes::Theme;

const BULLET: &str = " • ";

/// Bullet list of key findings, shown under every tab.
///
/// Each finding occupies exactly one row and is clipped to the panel width.
pub fn render_findings(frame: &mut Frame, area: Rect, findings: &[String], theme: &Theme) {
    let text_width = (area.width as usize).saturating_sub(2 + BULLET.chars().count());
    let lines: Vec<Line> = findings
        .iter()
        .map(|f| {
            Line::from(vec![
                Span::styled(BULLET, theme.info),
                Span::styled(fit_width(f, text_width), theme.text),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.table_border)
                    .title(Span::styled(" Key findings ", theme.header)),
            ),
        area,
    );
}

/// Rows needed to show `findings` inside a border.
pub fn findings_height(findings: &[String]) -> u16 {
    findings.len() as u16 + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_findings_height() {
        assert_eq!(findings_height(&[]), 2);
        assert_eq!(findings_height(&["a".to_string(), "b".to_string()]), 4);
    }

    #[test]
    fn test_render_findings() {
        let mut terminal = Terminal::new(TestBackend::new(70, 5)).unwrap();
        let findings = vec![
            "Music and Entertainment dominate".to_string(),
            "Views are heavy-tailed".to_string(),
        ];
        terminal
            .draw(|f| render_findings(f, f.area(), &findings, &Theme::dark()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Key findings"));
        assert!(text.contains("Views are heavy-tailed"));
    }

    #[test]
    fn test_render_findings_narrow_keeps_every_finding() {
        let findings = vec![
            "Music and Entertainment dominate with 40.0% and 25.0% of trending records".to_string(),
            "Views are heavy-tailed: mean 2.1M vs median 680.2K".to_string(),
            "Top channel by engagement: Gamma".to_string(),
        ];
        let mut terminal =
            Terminal::new(TestBackend::new(30, findings_height(&findings))).unwrap();
        terminal
            .draw(|f| render_findings(f, f.area(), &findings, &Theme::dark()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect()
        };
        assert!(row(1).contains("Music and"));
        assert!(row(1).contains('…'));
        assert!(row(2).contains("Views are"));
        assert!(row(3).contains("Top channel"));
    }
}
