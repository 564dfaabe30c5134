use ratatui::style::{Color, Modifier, Style};

/// Whether the terminal draws on a dark or light canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Guess the terminal background from `COLORFGBG` (`"fg;bg"`).
///
/// Background codes 0–6 and 8 are dark, everything else light. Missing or
/// unparsable values are treated as dark.
pub fn detect_background() -> BackgroundType {
    let background = std::env::var("COLORFGBG")
        .ok()
        .and_then(|val| val.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()));
    match background {
        Some(code) if code > 6 && code != 8 => BackgroundType::Light,
        _ => BackgroundType::Dark,
    }
}

/// Styles used by every dashboard widget.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub bar: Style,
    pub histogram: Style,
    pub trend_line: Style,
    pub axis: Style,
    /// Per-category colours, cycled in category order.
    pub series: Vec<Color>,

    // ── Viral score ──────────────────────────────────────────────────────────
    pub viral_low: Style,
    pub viral_medium: Style,
    pub viral_high: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),

            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            bar: Style::default().fg(Color::Cyan),
            histogram: Style::default().fg(Color::Magenta),
            trend_line: Style::default().fg(Color::Yellow),
            axis: Style::default().fg(Color::DarkGray),
            series: vec![
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::Red,
                Color::Blue,
                Color::LightCyan,
                Color::LightMagenta,
            ],

            viral_low: Style::default().fg(Color::Gray),
            viral_medium: Style::default().fg(Color::Yellow),
            viral_high: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Dark text and saturated accents keep charts legible on a white canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),

            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),

            bar: Style::default().fg(Color::Blue),
            histogram: Style::default().fg(Color::Magenta),
            trend_line: Style::default().fg(Color::Red),
            axis: Style::default().fg(Color::Gray),
            series: vec![
                Color::Blue,
                Color::Magenta,
                Color::Red,
                Color::Green,
                Color::DarkGray,
                Color::Cyan,
            ],

            viral_low: Style::default().fg(Color::DarkGray),
            viral_medium: Style::default().fg(Color::Magenta),
            viral_high: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),

            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::REVERSED),
            tab_inactive: Style::default().fg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            bar: Style::default().fg(Color::Green),
            histogram: Style::default().fg(Color::Cyan),
            trend_line: Style::default().fg(Color::Yellow),
            axis: Style::default().fg(Color::White),
            series: vec![
                Color::Green,
                Color::Cyan,
                Color::Yellow,
                Color::Magenta,
                Color::Red,
                Color::Blue,
            ],

            viral_low: Style::default().fg(Color::White),
            viral_medium: Style::default().fg(Color::Yellow),
            viral_high: Style::default().fg(Color::Red),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names (including `auto`) detect.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Colour of the `index`-th category series.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return Color::Reset;
        }
        self.series[index % self.series.len()]
    }

    /// Style for a viral score.
    ///
    /// * `< 1`   → `viral_low` (at or below the category mean)
    /// * `1–3`   → `viral_medium`
    /// * `≥ 3`   → `viral_high`
    pub fn viral_style(&self, score: f64) -> Style {
        if score >= 3.0 {
            self.viral_high
        } else if score >= 1.0 {
            self.viral_medium
        } else {
            self.viral_low
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.bar.fg, Some(Color::Cyan));
        assert_eq!(t.histogram.fg, Some(Color::Magenta));
        assert!(t.tab_active.add_modifier.contains(Modifier::BOLD));
        assert!(!t.series.is_empty());
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        for style in [t.header, t.value, t.table_header, t.viral_high, t.tab_active] {
            assert!(!style.add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_from_name_variants() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("LIGHT").header.fg, Some(Color::Blue));
        assert!(!Theme::from_name("classic")
            .header
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    #[test]
    fn test_series_color_cycles() {
        let t = Theme::dark();
        let n = t.series.len();
        assert_eq!(t.series_color(0), t.series_color(n));
        assert_eq!(t.series_color(1), t.series[1]);
    }

    #[test]
    fn test_series_color_empty_palette() {
        let mut t = Theme::dark();
        t.series.clear();
        assert_eq!(t.series_color(3), Color::Reset);
    }

    #[test]
    fn test_viral_style_thresholds() {
        let t = Theme::dark();
        assert_eq!(t.viral_style(0.0).fg, Some(Color::Gray));
        assert_eq!(t.viral_style(0.99).fg, Some(Color::Gray));
        assert_eq!(t.viral_style(1.0).fg, Some(Color::Yellow));
        assert_eq!(t.viral_style(2.99).fg, Some(Color::Yellow));
        assert_eq!(t.viral_style(3.0).fg, Some(Color::Red));
    }
}
