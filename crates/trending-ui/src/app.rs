//! Main application state and TUI event loop for the trending dashboard.
//!
//! [`App`] owns the theme, the active tab and the aggregates computed once
//! from the analysis result. Rendering never recomputes anything.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use trending_core::calculations::HistogramBin;
use trending_core::error::{DashboardError, Result};
use trending_core::models::EnrichedRecord;
use trending_data::aggregator::{
    CategoryCount, CategoryShare, ChannelCount, ChannelEngagement, DailyCount, DatasetSummary,
    ScatterSeries, TrendingAggregator,
};
use trending_data::analysis::{AnalysisMetadata, AnalysisResult};
use trending_data::insights::key_findings;

use crate::channels_view;
use crate::components::findings::{findings_height, render_findings};
use crate::components::header::Header;
use crate::components::tab_bar::tab_bar;
use crate::overview_view;
use crate::table_view;
use crate::themes::Theme;

/// Categories shown in the share panel.
const TOP_CATEGORY_SHARE: usize = 5;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which tab the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Overview,
    Channels,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Overview, ViewMode::Channels];

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Overview => "Overview",
            ViewMode::Channels => "Channels",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ViewMode::Overview => 0,
            ViewMode::Channels => 1,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Parse a `--view` value; `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "overview" => Some(ViewMode::Overview),
            "channels" => Some(ViewMode::Channels),
            _ => None,
        }
    }
}

// ── DashboardData ─────────────────────────────────────────────────────────────

/// Everything the tabs draw, derived from the filtered records.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub records: Vec<EnrichedRecord>,
    pub summary: DatasetSummary,
    pub category_counts: Vec<CategoryCount>,
    pub category_share: Vec<CategoryShare>,
    pub views_histogram: Vec<HistogramBin>,
    pub scatter: Vec<ScatterSeries>,
    pub trend: Vec<DailyCount>,
    pub top_channels: Vec<ChannelEngagement>,
    pub channel_counts: Vec<ChannelCount>,
    pub findings: Vec<String>,
}

impl DashboardData {
    pub fn from_records(
        records: &[EnrichedRecord],
        histogram_bins: usize,
        top_channels: usize,
    ) -> Self {
        Self {
            records: records.to_vec(),
            summary: TrendingAggregator::summarize(records),
            category_counts: TrendingAggregator::category_counts(records),
            category_share: TrendingAggregator::top_category_share(records, TOP_CATEGORY_SHARE),
            views_histogram: TrendingAggregator::views_histogram(records, histogram_bins),
            scatter: TrendingAggregator::scatter_points(records),
            trend: TrendingAggregator::trend_over_time(records),
            top_channels: TrendingAggregator::top_channels_by_engagement(records, top_channels),
            channel_counts: TrendingAggregator::channel_counts(records, top_channels),
            findings: key_findings(records),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the trending dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    pub data: DashboardData,
    pub metadata: AnalysisMetadata,
    /// Human-readable description of the active filter.
    pub filter_description: String,
}

impl App {
    pub fn new(
        theme_name: &str,
        view_mode: ViewMode,
        result: &AnalysisResult,
        filter_description: String,
        histogram_bins: usize,
        top_channels: usize,
    ) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            should_quit: false,
            data: DashboardData::from_records(&result.filtered, histogram_bins, top_channels),
            metadata: result.metadata.clone(),
            filter_description,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Input is polled with a 250 ms timeout; the terminal is restored even
    /// when drawing fails.
    pub fn run(mut self) -> Result<()> {
        let mut terminal = setup_terminal().map_err(terminal_error)?;

        let tick_rate = Duration::from_millis(250);
        let result: io::Result<()> = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        let restored = restore_terminal(&mut terminal);
        result.map_err(terminal_error)?;
        restored.map_err(terminal_error)
    }

    /// Apply one key press: tab switching or quitting.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.view_mode = self.view_mode.next(),
            KeyCode::BackTab | KeyCode::Left => self.view_mode = self.view_mode.previous(),
            KeyCode::Char('1') => self.view_mode = ViewMode::Overview,
            KeyCode::Char('2') => self.view_mode = ViewMode::Channels,
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let findings_rows = findings_height(&self.data.findings);
        let [header_area, tabs_area, body, findings_area, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(findings_rows),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let header = Header::new(&self.metadata, &self.filter_description, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), header_area);
        frame.render_widget(tab_bar(self.view_mode, &self.theme), tabs_area);

        if self.data.is_empty() {
            table_view::render_no_data(frame, body, &self.theme);
        } else {
            match self.view_mode {
                ViewMode::Overview => {
                    overview_view::render_overview(frame, body, &self.data, &self.theme)
                }
                ViewMode::Channels => {
                    channels_view::render_channels(frame, body, &self.data, &self.theme)
                }
            }
        }

        render_findings(frame, findings_area, &self.data.findings, &self.theme);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Tab/←/→/1/2 switch tabs · q quit",
                self.theme.dim,
            ))),
            footer,
        );
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn terminal_error(err: io::Error) -> DashboardError {
    DashboardError::Terminal(err.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
