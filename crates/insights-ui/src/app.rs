//! Main application state and TUI event loop for Content Insights.
//!
//! [`App`] owns the theme, the prepared [`DashboardReport`] and the selected
//! tab. The report is computed once before the loop starts; key presses only
//! change which part of it is drawn.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};

use insights_core::calendar;
use insights_core::models::Category;
use insights_runtime::reports::{DashboardReport, HOLIDAY_COLUMNS, TOP_TITLE_COLUMNS};

use crate::chart_view::{self, category_label, LineSeries};
use crate::components::header::Header;
use crate::table_view;
use crate::themes::Theme;

// ── Tab ───────────────────────────────────────────────────────────────────────

/// The nine dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Language,
    TimeTrends,
    TopContent,
    WeeklyPatterns,
    MonthlyPattern,
    ReleaseSeason,
    ReleasesVsHours,
    Holidays,
}

impl Tab {
    pub const ALL: [Tab; 9] = [
        Tab::Overview,
        Tab::Language,
        Tab::TimeTrends,
        Tab::TopContent,
        Tab::WeeklyPatterns,
        Tab::MonthlyPattern,
        Tab::ReleaseSeason,
        Tab::ReleasesVsHours,
        Tab::Holidays,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Language => "Language",
            Tab::TimeTrends => "Time Trends",
            Tab::TopContent => "Top Content",
            Tab::WeeklyPatterns => "Weekly Patterns",
            Tab::MonthlyPattern => "Monthly Pattern",
            Tab::ReleaseSeason => "Release Season",
            Tab::ReleasesVsHours => "Releases vs Hours",
            Tab::Holidays => "Holidays",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Tab at `index`, clamped to the last tab.
    pub fn from_index(index: usize) -> Tab {
        Tab::ALL[index.min(Tab::ALL.len() - 1)]
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub report: DashboardReport,
    /// File name shown in the header.
    pub source: String,
    pub selected: Tab,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, report: DashboardReport, source: String, initial_tab: usize) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            report,
            source,
            selected: Tab::from_index(initial_tab),
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Take over the terminal and run until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout. The terminal is
    /// restored whether the loop ends normally or with an error.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Apply one key press. Releases and repeats are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.select(self.selected.next()),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                self.select(self.selected.previous())
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.select(Tab::from_index(index));
            }
            _ => {}
        }
    }

    fn select(&mut self, tab: Tab) {
        if tab != self.selected {
            tracing::debug!(tab = tab.title(), "tab selected");
            self.selected = tab;
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw the header, tab bar, selected tab and key hints into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, tabs_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let header = Header::new(
            &self.source,
            self.report.record_count,
            self.report.total_hours,
            &self.theme,
        );
        frame.render_widget(Paragraph::new(header.to_lines()), header_area);

        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.separator),
            )
            .select(self.selected.index())
            .style(self.theme.tab)
            .highlight_style(self.theme.tab_selected)
            .divider(Span::styled("|", self.theme.dim));
        frame.render_widget(tabs, tabs_area);

        self.render_tab(frame, body_area);

        let hints = Line::from(vec![
            Span::styled("←/→ h/l Tab", self.theme.value),
            Span::styled(" switch  ", self.theme.dim),
            Span::styled("1-9", self.theme.value),
            Span::styled(" jump  ", self.theme.dim),
            Span::styled("q Esc Ctrl+C", self.theme.value),
            Span::styled(" quit", self.theme.dim),
        ]);
        frame.render_widget(Paragraph::new(hints), footer_area);
    }

    fn render_tab(&self, frame: &mut Frame, area: Rect) {
        let report = &self.report;
        let theme = &self.theme;

        match self.selected {
            Tab::Overview => {
                let [left, right] = halves_horizontal(area);
                chart_view::render_bar_chart(
                    frame,
                    left,
                    "Hours Viewed by Content Type",
                    &report.views_by_type,
                    theme,
                );
                table_view::render_share_table(
                    frame,
                    right,
                    "Content Type Share",
                    "Content Type",
                    &report.views_by_type,
                    report.total_hours,
                    theme,
                );
            }
            Tab::Language => {
                let [top, bottom] = Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(area);
                chart_view::render_bar_chart(
                    frame,
                    top,
                    "Hours Viewed by Language",
                    &report.views_by_language,
                    theme,
                );
                table_view::render_share_table(
                    frame,
                    bottom,
                    "Language Share",
                    "Language",
                    &report.views_by_language,
                    report.total_hours,
                    theme,
                );
            }
            Tab::TimeTrends => {
                let [top, bottom] = halves_vertical(area);
                let labels = labels_of(&report.views_by_month);
                let line = LineSeries::new(
                    "Hours Viewed",
                    report.views_by_month.iter().map(|(_, v)| *v).collect(),
                );
                chart_view::render_line_chart(
                    frame,
                    top,
                    "Hours Viewed by Release Month",
                    &labels,
                    &[line],
                    theme,
                );
                chart_view::render_bar_chart(
                    frame,
                    bottom,
                    "Hours Viewed by Release Season",
                    &report.views_by_season,
                    theme,
                );
            }
            Tab::TopContent => {
                let title = format!("Top {} Titles by Hours Viewed", report.top_titles.len());
                table_view::render_table_view(
                    frame,
                    area,
                    &title,
                    &TOP_TITLE_COLUMNS,
                    &report.top_titles,
                    true,
                    theme,
                );
            }
            Tab::WeeklyPatterns => {
                chart_view::render_dual_chart(
                    frame,
                    area,
                    "Release Weekday",
                    &report.releases_by_weekday,
                    &report.views_by_weekday,
                    theme,
                );
            }
            Tab::MonthlyPattern => {
                let pivot = &report.monthly_views_by_type;
                let labels: Vec<String> = pivot.row_keys().map(category_label).collect();
                let series: Vec<LineSeries> = pivot
                    .column_keys()
                    .iter()
                    .map(|column| {
                        LineSeries::new(
                            column.to_string(),
                            pivot.column_series(column).into_iter().map(|(_, v)| v).collect(),
                        )
                    })
                    .collect();
                chart_view::render_line_chart(
                    frame,
                    area,
                    "Monthly Hours Viewed by Content Type",
                    &labels,
                    &series,
                    theme,
                );
            }
            Tab::ReleaseSeason => {
                let [left, right] = halves_horizontal(area);
                chart_view::render_bar_chart(
                    frame,
                    left,
                    "Hours Viewed by Release Season",
                    &report.views_by_season,
                    theme,
                );
                table_view::render_share_table(
                    frame,
                    right,
                    "Season Share",
                    "Season",
                    &report.views_by_season,
                    report.total_hours,
                    theme,
                );
            }
            Tab::ReleasesVsHours => {
                let [left, right] = halves_horizontal(area);
                chart_view::render_dual_chart(
                    frame,
                    left,
                    "By Month",
                    &report.releases_by_month,
                    &report.views_by_month,
                    theme,
                );
                chart_view::render_dual_chart(
                    frame,
                    right,
                    "By Weekday",
                    &report.releases_by_weekday,
                    &report.views_by_weekday,
                    theme,
                );
            }
            Tab::Holidays => self.render_holidays(frame, area),
        }
    }

    fn render_holidays(&self, frame: &mut Frame, area: Rect) {
        let report = &self.report;
        let [anchors_area, table_area, chart_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Percentage(55),
            Constraint::Min(0),
        ])
        .areas(area);

        let anchors: Vec<String> = report
            .holidays
            .iter()
            .map(|h| format!("{} ({})", h.name, h.date.format(calendar::RELEASE_DATE_FORMAT)))
            .collect();
        let summary = Line::from(vec![
            Span::styled(format!("±{} days of ", report.holiday_window), self.theme.label),
            Span::styled(anchors.join(", "), self.theme.value),
        ]);
        frame.render_widget(Paragraph::new(summary), anchors_area);

        table_view::render_table_view(
            frame,
            table_area,
            "Releases Near Holidays",
            &HOLIDAY_COLUMNS,
            &report.holiday_releases,
            false,
            &self.theme,
        );
        chart_view::render_bar_chart(
            frame,
            chart_area,
            "Hours Viewed by Holiday Release Date",
            &report.holiday_views_by_date,
            &self.theme,
        );
    }
}

fn halves_horizontal(area: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area)
}

fn halves_vertical(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area)
}

fn labels_of<V>(series: &[(Category, V)]) -> Vec<String> {
    series.iter().map(|(c, _)| category_label(c)).collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
