//! Bar, line and dual chart views.
//!
//! Every renderer takes already-aggregated series from the report and draws
//! into the given area. Series with nothing to show fall back to the
//! "No matching releases" placeholder.

use insights_core::calendar;
use insights_core::formatting::format_hours;
use insights_core::models::Category;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::Line,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::table_view::render_no_data;
use crate::themes::Theme;

/// Widest a single bar is ever drawn.
const MAX_BAR_WIDTH: u16 = 12;

// ── Series types ──────────────────────────────────────────────────────────────

/// One named line for [`render_line_chart`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl LineSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }
}

// ── Labels ────────────────────────────────────────────────────────────────────

/// Short axis label: month and weekday abbreviations, otherwise the display
/// form of the category.
pub fn category_label(category: &Category) -> String {
    match category {
        Category::Month(m) => calendar::month_abbrev(*m).to_string(),
        Category::Weekday(d) => calendar::weekday_name(*d).chars().take(3).collect(),
        other => other.to_string(),
    }
}

/// A value a chart can plot: hour totals or release counts.
pub trait ChartValue: Copy {
    fn as_f64(self) -> f64;
}

impl ChartValue for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

impl ChartValue for usize {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

/// `true` when the series has no entries or every value is zero.
pub fn is_blank<V: ChartValue>(series: &[(Category, V)]) -> bool {
    series.iter().all(|(_, v)| v.as_f64() == 0.0)
}

fn bar_width(area: Rect, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    // Borders take two columns; every bar is followed by a one-column gap.
    let inner = area.width.saturating_sub(2) as usize;
    let per_bar = inner / bars;
    (per_bar.saturating_sub(1) as u16).clamp(1, MAX_BAR_WIDTH)
}

fn titled_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(format!(" {} ", title))
        .title_style(theme.header)
}

// ── Bar chart ─────────────────────────────────────────────────────────────────

/// Vertical bar chart of `series`, values labelled with compact hours or
/// plain counts.
pub fn render_bar_chart<V: ChartValue>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[(Category, V)],
    theme: &Theme,
) {
    if is_blank(series) {
        render_no_data(frame, area, title, theme);
        return;
    }

    let bars: Vec<Bar> = series
        .iter()
        .map(|(category, value)| {
            let value = value.as_f64();
            Bar::default()
                .value(value.max(0.0).round() as u64)
                .text_value(format_hours(value))
                .label(Line::from(category_label(category)))
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block(title, theme))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area, bars.len()))
        .bar_gap(1)
        .bar_style(theme.bar)
        .value_style(theme.bar_value)
        .label_style(theme.bar_label);

    frame.render_widget(chart, area);
}

// ── Line chart ────────────────────────────────────────────────────────────────

/// Line chart with one dataset per series over a shared category axis.
pub fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    x_labels: &[String],
    series: &[LineSeries],
    theme: &Theme,
) {
    let all_zero = series.iter().all(|s| s.values.iter().all(|v| *v == 0.0));
    if x_labels.is_empty() || series.is_empty() || all_zero {
        render_no_data(frame, area, title, theme);
        return;
    }

    let points: Vec<Vec<(f64, f64)>> = series.iter().map(LineSeries::points).collect();
    let datasets: Vec<Dataset> = series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (s, data))| {
            Dataset::default()
                .name(s.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.series_style(i))
                .data(data)
        })
        .collect();

    let y_max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let x_max = (x_labels.len().saturating_sub(1)).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(titled_block(title, theme))
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(axis_labels(x_labels, area.width, theme.label)),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, y_max * 1.1])
                .labels([
                    Line::styled("0", theme.label),
                    Line::styled(format_hours(y_max / 2.0), theme.label),
                    Line::styled(format_hours(y_max), theme.label),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Spread at most as many labels as fit; first and last are always kept.
fn axis_labels(labels: &[String], width: u16, style: Style) -> Vec<Line<'static>> {
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(1) + 1;
    let fit = (usize::from(width) / widest).max(2);
    if labels.len() <= fit {
        return labels.iter().map(|l| Line::styled(l.clone(), style)).collect();
    }
    let last = labels.len() - 1;
    (0..fit)
        .map(|i| i * last / (fit - 1))
        .map(|i| Line::styled(labels[i].clone(), style))
        .collect()
}

// ── Dual chart ────────────────────────────────────────────────────────────────

/// Release counts as bars above viewing hours as a line, over the same
/// categories.
pub fn render_dual_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    counts: &[(Category, usize)],
    hours: &[(Category, f64)],
    theme: &Theme,
) {
    if is_blank(counts) && is_blank(hours) {
        render_no_data(frame, area, title, theme);
        return;
    }

    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    render_bar_chart(frame, top, &format!("{} · releases", title), counts, theme);

    let labels: Vec<String> = hours.iter().map(|(c, _)| category_label(c)).collect();
    let line = LineSeries::new("Hours Viewed", hours.iter().map(|(_, v)| *v).collect());
    render_line_chart(
        frame,
        bottom,
        &format!("{} · hours viewed", title),
        &labels,
        &[line],
        theme,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
