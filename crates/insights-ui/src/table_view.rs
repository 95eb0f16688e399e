//! Tabular views: ranked titles, holiday releases and category shares.
//!
//! Renders bordered [`ratatui::widgets::Table`]s. Long titles are cut to
//! their column by display width so wide (CJK) characters never overflow.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use insights_core::formatting::{self, format_hours};
use insights_core::models::{Category, Column, Value};
use insights_runtime::data::aggregator::ProjectedRow;

use crate::themes::Theme;

/// Placeholder shown wherever a view has nothing to display.
pub const NO_DATA_MESSAGE: &str = "No matching releases";

const ELLIPSIS: char = '…';

// ── Text helpers ──────────────────────────────────────────────────────────────

/// Cut `text` so it occupies at most `max_width` terminal columns, ending in
/// `…` when anything was removed.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
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
    out.push(ELLIPSIS);
    out
}

/// Display form of a projected cell: grouped integers for numbers, the
/// category text otherwise, blank when absent.
pub fn format_cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => formatting::format_number(*n, 0),
        Some(Value::Category(c)) => c.to_string(),
        None => String::new(),
    }
}

fn column_width(column: Column) -> Constraint {
    match column {
        Column::Title => Constraint::Min(20),
        Column::ContentType => Constraint::Length(8),
        Column::LanguageIndicator => Constraint::Length(12),
        Column::ReleaseDate => Constraint::Length(12),
        Column::HoursViewed => Constraint::Length(15),
        Column::ReleaseMonth => Constraint::Length(6),
        Column::ReleaseDay => Constraint::Length(10),
        Column::ReleaseSeason => Constraint::Length(8),
    }
}

/// Columns left for the title after the fixed-width columns and spacing.
fn title_budget(area: Rect, columns: &[Column]) -> usize {
    let fixed: u16 = columns
        .iter()
        .map(|c| match column_width(*c) {
            Constraint::Length(n) => n + 1,
            _ => 1,
        })
        .sum();
    usize::from(area.width.saturating_sub(fixed + 3)).max(8)
}

fn bordered(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(format!(" {} ", title))
        .title_style(theme.header)
}

// ── Projected rows ────────────────────────────────────────────────────────────

/// Render projected rows under a header of column names, with an optional
/// leading rank column.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    columns: &[Column],
    rows: &[ProjectedRow],
    ranked: bool,
    theme: &Theme,
) {
    if rows.is_empty() {
        render_no_data(frame, area, title, theme);
        return;
    }

    let budget = title_budget(area, columns);

    let mut header_cells: Vec<Cell> = Vec::with_capacity(columns.len() + 1);
    if ranked {
        header_cells.push(Cell::from("#").style(theme.table_header));
    }
    header_cells.extend(
        columns
            .iter()
            .map(|c| Cell::from(c.header()).style(theme.table_header)),
    );
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells: Vec<Cell> = Vec::with_capacity(columns.len() + 1);
            if ranked {
                cells.push(Cell::from(format!("{}", i + 1)));
            }
            cells.extend(columns.iter().zip(&row.values).map(|(column, value)| {
                let text = format_cell(value.as_ref());
                match column {
                    Column::Title => Cell::from(truncate_to_width(&text, budget)),
                    Column::HoursViewed => {
                        Cell::from(Line::from(text).alignment(Alignment::Right))
                    }
                    _ => Cell::from(text),
                }
            }));
            Row::new(cells).style(theme.row_style(i))
        })
        .collect();

    let mut widths: Vec<Constraint> = Vec::with_capacity(columns.len() + 1);
    if ranked {
        widths.push(Constraint::Length(3));
    }
    widths.extend(columns.iter().map(|c| column_width(*c)));

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(bordered(title, theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Category shares ───────────────────────────────────────────────────────────

/// Category, hours and share of `total` for each entry of `series`.
pub fn render_share_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    label: &str,
    series: &[(Category, f64)],
    total: f64,
    theme: &Theme,
) {
    if series.is_empty() {
        render_no_data(frame, area, title, theme);
        return;
    }

    let header = Row::new(
        [label, "Hours Viewed", "Share"]
            .into_iter()
            .map(|h| Cell::from(h).style(theme.table_header)),
    );

    let rows: Vec<Row> = series
        .iter()
        .enumerate()
        .map(|(i, (category, hours))| {
            Row::new(vec![
                Cell::from(category.to_string()),
                Cell::from(Line::from(format_hours(*hours)).alignment(Alignment::Right)),
                Cell::from(
                    Line::from(format!("{:.1}%", formatting::percentage(*hours, total, 1)))
                        .alignment(Alignment::Right),
                ),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(title, theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Placeholder ───────────────────────────────────────────────────────────────

/// Render the "no matching releases" placeholder inside a titled border.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(NO_DATA_MESSAGE, theme.placeholder)),
    ]);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(bordered(title, theme)),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
