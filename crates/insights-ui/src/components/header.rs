use insights_core::formatting::{format_hours, format_number};
use ratatui::text::{Line, Span};

use crate::themes::Theme;

pub const TITLE: &str = "CONTENT INSIGHTS";

/// Dashboard header rendering three lines:
///
/// 1. Application title.
/// 2. `[ source | N titles | H hours ]` summary.
/// 3. A 60-column `─` separator.
pub struct Header<'a> {
    /// File name of the loaded data source.
    pub source: &'a str,
    pub record_count: usize,
    pub total_hours: f64,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, record_count: usize, total_hours: f64, theme: &'a Theme) -> Self {
        Self {
            source,
            record_count,
            total_hours,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} titles", format_number(self.record_count as f64, 0)),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} hours", format_hours(self.total_hours)),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(Span::styled("─".repeat(60), self.theme.separator)),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_line_count() {
        let theme = Theme::dark();
        let lines = Header::new("netflix_content_2023.csv", 10, 0.0, &theme).to_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), TITLE);
    }

    #[test]
    fn test_header_summary_line() {
        let theme = Theme::dark();
        let header = Header::new("releases.csv", 24_812, 169_164_000_000.0, &theme);
        let text = line_text(&header.to_lines()[1]);
        assert_eq!(text, "[ releases.csv | 24,812 titles | 169.2B hours ]");
    }

    #[test]
    fn test_header_separator_width() {
        let theme = Theme::classic();
        let lines = Header::new("x.csv", 0, 0.0, &theme).to_lines();
        let sep = line_text(&lines[2]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '─'));
    }
}
