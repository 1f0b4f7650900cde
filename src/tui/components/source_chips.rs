//! # Source Chips
//!
//! The `Sources: [skills] [projects]` row under an answer. Chips wrap onto
//! further lines when the row is wider than the panel. The lines are
//! appended to the response panel body so they scroll with the answer.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

const LEADER: &str = "Sources: ";

pub struct SourceChips {
    pub labels: Vec<String>,
}

impl SourceChips {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Lay the chips out into lines no wider than `width` columns.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        if self.labels.is_empty() {
            return vec![];
        }

        let width = width as usize;
        let leader_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);
        let chip_style = Style::default().fg(Color::Black).bg(Color::Magenta);

        let mut lines = vec![Line::from(Span::styled(LEADER, leader_style))];
        let mut used = LEADER.width();
        let mut first_on_line = true;

        for label in &self.labels {
            let chip = format!(" {label} ");
            let chip_width = chip.width();
            let gap = usize::from(!first_on_line);

            if used > 0 && used + gap + chip_width > width {
                lines.push(Line::default());
                used = 0;
                first_on_line = true;
            }

            if let Some(line) = lines.last_mut() {
                if !first_on_line {
                    line.push_span(Span::raw(" "));
                    used += 1;
                }
                line.push_span(Span::styled(chip, chip_style));
            }
            used += chip_width;
            first_on_line = false;
        }

        lines
    }
}
