//! # StatusBar Component
//!
//! Bottom line: status message on the left, key hints on the right.
//!
//! Purely presentational. It receives all data as props and has no
//! internal state:
//!
//! ```rust,ignore
//! let mut bar = StatusBar::new(app.status_message.clone(), app.widget.panel_open());
//! bar.render(frame, status_area);
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct StatusBar {
    /// Status message (e.g., "Thinking...", "Answered from 2 sources")
    pub status_message: String,
    /// Whether the response panel is open (changes the hints)
    pub panel_open: bool,
}

impl StatusBar {
    pub fn new(status_message: String, panel_open: bool) -> Self {
        Self {
            status_message,
            panel_open,
        }
    }

    fn hints(&self) -> &'static str {
        if self.panel_open {
            "Esc close · ↑↓ scroll · Ctrl+C quit"
        } else {
            "Enter ask · Ctrl+C quit"
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = self.hints();
        let [left, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(hints.chars().count() as u16),
        ])
        .areas(area);

        let status = Line::from(vec![
            Span::styled(
                "Herald",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::raw(self.status_message.clone()),
        ]);
        frame.render_widget(Paragraph::new(status), left);
        frame.render_widget(
            Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
            right,
        );
    }
}
