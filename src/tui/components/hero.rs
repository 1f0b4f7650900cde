//! # Hero Component
//!
//! Name and tagline above the query box.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::Hero;
use crate::tui::component::Component;

/// Name + tagline + spacer.
pub const HERO_HEIGHT: u16 = 3;

pub struct HeroBanner<'a> {
    pub hero: &'a Hero,
}

impl Component for HeroBanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.hero.name.clone(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.hero.tagline.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}
