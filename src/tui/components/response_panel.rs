//! # ResponsePanel Component
//!
//! The expandable panel under the query box. What it shows is a pure
//! function of the widget phase (see [`panel_body`]); the only state it keeps
//! is the scroll position, which resets whenever a new answer lands.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::widget::Phase;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::source_chips::SourceChips;
use crate::tui::event::TuiEvent;
use crate::tui::html;

pub const EMPTY_ANSWER: &str = "No response generated.";
const ANSWER_FG: Color = Color::Gray;
const SPINNER: &[&str] = &["·  ", "·· ", "···", " ··", "  ·", "   "];

/// Builds the panel content for a phase. `placeholder` is the idle prompt;
/// `width` is used to wrap source chips.
pub fn panel_body(
    phase: &Phase,
    placeholder: &str,
    spinner_frame: usize,
    width: u16,
) -> Text<'static> {
    match phase {
        Phase::Idle => Text::from(Line::from(Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))),
        Phase::AwaitingResponse => {
            let dots = SPINNER[spinner_frame % SPINNER.len()];
            Text::from(Line::from(vec![
                Span::styled(dots, Style::default().fg(Color::Magenta)),
                Span::styled(" Thinking...", Style::default().fg(Color::DarkGray)),
            ]))
        }
        Phase::Displaying(answer) => {
            let mut text = if answer.answer.trim().is_empty() {
                Text::from(Line::from(Span::styled(
                    EMPTY_ANSWER,
                    Style::default().fg(ANSWER_FG),
                )))
            } else {
                html::render(&answer.answer, ANSWER_FG)
            };

            let chips = SourceChips::new(answer.chip_labels()).lines(width);
            if !chips.is_empty() {
                text.lines.push(Line::default());
                text.lines.extend(chips);
            }
            text
        }
        Phase::DisplayingError(message) => Text::from(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(ANSWER_FG),
        ))),
    }
}

/// Scroll state kept across frames.
#[derive(Default)]
pub struct ResponsePanelState {
    pub scroll_state: ScrollViewState,
    /// Sequence number of the content currently shown; a change resets scroll.
    shown_seq: u64,
}

impl ResponsePanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the scroll position when a different request's content is shown.
    pub fn sync(&mut self, seq: u64) {
        if self.shown_seq != seq {
            self.shown_seq = seq;
            self.scroll_state.scroll_to_top();
        }
    }
}

impl EventHandler for ResponsePanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

pub struct ResponsePanel<'a> {
    pub phase: &'a Phase,
    pub title: String,
    /// Shown while idle
    pub placeholder: &'a str,
    pub spinner_frame: usize,
    pub state: &'a mut ResponsePanelState,
}

impl Component for ResponsePanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = Style::default().fg(Color::Magenta).add_modifier(Modifier::DIM);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(
                format!(" ✦ {} ", self.title),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ))
            .title(Line::from(Span::styled(" Esc ✕ ", border_style)).right_aligned());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column reserved for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let body = panel_body(
            self.phase,
            self.placeholder,
            self.spinner_frame,
            content_width,
        );
        let paragraph = Paragraph::new(body).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
