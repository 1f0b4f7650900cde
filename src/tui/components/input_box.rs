//! # InputBox Component
//!
//! The single-line query box under the hero.
//!
//! ## Responsibilities
//!
//! - Capture text input and basic line editing (cursor, delete, paste)
//! - Emit `Submit` on Enter; the core decides whether submit is enabled
//! - Show the placeholder while empty and a dimmed send hint while disabled
//!
//! The buffer and cursor are internal state. `placeholder` and
//! `submit_enabled` are props from the application state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Prompt glyph drawn before the text.
const PROMPT: &str = "› ";
/// Borders (2) + prompt (2).
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom border plus the single text row.
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed.
    Submit,
    /// Buffer content changed; carries the new text.
    Changed(String),
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Shown while the buffer is empty (Prop)
    pub placeholder: String,
    /// Whether Enter will do anything right now (Prop)
    pub submit_enabled: bool,
    /// Cursor position as byte offset in buffer
    cursor: usize,
    /// First visible display column
    scroll: usize,
}

impl InputBox {
    pub fn new(placeholder: &str) -> Self {
        Self {
            buffer: String::new(),
            placeholder: placeholder.to_string(),
            submit_enabled: false,
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    fn changed(&self) -> Option<InputEvent> {
        Some(InputEvent::Changed(self.buffer.clone()))
    }

    /// Display column of the cursor.
    fn cursor_col(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    /// Keep the cursor inside a window of `visible` columns.
    fn update_scroll(&mut self, visible: usize) {
        if visible == 0 {
            self.scroll = 0;
            return;
        }
        let col = self.cursor_col();
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + visible {
            self.scroll = col + 1 - visible;
        }
    }

    /// The slice of the buffer that fits in `visible` columns from `scroll`.
    fn visible_text(&self, visible: usize) -> String {
        let mut col = 0;
        let mut out = String::new();
        for c in self.buffer.chars() {
            let w = c.width().unwrap_or(0);
            if col >= self.scroll {
                if col + w > self.scroll + visible {
                    break;
                }
                out.push(c);
            }
            col += w;
        }
        out
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        self.update_scroll(visible);

        let hint_style = if self.submit_enabled {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title_bottom(Line::from(Span::styled(" ⏎ send ", hint_style)).right_aligned());

        let prompt = Span::styled(PROMPT, Style::default().fg(Color::Magenta));
        let line = if self.buffer.is_empty() {
            Line::from(vec![
                prompt,
                Span::styled(
                    self.placeholder.clone(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ])
        } else {
            Line::from(vec![
                prompt,
                Span::styled(self.visible_text(visible), Style::default().fg(Color::White)),
            ])
        };

        frame.render_widget(Paragraph::new(line).block(block), area);

        let cursor_x = area.x + 1 + PROMPT.width() as u16 + (self.cursor_col() - self.scroll) as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::ClearLine => {
                if self.buffer.is_empty() {
                    return None;
                }
                self.clear();
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

/// Byte offset of the character boundary before `pos`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
