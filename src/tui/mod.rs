//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Otherwise**: sleeps up to 500ms and only redraws on events, resizes,
//!   or when a background request reports back.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod html;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::widget::RequestTicket;
use crate::service::{AnswerService, HttpAnswerService, ServiceError};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, ResponsePanelState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub panel: ResponsePanelState,
}

impl TuiState {
    pub fn new(placeholder: &str) -> Self {
        Self {
            input_box: InputBox::new(placeholder),
            panel: ResponsePanelState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Build the answer service from a resolved config.
pub fn build_service(config: &ResolvedConfig) -> Result<Arc<dyn AnswerService>, ServiceError> {
    let service = HttpAnswerService::new(&config.base_url, config.timeout)?;
    info!("Answer service: {}", service.base_url());
    Ok(Arc::new(service))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service = build_service(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let mut app = App::from_config(service, &config);
    let mut tui = TuiState::new(&app.hero.placeholder);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        // Sync InputBox props with App state
        tui.input_box.submit_enabled = app.widget.can_submit();
        tui.panel.sync(app.widget.current_seq());

        let animating = app.widget.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit => Action::Quit,
                TuiEvent::Escape => Action::Dismiss,
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.panel.handle_event(&event);
                    continue;
                }
                _ => match tui.input_box.handle_event(&event) {
                    Some(InputEvent::Changed(text)) => Action::QueryChanged(text),
                    Some(InputEvent::Submit) => Action::Submit,
                    None => continue,
                },
            };

            match update(&mut app, action) {
                Effect::Quit => break 'main,
                Effect::SpawnRequest(ticket) => {
                    spawn_request(app.service.clone(), ticket, tx.clone());
                }
                Effect::ClearInput => tui.input_box.clear(),
                Effect::None => {}
            }
        }

        // Handle completed requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Runs one `ask` for the ticket and reports the outcome as
/// `Action::ResponseReady`. Nothing aborts the task; a superseded result is
/// dropped by the widget when it arrives.
fn spawn_request(
    service: Arc<dyn AnswerService>,
    ticket: RequestTicket,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning request seq={} via {}", ticket.seq, service.name());
    tokio::spawn(async move {
        let started = Instant::now();
        let result = service.ask(&ticket.question).await;
        debug!(
            "Request seq={} finished in {}ms (ok={})",
            ticket.seq,
            started.elapsed().as_millis(),
            result.is_ok()
        );
        if tx
            .send(Action::ResponseReady {
                seq: ticket.seq,
                result,
            })
            .is_err()
        {
            warn!(
                "Failed to send response for seq={}: receiver dropped",
                ticket.seq
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Answer;
    use crate::test_support::StubService;

    #[tokio::test]
    async fn test_spawn_request_reports_response_ready() {
        let stub = Arc::new(StubService::answering("<p>Hi</p>"));
        let (tx, rx) = mpsc::channel();
        let ticket = RequestTicket {
            seq: 7,
            question: "hello?".to_string(),
        };

        spawn_request(stub.clone(), ticket, tx).await.unwrap();

        assert_eq!(stub.calls(), 1);
        match rx.try_recv().unwrap() {
            Action::ResponseReady { seq, result } => {
                assert_eq!(seq, 7);
                let answer: Answer = result.unwrap();
                assert_eq!(answer.answer, "<p>Hi</p>");
            }
            other => panic!("expected ResponseReady, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_spawn_request_forwards_errors() {
        let stub = Arc::new(StubService::failing(ServiceError::Network(
            "connection refused".to_string(),
        )));
        let (tx, rx) = mpsc::channel();
        let ticket = RequestTicket {
            seq: 1,
            question: "skills?".to_string(),
        };

        spawn_request(stub, ticket, tx).await.unwrap();

        match rx.try_recv().unwrap() {
            Action::ResponseReady { result, .. } => {
                assert!(matches!(result, Err(ServiceError::Network(_))));
            }
            other => panic!("expected ResponseReady, got {:?}", other),
        }
    }

    #[test]
    fn test_build_service_rejects_empty_url() {
        let config = ResolvedConfig {
            base_url: String::new(),
            timeout: None,
            hero_name: "A".to_string(),
            tagline: "B".to_string(),
            placeholder: "C".to_string(),
        };
        assert!(build_service(&config).is_err());
    }
}
