//! # Actions
//!
//! Everything that can happen in Herald becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The answer service responds? That's `Action::ResponseReady { seq, result }`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the adapter must carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::state::{App, STATUS_READY};
use crate::core::widget::{Phase, RequestTicket};
use crate::service::{Answer, ServiceError};

#[derive(Debug)]
pub enum Action {
    /// The input box text changed.
    QueryChanged(String),
    /// Enter pressed on the query box.
    Submit,
    /// Close the response panel and clear the query.
    Dismiss,
    /// A spawned request finished.
    ResponseReady {
        seq: u64,
        result: Result<Answer, ServiceError>,
    },
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Issue exactly one outbound call for this ticket.
    SpawnRequest(RequestTicket),
    /// The adapter should empty its input buffer.
    ClearInput,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    let effect = match action {
        Action::QueryChanged(text) => {
            app.widget.set_query(text);
            Effect::None
        }
        Action::Submit => {
            // Disabled affordance: no second call while one is pending
            if !app.widget.can_submit() {
                return Effect::None;
            }
            let query = app.widget.query().to_string();
            match app.widget.submit(&query) {
                Some(ticket) => Effect::SpawnRequest(ticket),
                None => Effect::None,
            }
        }
        Action::Dismiss => {
            app.widget.dismiss();
            Effect::ClearInput
        }
        Action::ResponseReady { seq, result } => {
            app.widget.resolve(seq, result);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    };

    app.status_message = status_for(app.widget.phase());
    effect
}

fn status_for(phase: &Phase) -> String {
    match phase {
        Phase::Idle => STATUS_READY.to_string(),
        Phase::AwaitingResponse => "Thinking...".to_string(),
        Phase::Displaying(answer) => match answer.sources.len() {
            0 => "Answered".to_string(),
            1 => "Answered from 1 source".to_string(),
            n => format!("Answered from {n} sources"),
        },
        Phase::DisplayingError(_) => "Answer service unavailable".to_string(),
    }
}
