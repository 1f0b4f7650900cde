//! # Query Widget
//!
//! The hero search box: one query, one request in flight, one panel.
//!
//! ```text
//!            submit(q)                  resolve(seq, Ok)
//!   Idle ──────────────▶ AwaitingResponse ──────────────▶ Displaying(Answer)
//!    ▲                         │
//!    │ dismiss()               │ resolve(seq, Err)
//!    └──── (from any phase)    └────────────────────────▶ DisplayingError(msg)
//! ```
//!
//! Every issued request carries a sequence number. A completion is applied
//! only if its number is still the latest and the widget is still waiting;
//! anything else is a superseded or dismissed request and is dropped.

use log::{debug, info, warn};

use crate::service::{Answer, ServiceError};

/// The only failure text the user ever sees.
pub const FALLBACK_MESSAGE: &str =
    "I apologize, but I'm having trouble connecting to my brain right now. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingResponse,
    Displaying(Answer),
    DisplayingError(String),
}

/// Handed to the caller on a valid submit. One ticket = one outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub question: String,
}

#[derive(Debug, Default)]
pub struct QueryWidget {
    query: String,
    phase: Phase,
    seq: u64,
}

impl QueryWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Sequence number of the most recently issued request (0 = none yet).
    pub fn current_seq(&self) -> u64 {
        self.seq
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::AwaitingResponse
    }

    /// The response panel is open in every phase except `Idle`.
    pub fn panel_open(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Replaces the query text. Editing never changes the phase.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Whether the submit affordance is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.query.trim().is_empty()
    }

    /// Starts a request for `query`. Blank input is a no-op and yields no ticket.
    pub fn submit(&mut self, query: &str) -> Option<RequestTicket> {
        let question = query.trim();
        if question.is_empty() {
            return None;
        }

        self.query = query.to_string();
        self.seq += 1;
        self.phase = Phase::AwaitingResponse;
        info!("Submitting query (seq={}, len={})", self.seq, question.len());

        Some(RequestTicket {
            seq: self.seq,
            question: question.to_string(),
        })
    }

    /// Closes the panel and clears the query. In-flight requests keep running
    /// but their results will not be applied.
    pub fn dismiss(&mut self) {
        if self.is_loading() {
            debug!("Dismissed while awaiting seq={}", self.seq);
        }
        self.phase = Phase::Idle;
        self.query.clear();
    }

    /// Applies a finished request. Returns `false` when the result was stale.
    pub fn resolve(&mut self, seq: u64, result: Result<Answer, ServiceError>) -> bool {
        if seq != self.seq || !self.is_loading() {
            debug!(
                "Dropping stale response (seq={}, current={}, phase={:?})",
                seq, self.seq, self.phase
            );
            return false;
        }

        self.phase = match result {
            Ok(answer) => Phase::Displaying(answer),
            Err(e) => {
                warn!("Query seq={} failed: {}", seq, e);
                Phase::DisplayingError(FALLBACK_MESSAGE.to_string())
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::SourceRef;

    fn answer(text: &str) -> Answer {
        Answer {
            answer: text.to_string(),
            sources: vec![],
            question: None,
            source_count: None,
        }
    }

    fn displaying(text: &str) -> QueryWidget {
        let mut widget = QueryWidget::new();
        let ticket = widget.submit("first").unwrap();
        widget.resolve(ticket.seq, Ok(answer(text)));
        widget
    }

    fn errored() -> QueryWidget {
        let mut widget = QueryWidget::new();
        let ticket = widget.submit("first").unwrap();
        widget.resolve(ticket.seq, Err(ServiceError::Network("down".into())));
        widget
    }

    #[test]
    fn test_new_widget_is_idle() {
        let widget = QueryWidget::new();
        assert_eq!(widget.phase(), &Phase::Idle);
        assert!(widget.query().is_empty());
        assert_eq!(widget.current_seq(), 0);
        assert!(!widget.can_submit());
        assert!(!widget.panel_open());
    }

    #[test]
    fn test_submit_from_every_settled_phase_awaits() {
        for mut widget in [QueryWidget::new(), displaying("old"), errored()] {
            let before = widget.current_seq();
            let ticket = widget.submit("  What are your skills?  ");
            assert_eq!(
                ticket,
                Some(RequestTicket {
                    seq: before + 1,
                    question: "What are your skills?".to_string(),
                })
            );
            assert_eq!(widget.phase(), &Phase::AwaitingResponse);
        }
    }

    #[test]
    fn test_submit_clears_previous_answer() {
        let mut widget = displaying("<p>old</p>");
        widget.submit("again").unwrap();
        assert!(!matches!(widget.phase(), Phase::Displaying(_)));
    }

    #[test]
    fn test_blank_submit_is_noop() {
        for input in ["", "   ", "\n\t "] {
            let mut widget = displaying("kept");
            let seq = widget.current_seq();
            assert_eq!(widget.submit(input), None);
            assert_eq!(widget.current_seq(), seq);
            assert_eq!(widget.phase(), &Phase::Displaying(answer("kept")));
        }
    }

    #[test]
    fn test_submit_retains_query_text() {
        let mut widget = QueryWidget::new();
        widget.submit("skills?").unwrap();
        assert_eq!(widget.query(), "skills?");
    }

    #[test]
    fn test_later_request_wins_over_late_earlier_response() {
        let mut widget = QueryWidget::new();
        let a = widget.submit("A").unwrap();
        let b = widget.submit("B").unwrap();

        assert!(widget.resolve(b.seq, Ok(answer("answer B"))));
        assert!(!widget.resolve(a.seq, Ok(answer("answer A"))));

        assert_eq!(widget.phase(), &Phase::Displaying(answer("answer B")));
    }

    #[test]
    fn test_earlier_response_before_later_is_dropped() {
        let mut widget = QueryWidget::new();
        let a = widget.submit("A").unwrap();
        let b = widget.submit("B").unwrap();

        assert!(!widget.resolve(a.seq, Ok(answer("answer A"))));
        assert_eq!(widget.phase(), &Phase::AwaitingResponse);

        assert!(widget.resolve(b.seq, Ok(answer("answer B"))));
        assert_eq!(widget.phase(), &Phase::Displaying(answer("answer B")));
    }

    #[test]
    fn test_dismiss_from_every_phase() {
        let mut awaiting = QueryWidget::new();
        awaiting.submit("pending").unwrap();

        for mut widget in [QueryWidget::new(), awaiting, displaying("x"), errored()] {
            widget.set_query("typed");
            widget.dismiss();
            assert_eq!(widget.phase(), &Phase::Idle);
            assert!(widget.query().is_empty());
        }
    }

    #[test]
    fn test_response_after_dismiss_is_dropped() {
        let mut widget = QueryWidget::new();
        let ticket = widget.submit("pending").unwrap();
        widget.dismiss();

        assert!(!widget.resolve(ticket.seq, Ok(answer("late"))));
        assert_eq!(widget.phase(), &Phase::Idle);
    }

    #[test]
    fn test_failure_shows_fallback_only() {
        let mut widget = QueryWidget::new();
        let ticket = widget.submit("What are your skills?").unwrap();
        let err = ServiceError::Api {
            status: 500,
            message: "Traceback (most recent call last)".into(),
        };
        assert!(widget.resolve(ticket.seq, Err(err)));

        match widget.phase() {
            Phase::DisplayingError(msg) => {
                assert_eq!(msg, FALLBACK_MESSAGE);
                assert!(!msg.contains("500"));
                assert!(!msg.contains("Traceback"));
            }
            other => panic!("expected DisplayingError, got {:?}", other),
        }
    }

    #[test]
    fn test_answer_kept_verbatim() {
        let mut widget = QueryWidget::new();
        let ticket = widget.submit("skills?").unwrap();
        let received = Answer {
            answer: "<p>React, TypeScript</p>".to_string(),
            sources: vec![SourceRef::new("skills")],
            question: None,
            source_count: None,
        };
        widget.resolve(ticket.seq, Ok(received.clone()));
        assert_eq!(widget.phase(), &Phase::Displaying(received));
    }

    #[test]
    fn test_can_submit_tracks_query_and_loading() {
        let mut widget = QueryWidget::new();
        widget.set_query("   ");
        assert!(!widget.can_submit());

        widget.set_query("projects");
        assert!(widget.can_submit());

        widget.submit("projects").unwrap();
        assert!(!widget.can_submit());
    }
}
