//! # Application State
//!
//! Core business state for Herald. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── service: Arc<dyn AnswerService>  // answer backend
//! ├── widget: QueryWidget              // query, phase, sequence number
//! ├── status_message: String           // status line text
//! └── hero: Hero                       // static header copy
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::widget::QueryWidget;
use crate::service::AnswerService;

pub const STATUS_READY: &str = "Ready";

/// Static copy shown above the query box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub name: String,
    pub tagline: String,
    pub placeholder: String,
}

pub struct App {
    pub service: Arc<dyn AnswerService>,
    pub widget: QueryWidget,
    pub status_message: String,
    pub hero: Hero,
}

impl App {
    pub fn new(service: Arc<dyn AnswerService>, hero: Hero) -> Self {
        Self {
            service,
            widget: QueryWidget::new(),
            status_message: String::from(STATUS_READY),
            hero,
        }
    }

    pub fn from_config(service: Arc<dyn AnswerService>, config: &ResolvedConfig) -> Self {
        Self::new(
            service,
            Hero {
                name: config.hero_name.clone(),
                tagline: config.tagline.clone(),
                placeholder: config.placeholder.clone(),
            },
        )
    }
}
