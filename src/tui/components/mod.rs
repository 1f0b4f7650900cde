//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `HeroBanner`: name and tagline
//! - `StatusBar`: status message and key hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line query input
//! - `ResponsePanel`: phase-driven answer panel with scroll state
//!
//! `source_chips` is a line builder used by `ResponsePanel`, not a
//! component of its own.
//!
//! Components receive external data as props, not by reaching into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── hero.rs
//! ├── input_box.rs
//! ├── response_panel.rs
//! ├── source_chips.rs
//! └── status_bar.rs
//! ```

pub mod hero;
pub mod input_box;
pub mod response_panel;
pub mod source_chips;
pub mod status_bar;

pub use hero::HeroBanner;
pub use input_box::{InputBox, InputEvent};
pub use response_panel::{ResponsePanel, ResponsePanelState};
pub use status_bar::StatusBar;
