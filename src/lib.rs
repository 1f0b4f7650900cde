//! Herald library exports for testing

pub mod core;
pub mod service;
pub mod tui;

#[cfg(test)]
pub mod test_support;
