//! Shared test utilities for the shell integration tests
//!
//! - App construction with an offline geocoder
//! - TUI rendering helpers over ratatui's TestBackend

pub mod fixtures;
pub mod terminal;
