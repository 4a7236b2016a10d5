//! UI rendering module for Daily Advice
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod advice_view;
pub mod help_overlay;
pub mod toast;

pub use advice_view::render as render_advice;
pub use help_overlay::render as render_help_overlay;
