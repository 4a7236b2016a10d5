//! Daily Advice Library
//!
//! Everything except the terminal UI: the advice client, the daily cache, the
//! fetch controller, clipboard copy, notifications and CLI parsing.

pub mod app;
pub mod cache;
pub mod cli;
pub mod clipboard;
pub mod data;
pub mod notify;
pub mod refresh;
