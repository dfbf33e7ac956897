//! I/O helpers: configuration, model gateway, prompts and run logs.

pub mod config;
pub mod gateway;
pub mod prompt;
pub mod run_log;
