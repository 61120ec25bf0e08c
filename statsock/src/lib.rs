//! Terminal dashboard for a live system-telemetry WebSocket stream.

pub mod app;
pub mod config;
pub mod consumer;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod history;
pub mod logging;
pub mod theme;
pub mod types;
pub mod ui;
pub mod view;
pub mod ws;
