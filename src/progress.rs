// src/progress.rs

//! One-way progress event sink.
//!
//! The scheduler and item pipeline report through this capability without
//! knowing the transport; a front end may push the lines over a socket, the
//! CLI routes them to the log facade.

use std::path::PathBuf;

/// An event emitted during a harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Human-readable progress line
    Log(String),

    /// Terminal event: the exported artifact is ready
    ExportReady(PathBuf),
}

impl RunEvent {
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log(message.into())
    }
}

/// One-way sink for run events.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: RunEvent);
}

/// Sink that routes run events to the log facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: RunEvent) {
        match event {
            RunEvent::Log(line) => log::info!("{}", line),
            RunEvent::ExportReady(path) => log::info!("Export ready: {}", path.display()),
        }
    }
}
