// src/engine/mod.rs

//! Concurrent execution engine.
//!
//! This module ties together:
//! - the readiness tracker every job task consults before starting
//! - the output sink job names are written to
//! - the completion collector that gathers per-job reports
//! - the runner that spawns one Tokio task per job
//!
//! The runner lives in [`runner`]; the other pieces are small enough to be
//! unit tested on their own.

use std::time::Duration;

pub use crate::types::WaitStrategy;

/// Canonical job name type used throughout the engine.
pub type JobName = String;

/// Default interval for [`WaitStrategy::Poll`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Sent once by every job task after it has marked itself complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub name: JobName,
}

/// Engine options, usually taken from the `[config]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub wait_strategy: WaitStrategy,
    /// Only used by [`WaitStrategy::Poll`].
    pub poll_interval: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            wait_strategy: WaitStrategy::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

pub mod collector;
pub mod readiness;
pub mod runner;
pub mod sink;

pub use collector::{Collected, CompletionCollector};
pub use readiness::{NotifyReadiness, PollingReadiness, ReadinessTracker};
pub use runner::Engine;
pub use sink::{OutputSink, WriterSink};
