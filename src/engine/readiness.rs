// src/engine/readiness.rs

//! Per-job readiness state shared by all job tasks of one run.
//!
//! The name -> slot map is built once at setup and never mutated afterwards,
//! so lookups need no lock. Each slot is written only by the task that owns
//! the job and read by any number of dependents.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::warn;

use crate::dag::JobSet;
use crate::engine::JobName;

/// Completion flags for the jobs of one run.
///
/// `mark_complete` for a job happens-before any `wait_until_complete` on that
/// job resolves.
pub trait ReadinessTracker: Send + Sync {
    /// Flip the flag for `name` to completed. Idempotent.
    fn mark_complete(&self, name: &str);

    /// Non-blocking read of the current flag.
    fn is_complete(&self, name: &str) -> bool;

    /// Resolve once `is_complete(name)` is true.
    fn wait_until_complete<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// Wake-on-write tracker: one `watch` channel per job.
#[derive(Debug)]
pub struct NotifyReadiness {
    slots: HashMap<JobName, watch::Sender<bool>>,
}

impl NotifyReadiness {
    pub fn new(jobs: &JobSet) -> Self {
        let slots = jobs
            .names()
            .map(|name| (name.to_string(), watch::Sender::new(false)))
            .collect();
        Self { slots }
    }
}

impl ReadinessTracker for NotifyReadiness {
    fn mark_complete(&self, name: &str) {
        match self.slots.get(name) {
            Some(slot) => {
                slot.send_replace(true);
            }
            None => warn!(job = %name, "mark_complete for unknown job; ignoring"),
        }
    }

    fn is_complete(&self, name: &str) -> bool {
        self.slots.get(name).is_some_and(|slot| *slot.borrow())
    }

    fn wait_until_complete<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let Some(slot) = self.slots.get(name) else {
                warn!(job = %name, "waiting on unknown job; treating as ready");
                return;
            };

            let mut rx = slot.subscribe();
            // The sender lives as long as `self`, so this only errors if the
            // tracker is being torn down; nothing is left to wait for then.
            let _ = rx.wait_for(|done| *done).await;
        })
    }
}

/// Polling tracker: one `AtomicBool` per job, re-checked every `interval`.
///
/// Completion latency along a dependency chain is bounded by
/// `interval * chain depth`.
#[derive(Debug)]
pub struct PollingReadiness {
    slots: HashMap<JobName, AtomicBool>,
    interval: Duration,
}

impl PollingReadiness {
    pub fn new(jobs: &JobSet, interval: Duration) -> Self {
        let slots = jobs
            .names()
            .map(|name| (name.to_string(), AtomicBool::new(false)))
            .collect();
        Self { slots, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl ReadinessTracker for PollingReadiness {
    fn mark_complete(&self, name: &str) {
        match self.slots.get(name) {
            Some(slot) => slot.store(true, Ordering::Release),
            None => warn!(job = %name, "mark_complete for unknown job; ignoring"),
        }
    }

    fn is_complete(&self, name: &str) -> bool {
        self.slots
            .get(name)
            .is_some_and(|slot| slot.load(Ordering::Acquire))
    }

    fn wait_until_complete<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            if !self.slots.contains_key(name) {
                warn!(job = %name, "waiting on unknown job; treating as ready");
                return;
            }

            while !self.is_complete(name) {
                tokio::time::sleep(self.interval).await;
            }
        })
    }
}
