// src/engine/collector.rs

//! Arrival-ordered collection of completion events.

use std::collections::HashSet;

use tracing::warn;

use crate::dag::JobSet;
use crate::engine::{CompletionEvent, JobName};

/// Result of reconciling the collected events against the declared jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected {
    /// Job names in completion order, followed by any `missing` names.
    pub order: Vec<JobName>,
    /// Declared jobs that never reported, in declared order.
    ///
    /// Empty whenever every job task ran to completion.
    pub missing: Vec<JobName>,
}

/// Counts completion events up to a fixed, known job count.
#[derive(Debug)]
pub struct CompletionCollector {
    expected: usize,
    arrived: Vec<JobName>,
    seen: HashSet<JobName>,
}

impl CompletionCollector {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            arrived: Vec::with_capacity(expected),
            seen: HashSet::with_capacity(expected),
        }
    }

    /// Record one event. Duplicates are dropped.
    pub fn record(&mut self, event: CompletionEvent) {
        if !self.seen.insert(event.name.clone()) {
            warn!(job = %event.name, "duplicate completion event; ignoring");
            return;
        }
        self.arrived.push(event.name);
    }

    pub fn len(&self) -> usize {
        self.arrived.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrived.is_empty()
    }

    /// Whether every expected job has reported.
    pub fn is_complete(&self) -> bool {
        self.arrived.len() >= self.expected
    }

    /// Reconcile against `jobs`: anything declared but never reported is
    /// appended in declared order.
    pub fn finish(self, jobs: &JobSet) -> Collected {
        let missing: Vec<JobName> = jobs
            .names()
            .filter(|name| !self.seen.contains(*name))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            warn!(?missing, "jobs finished without reporting completion");
        }

        let mut order = self.arrived;
        order.extend(missing.iter().cloned());

        Collected { order, missing }
    }
}
