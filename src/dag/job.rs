// src/dag/job.rs

//! The immutable job model handed to the execution engine.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::dag::graph::ensure_acyclic;
use crate::engine::JobName;
use crate::errors::{JobdagError, Result};

/// A single named unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    name: JobName,
    depends_on: Vec<JobName>,
    delay: Duration,
}

impl Job {
    pub fn new(name: impl Into<JobName>, depends_on: Vec<JobName>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            depends_on,
            delay,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct dependencies, in declaration order.
    pub fn depends_on(&self) -> &[JobName] {
        &self.depends_on
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// The validated, ordered set of jobs for one run.
///
/// Invariants (checked by [`JobSet::new`]):
/// - at least one job
/// - every name is non-empty and unique
/// - every `depends_on` entry names a job in the set
/// - the dependency graph has no cycles
///
/// Jobs are stored behind `Arc` so the engine can hand them to its tasks
/// without copying; nothing mutates them after construction.
#[derive(Debug, Clone)]
pub struct JobSet {
    jobs: Vec<Arc<Job>>,
}

impl JobSet {
    pub fn new(jobs: Vec<Job>) -> Result<Self> {
        ensure_has_jobs(&jobs)?;
        ensure_named(&jobs)?;
        ensure_unique(&jobs)?;
        ensure_known_dependencies(&jobs)?;
        ensure_acyclic(&jobs)?;

        Ok(Self {
            jobs: jobs.into_iter().map(Arc::new).collect(),
        })
    }

    /// Jobs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Job>> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.jobs.iter().map(|j| j.name())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Job>> {
        self.jobs.iter().find(|j| j.name() == name)
    }

    /// Jobs without dependencies, in declaration order.
    pub fn roots(&self) -> Vec<&str> {
        self.jobs
            .iter()
            .filter(|j| j.depends_on().is_empty())
            .map(|j| j.name())
            .collect()
    }
}

fn ensure_has_jobs(jobs: &[Job]) -> Result<()> {
    if jobs.is_empty() {
        return Err(JobdagError::Validation(
            "scheduler configuration must specify at least one job".to_string(),
        ));
    }
    Ok(())
}

fn ensure_named(jobs: &[Job]) -> Result<()> {
    if jobs.iter().any(|j| j.name.is_empty()) {
        return Err(JobdagError::Validation(
            "all jobs must specify a name".to_string(),
        ));
    }
    Ok(())
}

fn ensure_unique(jobs: &[Job]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for job in jobs {
        if !seen.insert(job.name()) {
            return Err(JobdagError::Validation(format!(
                "scheduler configuration contains duplicate job: {:?}",
                job.name
            )));
        }
    }
    Ok(())
}

fn ensure_known_dependencies(jobs: &[Job]) -> Result<()> {
    let known: HashSet<&str> = jobs.iter().map(|j| j.name()).collect();
    for job in jobs {
        for dep in job.depends_on() {
            if !known.contains(dep.as_str()) {
                return Err(JobdagError::Validation(format!(
                    "job {:?} depends on unknown job {:?}",
                    job.name, dep
                )));
            }
        }
    }
    Ok(())
}
