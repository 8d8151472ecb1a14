// src/engine/runner.rs

use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::dag::{Job, JobSet};
use crate::engine::collector::CompletionCollector;
use crate::engine::readiness::{NotifyReadiness, PollingReadiness, ReadinessTracker};
use crate::engine::sink::OutputSink;
use crate::engine::{CompletionEvent, EngineOptions, JobName};
use crate::errors::{JobdagError, Result};
use crate::types::WaitStrategy;

/// Runs every job of a [`JobSet`] in its own Tokio task.
///
/// Each task waits for its dependencies, sleeps for its delay, writes its
/// name to the sink, marks itself complete and reports to the collector.
/// Jobs without a dependency relation run concurrently; their relative output
/// order is whatever the scheduler produces.
///
/// The write, the readiness flag and the completion event of one job happen
/// under a single emission lock, so the returned order is exactly the order
/// of the lines in the sink.
pub struct Engine {
    jobs: JobSet,
    options: EngineOptions,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("jobs", &self.jobs.len())
            .field("options", &self.options)
            .finish()
    }
}

impl Engine {
    pub fn new(jobs: JobSet, options: EngineOptions) -> Self {
        Self { jobs, options }
    }

    /// Execute all jobs and return their names in completion order.
    ///
    /// The first sink error aborts every task still running and is returned
    /// to the caller.
    pub async fn run<S>(&self, sink: Arc<S>) -> Result<Vec<JobName>>
    where
        S: OutputSink + 'static,
    {
        let tracker = self.build_tracker();
        let total = self.jobs.len();

        info!(
            jobs = total,
            roots = ?self.jobs.roots(),
            strategy = ?self.options.wait_strategy,
            "starting run"
        );

        // Capacity == job count, so a job task never blocks on reporting.
        let (tx, mut rx) = mpsc::channel::<CompletionEvent>(total.max(1));
        let mut set: JoinSet<Result<()>> = JoinSet::new();
        let emission = Arc::new(Mutex::new(()));

        for job in self.jobs.iter() {
            debug!(job = %job.name(), "scheduling job");
            set.spawn(run_job(
                Arc::clone(job),
                Arc::clone(&tracker),
                Arc::clone(&sink),
                Arc::clone(&emission),
                tx.clone(),
            ));
        }
        // Only the job tasks hold senders now; the channel closes once they
        // have all finished.
        drop(tx);

        let mut collector = CompletionCollector::new(total);

        loop {
            tokio::select! {
                Some(event) = rx.recv() => {
                    debug!(job = %event.name, "completion received");
                    collector.record(event);
                }
                Some(joined) = set.join_next() => {
                    if let Err(err) = flatten_join(joined) {
                        warn!(error = %err, "job task failed; aborting run");
                        set.abort_all();
                        return Err(err);
                    }
                }
                else => break,
            }
        }

        debug!(
            collected = collector.len(),
            complete = collector.is_complete(),
            "all job tasks finished"
        );

        let collected = collector.finish(&self.jobs);
        for name in &collected.missing {
            sink.emit(name)?;
        }

        info!(jobs = collected.order.len(), "run finished");
        Ok(collected.order)
    }

    fn build_tracker(&self) -> Arc<dyn ReadinessTracker> {
        match self.options.wait_strategy {
            WaitStrategy::Notify => Arc::new(NotifyReadiness::new(&self.jobs)),
            WaitStrategy::Poll => Arc::new(PollingReadiness::new(
                &self.jobs,
                self.options.poll_interval,
            )),
        }
    }
}

fn flatten_join(
    joined: std::result::Result<Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    match joined {
        Ok(res) => res,
        Err(e) if e.is_panic() => Err(JobdagError::Other(anyhow!("job task panicked: {e}"))),
        Err(e) => Err(JobdagError::Other(anyhow!("job task cancelled: {e}"))),
    }
}

/// Body of a single job task.
async fn run_job<S>(
    job: Arc<Job>,
    tracker: Arc<dyn ReadinessTracker>,
    sink: Arc<S>,
    emission: Arc<Mutex<()>>,
    report: mpsc::Sender<CompletionEvent>,
) -> Result<()>
where
    S: OutputSink + 'static,
{
    for dep in job.depends_on() {
        if !tracker.is_complete(dep) {
            debug!(job = %job.name(), dep = %dep, "waiting on dependency");
        }
        tracker.wait_until_complete(dep).await;
    }

    let delay = job.delay();
    if !delay.is_zero() {
        debug!(job = %job.name(), ?delay, "delaying job");
        tokio::time::sleep(delay).await;
    }

    let _emitting = emission.lock().await;

    debug!(job = %job.name(), "executing job");
    sink.emit(job.name())?;

    tracker.mark_complete(job.name());
    debug!(job = %job.name(), "completed job");

    let event = CompletionEvent {
        name: job.name().to_string(),
    };
    // Capacity == job count, so a full channel means a job reported twice.
    // The receiver only goes away when the run is being aborted.
    match report.try_send(event) {
        Ok(()) | Err(TrySendError::Closed(_)) => {}
        Err(TrySendError::Full(event)) => {
            return Err(JobdagError::Other(anyhow!(
                "completion channel full while reporting job {:?}",
                event.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engine::sink::WriterSink;

    fn job(name: &str, deps: &[&str], delay_ms: u64) -> Job {
        Job::new(
            name,
            deps.iter().map(|d| d.to_string()).collect(),
            Duration::from_millis(delay_ms),
        )
    }

    #[tokio::test]
    async fn single_job_is_emitted() {
        let engine = Engine::new(
            JobSet::new(vec![job("echo", &[], 0)]).unwrap(),
            EngineOptions::default(),
        );
        let sink = Arc::new(WriterSink::new(Vec::new()));

        let order = engine.run(Arc::clone(&sink)).await.unwrap();

        assert_eq!(order, vec!["echo"]);
        assert_eq!(sink.contents(), "echo\n");
    }

    #[tokio::test]
    async fn returned_order_matches_emitted_lines() {
        let engine = Engine::new(
            JobSet::new(vec![
                job("slow", &[], 40),
                job("fast", &[], 0),
                job("after", &["slow"], 0),
            ])
            .unwrap(),
            EngineOptions::default(),
        );
        let sink = Arc::new(WriterSink::new(Vec::new()));

        let order = engine.run(Arc::clone(&sink)).await.unwrap();

        let lines: Vec<String> = sink.contents().lines().map(str::to_string).collect();
        assert_eq!(order, lines);
        assert_eq!(order, vec!["fast", "slow", "after"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn returned_order_matches_lines_under_contention() {
        // Wide fan-out with a chain through it: many tasks become ready at
        // the same moment and race to emit.
        let mut jobs = vec![job("root", &[], 0)];
        for i in 0..32 {
            jobs.push(job(&format!("leaf_{i}"), &["root"], 0));
        }
        for i in 1..32 {
            let prev = format!("leaf_{}", i - 1);
            jobs.push(job(&format!("tail_{i}"), &[prev.as_str()], 0));
        }
        let set = JobSet::new(jobs).unwrap();

        for _ in 0..20 {
            let engine = Engine::new(set.clone(), EngineOptions::default());
            let sink = Arc::new(WriterSink::new(Vec::new()));

            let order = engine.run(Arc::clone(&sink)).await.unwrap();

            let lines: Vec<String> = sink.contents().lines().map(str::to_string).collect();
            assert_eq!(order, lines);
            for job in set.iter() {
                let at = order.iter().position(|n| n == job.name()).unwrap();
                for dep in job.depends_on() {
                    let dep_at = order.iter().position(|n| n == dep).unwrap();
                    assert!(dep_at < at, "{dep} returned after {}", job.name());
                }
            }
        }
    }
}
