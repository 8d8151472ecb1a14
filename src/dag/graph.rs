// src/dag/graph.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::job::Job;
use crate::errors::{JobdagError, Result};

/// Build a petgraph view of the jobs.
///
/// Edge direction: dep -> job. For `baz` with `depends_on = ["foo"]` we add
/// the edge `foo -> baz`.
fn build_graph(jobs: &[Job]) -> DiGraphMap<&str, ()> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for job in jobs {
        graph.add_node(job.name());
    }

    for job in jobs {
        for dep in job.depends_on() {
            graph.add_edge(dep.as_str(), job.name(), ());
        }
    }

    graph
}

/// Reject self-dependencies and dependency cycles.
///
/// Without this check a cycle would leave every job on it waiting forever.
pub fn ensure_acyclic(jobs: &[Job]) -> Result<()> {
    for job in jobs {
        if job.depends_on().iter().any(|d| d == job.name()) {
            return Err(JobdagError::DagCycle(format!(
                "job {:?} cannot depend on itself",
                job.name()
            )));
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&build_graph(jobs), None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(JobdagError::DagCycle(format!(
            "cycle detected in job graph involving job {:?}",
            cycle.node_id()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn job(name: &str, deps: &[&str]) -> Job {
        Job::new(
            name,
            deps.iter().map(|d| d.to_string()).collect(),
            Duration::ZERO,
        )
    }

    #[test]
    fn accepts_diamond() {
        let jobs = vec![
            job("a", &[]),
            job("b", &["a"]),
            job("c", &["a"]),
            job("d", &["b", "c"]),
        ];
        assert!(ensure_acyclic(&jobs).is_ok());
    }

    #[test]
    fn rejects_self_dependency() {
        let err = ensure_acyclic(&[job("a", &["a"])]).unwrap_err();
        assert!(err.to_string().contains("cannot depend on itself"));
    }

    #[test]
    fn rejects_longer_cycle() {
        let jobs = vec![job("a", &["c"]), job("b", &["a"]), job("c", &["b"]), job("d", &[])];
        match ensure_acyclic(&jobs) {
            Err(JobdagError::DagCycle(msg)) => assert!(msg.contains("cycle detected")),
            other => panic!("expected DagCycle, got {other:?}"),
        }
    }
}
