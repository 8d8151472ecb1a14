use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use jobdag::dag::JobSet;
use jobdag::engine::{Engine, EngineOptions, WriterSink};
use jobdag::types::WaitStrategy;
use jobdag_test_utils::builders::{JobBuilder, JobSetBuilder};

// Strategy to generate a valid DAG with small random delays.
// We ensure acyclicity by only allowing job N to depend on jobs 0..N-1.
// Jobs are declared in reverse so declaration order never matches the
// dependency order by accident.
fn dag_strategy(max_jobs: usize) -> impl Strategy<Value = JobSet> {
    (1..=max_jobs).prop_flat_map(|num_jobs| {
        let deps_strat = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..3),
            num_jobs,
        );
        let delays_strat = proptest::collection::vec(0u64..4, num_jobs);

        (deps_strat, delays_strat).prop_map(move |(raw_deps, delays)| {
            let mut jobs = Vec::new();
            for (i, (potential_deps, delay_ms)) in raw_deps.into_iter().zip(delays).enumerate() {
                let mut job = JobBuilder::new(&format!("job_{i}")).delay_ms(delay_ms);

                // Sanitize dependencies: only allow deps < i, no repeats.
                let mut valid = HashSet::new();
                for dep_idx in potential_deps {
                    if i > 0 && valid.insert(dep_idx % i) {
                        job = job.after(&format!("job_{}", dep_idx % i));
                    }
                }
                jobs.push(job.build());
            }

            jobs.into_iter()
                .rev()
                .fold(JobSetBuilder::new(), |b, j| b.with_job(j))
                .build()
        })
    })
}

fn run_blocking(jobs: JobSet, options: EngineOptions) -> (Vec<String>, Vec<String>) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("building tokio runtime");

    rt.block_on(async move {
        let engine = Engine::new(jobs, options);
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let order = tokio::time::timeout(Duration::from_secs(10), engine.run(Arc::clone(&sink)))
            .await
            .expect("run did not finish")
            .expect("run failed");
        let lines = sink.contents().lines().map(str::to_string).collect();
        (order, lines)
    })
}

fn check_partial_order(jobs: &JobSet, lines: &[String]) -> Result<(), TestCaseError> {
    let pos: HashMap<&str, usize> = lines
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    prop_assert_eq!(pos.len(), lines.len(), "a job was emitted twice: {:?}", lines);
    prop_assert_eq!(lines.len(), jobs.len());

    for job in jobs.iter() {
        let me = pos.get(job.name()).copied();
        prop_assert!(me.is_some(), "{} was never emitted", job.name());
        for dep in job.depends_on() {
            prop_assert!(
                pos[dep.as_str()] < pos[job.name()],
                "{} emitted before its dependency {}: {:?}",
                job.name(),
                dep,
                lines
            );
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn dependencies_always_precede_dependents(jobs in dag_strategy(12)) {
        let (order, lines) = run_blocking(jobs.clone(), EngineOptions::default());
        prop_assert_eq!(&order, &lines);
        check_partial_order(&jobs, &lines)?;
    }

    #[test]
    fn polling_strategy_respects_dependencies(jobs in dag_strategy(8)) {
        let options = EngineOptions {
            wait_strategy: WaitStrategy::Poll,
            poll_interval: Duration::from_millis(1),
        };
        let (order, lines) = run_blocking(jobs.clone(), options);
        prop_assert_eq!(&order, &lines);
        check_partial_order(&jobs, &lines)?;
    }
}
