// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod types;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::{Engine, WriterSink};
use crate::types::WaitStrategy;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + validation
/// - either the execution engine (`run`) or the DOT renderer (`graph`)
/// - stdout as the output sink
pub async fn run(args: CliArgs) -> Result<()> {
    if args.version {
        println!("{}", cli::VERSION);
        return Ok(());
    }

    match args.command {
        Some(Command::Run {
            config,
            wait_strategy,
            ..
        }) => {
            let cfg = load_config(&config)?;
            let order = run_jobs(&cfg, wait_strategy, std::io::stdout()).await?;
            debug!(?order, "completion order");
            Ok(())
        }
        Some(Command::Graph { config }) => {
            let cfg = load_config(&config)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            dag::write_graph(&cfg.jobs, &mut out).context("writing graph to stdout")?;
            out.flush().context("flushing stdout")?;
            Ok(())
        }
        None => bail!("no subcommand given"),
    }
}

/// Run every job in `cfg`, writing names to `writer` as they complete.
///
/// `wait_strategy` overrides `[config].wait_strategy` when given.
pub async fn run_jobs<W>(
    cfg: &ConfigFile,
    wait_strategy: Option<WaitStrategy>,
    writer: W,
) -> Result<Vec<String>>
where
    W: Write + Send + 'static,
{
    let mut options = cfg.engine_options();
    if let Some(strategy) = wait_strategy {
        options.wait_strategy = strategy;
    }

    let engine = Engine::new(cfg.jobs.clone(), options);
    let sink = Arc::new(WriterSink::new(writer));
    let order = engine.run(sink).await.context("running jobs")?;
    Ok(order)
}

fn load_config(path: &Path) -> Result<ConfigFile> {
    let cfg = load_and_validate(path)
        .with_context(|| format!("loading config from {:?}", path))?;
    info!(jobs = cfg.jobs.len(), path = %path.display(), "config loaded");
    Ok(cfg)
}
