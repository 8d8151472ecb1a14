// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, ConfigSection, JobConfig, RawConfigFile};
use crate::dag::{Job, JobSet};
use crate::engine::EngineOptions;
use crate::errors::{JobdagError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::JobdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_global_config(&raw.config)?;
        let jobs = JobSet::new(raw.jobs.into_iter().map(job_from_config).collect())?;
        Ok(ConfigFile::new_unchecked(raw.config, jobs))
    }
}

impl ConfigFile {
    /// Engine options derived from `[config]`.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            wait_strategy: self.config.wait_strategy,
            poll_interval: Duration::from_millis(self.config.poll_interval_ms),
        }
    }
}

fn validate_global_config(cfg: &ConfigSection) -> Result<()> {
    // wait_strategy is strongly typed and validated during deserialization.

    if cfg.poll_interval_ms == 0 {
        return Err(JobdagError::Validation(
            "[config].poll_interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn job_from_config(cfg: JobConfig) -> Job {
    Job::new(cfg.name, cfg.depends_on, Duration::from_secs(cfg.delay))
}
