use std::time::Duration;

use jobdag::config::{ConfigFile, ConfigSection, JobConfig, RawConfigFile};
use jobdag::dag::{Job, JobSet};
use jobdag::types::WaitStrategy;

/// Builder for `JobSet` to simplify test setup.
pub struct JobSetBuilder {
    jobs: Vec<Job>,
}

impl JobSetBuilder {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Shorthand for a job with no dependencies and no delay.
    pub fn with_plain(self, name: &str) -> Self {
        self.with_job(JobBuilder::new(name).build())
    }

    pub fn build(self) -> JobSet {
        JobSet::new(self.jobs).expect("Failed to build valid job set from builder")
    }
}

impl Default for JobSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single `Job`.
pub struct JobBuilder {
    name: String,
    depends_on: Vec<String>,
    delay: Duration,
}

impl JobBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            depends_on: vec![],
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.depends_on.push(dep.to_string());
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay_ms(self, ms: u64) -> Self {
        self.delay(Duration::from_millis(ms))
    }

    pub fn build(self) -> Job {
        Job::new(self.name, self.depends_on, self.delay)
    }
}

/// Builder for `ConfigFile`, going through the same validation as TOML input.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                jobs: Vec::new(),
            },
        }
    }

    pub fn with_job(mut self, name: &str, depends_on: &[&str], delay_secs: u64) -> Self {
        self.config.jobs.push(JobConfig {
            name: name.to_string(),
            depends_on: depends_on.iter().map(|d| d.to_string()).collect(),
            delay: delay_secs,
        });
        self
    }

    pub fn with_wait_strategy(mut self, strategy: WaitStrategy) -> Self {
        self.config.config.wait_strategy = strategy;
        self
    }

    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.config.poll_interval_ms = ms;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
