// src/config/model.rs

use serde::Deserialize;

use crate::dag::JobSet;
use crate::types::WaitStrategy;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// wait_strategy = "notify"
/// poll_interval_ms = 100
///
/// [[jobs]]
/// name = "hello"
///
/// [[jobs]]
/// name = "world"
/// depends_on = ["hello"]
/// delay = 2
/// ```
///
/// Jobs are an array of tables so that the declared order survives parsing.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Engine behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All jobs from `[[jobs]]`, in file order.
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// Validated configuration: engine options plus a [`JobSet`].
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`), so
/// holding one means the job list satisfies every `JobSet` invariant.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub jobs: JobSet,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, jobs: JobSet) -> Self {
        Self { config, jobs }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ConfigSection {
    /// `"notify"` (default) or `"poll"`.
    #[serde(default)]
    pub wait_strategy: WaitStrategy,

    /// Poll interval in milliseconds for `wait_strategy = "poll"`.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            wait_strategy: WaitStrategy::default(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// One `[[jobs]]` entry.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JobConfig {
    /// Job name. Missing names deserialize as empty and are rejected during
    /// validation with a dedicated message.
    #[serde(default)]
    pub name: String,

    /// Jobs that must complete before this one starts.
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Simulated runtime in whole seconds.
    #[serde(default)]
    pub delay: u64,
}
