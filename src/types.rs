use std::str::FromStr;

use serde::Deserialize;

/// How a job waits for its dependencies to become ready.
///
/// - `Notify`: every job owns a `tokio::sync::watch` channel; dependents are
///   woken as soon as the flag flips (default).
/// - `Poll`: every job owns an `AtomicBool`; dependents re-check it on a fixed
///   interval (`[config].poll_interval_ms`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitStrategy {
    Notify,
    Poll,
}

impl Default for WaitStrategy {
    fn default() -> Self {
        WaitStrategy::Notify
    }
}

impl FromStr for WaitStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notify" => Ok(WaitStrategy::Notify),
            "poll" => Ok(WaitStrategy::Poll),
            other => Err(format!(
                "invalid wait_strategy: {other} (expected \"notify\" or \"poll\")"
            )),
        }
    }
}
