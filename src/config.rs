// Copyright 2025 Kindly-Software
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Retry policy configuration
//!
//! Both policies are plain data with serde defaulting, so they can live
//! inside a larger configuration tree or be built in code.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Policy for the attempt-bounded mode
/// ([`Stabilizer::perform_until_complete`](crate::Stabilizer::perform_until_complete)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptPolicy {
    /// Maximum number of attempts before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// How long each attempt waits for the completion condition to hold
    #[serde(default = "default_wait_interval")]
    pub wait_interval: Duration,

    /// Cadence at which the condition is re-checked within the wait window
    #[serde(default = "default_probe_interval")]
    pub probe_interval: Duration,
}

impl Default for AttemptPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            wait_interval: default_wait_interval(),
            probe_interval: default_probe_interval(),
        }
    }
}

impl AttemptPolicy {
    /// Policy with the given attempt ceiling and per-attempt wait window,
    /// probing at the default cadence.
    pub fn new(max_attempts: u32, wait_interval: Duration) -> Self {
        Self {
            max_attempts,
            wait_interval,
            ..Self::default()
        }
    }

    /// Override the probe cadence used inside each attempt's wait window.
    #[must_use]
    pub fn with_probe_interval(mut self, probe_interval: Duration) -> Self {
        self.probe_interval = probe_interval;
        self
    }
}

/// Policy for the timeout-bounded mode
/// ([`Stabilizer::perform_until_ok`](crate::Stabilizer::perform_until_ok)).
///
/// The polling interval should not exceed the overall timeout for the
/// policy to leave room for more than the initial attempt; the relation is
/// implicit in the semantics and not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollPolicy {
    /// Delay between consecutive task invocations
    #[serde(default = "default_polling_interval")]
    pub polling_interval: Duration,

    /// Overall time budget across all invocations
    #[serde(default = "default_overall_timeout")]
    pub overall_timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            polling_interval: default_polling_interval(),
            overall_timeout: default_overall_timeout(),
        }
    }
}

impl PollPolicy {
    pub fn new(polling_interval: Duration, overall_timeout: Duration) -> Self {
        Self {
            polling_interval,
            overall_timeout,
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_wait_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_probe_interval() -> Duration {
    Duration::from_millis(100)
}

fn default_polling_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_overall_timeout() -> Duration {
    Duration::from_secs(30)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_policy_defaults() {
        let policy = AttemptPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.wait_interval, Duration::from_secs(10));
        assert_eq!(policy.probe_interval, Duration::from_millis(100));
    }

    #[test]
    fn attempt_policy_builder_overrides_probe_interval() {
        let policy = AttemptPolicy::new(5, Duration::from_secs(2))
            .with_probe_interval(Duration::from_millis(20));
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.wait_interval, Duration::from_secs(2));
        assert_eq!(policy.probe_interval, Duration::from_millis(20));
    }

    #[test]
    fn poll_policy_defaults() {
        let policy = PollPolicy::default();
        assert_eq!(policy.polling_interval, Duration::from_secs(1));
        assert_eq!(policy.overall_timeout, Duration::from_secs(30));
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let policy: AttemptPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy.max_attempts, AttemptPolicy::default().max_attempts);

        let policy: PollPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy.overall_timeout, PollPolicy::default().overall_timeout);
    }

    #[test]
    fn poll_policy_round_trips_through_json() {
        let policy = PollPolicy::new(Duration::from_secs(1), Duration::from_secs(10));
        let json = serde_json::to_string(&policy).unwrap();
        let back: PollPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back.polling_interval, policy.polling_interval);
        assert_eq!(back.overall_timeout, policy.overall_timeout);
    }
}
