//! The retry engine
//!
//! Two entry points sharing the same attempt → check → wait → retry shape
//! but differing in how they stop: [`Stabilizer::perform_until_complete`]
//! is bounded by an attempt count, [`Stabilizer::perform_until_ok`] by
//! wall-clock time. Every per-attempt failure is swallowed after a debug
//! log; callers only ever see the terminal
//! [`RetryExhausted`](crate::StabilizerError::RetryExhausted) or
//! [`Timeout`](crate::StabilizerError::Timeout).

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{AttemptPolicy, PollPolicy};
use crate::error::{StabilizerError, StabilizerResult};
use crate::wait::{self, WaitTimeout};

/// Retry engine over an injected [`Clock`].
///
/// Stateless across calls: every invocation is self-contained, and the
/// engine never mutates the context handle it passes through to the
/// caller's task and predicate.
#[derive(Debug, Clone, Default)]
pub struct Stabilizer<C = SystemClock> {
    clock: C,
}

impl Stabilizer<SystemClock> {
    /// Engine on the wall clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> Stabilizer<C> {
    /// Engine on a caller-supplied clock, typically a
    /// [`ManualClock`](crate::ManualClock) in tests.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Run `task`, then poll `is_complete` for up to
    /// `policy.wait_interval`; retry the whole attempt on task failure or
    /// an unmet condition, up to `policy.max_attempts` times.
    ///
    /// The task runs at most `policy.max_attempts` times. A predicate
    /// error counts as "not yet complete". Whether an attempt died in the
    /// task or in the condition wait is not distinguishable from the
    /// returned error; both end in the same
    /// [`RetryExhausted`](StabilizerError::RetryExhausted), which reports
    /// the number of attempts actually made. With `max_attempts == 0` the
    /// task never runs and the call fails immediately.
    pub fn perform_until_complete<Ctx, T, P>(
        &self,
        ctx: &mut Ctx,
        mut task: T,
        mut is_complete: P,
        policy: &AttemptPolicy,
    ) -> StabilizerResult<()>
    where
        T: FnMut(&mut Ctx) -> anyhow::Result<()>,
        P: FnMut(&mut Ctx) -> anyhow::Result<bool>,
    {
        for attempt in 1..=policy.max_attempts {
            match task(&mut *ctx) {
                Ok(()) => {
                    let waited = wait::wait_until(
                        &self.clock,
                        policy.wait_interval,
                        policy.probe_interval,
                        || is_complete(&mut *ctx),
                    );
                    match waited {
                        Ok(()) => {
                            if attempt > 1 {
                                debug!(attempt, "task completed after retries");
                            }
                            return Ok(());
                        }
                        Err(WaitTimeout { elapsed }) => {
                            debug!(attempt, ?elapsed, "attempt failed, completion condition not met");
                        }
                    }
                }
                Err(err) => debug!(attempt, error = %err, "attempt failed, task errored"),
            }
        }

        let attempts = policy.max_attempts;
        warn!(attempts, "task not completed, giving up");
        Err(StabilizerError::RetryExhausted { attempts })
    }

    /// Run `task` at intervals of `policy.polling_interval` until it
    /// returns `Ok`, for a total elapsed time of at most
    /// `policy.overall_timeout`.
    ///
    /// There is no attempt cap in this mode; the invocation count is
    /// `floor(overall_timeout / polling_interval) + 1` up to scheduling
    /// jitter. Individual task failures are never surfaced, only the final
    /// [`Timeout`](StabilizerError::Timeout).
    pub fn perform_until_ok<Ctx, T>(
        &self,
        ctx: &mut Ctx,
        mut task: T,
        policy: &PollPolicy,
    ) -> StabilizerResult<()>
    where
        T: FnMut(&mut Ctx) -> anyhow::Result<()>,
    {
        let waited = wait::wait_until(
            &self.clock,
            policy.overall_timeout,
            policy.polling_interval,
            || match task(&mut *ctx) {
                Ok(()) => Ok(true),
                Err(err) => {
                    debug!(error = %err, "task errored, will retry");
                    Ok(false)
                }
            },
        );

        waited.map_err(|WaitTimeout { elapsed }| {
            warn!(?elapsed, "task never completed, giving up");
            StabilizerError::Timeout { elapsed }
        })
    }
}
