//! Bounded condition polling
//!
//! [`wait_until`] is the single scheduling primitive both engine modes are
//! built on: evaluate a condition now, then keep re-evaluating at a fixed
//! cadence until it holds or a time ceiling is reached.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::clock::Clock;

/// The condition did not hold within the wait ceiling.
#[derive(Debug, Error)]
#[error("condition not met within {elapsed:?}")]
pub struct WaitTimeout {
    /// Time spent waiting before giving up
    pub elapsed: Duration,
}

/// Poll `condition` until it returns `Ok(true)` or `timeout` elapses.
///
/// The condition is always evaluated once before the first timeout check,
/// so a zero `timeout` means "check exactly once, then time out if unmet".
/// A condition error counts as "not met" and is logged at debug level.
/// Between evaluations the clock sleeps `probe_interval`, clamped to the
/// time remaining so the wait never overshoots the ceiling by more than
/// scheduling jitter.
pub fn wait_until<C, F>(
    clock: &C,
    timeout: Duration,
    probe_interval: Duration,
    mut condition: F,
) -> Result<(), WaitTimeout>
where
    C: Clock,
    F: FnMut() -> anyhow::Result<bool>,
{
    let start = clock.now();
    loop {
        match condition() {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(err) => debug!(error = %err, "condition check failed, treating as not met"),
        }

        let elapsed = clock.now() - start;
        if elapsed >= timeout {
            return Err(WaitTimeout { elapsed });
        }

        let remaining = timeout - elapsed;
        let step = if probe_interval.is_zero() {
            // A zero cadence would spin without ever moving a virtual
            // clock forward; jump straight to the ceiling instead.
            remaining
        } else {
            probe_interval.min(remaining)
        };
        clock.sleep(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn returns_immediately_when_condition_already_holds() {
        let clock = ManualClock::new();
        let checks = AtomicU32::new(0);

        let result = wait_until(&clock, Duration::from_secs(10), Duration::from_secs(1), || {
            checks.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        });

        assert!(result.is_ok());
        assert_eq!(checks.load(Ordering::SeqCst), 1);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn zero_timeout_checks_exactly_once() {
        let clock = ManualClock::new();
        let checks = AtomicU32::new(0);

        let result = wait_until(&clock, Duration::ZERO, Duration::from_millis(10), || {
            checks.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        });

        assert!(result.is_err());
        assert_eq!(checks.load(Ordering::SeqCst), 1);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn condition_met_after_some_probes() {
        let clock = ManualClock::new();
        let engine_clock = &clock;

        let result = wait_until(
            engine_clock,
            Duration::from_secs(10),
            Duration::from_secs(1),
            || Ok(clock.elapsed() >= Duration::from_secs(3)),
        );

        assert!(result.is_ok());
        assert_eq!(clock.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn condition_error_counts_as_not_met() {
        let clock = ManualClock::new();
        let checks = AtomicU32::new(0);

        let result = wait_until(&clock, Duration::from_secs(2), Duration::from_secs(1), || {
            checks.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("probe blew up")
        });

        let err = result.unwrap_err();
        assert_eq!(err.elapsed, Duration::from_secs(2));
        // Evaluations at t=0, t=1 and t=2.
        assert_eq!(checks.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn final_probe_is_clamped_to_the_ceiling() {
        let clock = ManualClock::new();

        let result = wait_until(
            &clock,
            Duration::from_millis(2500),
            Duration::from_secs(1),
            || Ok(false),
        );

        let err = result.unwrap_err();
        // Sleeps of 1s, 1s, then the 500ms remainder.
        assert_eq!(err.elapsed, Duration::from_millis(2500));
        assert_eq!(clock.elapsed(), Duration::from_millis(2500));
    }

    #[test]
    fn zero_probe_interval_jumps_to_the_ceiling() {
        let clock = ManualClock::new();
        let checks = AtomicU32::new(0);

        let result = wait_until(&clock, Duration::from_secs(5), Duration::ZERO, || {
            checks.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        });

        assert!(result.is_err());
        assert_eq!(checks.load(Ordering::SeqCst), 2);
        assert_eq!(clock.elapsed(), Duration::from_secs(5));
    }
}
