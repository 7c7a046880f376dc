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
//! Fixed-interval retry and polling primitives for stabilizing flaky
//! operations
//!
//! Some externally-observable actions are inconsistent by nature: a browser
//! click that lands but does nothing, a service that accepts a request and
//! quietly drops it. Tests built on such actions fail for reasons that have
//! nothing to do with the code under test. Wrapping the action in these
//! primitives retries it until an observable completion condition holds, so
//! a failure that does surface is a genuine one.
//!
//! Two modes, both on the [`Stabilizer`] engine:
//!
//! - [`Stabilizer::perform_until_complete`] runs a task, then polls a
//!   completion predicate for a bounded window; on task failure or an unmet
//!   predicate it retries, up to a fixed number of attempts.
//! - [`Stabilizer::perform_until_ok`] runs a fallible task at a fixed
//!   cadence until it succeeds or an overall deadline passes.
//!
//! Per-attempt failures are logged at debug level and swallowed. Only the
//! final [`StabilizerError::RetryExhausted`] or [`StabilizerError::Timeout`]
//! reaches the caller.
//!
//! Deliberately out of scope: exponential backoff, jitter, and circuit
//! breaking. This is fixed-interval polling and fixed-attempt-count retry
//! only.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use kindly_stabilizer::{AttemptPolicy, Stabilizer};
//!
//! // Stand-in for a driver handle; the engine never touches it itself.
//! let mut clicks = 0u32;
//!
//! let engine = Stabilizer::new();
//! let policy = AttemptPolicy::new(4, Duration::from_millis(50));
//! engine.perform_until_complete(
//!     &mut clicks,
//!     |clicks| {
//!         *clicks += 1;
//!         Ok(())
//!     },
//!     |clicks| Ok(*clicks >= 2),
//!     &policy,
//! )?;
//! assert_eq!(clicks, 2);
//! # Ok::<(), kindly_stabilizer::StabilizerError>(())
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod stabilizer;
pub mod wait;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AttemptPolicy, PollPolicy};
pub use error::{StabilizerError, StabilizerResult};
pub use stabilizer::Stabilizer;
pub use wait::{wait_until, WaitTimeout};
