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
//! Terminal error types for the retry engine
//!
//! Per-attempt failures never appear here. They are logged at debug level
//! and swallowed inside the engine; only these two aggregate outcomes ever
//! reach the caller.

use std::time::Duration;

use thiserror::Error;

/// Type alias for Result with `StabilizerError`
pub type StabilizerResult<T> = Result<T, StabilizerError>;

/// Terminal failures of the retry engine
#[derive(Debug, Error)]
pub enum StabilizerError {
    /// Every attempt failed, either because the task itself errored or
    /// because the completion condition never held within the attempt's
    /// wait window. The two causes are intentionally indistinguishable
    /// here; the per-attempt debug logs carry the detail.
    #[error("task not completed after {attempts} attempts")]
    RetryExhausted {
        /// Number of attempts actually made
        attempts: u32,
    },

    /// The overall time budget elapsed with no successful attempt
    #[error("task not completed within {elapsed:?}")]
    Timeout {
        /// Time spent polling before giving up
        elapsed: Duration,
    },
}
