// crates/universal-search-fixtures/src/wait.rs
// ============================================================================
// Module: Bounded Waits
// Description: Poll-until-condition primitive with an explicit timeout.
// Purpose: Replace arbitrary sleeps with observable success/timeout outcomes.
// Dependencies: thiserror, tokio
// ============================================================================

//! ## Overview
//! [`wait_until`] repeatedly runs an async check until it reports a value or
//! the policy timeout elapses. A check answers `Ok(Some(value))` when the
//! condition holds, `Ok(None)` when it does not hold yet, and `Err(_)` for a
//! transient failure that is remembered and retried.
//! Invariants:
//! - The check runs at least once, even with a zero timeout.
//! - The total wait never exceeds the timeout by more than one check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio::time::sleep;

use crate::telemetry::FixtureEvent;
use crate::telemetry::FixtureEventSink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default upper bound for a wait.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default delay between checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

// ============================================================================
// SECTION: Types
// ============================================================================

/// Timeout and polling cadence for a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Upper bound on the total wait.
    pub timeout: Duration,
    /// Delay between checks.
    pub interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitPolicy {
    /// Policy with `timeout` and the default interval.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Replaces the poll interval.
    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Successful wait outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waited<T> {
    /// Value reported by the check.
    pub value: T,
    /// Number of checks issued.
    pub attempts: u32,
    /// Time spent waiting.
    pub elapsed: Duration,
}

/// Wait failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitError {
    /// Condition did not hold before the timeout.
    #[error("{label} timed out after {attempts} attempts ({elapsed_ms} ms){}", last_error_suffix(.last_error.as_deref()))]
    Timeout {
        /// Caller-supplied wait label.
        label: String,
        /// Number of checks issued.
        attempts: u32,
        /// Time spent waiting in milliseconds.
        elapsed_ms: u64,
        /// Last check error, if the last failing check errored.
        last_error: Option<String>,
    },
}

/// Formats the optional check error for [`WaitError`] display.
fn last_error_suffix(last_error: Option<&str>) -> String {
    last_error.map_or_else(String::new, |err| format!(": {err}"))
}

// ============================================================================
// SECTION: Wait
// ============================================================================

/// Polls `check` until it yields a value or `policy.timeout` elapses.
///
/// # Errors
///
/// Returns [`WaitError::Timeout`] when the condition never held in time.
pub async fn wait_until<T, E, F, Fut>(
    label: &str,
    policy: &WaitPolicy,
    sink: &dyn FixtureEventSink,
    mut check: F,
) -> Result<Waited<T>, WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    E: Display,
{
    let start = Instant::now();
    let mut attempts = 0u32;
    let mut last_error = None;
    loop {
        attempts = attempts.saturating_add(1);
        match check().await {
            Ok(Some(value)) => {
                let elapsed = start.elapsed();
                sink.record(&FixtureEvent::WaitSatisfied {
                    label: label.to_string(),
                    attempts,
                    elapsed_ms: millis(elapsed),
                });
                return Ok(Waited {
                    value,
                    attempts,
                    elapsed,
                });
            }
            Ok(None) => last_error = None,
            Err(err) => last_error = Some(err.to_string()),
        }
        let elapsed = start.elapsed();
        if elapsed >= policy.timeout {
            sink.record(&FixtureEvent::WaitTimedOut {
                label: label.to_string(),
                attempts,
                elapsed_ms: millis(elapsed),
                last_error: last_error.clone(),
            });
            return Err(WaitError::Timeout {
                label: label.to_string(),
                attempts,
                elapsed_ms: millis(elapsed),
                last_error,
            });
        }
        let remaining = policy.timeout.saturating_sub(elapsed);
        sleep(policy.interval.min(remaining)).await;
    }
}

/// Converts a duration to whole milliseconds, saturating.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
