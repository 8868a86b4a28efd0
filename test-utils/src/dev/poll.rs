// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quick-and-dirty polling within tests
//!
//! This is the one generic wait primitive in the harness.  Everything that
//! waits for an asynchronous state transition goes through
//! [`wait_for_condition()`], usually via the typed layer in
//! [`crate::wait`].

use std::future::Future;
use std::time::Duration;
use std::time::Instant;
use thiserror::Error;

/// Result of one attempt to check a condition (see [`wait_for_condition()`])
#[derive(Debug, Error)]
pub enum CondCheckError<E> {
    #[error("poll condition not yet ready")]
    NotYet,
    #[error("failed checking poll condition")]
    Failed(#[from] E),
}

/// Error returned by [`wait_for_condition()`]
#[derive(Debug, Error)]
pub enum Error<E> {
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("failed checking condition")]
    PermanentError(#[from] E),
}

/// Poll the given condition until it succeeds or we run out of time
///
/// Invokes `cond` immediately.  If it returns `Ok(value)`, returns
/// `Ok(value)`.  If it returns [`CondCheckError::NotYet`], sleeps
/// `poll_interval` and tries again, tracking wall-clock time from the first
/// check; once more than `poll_max` has elapsed the next check is skipped
/// and `Error::TimedOut` is returned with the total elapsed time.  If `cond`
/// returns [`CondCheckError::Failed`], the underlying error is surfaced
/// immediately as `Error::PermanentError` without further polling.
///
/// Each invocation is independent; no state is carried between calls, so a
/// condition that's already true returns immediately every time.
pub async fn wait_for_condition<T, E, Func, Fut>(
    cond: Func,
    poll_interval: &Duration,
    poll_max: &Duration,
) -> Result<T, Error<E>>
where
    Func: Fn() -> Fut,
    Fut: Future<Output = Result<T, CondCheckError<E>>>,
{
    let poll_start = Instant::now();
    loop {
        let duration = poll_start.elapsed();
        if duration > *poll_max {
            return Err(Error::TimedOut(duration));
        }
        match cond().await {
            Ok(result) => return Ok(result),
            Err(CondCheckError::NotYet) => (),
            Err(CondCheckError::Failed(e)) => {
                return Err(Error::PermanentError(e))
            }
        };
        tokio::time::sleep(*poll_interval).await;
    }
}
