// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Waiting for a remote resource to reach a target status
//!
//! Every resource class exposes the same pattern: a status field that moves
//! through a handful of transitional values before settling.  Rather than
//! one wait function per resource, the helpers here are parameterized over
//! a fetch callback, the target statuses, and the statuses that mean the
//! resource can never reach the target.
//!
//! Waiting for a resource to exist and waiting for it to be deleted treat a
//! "not found" answer in opposite ways, so they are separate entry points:
//! [`wait_for_status`] fails fast on not-found, [`wait_for_deletion`] treats
//! it as success.  Callers pick explicitly; nothing is inferred.

use crate::dev::poll;
use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;
use stratus_common::api::Error;
use stratus_common::api::ResourceType;
use thiserror::Error as ThisError;

/// What to wait for, on which resource, and how patiently
#[derive(Clone, Debug)]
pub struct WaitParams<'a, S> {
    pub resource_type: ResourceType,
    /// identifier of the resource, used only for diagnostics
    pub resource: &'a str,
    /// statuses that complete the wait successfully
    pub targets: &'a [S],
    /// statuses from which the resource can never reach a target; seeing
    /// one fails the wait immediately instead of running out the clock
    pub failures: &'a [S],
    pub poll_interval: Duration,
    pub timeout: Duration,
}

/// Terminal outcomes of a wait other than success
///
/// Everything the fetch callback reports that isn't "not yet there" ends
/// the wait: there is no retry of failed fetches and no silent outcome.
#[derive(Debug, ThisError)]
pub enum WaitError<S: std::fmt::Debug> {
    /// The timeout elapsed before any target status was observed.
    #[error(
        "timed out after {elapsed:?} waiting for {resource_type} \
         \"{resource}\" (last status: {last_status:?})"
    )]
    Timeout {
        resource_type: ResourceType,
        resource: String,
        /// most recent status the fetch callback reported, if it ever
        /// answered
        last_status: Option<S>,
        elapsed: Duration,
    },
    /// The resource reached a status it cannot recover from.
    #[error(
        "{resource_type} \"{resource}\" reached terminal status \
         {status:?} before any target status"
    )]
    ResourceFailed {
        resource_type: ResourceType,
        resource: String,
        status: S,
    },
    /// The resource disappeared while we were waiting for it to reach a
    /// status.  (When deletion is the goal, use [`wait_for_deletion`],
    /// which treats this as success.)
    #[error("{resource_type} \"{resource}\" no longer exists")]
    NotFound { resource_type: ResourceType, resource: String },
    /// The fetch itself failed in a way that isn't "not found"; the
    /// underlying error is passed through unchanged.
    #[error("checking status of {resource_type} \"{resource}\"")]
    Client {
        resource_type: ResourceType,
        resource: String,
        #[source]
        error: Error,
    },
}

/// Poll `fetch` until the resource reports one of the target statuses
///
/// Returns the matching status on success.  Fails with
/// [`WaitError::ResourceFailed`] as soon as a terminal-failure status is
/// observed, [`WaitError::NotFound`] as soon as the fetch reports the
/// resource gone, [`WaitError::Client`] for any other fetch error, and
/// [`WaitError::Timeout`] carrying the last observed status once
/// `params.timeout` elapses.
pub async fn wait_for_status<S, F, Fut>(
    fetch: F,
    params: &WaitParams<'_, S>,
) -> Result<S, WaitError<S>>
where
    S: Clone + PartialEq + std::fmt::Debug,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<S, Error>>,
{
    let last_status: RefCell<Option<S>> = RefCell::new(None);
    let result = poll::wait_for_condition(
        || async {
            match fetch().await {
                Ok(status) => {
                    *last_status.borrow_mut() = Some(status.clone());
                    if params.targets.contains(&status) {
                        Ok(status)
                    } else if params.failures.contains(&status) {
                        Err(poll::CondCheckError::Failed(
                            WaitError::ResourceFailed {
                                resource_type: params.resource_type,
                                resource: String::from(params.resource),
                                status,
                            },
                        ))
                    } else {
                        Err(poll::CondCheckError::NotYet)
                    }
                }
                Err(error) if error.is_not_found() => {
                    Err(poll::CondCheckError::Failed(WaitError::NotFound {
                        resource_type: params.resource_type,
                        resource: String::from(params.resource),
                    }))
                }
                Err(error) => {
                    Err(poll::CondCheckError::Failed(WaitError::Client {
                        resource_type: params.resource_type,
                        resource: String::from(params.resource),
                        error,
                    }))
                }
            }
        },
        &params.poll_interval,
        &params.timeout,
    )
    .await;

    match result {
        Ok(status) => Ok(status),
        Err(poll::Error::TimedOut(elapsed)) => Err(WaitError::Timeout {
            resource_type: params.resource_type,
            resource: String::from(params.resource),
            last_status: last_status.into_inner(),
            elapsed,
        }),
        Err(poll::Error::PermanentError(e)) => Err(e),
    }
}

/// Poll `fetch` until the resource no longer exists
///
/// A fetch reporting "not found" is the success condition here.  A status
/// in `params.failures` still fails fast with
/// [`WaitError::ResourceFailed`]; `params.targets` is ignored.  All other
/// statuses mean the deletion hasn't finished yet.
pub async fn wait_for_deletion<S, F, Fut>(
    fetch: F,
    params: &WaitParams<'_, S>,
) -> Result<(), WaitError<S>>
where
    S: Clone + PartialEq + std::fmt::Debug,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<S, Error>>,
{
    let last_status: RefCell<Option<S>> = RefCell::new(None);
    let result = poll::wait_for_condition(
        || async {
            match fetch().await {
                Err(error) if error.is_not_found() => Ok(()),
                Ok(status) => {
                    *last_status.borrow_mut() = Some(status.clone());
                    if params.failures.contains(&status) {
                        Err(poll::CondCheckError::Failed(
                            WaitError::ResourceFailed {
                                resource_type: params.resource_type,
                                resource: String::from(params.resource),
                                status,
                            },
                        ))
                    } else {
                        Err(poll::CondCheckError::NotYet)
                    }
                }
                Err(error) => {
                    Err(poll::CondCheckError::Failed(WaitError::Client {
                        resource_type: params.resource_type,
                        resource: String::from(params.resource),
                        error,
                    }))
                }
            }
        },
        &params.poll_interval,
        &params.timeout,
    )
    .await;

    match result {
        Ok(()) => Ok(()),
        Err(poll::Error::TimedOut(elapsed)) => Err(WaitError::Timeout {
            resource_type: params.resource_type,
            resource: String::from(params.resource),
            last_status: last_status.into_inner(),
            elapsed,
        }),
        Err(poll::Error::PermanentError(e)) => Err(e),
    }
}
