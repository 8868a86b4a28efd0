// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Teardown of fixtures created during a test
//!
//! Tests register a teardown action for each fixture as they create it and
//! run the whole stack at the end.  Actions run in reverse registration
//! order, so dependents are torn down before the things they depend on.  A
//! failed action is logged and teardown continues; a half-deleted fixture
//! tree should not hide the remaining deletions.

use futures::future::BoxFuture;
use futures::FutureExt;
use slog::warn;
use slog::Logger;
use std::future::Future;
use stratus_common::api::Error;

/// A LIFO stack of labelled teardown actions
pub struct CleanupStack {
    log: Logger,
    actions: Vec<(String, BoxFuture<'static, Result<(), Error>>)>,
}

impl CleanupStack {
    pub fn new(log: &Logger) -> CleanupStack {
        CleanupStack { log: log.clone(), actions: Vec::new() }
    }

    /// Register `action` to run during teardown.  `label` identifies the
    /// fixture in the log if the action fails.
    pub fn defer<Fut>(&mut self, label: &str, action: Fut)
    where
        Fut: Future<Output = Result<(), Error>> + Send + 'static,
    {
        self.actions.push((String::from(label), action.boxed()));
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run all registered actions, newest first.  Returns how many failed.
    pub async fn run(mut self) -> usize {
        let mut failed = 0;
        while let Some((label, action)) = self.actions.pop() {
            if let Err(error) = action.await {
                // A fixture that's already gone doesn't count as a failure:
                // the test may have deleted it itself.
                if error.is_not_found() {
                    continue;
                }
                failed += 1;
                warn!(self.log, "cleanup action failed";
                    "action" => &label,
                    "error" => %error,
                );
            }
        }
        failed
    }
}
