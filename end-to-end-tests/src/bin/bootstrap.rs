// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wait for a Stratus deployment to come up and print its service catalog
//!
//! Run this after standing up a deployment and before pointing the test
//! suite at it; it blocks until the identity service answers, then verifies
//! that login works.

use anyhow::{Context as _, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use slog::info;
use std::time::Duration;
use stratus_common::api::Error;
use stratus_config::HarnessConfig;
use stratus_end_to_end_tests::helpers::ctx::identity_url;
use stratus_identity_client::types::UsernamePasswordCredentials;
use stratus_test_utils::dev::poll::{wait_for_condition, CondCheckError};

const STARTUP_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Parser)]
struct Args {
    /// path to the harness configuration file
    #[clap(long)]
    config: Utf8PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = HarnessConfig::from_file(&args.config)?;
    let log = config
        .log
        .to_logger("stratus-bootstrap")
        .context("initializing logger")?;

    let endpoint = identity_url(&config);
    let client =
        stratus_identity_client::Client::new(&endpoint, log.clone())?;

    info!(log, "waiting for identity service"; "endpoint" => &endpoint);
    let version = wait_for_condition::<_, Error, _, _>(
        || async {
            client.ping().await.map_err(|error| {
                // A deployment that's still coming up answers with
                // transient errors; anything else is a real problem.
                if error.retryable() {
                    CondCheckError::NotYet
                } else {
                    CondCheckError::Failed(error)
                }
            })
        },
        &config.timeouts.poll_interval(),
        &STARTUP_TIMEOUT,
    )
    .await
    .context("waiting for the identity service to answer")?;
    info!(log, "identity service is up"; "version" => &version.version);

    let token = client
        .token_issue(&UsernamePasswordCredentials {
            username: config.identity.username.clone(),
            password: config.identity.password.clone(),
            project: config.identity.project.clone(),
        })
        .await
        .context("logging in")?;

    println!("deployment is up; service catalog:");
    for entry in &token.catalog {
        println!("  {:<12} {}", entry.service.to_string(), entry.url);
    }
    Ok(())
}
