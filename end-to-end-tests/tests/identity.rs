// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identity: login, catalog, project CRUD, auth failures

use httptest::matchers::request;
use httptest::responders::json_encoded;
use httptest::responders::status_code;
use httptest::Expectation;
use httptest::Server;
use serde_json::json;
use slog::Logger;
use stratus_common::api::Error;
use stratus_end_to_end_tests::helpers::ctx::Context;
use stratus_identity_client::types::UsernamePasswordCredentials;
use stratus_test_utils::dev::test_setup_log;
use stratus_test_utils::schema::TOKEN_VIEW;
use stratus_test_utils::sim::StratusSim;
use stratus_test_utils::sim::SIM_PROJECT;
use stratus_test_utils::sim::SIM_SCRATCH_PROJECT;
use stratus_test_utils::sim::SIM_USERNAME;

#[tokio::test]
async fn test_login_catalog_and_projects() {
    let logctx = test_setup_log("test_login_catalog_and_projects");
    let sim = StratusSim::start();

    sim.expect(
        Expectation::matching(request::method_path(
            "GET",
            "/v1/users/current",
        ))
        .times(1)
        .respond_with(json_encoded(json!({
            "id": "9f6c3f1e-4cb8-4e2e-86f1-9ce2f0a4b1d2",
            "username": SIM_USERNAME,
            "project_id": stratus_test_utils::sim::SIM_PROJECT_ID,
        }))),
    );
    sim.expect(
        Expectation::matching(request::method_path("GET", "/v1/projects"))
            .times(1)
            .respond_with(json_encoded(json!({
                "items": [{
                    "id": stratus_test_utils::sim::SIM_SCRATCH_PROJECT_ID,
                    "name": SIM_SCRATCH_PROJECT,
                    "description": "",
                    "time_created": "2025-03-01T00:00:00Z",
                    "time_modified": "2025-03-01T00:00:00Z",
                }],
                "next_page": null,
            }))),
    );

    let config = sim.config();
    let ctx = Context::new(&config, &logctx.log).await.unwrap();
    assert_eq!(ctx.project_name, SIM_SCRATCH_PROJECT);

    let user = ctx.identity.user_current().await.unwrap();
    assert_eq!(user.username, SIM_USERNAME);

    let projects = ctx.identity.project_list().await.unwrap();
    assert_eq!(projects.items.len(), 1);
    assert_eq!(projects.items[0].identity.name, SIM_SCRATCH_PROJECT);

    ctx.cleanup().await.unwrap();
    logctx.cleanup_successful();
}

#[tokio::test]
async fn test_token_response_shape() {
    let logctx = test_setup_log("test_token_response_shape");
    let sim = StratusSim::start();

    let config = sim.config();
    let client = stratus_identity_client::Client::new(
        &sim.base_url(),
        logctx.log.clone(),
    )
    .unwrap();

    // Fetch the raw login response and check it against the documented
    // shape before the typed client ever sees it.
    let raw: serde_json::Value = client
        .http()
        .post_json(
            "/v1/tokens",
            &UsernamePasswordCredentials {
                username: config.identity.username.clone(),
                password: config.identity.password.clone(),
                project: config.identity.project.clone(),
            },
        )
        .await
        .unwrap();
    TOKEN_VIEW.validate(&raw).unwrap();

    logctx.cleanup_successful();
}

#[tokio::test]
async fn test_bad_credentials_rejected() {
    let logctx = test_setup_log("test_bad_credentials_rejected");
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/v1/tokens"))
            .times(1)
            .respond_with(
                status_code(401).body(
                    json!({
                        "error_code": "Unauthorized",
                        "message": "credentials missing or invalid",
                    })
                    .to_string(),
                ),
            ),
    );

    let client = stratus_identity_client::Client::new(
        &format!("http://{}", server.addr()),
        logctx.log.clone(),
    )
    .unwrap();
    let error = client
        .token_issue(&UsernamePasswordCredentials {
            username: String::from(SIM_USERNAME),
            password: String::from("not-the-password"),
            project: SIM_PROJECT.parse().unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(error, Error::Unauthenticated { .. }));

    logctx.cleanup_successful();
}

#[tokio::test]
async fn test_unauthenticated_request_rejected() {
    let logctx = test_setup_log("test_unauthenticated_request_rejected");
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/v1/instances"))
            .times(1)
            .respond_with(status_code(401)),
    );

    let log: Logger = logctx.log.clone();
    let client = stratus_compute_client::Client::new(
        &format!("http://{}", server.addr()),
        log,
    )
    .unwrap();
    let error = client.instance_list().await.unwrap_err();
    assert!(matches!(error, Error::Unauthenticated { .. }));

    logctx.cleanup_successful();
}

#[tokio::test]
async fn test_token_revoke() {
    let logctx = test_setup_log("test_token_revoke");
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path(
            "DELETE",
            "/v1/tokens",
        ))
        .times(1)
        .respond_with(status_code(204)),
    );

    let client = stratus_identity_client::Client::new(
        &format!("http://{}", server.addr()),
        logctx.log.clone(),
    )
    .unwrap();
    client.token_revoke().await.unwrap();

    logctx.cleanup_successful();
}
