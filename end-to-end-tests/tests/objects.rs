// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Object storage: container and object round trips

use httptest::matchers::request;
use httptest::responders::json_encoded;
use httptest::responders::status_code;
use httptest::Expectation;
use serde_json::json;
use stratus_end_to_end_tests::helpers::ctx::Context;
use stratus_test_utils::dev::test_setup_log;
use stratus_test_utils::sim::StratusSim;

const REPORT: &[u8] = br#"{"passed": 12, "failed": 0}"#;

#[tokio::test]
async fn test_container_and_object_round_trip() {
    let logctx = test_setup_log("test_container_and_object_round_trip");
    let sim = StratusSim::start();

    sim.expect(
        Expectation::matching(request::method_path(
            "PUT",
            "/v1/containers/artifacts",
        ))
        .times(1)
        .respond_with(status_code(201)),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "PUT",
            "/v1/containers/artifacts/objects/report.json",
        ))
        .times(1)
        .respond_with(status_code(201)),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "GET",
            "/v1/containers/artifacts/objects/report.json",
        ))
        .times(1)
        .respond_with(
            status_code(200)
                .append_header("Content-Type", "application/json")
                .body(REPORT),
        ),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "GET",
            "/v1/containers/artifacts/objects",
        ))
        .times(1)
        .respond_with(json_encoded(json!({
            "items": [{
                "name": "report.json",
                "size": REPORT.len(),
                "content_type": "application/json",
            }],
            "next_page": null,
        }))),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "DELETE",
            "/v1/containers/artifacts/objects/report.json",
        ))
        .times(1)
        .respond_with(status_code(204)),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "DELETE",
            "/v1/containers/artifacts",
        ))
        .times(1)
        .respond_with(status_code(204)),
    );

    let config = sim.config();
    let ctx = Context::new(&config, &logctx.log).await.unwrap();
    let Some(objects) = &ctx.objects else {
        // Object storage is optional; a deployment without it simply has
        // nothing to test here.
        ctx.cleanup().await.unwrap();
        logctx.cleanup_successful();
        return;
    };

    let container = "artifacts".parse().unwrap();
    objects.container_create(&container).await.unwrap();

    objects
        .object_put(
            &container,
            "report.json",
            REPORT.to_vec(),
            "application/json",
        )
        .await
        .unwrap();

    let data = objects.object_get(&container, "report.json").await.unwrap();
    assert_eq!(&data[..], REPORT);

    let listing = objects.object_list(&container).await.unwrap();
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].name, "report.json");
    assert_eq!(listing.items[0].size, REPORT.len() as u64);

    objects.object_delete(&container, "report.json").await.unwrap();
    objects.container_delete(&container).await.unwrap();

    ctx.cleanup().await.unwrap();
    logctx.cleanup_successful();
}

#[tokio::test]
async fn test_missing_object_is_not_found() {
    let logctx = test_setup_log("test_missing_object_is_not_found");
    let sim = StratusSim::start();

    sim.expect(
        Expectation::matching(request::method_path(
            "GET",
            "/v1/containers/artifacts/objects/absent.bin",
        ))
        .times(1)
        .respond_with(status_code(404)),
    );

    let config = sim.config();
    let ctx = Context::new(&config, &logctx.log).await.unwrap();
    let objects = ctx.objects.as_ref().expect("sim provides object storage");

    let container = "artifacts".parse().unwrap();
    let error =
        objects.object_get(&container, "absent.bin").await.unwrap_err();
    assert!(error.is_not_found());

    ctx.cleanup().await.unwrap();
    logctx.cleanup_successful();
}
