// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Messaging: queue CRUD and the post/claim/delete message flow

use httptest::matchers::request;
use httptest::responders::json_encoded;
use httptest::responders::status_code;
use httptest::Expectation;
use serde_json::json;
use stratus_end_to_end_tests::helpers::ctx::Context;
use stratus_messaging_client::types::ClaimCreate;
use stratus_messaging_client::types::MessagePost;
use stratus_test_utils::dev::test_setup_log;
use stratus_test_utils::sim::StratusSim;

fn message_json(id: &str, event: &str) -> serde_json::Value {
    json!({
        "id": id,
        "body": { "event": event },
        "ttl_secs": 300,
    })
}

#[tokio::test]
async fn test_queue_post_claim_delete() {
    let logctx = test_setup_log("test_queue_post_claim_delete");
    let sim = StratusSim::start();

    sim.expect(
        Expectation::matching(request::method_path(
            "PUT",
            "/v1/queues/build-events",
        ))
        .times(1)
        .respond_with(status_code(201)),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "GET",
            "/v1/queues/build-events",
        ))
        .times(1)
        .respond_with(json_encoded(json!({
            "name": "build-events",
            "message_count": 2,
        }))),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "POST",
            "/v1/queues/build-events/messages",
        ))
        .times(1)
        .respond_with(json_encoded(json!({ "ids": ["m-001", "m-002"] }))),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "POST",
            "/v1/queues/build-events/claims",
        ))
        .times(1)
        .respond_with(json_encoded(json!({
            "id": "c-001",
            "messages": [message_json("m-001", "started")],
        }))),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "DELETE",
            "/v1/queues/build-events/messages/m-001",
        ))
        .times(1)
        .respond_with(status_code(204)),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "DELETE",
            "/v1/queues/build-events",
        ))
        .times(1)
        .respond_with(status_code(204)),
    );

    let config = sim.config();
    let ctx = Context::new(&config, &logctx.log).await.unwrap();
    let Some(messaging) = &ctx.messaging else {
        ctx.cleanup().await.unwrap();
        logctx.cleanup_successful();
        return;
    };

    let queue = "build-events".parse().unwrap();
    messaging.queue_create(&queue).await.unwrap();

    let posted = messaging
        .message_post(
            &queue,
            &[
                MessagePost {
                    body: json!({ "event": "started" }),
                    ttl_secs: 300,
                },
                MessagePost {
                    body: json!({ "event": "finished" }),
                    ttl_secs: 300,
                },
            ],
        )
        .await
        .unwrap();
    assert_eq!(posted.ids.len(), 2);

    let view = messaging.queue_get(&queue).await.unwrap();
    assert_eq!(view.message_count, 2);

    let claim = messaging
        .claim_messages(
            &queue,
            &ClaimCreate { limit: 1, grace_secs: 60 },
        )
        .await
        .unwrap();
    assert_eq!(claim.messages.len(), 1);
    assert_eq!(claim.messages[0].id, "m-001");
    assert_eq!(claim.messages[0].body["event"], "started");

    messaging
        .message_delete(&queue, &claim.messages[0].id)
        .await
        .unwrap();
    messaging.queue_delete(&queue).await.unwrap();

    ctx.cleanup().await.unwrap();
    logctx.cleanup_successful();
}
