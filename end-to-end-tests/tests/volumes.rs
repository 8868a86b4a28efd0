// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volume lifecycle: create, attach/detach, snapshot, delete

use httptest::matchers::request;
use httptest::responders::json_encoded;
use httptest::responders::status_code;
use httptest::Expectation;
use serde_json::json;
use stratus_common::api::ResourceType;
use stratus_common::api::SnapshotState;
use stratus_common::api::VolumeState;
use stratus_end_to_end_tests::helpers::ctx::Context;
use stratus_test_utils::dev::test_setup_log;
use stratus_test_utils::resource_helpers::create_volume;
use stratus_test_utils::schema::VOLUME_VIEW;
use stratus_test_utils::sim::StratusSim;
use stratus_test_utils::wait::wait_for_deletion;
use stratus_test_utils::wait::wait_for_status;
use stratus_test_utils::wait::WaitParams;
use stratus_volume_client::types::SnapshotCreate;
use stratus_volume_client::types::VolumeAttach;
use uuid::Uuid;

const VOLUME_ID: &str = "a48c9cd1-8e9a-4d3e-81c0-0d7b4b37e1a6";
const VOLUME_PATH: &str =
    "/v1/volumes/a48c9cd1-8e9a-4d3e-81c0-0d7b4b37e1a6";
const SNAPSHOT_ID: &str = "5b35c3f0-66a1-4c96-bd4f-5fd5f57e2f7e";
const SNAPSHOT_PATH: &str =
    "/v1/snapshots/5b35c3f0-66a1-4c96-bd4f-5fd5f57e2f7e";
const INSTANCE_ID: &str = "f3497c5e-9d45-407e-b7a4-624b4ba7ed5b";

fn volume_json(state: &str, attached: bool) -> serde_json::Value {
    json!({
        "id": VOLUME_ID,
        "name": "data-0",
        "description": "sells rainsticks",
        "time_created": "2025-03-01T00:00:00Z",
        "time_modified": "2025-03-01T00:00:00Z",
        "state": state,
        "size": 2147483648u64,
        "attached_instance_id": if attached {
            json!(INSTANCE_ID)
        } else {
            json!(null)
        },
    })
}

fn snapshot_json(state: &str) -> serde_json::Value {
    json!({
        "id": SNAPSHOT_ID,
        "name": "data-0-snap",
        "description": "point in time",
        "time_created": "2025-03-01T00:00:00Z",
        "time_modified": "2025-03-01T00:00:00Z",
        "volume_id": VOLUME_ID,
        "state": state,
        "size": 2147483648u64,
    })
}

fn volume_wait<'a>(
    config: &stratus_config::HarnessConfig,
    targets: &'a [VolumeState],
) -> WaitParams<'a, VolumeState> {
    WaitParams {
        resource_type: ResourceType::Volume,
        resource: "data-0",
        targets,
        failures: &[VolumeState::Error],
        poll_interval: config.timeouts.poll_interval(),
        timeout: config.timeouts.volume_build_timeout(),
    }
}

#[tokio::test]
async fn test_volume_lifecycle() {
    let logctx = test_setup_log("test_volume_lifecycle");
    let sim = StratusSim::start();

    sim.expect(
        Expectation::matching(request::method_path("POST", "/v1/volumes"))
            .times(1)
            .respond_with(json_encoded(volume_json("creating", false))),
    );
    // Scripted polls: two to available, two through the attach, two
    // through the detach, one 404 for the deletion wait.
    sim.expect(
        Expectation::matching(request::method_path("GET", VOLUME_PATH))
            .times(7)
            .respond_with(httptest::cycle![
                json_encoded(volume_json("creating", false)),
                json_encoded(volume_json("available", false)),
                json_encoded(volume_json("attaching", true)),
                json_encoded(volume_json("attached", true)),
                json_encoded(volume_json("detaching", false)),
                json_encoded(volume_json("available", false)),
                status_code(404),
            ]),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "POST",
            "/v1/volumes/a48c9cd1-8e9a-4d3e-81c0-0d7b4b37e1a6/attach",
        ))
        .times(1)
        .respond_with(json_encoded(volume_json("attaching", true))),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "POST",
            "/v1/volumes/a48c9cd1-8e9a-4d3e-81c0-0d7b4b37e1a6/detach",
        ))
        .times(1)
        .respond_with(status_code(202)),
    );
    sim.expect(
        Expectation::matching(request::method_path("DELETE", VOLUME_PATH))
            .times(1)
            .respond_with(status_code(204)),
    );
    sim.expect(
        Expectation::matching(request::method_path("POST", "/v1/snapshots"))
            .times(1)
            .respond_with(json_encoded(snapshot_json("creating"))),
    );
    sim.expect(
        Expectation::matching(request::method_path("GET", SNAPSHOT_PATH))
            .times(3)
            .respond_with(httptest::cycle![
                json_encoded(snapshot_json("creating")),
                json_encoded(snapshot_json("available")),
                status_code(404),
            ]),
    );
    sim.expect(
        Expectation::matching(request::method_path(
            "DELETE",
            SNAPSHOT_PATH,
        ))
        .times(1)
        .respond_with(status_code(204)),
    );

    let config = sim.config();
    let ctx = Context::new(&config, &logctx.log).await.unwrap();

    let volume = create_volume(&ctx.volumes, "data-0", 2).await;
    assert_eq!(volume.state, VolumeState::Creating);
    assert_eq!(volume.size.to_whole_gibibytes(), 2);
    let id = volume.identity.id;

    let state = wait_for_status(
        || async { ctx.volumes.volume_get(&id).await.map(|v| v.state) },
        &volume_wait(&config, &[VolumeState::Available]),
    )
    .await
    .unwrap();
    assert_eq!(state, VolumeState::Available);

    // Attach to an instance and wait for the attachment to settle.
    let instance_id: Uuid = INSTANCE_ID.parse().unwrap();
    let volume = ctx
        .volumes
        .volume_attach(&id, &VolumeAttach { instance_id })
        .await
        .unwrap();
    assert_eq!(volume.state, VolumeState::Attaching);
    let state = wait_for_status(
        || async { ctx.volumes.volume_get(&id).await.map(|v| v.state) },
        &volume_wait(&config, &[VolumeState::Attached]),
    )
    .await
    .unwrap();
    assert_eq!(state, VolumeState::Attached);

    ctx.volumes.volume_detach(&id).await.unwrap();
    let state = wait_for_status(
        || async { ctx.volumes.volume_get(&id).await.map(|v| v.state) },
        &volume_wait(&config, &[VolumeState::Available]),
    )
    .await
    .unwrap();
    assert_eq!(state, VolumeState::Available);

    // Snapshot the volume, wait for it, then tear both down.
    let snapshot = ctx
        .volumes
        .snapshot_create(&SnapshotCreate {
            identity: stratus_common::api::IdentityMetadataCreateParams {
                name: "data-0-snap".parse().unwrap(),
                description: String::from("point in time"),
            },
            volume_id: id,
        })
        .await
        .unwrap();
    assert_eq!(snapshot.state, SnapshotState::Creating);
    let snapshot_id = snapshot.identity.id;

    let snapshot_wait = WaitParams {
        resource_type: ResourceType::Snapshot,
        resource: "data-0-snap",
        targets: &[SnapshotState::Available],
        failures: &[SnapshotState::Error],
        poll_interval: config.timeouts.poll_interval(),
        timeout: config.timeouts.volume_build_timeout(),
    };
    let state = wait_for_status(
        || async {
            ctx.volumes.snapshot_get(&snapshot_id).await.map(|s| s.state)
        },
        &snapshot_wait,
    )
    .await
    .unwrap();
    assert_eq!(state, SnapshotState::Available);

    ctx.volumes.snapshot_delete(&snapshot_id).await.unwrap();
    wait_for_deletion(
        || async {
            ctx.volumes.snapshot_get(&snapshot_id).await.map(|s| s.state)
        },
        &snapshot_wait,
    )
    .await
    .unwrap();

    ctx.volumes.volume_delete(&id).await.unwrap();
    wait_for_deletion(
        || async { ctx.volumes.volume_get(&id).await.map(|v| v.state) },
        &volume_wait(&config, &[]),
    )
    .await
    .unwrap();

    ctx.cleanup().await.unwrap();
    logctx.cleanup_successful();
}

#[tokio::test]
async fn test_volume_view_shape() {
    let logctx = test_setup_log("test_volume_view_shape");
    let sim = StratusSim::start();

    sim.expect(
        Expectation::matching(request::method_path("GET", VOLUME_PATH))
            .times(1)
            .respond_with(json_encoded(volume_json("available", false))),
    );

    let config = sim.config();
    let ctx = Context::new(&config, &logctx.log).await.unwrap();

    let raw: serde_json::Value =
        ctx.volumes.http().get_json(VOLUME_PATH).await.unwrap();
    VOLUME_VIEW.validate(&raw).unwrap();

    ctx.cleanup().await.unwrap();
    logctx.cleanup_successful();
}
