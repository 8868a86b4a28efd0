// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Convenience constructors for the fixtures tests create over and over
//!
//! These panic on failure: a fixture that cannot be created means the test
//! cannot run, and the panic message is the most useful thing to show.

use serde::de::DeserializeOwned;
use serde::Serialize;
use stratus_common::api::ByteCount;
use stratus_common::api::IdentityMetadataCreateParams;
use stratus_common::api::InstanceCpuCount;
use stratus_common::api::ResultsPage;
use stratus_common::http_client::HttpClient;
use stratus_compute_client::types::Instance;
use stratus_compute_client::types::InstanceCreate;
use stratus_identity_client::types::Project;
use stratus_identity_client::types::ProjectCreate;
use stratus_image_client::types::Image;
use stratus_image_client::types::ImageCreate;
use stratus_network_client::types::Network;
use stratus_network_client::types::NetworkCreate;
use stratus_volume_client::types::Volume;
use stratus_volume_client::types::VolumeCreate;
use uuid::Uuid;

/// GET `path` and parse the result as a page of `ItemType`
pub async fn objects_list_page<ItemType>(
    client: &HttpClient,
    path: &str,
) -> ResultsPage<ItemType>
where
    ItemType: DeserializeOwned,
{
    client.get_json(path).await.expect("failed to list objects")
}

/// POST `input` to `path`, parsing the result as an `OutputType`
pub async fn object_create<InputType, OutputType>(
    client: &HttpClient,
    path: &str,
    input: &InputType,
) -> OutputType
where
    InputType: Serialize,
    OutputType: DeserializeOwned,
{
    client
        .post_json(path, input)
        .await
        .expect("failed to make \"create\" request")
}

fn identity(name: &str, description: &str) -> IdentityMetadataCreateParams {
    IdentityMetadataCreateParams {
        name: name.parse().expect("invalid fixture name"),
        description: String::from(description),
    }
}

pub async fn create_project(
    client: &stratus_identity_client::Client,
    project_name: &str,
) -> Project {
    client
        .project_create(&ProjectCreate {
            identity: identity(project_name, "a scratch project"),
        })
        .await
        .expect("failed to create project")
}

/// Creates an instance with the default network and 1 GiB of memory.
pub async fn create_instance(
    client: &stratus_compute_client::Client,
    instance_name: &str,
    image_id: Uuid,
) -> Instance {
    client
        .instance_create(&InstanceCreate {
            identity: identity(
                instance_name,
                &format!("instance {:?}", instance_name),
            ),
            ncpus: InstanceCpuCount(4),
            memory: ByteCount::from_gibibytes_u32(1),
            image_id,
            network_id: None,
        })
        .await
        .expect("failed to create instance")
}

pub async fn create_volume(
    client: &stratus_volume_client::Client,
    volume_name: &str,
    gibibytes: u32,
) -> Volume {
    client
        .volume_create(&VolumeCreate {
            identity: identity(volume_name, "sells rainsticks"),
            size: ByteCount::from_gibibytes_u32(gibibytes),
            snapshot_id: None,
        })
        .await
        .expect("failed to create volume")
}

pub async fn create_image(
    client: &stratus_image_client::Client,
    image_name: &str,
    url: &str,
) -> Image {
    client
        .image_create(&ImageCreate {
            identity: identity(
                image_name,
                "you can boot any image, as long as it's alpine",
            ),
            os: String::from("alpine"),
            version: String::from("edge"),
            url: String::from(url),
        })
        .await
        .expect("failed to create image")
}

pub async fn create_network(
    client: &stratus_network_client::Client,
    network_name: &str,
) -> Network {
    client
        .network_create(&NetworkCreate {
            identity: identity(network_name, "network description"),
        })
        .await
        .expect("failed to create network")
}
