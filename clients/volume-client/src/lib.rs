// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for making API requests to the Stratus volume service

pub mod types;

use slog::Logger;
use stratus_common::api::Error;
use stratus_common::api::LookupType;
use stratus_common::api::ResourceType;
use stratus_common::api::ResultsPage;
use stratus_common::http_client::HttpClient;
use types::Snapshot;
use types::SnapshotCreate;
use types::Volume;
use types::VolumeAttach;
use types::VolumeCreate;
use uuid::Uuid;

/// Client for the volume service's external API
#[derive(Clone)]
pub struct Client {
    client: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, log: Logger) -> Result<Client, Error> {
        Ok(Client { client: HttpClient::new("volumes", base_url, log)? })
    }

    /// Wrap an existing (typically authenticated) HTTP client.
    pub fn new_with_client(client: HttpClient) -> Client {
        Client { client }
    }

    /// Access the underlying HTTP client, e.g. for raw-body assertions.
    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    pub async fn volume_create(
        &self,
        params: &VolumeCreate,
    ) -> Result<Volume, Error> {
        self.client.post_json("/v1/volumes", params).await
    }

    pub async fn volume_get(&self, id: &Uuid) -> Result<Volume, Error> {
        self.client
            .get_resource(
                &format!("/v1/volumes/{}", id),
                ResourceType::Volume,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn volume_list(&self) -> Result<ResultsPage<Volume>, Error> {
        self.client.get_json("/v1/volumes").await
    }

    pub async fn volume_delete(&self, id: &Uuid) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/volumes/{}", id),
                ResourceType::Volume,
                LookupType::ById(*id),
            )
            .await
    }

    /// Attach the volume to an instance; the volume transitions through
    /// `attaching` to `attached`.
    pub async fn volume_attach(
        &self,
        id: &Uuid,
        params: &VolumeAttach,
    ) -> Result<Volume, Error> {
        self.client
            .post_json(&format!("/v1/volumes/{}/attach", id), params)
            .await
    }

    /// Detach the volume from whatever instance it is attached to.
    pub async fn volume_detach(&self, id: &Uuid) -> Result<(), Error> {
        self.client
            .post_action(
                &format!("/v1/volumes/{}/detach", id),
                ResourceType::Volume,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn snapshot_create(
        &self,
        params: &SnapshotCreate,
    ) -> Result<Snapshot, Error> {
        self.client.post_json("/v1/snapshots", params).await
    }

    pub async fn snapshot_get(&self, id: &Uuid) -> Result<Snapshot, Error> {
        self.client
            .get_resource(
                &format!("/v1/snapshots/{}", id),
                ResourceType::Snapshot,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn snapshot_list(&self) -> Result<ResultsPage<Snapshot>, Error> {
        self.client.get_json("/v1/snapshots").await
    }

    pub async fn snapshot_delete(&self, id: &Uuid) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/snapshots/{}", id),
                ResourceType::Snapshot,
                LookupType::ById(*id),
            )
            .await
    }
}
