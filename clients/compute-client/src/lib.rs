// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for making API requests to the Stratus compute service

pub mod types;

use slog::Logger;
use stratus_common::api::Error;
use stratus_common::api::LookupType;
use stratus_common::api::ResourceType;
use stratus_common::api::ResultsPage;
use stratus_common::http_client::HttpClient;
use types::Instance;
use types::InstanceCreate;
use uuid::Uuid;

/// Client for the compute service's external API
#[derive(Clone)]
pub struct Client {
    client: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, log: Logger) -> Result<Client, Error> {
        Ok(Client { client: HttpClient::new("compute", base_url, log)? })
    }

    /// Wrap an existing (typically authenticated) HTTP client.
    pub fn new_with_client(client: HttpClient) -> Client {
        Client { client }
    }

    /// Access the underlying HTTP client, e.g. for raw-body assertions.
    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    pub async fn instance_create(
        &self,
        params: &InstanceCreate,
    ) -> Result<Instance, Error> {
        self.client.post_json("/v1/instances", params).await
    }

    pub async fn instance_get(&self, id: &Uuid) -> Result<Instance, Error> {
        self.client
            .get_resource(
                &format!("/v1/instances/{}", id),
                ResourceType::Instance,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn instance_list(&self) -> Result<ResultsPage<Instance>, Error> {
        self.client.get_json("/v1/instances").await
    }

    pub async fn instance_delete(&self, id: &Uuid) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/instances/{}", id),
                ResourceType::Instance,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn instance_start(&self, id: &Uuid) -> Result<(), Error> {
        self.instance_action(id, "start").await
    }

    pub async fn instance_stop(&self, id: &Uuid) -> Result<(), Error> {
        self.instance_action(id, "stop").await
    }

    pub async fn instance_reboot(&self, id: &Uuid) -> Result<(), Error> {
        self.instance_action(id, "reboot").await
    }

    async fn instance_action(
        &self,
        id: &Uuid,
        action: &str,
    ) -> Result<(), Error> {
        self.client
            .post_action(
                &format!("/v1/instances/{}/{}", id, action),
                ResourceType::Instance,
                LookupType::ById(*id),
            )
            .await
    }
}
