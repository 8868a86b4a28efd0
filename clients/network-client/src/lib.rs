// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for making API requests to the Stratus network service

pub mod types;

use slog::Logger;
use stratus_common::api::Error;
use stratus_common::api::LookupType;
use stratus_common::api::ResourceType;
use stratus_common::api::ResultsPage;
use stratus_common::http_client::HttpClient;
use types::Network;
use types::NetworkCreate;
use types::Subnet;
use types::SubnetCreate;
use uuid::Uuid;

/// Client for the network service's external API
#[derive(Clone)]
pub struct Client {
    client: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, log: Logger) -> Result<Client, Error> {
        Ok(Client { client: HttpClient::new("networks", base_url, log)? })
    }

    /// Wrap an existing (typically authenticated) HTTP client.
    pub fn new_with_client(client: HttpClient) -> Client {
        Client { client }
    }

    /// Access the underlying HTTP client, e.g. for raw-body assertions.
    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    pub async fn network_create(
        &self,
        params: &NetworkCreate,
    ) -> Result<Network, Error> {
        self.client.post_json("/v1/networks", params).await
    }

    pub async fn network_get(&self, id: &Uuid) -> Result<Network, Error> {
        self.client
            .get_resource(
                &format!("/v1/networks/{}", id),
                ResourceType::Network,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn network_list(&self) -> Result<ResultsPage<Network>, Error> {
        self.client.get_json("/v1/networks").await
    }

    pub async fn network_delete(&self, id: &Uuid) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/networks/{}", id),
                ResourceType::Network,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn subnet_create(
        &self,
        params: &SubnetCreate,
    ) -> Result<Subnet, Error> {
        self.client.post_json("/v1/subnets", params).await
    }

    pub async fn subnet_get(&self, id: &Uuid) -> Result<Subnet, Error> {
        self.client
            .get_resource(
                &format!("/v1/subnets/{}", id),
                ResourceType::Subnet,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn subnet_list(&self) -> Result<ResultsPage<Subnet>, Error> {
        self.client.get_json("/v1/subnets").await
    }

    pub async fn subnet_delete(&self, id: &Uuid) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/subnets/{}", id),
                ResourceType::Subnet,
                LookupType::ById(*id),
            )
            .await
    }
}
