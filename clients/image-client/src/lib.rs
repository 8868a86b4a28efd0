// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for making API requests to the Stratus image service

pub mod types;

use slog::Logger;
use stratus_common::api::Error;
use stratus_common::api::LookupType;
use stratus_common::api::ResourceType;
use stratus_common::api::ResultsPage;
use stratus_common::http_client::HttpClient;
use types::Image;
use types::ImageCreate;
use uuid::Uuid;

/// Client for the image service's external API
#[derive(Clone)]
pub struct Client {
    client: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, log: Logger) -> Result<Client, Error> {
        Ok(Client { client: HttpClient::new("images", base_url, log)? })
    }

    /// Wrap an existing (typically authenticated) HTTP client.
    pub fn new_with_client(client: HttpClient) -> Client {
        Client { client }
    }

    /// Access the underlying HTTP client, e.g. for raw-body assertions.
    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    pub async fn image_create(
        &self,
        params: &ImageCreate,
    ) -> Result<Image, Error> {
        self.client.post_json("/v1/images", params).await
    }

    pub async fn image_get(&self, id: &Uuid) -> Result<Image, Error> {
        self.client
            .get_resource(
                &format!("/v1/images/{}", id),
                ResourceType::Image,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn image_list(&self) -> Result<ResultsPage<Image>, Error> {
        self.client.get_json("/v1/images").await
    }

    pub async fn image_delete(&self, id: &Uuid) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/images/{}", id),
                ResourceType::Image,
                LookupType::ById(*id),
            )
            .await
    }

    /// Take an active image out of service without deleting it; instances
    /// can no longer boot from it until it is reactivated.
    pub async fn image_deactivate(&self, id: &Uuid) -> Result<(), Error> {
        self.client
            .post_action(
                &format!("/v1/images/{}/deactivate", id),
                ResourceType::Image,
                LookupType::ById(*id),
            )
            .await
    }

    pub async fn image_reactivate(&self, id: &Uuid) -> Result<(), Error> {
        self.client
            .post_action(
                &format!("/v1/images/{}/reactivate", id),
                ResourceType::Image,
                LookupType::ById(*id),
            )
            .await
    }
}
