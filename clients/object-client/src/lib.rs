// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for making API requests to the Stratus object storage service
//!
//! Object contents travel as raw bytes; everything else is JSON like the
//! other services.

pub mod types;

use bytes::Bytes;
use slog::Logger;
use stratus_common::api::Error;
use stratus_common::api::LookupType;
use stratus_common::api::Name;
use stratus_common::api::ResourceType;
use stratus_common::api::ResultsPage;
use stratus_common::http_client::HttpClient;
use types::Container;
use types::ObjectMeta;

/// Client for the object storage service's external API
#[derive(Clone)]
pub struct Client {
    client: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, log: Logger) -> Result<Client, Error> {
        Ok(Client { client: HttpClient::new("objects", base_url, log)? })
    }

    /// Wrap an existing (typically authenticated) HTTP client.
    pub fn new_with_client(client: HttpClient) -> Client {
        Client { client }
    }

    /// Access the underlying HTTP client, e.g. for raw-body assertions.
    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    /// Create a container; creating a container that already exists is an
    /// error surfaced by the service.
    pub async fn container_create(&self, name: &Name) -> Result<(), Error> {
        self.client.put_empty(&format!("/v1/containers/{}", name)).await
    }

    pub async fn container_list(
        &self,
    ) -> Result<ResultsPage<Container>, Error> {
        self.client.get_json("/v1/containers").await
    }

    pub async fn container_delete(&self, name: &Name) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/containers/{}", name),
                ResourceType::Container,
                LookupType::from(name),
            )
            .await
    }

    /// Store `data` under `object` in `container`, replacing any previous
    /// contents.
    pub async fn object_put(
        &self,
        container: &Name,
        object: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), Error> {
        self.client
            .put_bytes(
                &format!("/v1/containers/{}/objects/{}", container, object),
                data,
                content_type,
            )
            .await
    }

    pub async fn object_get(
        &self,
        container: &Name,
        object: &str,
    ) -> Result<Bytes, Error> {
        self.client
            .get_bytes(
                &format!("/v1/containers/{}/objects/{}", container, object),
                ResourceType::Object,
                LookupType::ByName(String::from(object)),
            )
            .await
    }

    pub async fn object_list(
        &self,
        container: &Name,
    ) -> Result<ResultsPage<ObjectMeta>, Error> {
        self.client
            .get_resource(
                &format!("/v1/containers/{}/objects", container),
                ResourceType::Container,
                LookupType::from(container),
            )
            .await
    }

    pub async fn object_delete(
        &self,
        container: &Name,
        object: &str,
    ) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/containers/{}/objects/{}", container, object),
                ResourceType::Object,
                LookupType::ByName(String::from(object)),
            )
            .await
    }
}
