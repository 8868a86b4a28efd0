// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for making API requests to the Stratus messaging service

pub mod types;

use slog::Logger;
use stratus_common::api::Error;
use stratus_common::api::LookupType;
use stratus_common::api::Name;
use stratus_common::api::ResourceType;
use stratus_common::api::ResultsPage;
use stratus_common::http_client::HttpClient;
use types::Claim;
use types::ClaimCreate;
use types::Message;
use types::MessagePost;
use types::PostedMessages;
use types::Queue;

/// Client for the messaging service's external API
#[derive(Clone)]
pub struct Client {
    client: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, log: Logger) -> Result<Client, Error> {
        Ok(Client { client: HttpClient::new("messaging", base_url, log)? })
    }

    /// Wrap an existing (typically authenticated) HTTP client.
    pub fn new_with_client(client: HttpClient) -> Client {
        Client { client }
    }

    /// Access the underlying HTTP client, e.g. for raw-body assertions.
    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    pub async fn queue_create(&self, name: &Name) -> Result<(), Error> {
        self.client.put_empty(&format!("/v1/queues/{}", name)).await
    }

    pub async fn queue_get(&self, name: &Name) -> Result<Queue, Error> {
        self.client
            .get_resource(
                &format!("/v1/queues/{}", name),
                ResourceType::Queue,
                LookupType::from(name),
            )
            .await
    }

    pub async fn queue_list(&self) -> Result<ResultsPage<Queue>, Error> {
        self.client.get_json("/v1/queues").await
    }

    pub async fn queue_delete(&self, name: &Name) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/queues/{}", name),
                ResourceType::Queue,
                LookupType::from(name),
            )
            .await
    }

    pub async fn message_post(
        &self,
        queue: &Name,
        messages: &[MessagePost],
    ) -> Result<PostedMessages, Error> {
        self.client
            .post_json(&format!("/v1/queues/{}/messages", queue), &messages)
            .await
    }

    pub async fn message_list(
        &self,
        queue: &Name,
    ) -> Result<ResultsPage<Message>, Error> {
        self.client
            .get_resource(
                &format!("/v1/queues/{}/messages", queue),
                ResourceType::Queue,
                LookupType::from(queue),
            )
            .await
    }

    /// Claim up to `params.limit` messages for exclusive processing.
    pub async fn claim_messages(
        &self,
        queue: &Name,
        params: &ClaimCreate,
    ) -> Result<Claim, Error> {
        self.client
            .post_json(&format!("/v1/queues/{}/claims", queue), params)
            .await
    }

    pub async fn message_delete(
        &self,
        queue: &Name,
        message_id: &str,
    ) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/queues/{}/messages/{}", queue, message_id),
                ResourceType::Message,
                LookupType::ByName(String::from(message_id)),
            )
            .await
    }
}
