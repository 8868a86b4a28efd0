// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for making API requests to the Stratus telemetry service

pub mod types;

use slog::Logger;
use stratus_common::api::Error;
use stratus_common::api::LookupType;
use stratus_common::api::ResourceType;
use stratus_common::api::ResultsPage;
use stratus_common::http_client::HttpClient;
use types::Meter;
use types::Sample;
use types::Statistics;

/// Client for the telemetry service's external API
#[derive(Clone)]
pub struct Client {
    client: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, log: Logger) -> Result<Client, Error> {
        Ok(Client { client: HttpClient::new("telemetry", base_url, log)? })
    }

    /// Wrap an existing (typically authenticated) HTTP client.
    pub fn new_with_client(client: HttpClient) -> Client {
        Client { client }
    }

    /// Access the underlying HTTP client, e.g. for raw-body assertions.
    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    pub async fn meter_list(&self) -> Result<ResultsPage<Meter>, Error> {
        self.client.get_json("/v1/meters").await
    }

    pub async fn sample_list(
        &self,
        meter: &str,
        limit: Option<u32>,
    ) -> Result<ResultsPage<Sample>, Error> {
        let path = match limit {
            Some(limit) => {
                format!("/v1/meters/{}/samples?limit={}", meter, limit)
            }
            None => format!("/v1/meters/{}/samples", meter),
        };
        self.client
            .get_resource(
                &path,
                ResourceType::Meter,
                LookupType::ByName(String::from(meter)),
            )
            .await
    }

    pub async fn statistics(
        &self,
        meter: &str,
        period_secs: u64,
    ) -> Result<Statistics, Error> {
        self.client
            .get_resource(
                &format!(
                    "/v1/meters/{}/statistics?period={}",
                    meter, period_secs
                ),
                ResourceType::Meter,
                LookupType::ByName(String::from(meter)),
            )
            .await
    }
}
