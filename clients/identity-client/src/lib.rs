// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for making API requests to the Stratus identity service
//!
//! The identity service issues the token (and the catalog of service
//! endpoints) every other client authenticates with.

pub mod types;

use slog::Logger;
use stratus_common::api::Error;
use stratus_common::api::LookupType;
use stratus_common::api::Name;
use stratus_common::api::ResourceType;
use stratus_common::api::ResultsPage;
use stratus_common::http_client::HttpClient;
use types::Project;
use types::ProjectCreate;
use types::Token;
use types::User;
use types::UsernamePasswordCredentials;
use types::VersionInfo;

/// Client for the identity service's external API
#[derive(Clone)]
pub struct Client {
    client: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, log: Logger) -> Result<Client, Error> {
        Ok(Client { client: HttpClient::new("identity", base_url, log)? })
    }

    /// Wrap an existing (typically authenticated) HTTP client.
    pub fn new_with_client(client: HttpClient) -> Client {
        Client { client }
    }

    /// Access the underlying HTTP client, e.g. for raw-body assertions.
    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    /// Liveness probe; answers without authentication.
    pub async fn ping(&self) -> Result<VersionInfo, Error> {
        self.client.get_json("/v1/ping").await
    }

    /// Exchange credentials for a token and service catalog.
    pub async fn token_issue(
        &self,
        credentials: &UsernamePasswordCredentials,
    ) -> Result<Token, Error> {
        self.client.post_json("/v1/tokens", credentials).await
    }

    /// Revoke the token this client authenticates with.
    pub async fn token_revoke(&self) -> Result<(), Error> {
        self.client
            .delete_resource(
                "/v1/tokens",
                ResourceType::Token,
                LookupType::ByPath(String::from("/v1/tokens")),
            )
            .await
    }

    pub async fn project_create(
        &self,
        params: &ProjectCreate,
    ) -> Result<Project, Error> {
        self.client.post_json("/v1/projects", params).await
    }

    pub async fn project_get(&self, name: &Name) -> Result<Project, Error> {
        self.client
            .get_resource(
                &format!("/v1/projects/{}", name),
                ResourceType::Project,
                LookupType::from(name),
            )
            .await
    }

    pub async fn project_list(&self) -> Result<ResultsPage<Project>, Error> {
        self.client.get_json("/v1/projects").await
    }

    pub async fn project_delete(&self, name: &Name) -> Result<(), Error> {
        self.client
            .delete_resource(
                &format!("/v1/projects/{}", name),
                ResourceType::Project,
                LookupType::from(name),
            )
            .await
    }

    /// Fetch the user the current token belongs to.
    pub async fn user_current(&self) -> Result<User, Error> {
        self.client.get_json("/v1/users/current").await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use httptest::matchers::request;
    use httptest::responders::json_encoded;
    use httptest::responders::status_code;
    use httptest::Expectation;
    use httptest::Server;
    use types::ServiceKind;

    fn test_client(server: &Server) -> Client {
        let log = Logger::root(slog::Discard, slog::o!());
        Client::new(&format!("http://{}", server.addr()), log).unwrap()
    }

    #[tokio::test]
    async fn test_token_issue_and_catalog() {
        let server = Server::run();
        let base = format!("http://{}", server.addr());
        server.expect(
            Expectation::matching(request::method_path("POST", "/v1/tokens"))
                .times(1)
                .respond_with(json_encoded(serde_json::json!({
                    "token": "st-1f0c9f6e",
                    "expires_at": "2025-03-01T12:00:00Z",
                    "project_id": "b91c5e61-87cc-4a2e-b6f5-ba0e0f1c42be",
                    "catalog": [
                        { "service": "compute", "url": base },
                        { "service": "images", "url": base },
                    ],
                }))),
        );

        let client = test_client(&server);
        let token = client
            .token_issue(&UsernamePasswordCredentials {
                username: "qa".to_string(),
                password: "hunter2".to_string(),
                project: "harness".parse().unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(token.token, "st-1f0c9f6e");
        assert_eq!(token.catalog_url(ServiceKind::Compute), Some(&*base));
        assert_eq!(token.catalog_url(ServiceKind::Volumes), None);
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/v1/tokens"))
                .times(1)
                .respond_with(
                    status_code(401).body(
                        serde_json::json!({
                            "error_code": "Unauthorized",
                            "message": "credentials missing or invalid",
                        })
                        .to_string(),
                    ),
                ),
        );

        let client = test_client(&server);
        let error = client
            .token_issue(&UsernamePasswordCredentials {
                username: "qa".to_string(),
                password: "wrong".to_string(),
                project: "harness".parse().unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Unauthenticated { .. }));
    }
}
