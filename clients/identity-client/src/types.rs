// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types for the identity API

use chrono::DateTime;
use chrono::Utc;
use parse_display::Display;
use parse_display::FromStr;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use stratus_common::api::IdentityMetadata;
use stratus_common::api::IdentityMetadataCreateParams;
use stratus_common::api::Name;
use uuid::Uuid;

/// Credentials presented to obtain a token
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct UsernamePasswordCredentials {
    pub username: String,
    pub password: String,
    /// project the token is scoped to
    pub project: Name,
}

/// A service named in the catalog returned at login
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    FromStr,
    JsonSchema,
    PartialEq,
    Serialize,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Identity,
    Compute,
    Images,
    Volumes,
    Networks,
    Objects,
    Telemetry,
    Messaging,
}

/// One entry in the service catalog
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct CatalogService {
    pub service: ServiceKind,
    /// base URL at which the service is reachable
    pub url: String,
}

/// An issued authentication token, with the catalog of services it unlocks
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Token {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub project_id: Uuid,
    pub catalog: Vec<CatalogService>,
}

impl Token {
    /// Look up the catalog URL for `kind`, if the deployment provides it.
    pub fn catalog_url(&self, kind: ServiceKind) -> Option<&str> {
        self.catalog
            .iter()
            .find(|entry| entry.service == kind)
            .map(|entry| entry.url.as_str())
    }
}

/// Create-time parameters for a project
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct ProjectCreate {
    #[serde(flatten)]
    pub identity: IdentityMetadataCreateParams,
}

/// View of a project
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Project {
    #[serde(flatten)]
    pub identity: IdentityMetadata,
}

/// View of the authenticated user
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub project_id: Uuid,
}

/// Liveness probe response from the identity service
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct VersionInfo {
    pub status: String,
    pub version: String,
}
