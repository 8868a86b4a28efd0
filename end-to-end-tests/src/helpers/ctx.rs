// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared context for end-to-end tests: authenticated clients for every
//! service plus a scratch project to put fixtures in

use crate::helpers::generate_name;
use anyhow::{anyhow, Context as _, Result};
use slog::Logger;
use stratus_common::api::IdentityMetadataCreateParams;
use stratus_common::api::Name;
use stratus_common::http_client::HttpClient;
use stratus_config::HarnessConfig;
use stratus_identity_client::types::ProjectCreate;
use stratus_identity_client::types::ServiceKind;
use stratus_identity_client::types::Token;
use stratus_identity_client::types::UsernamePasswordCredentials;

/// Authenticated clients and the scratch project fixtures live in
pub struct Context {
    pub identity: stratus_identity_client::Client,
    pub compute: stratus_compute_client::Client,
    pub images: stratus_image_client::Client,
    pub volumes: stratus_volume_client::Client,
    pub networks: stratus_network_client::Client,
    /// present unless disabled in the deployment's feature config
    pub objects: Option<stratus_object_client::Client>,
    pub telemetry: Option<stratus_telemetry_client::Client>,
    pub messaging: Option<stratus_messaging_client::Client>,
    /// name of the scratch project, as the service assigned it
    pub project_name: Name,
    pub log: Logger,
}

impl Context {
    /// Log in, build authenticated clients from the catalog (honoring any
    /// configured endpoint overrides), and create a scratch project.
    pub async fn new(config: &HarnessConfig, log: &Logger) -> Result<Context> {
        let identity_base = identity_url(config);
        let login_client =
            stratus_identity_client::Client::new(&identity_base, log.clone())?;
        let token = login_client
            .token_issue(&UsernamePasswordCredentials {
                username: config.identity.username.clone(),
                password: config.identity.password.clone(),
                project: config.identity.project.clone(),
            })
            .await
            .context("logging in")?;

        let identity = stratus_identity_client::Client::new_with_client(
            authenticated("identity", &identity_base, &token.token, log)?,
        );
        let compute = stratus_compute_client::Client::new_with_client(
            authenticated(
                "compute",
                &service_url(
                    config.endpoints.compute.as_deref(),
                    &token,
                    ServiceKind::Compute,
                )?,
                &token.token,
                log,
            )?,
        );
        let images = stratus_image_client::Client::new_with_client(
            authenticated(
                "images",
                &service_url(
                    config.endpoints.images.as_deref(),
                    &token,
                    ServiceKind::Images,
                )?,
                &token.token,
                log,
            )?,
        );
        let volumes = stratus_volume_client::Client::new_with_client(
            authenticated(
                "volumes",
                &service_url(
                    config.endpoints.volumes.as_deref(),
                    &token,
                    ServiceKind::Volumes,
                )?,
                &token.token,
                log,
            )?,
        );
        let networks = stratus_network_client::Client::new_with_client(
            authenticated(
                "networks",
                &service_url(
                    config.endpoints.networks.as_deref(),
                    &token,
                    ServiceKind::Networks,
                )?,
                &token.token,
                log,
            )?,
        );

        let objects = if config.features.object_storage {
            Some(stratus_object_client::Client::new_with_client(
                authenticated(
                    "objects",
                    &service_url(
                        config.endpoints.objects.as_deref(),
                        &token,
                        ServiceKind::Objects,
                    )?,
                    &token.token,
                    log,
                )?,
            ))
        } else {
            None
        };
        let telemetry = if config.features.telemetry {
            Some(stratus_telemetry_client::Client::new_with_client(
                authenticated(
                    "telemetry",
                    &service_url(
                        config.endpoints.telemetry.as_deref(),
                        &token,
                        ServiceKind::Telemetry,
                    )?,
                    &token.token,
                    log,
                )?,
            ))
        } else {
            None
        };
        let messaging = if config.features.messaging {
            Some(stratus_messaging_client::Client::new_with_client(
                authenticated(
                    "messaging",
                    &service_url(
                        config.endpoints.messaging.as_deref(),
                        &token,
                        ServiceKind::Messaging,
                    )?,
                    &token.token,
                    log,
                )?,
            ))
        } else {
            None
        };

        // The service may normalize the requested name; keep the one it
        // actually assigned.
        let project = identity
            .project_create(&ProjectCreate {
                identity: IdentityMetadataCreateParams {
                    name: generate_name("proj")?,
                    description: String::new(),
                },
            })
            .await
            .context("creating scratch project")?;

        Ok(Context {
            identity,
            compute,
            images,
            volumes,
            networks,
            objects,
            telemetry,
            messaging,
            project_name: project.identity.name,
            log: log.clone(),
        })
    }

    /// Delete the scratch project.
    pub async fn cleanup(self) -> Result<()> {
        self.identity
            .project_delete(&self.project_name)
            .await
            .context("deleting scratch project")?;
        Ok(())
    }
}

/// Base URL of the identity service: `$STRATUS_HOST` when set, otherwise
/// the configured endpoint.
pub fn identity_url(config: &HarnessConfig) -> String {
    std::env::var("STRATUS_HOST")
        .unwrap_or_else(|_| config.identity.endpoint.clone())
}

fn authenticated(
    label: &str,
    base_url: &str,
    token: &str,
    log: &Logger,
) -> Result<HttpClient> {
    Ok(HttpClient::new(label, base_url, log.clone())?.with_token(token))
}

fn service_url(
    override_url: Option<&str>,
    token: &Token,
    kind: ServiceKind,
) -> Result<String> {
    match override_url {
        Some(url) => Ok(String::from(url)),
        None => token.catalog_url(kind).map(String::from).ok_or_else(|| {
            anyhow!(
                "no {} endpoint in the login catalog and none configured",
                kind
            )
        }),
    }
}
