// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types for the image API

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use stratus_common::api::ByteCount;
use stratus_common::api::IdentityMetadata;
use stratus_common::api::IdentityMetadataCreateParams;
use stratus_common::api::ImageState;

/// Create-time parameters for an image
///
/// The service fetches the image contents from `url` asynchronously; the
/// image stays in `queued`/`saving` until the fetch completes.
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct ImageCreate {
    #[serde(flatten)]
    pub identity: IdentityMetadataCreateParams,
    /// operating system shipped in this image
    pub os: String,
    /// version of the operating system
    pub version: String,
    /// URL the service fetches the image contents from
    pub url: String,
}

/// View of an image
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Image {
    #[serde(flatten)]
    pub identity: IdentityMetadata,
    pub state: ImageState,
    pub os: String,
    pub version: String,
    /// total size of the image; absent until the contents have been fetched
    pub size: Option<ByteCount>,
}
