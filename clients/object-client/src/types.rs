// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types for the object storage API

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use stratus_common::api::Name;

/// View of a container
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Container {
    pub name: Name,
    pub object_count: u64,
    pub bytes_used: u64,
}

/// Metadata for one stored object
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct ObjectMeta {
    pub name: String,
    pub size: u64,
    pub content_type: String,
}
