// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types for the compute API

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use stratus_common::api::ByteCount;
use stratus_common::api::IdentityMetadata;
use stratus_common::api::IdentityMetadataCreateParams;
use stratus_common::api::InstanceCpuCount;
use stratus_common::api::InstanceState;
use uuid::Uuid;

/// Create-time parameters for an instance
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct InstanceCreate {
    #[serde(flatten)]
    pub identity: IdentityMetadataCreateParams,
    pub ncpus: InstanceCpuCount,
    pub memory: ByteCount,
    /// id of the image the instance boots from
    pub image_id: Uuid,
    /// network to attach the instance's primary interface to; the
    /// project's default network when absent
    pub network_id: Option<Uuid>,
}

/// View of a compute instance
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Instance {
    #[serde(flatten)]
    pub identity: IdentityMetadata,
    pub project_id: Uuid,
    pub state: InstanceState,
    pub ncpus: InstanceCpuCount,
    pub memory: ByteCount,
    pub image_id: Uuid,
    pub network_id: Option<Uuid>,
}
