// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types for the volume API

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use stratus_common::api::ByteCount;
use stratus_common::api::IdentityMetadata;
use stratus_common::api::IdentityMetadataCreateParams;
use stratus_common::api::SnapshotState;
use stratus_common::api::VolumeState;
use uuid::Uuid;

/// Create-time parameters for a volume
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct VolumeCreate {
    #[serde(flatten)]
    pub identity: IdentityMetadataCreateParams,
    pub size: ByteCount,
    /// snapshot to populate the volume from; blank when absent
    pub snapshot_id: Option<Uuid>,
}

/// View of a volume
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Volume {
    #[serde(flatten)]
    pub identity: IdentityMetadata,
    pub state: VolumeState,
    pub size: ByteCount,
    /// instance this volume is attached to, if any
    pub attached_instance_id: Option<Uuid>,
}

/// Parameters for attaching a volume to an instance
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct VolumeAttach {
    pub instance_id: Uuid,
}

/// Create-time parameters for a snapshot
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct SnapshotCreate {
    #[serde(flatten)]
    pub identity: IdentityMetadataCreateParams,
    pub volume_id: Uuid,
}

/// View of a snapshot
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub identity: IdentityMetadata,
    pub volume_id: Uuid,
    pub state: SnapshotState,
    pub size: ByteCount,
}
