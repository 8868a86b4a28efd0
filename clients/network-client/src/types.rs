// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types for the network API

use oxnet::Ipv4Net;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use stratus_common::api::IdentityMetadata;
use stratus_common::api::IdentityMetadataCreateParams;
use stratus_common::api::NetworkState;
use uuid::Uuid;

/// Create-time parameters for a network
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct NetworkCreate {
    #[serde(flatten)]
    pub identity: IdentityMetadataCreateParams,
}

/// View of a virtual network
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Network {
    #[serde(flatten)]
    pub identity: IdentityMetadata,
    pub state: NetworkState,
}

/// Create-time parameters for a subnet
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct SubnetCreate {
    #[serde(flatten)]
    pub identity: IdentityMetadataCreateParams,
    pub network_id: Uuid,
    pub cidr: Ipv4Net,
}

/// View of a subnet
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Subnet {
    #[serde(flatten)]
    pub identity: IdentityMetadata,
    pub network_id: Uuid,
    pub cidr: Ipv4Net,
}
