// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types for the messaging API

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use stratus_common::api::Name;

/// View of a queue
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Queue {
    pub name: Name,
    pub message_count: u64,
}

/// One message to post to a queue
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct MessagePost {
    /// arbitrary JSON payload
    pub body: serde_json::Value,
    /// seconds until the service discards the message
    pub ttl_secs: u64,
}

/// Identifiers assigned to a batch of posted messages
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct PostedMessages {
    pub ids: Vec<String>,
}

/// View of a queued message
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Message {
    pub id: String,
    pub body: serde_json::Value,
    pub ttl_secs: u64,
}

/// A batch of messages claimed for exclusive processing
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Claim {
    pub id: String,
    pub messages: Vec<Message>,
}

/// Parameters for claiming messages
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct ClaimCreate {
    /// maximum number of messages to claim
    pub limit: u32,
    /// seconds the claim remains exclusive
    pub grace_secs: u64,
}
