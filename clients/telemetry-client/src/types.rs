// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the telemetry API
//!
//! Telemetry is read-only from the harness's point of view: samples are
//! produced by the services themselves.

use chrono::DateTime;
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A measurable quantity one or more resources report
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Meter {
    pub name: String,
    pub unit: String,
}

/// One measurement of a meter for one resource
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Sample {
    pub meter: String,
    pub resource_id: Uuid,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate statistics for a meter over one period
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct Statistics {
    pub meter: String,
    pub period_secs: u64,
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}
