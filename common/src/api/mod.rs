// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data structures shared across the Stratus service APIs
//!
//! These are the wire representations common to more than one service:
//! identity metadata, validated names, byte counts, resource status enums,
//! and pagination.  The contents here are all HTTP-agnostic.

mod error;
pub use error::*;

use chrono::DateTime;
use chrono::Utc;
use parse_display::Display;
use parse_display::FromStr;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A name used in the API
///
/// Names are user-provided unique identifiers, highly constrained: they must
/// begin with a lowercase ASCII letter, contain only lowercase ASCII letters,
/// digits, and "-", must not end with a "-", and may be at most 63 characters
/// long.  A `Name` can only be constructed from a string that satisfies those
/// constraints.
#[derive(
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[display("{0}")]
#[serde(try_from = "String")]
pub struct Name(String);

impl TryFrom<String> for Name {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() > 63 {
            return Err(String::from("name may contain at most 63 characters"));
        }

        let mut iter = value.chars();

        let first = iter.next().ok_or_else(|| {
            String::from("name requires at least one character")
        })?;
        if !first.is_ascii_lowercase() {
            return Err(String::from(
                "name must begin with an ASCII lowercase character",
            ));
        }

        let mut last = first;
        for c in iter {
            last = c;

            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(format!(
                    "name contains invalid character: \"{}\" (allowed \
                     characters are lowercase ASCII, digits, and \"-\")",
                    c
                ));
            }
        }

        if last == '-' {
            return Err(String::from("name cannot end with \"-\""));
        }

        Ok(Name(value))
    }
}

impl std::str::FromStr for Name {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Name::try_from(String::from(value))
    }
}

impl<'a> From<&'a Name> for &'a str {
    fn from(n: &'a Name) -> Self {
        n.as_str()
    }
}

/// `Name` instances are comparable like Strings, primarily so that they can
/// be used as keys in trees.
impl<S> PartialEq<S> for Name
where
    S: AsRef<str>,
{
    fn eq(&self, other: &S) -> bool {
        self.0 == other.as_ref()
    }
}

/// Custom JsonSchema implementation to encode the constraints on Name
impl JsonSchema for Name {
    fn schema_name() -> String {
        "Name".to_string()
    }
    fn json_schema(
        _gen: &mut schemars::gen::SchemaGenerator,
    ) -> schemars::schema::Schema {
        schemars::schema::Schema::Object(schemars::schema::SchemaObject {
            metadata: Some(Box::new(schemars::schema::Metadata {
                title: Some("A name used in the API".to_string()),
                description: Some(
                    "Names must begin with a lower case ASCII letter, be \
                     composed exclusively of lowercase ASCII, digits, and \
                     '-', and may not end with a '-'."
                        .to_string(),
                ),
                ..Default::default()
            })),
            instance_type: Some(schemars::schema::SingleOrVec::Single(
                Box::new(schemars::schema::InstanceType::String),
            )),
            string: Some(Box::new(schemars::schema::StringValidation {
                max_length: Some(63),
                min_length: None,
                pattern: Some("[a-z](|[a-z0-9-]*[a-z0-9])".to_string()),
            })),
            extensions: BTreeMap::new(),
            ..Default::default()
        })
    }
}

impl Name {
    /// Parse a `Name`, marshalling any validation error into an appropriate
    /// [`Error`].
    pub fn from_param(value: String, label: &str) -> Result<Name, Error> {
        value.parse().map_err(|e| Error::InvalidValue {
            label: String::from(label),
            message: e,
        })
    }

    /// Return the `&str` representing the actual name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A count of bytes, typically used either for memory or storage capacity
///
/// The maximum supported byte count is [`i64::MAX`], so that any value can be
/// losslessly exchanged with services that store sizes as signed integers.
#[derive(
    Copy, Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
pub struct ByteCount(u64);

impl ByteCount {
    pub fn from_kibibytes_u32(kibibytes: u32) -> ByteCount {
        ByteCount(1024 * u64::from(kibibytes))
    }

    pub fn from_mebibytes_u32(mebibytes: u32) -> ByteCount {
        ByteCount(1024 * 1024 * u64::from(mebibytes))
    }

    pub fn from_gibibytes_u32(gibibytes: u32) -> ByteCount {
        ByteCount(1024 * 1024 * 1024 * u64::from(gibibytes))
    }

    pub fn to_bytes(&self) -> u64 {
        self.0
    }
    pub fn to_whole_kibibytes(&self) -> u64 {
        self.to_bytes() / 1024
    }
    pub fn to_whole_mebibytes(&self) -> u64 {
        self.to_bytes() / 1024 / 1024
    }
    pub fn to_whole_gibibytes(&self) -> u64 {
        self.to_bytes() / 1024 / 1024 / 1024
    }
}

#[derive(Debug, Eq, thiserror::Error, Ord, PartialEq, PartialOrd)]
pub enum ByteCountRangeError {
    #[error("value is too small for a byte count")]
    TooSmall,
    #[error("value is too large for a byte count")]
    TooLarge,
}

impl TryFrom<u64> for ByteCount {
    type Error = ByteCountRangeError;

    fn try_from(bytes: u64) -> Result<Self, Self::Error> {
        if i64::try_from(bytes).is_err() {
            Err(ByteCountRangeError::TooLarge)
        } else {
            Ok(ByteCount(bytes))
        }
    }
}

impl TryFrom<i64> for ByteCount {
    type Error = ByteCountRangeError;

    fn try_from(bytes: i64) -> Result<Self, Self::Error> {
        Ok(ByteCount(
            u64::try_from(bytes).map_err(|_| ByteCountRangeError::TooSmall)?,
        ))
    }
}

impl From<u32> for ByteCount {
    fn from(value: u32) -> Self {
        ByteCount(u64::from(value))
    }
}

/// The number of virtual CPUs assigned to a compute instance
#[derive(
    Copy, Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
pub struct InstanceCpuCount(pub u16);

/// Identity-related metadata that's included in nearly all public API objects
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
pub struct IdentityMetadata {
    /// unique, immutable, system-controlled identifier for each resource
    pub id: Uuid,
    /// unique, mutable, user-controlled identifier for each resource
    pub name: Name,
    /// human-readable free-form text about a resource
    pub description: String,
    /// timestamp when this resource was created
    pub time_created: DateTime<Utc>,
    /// timestamp when this resource was last modified
    pub time_modified: DateTime<Utc>,
}

/// Create-time identity-related parameters
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
pub struct IdentityMetadataCreateParams {
    pub name: Name,
    pub description: String,
}

/// Identifies a type of API resource
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[display(style = "kebab-case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Project,
    Instance,
    Image,
    Volume,
    Snapshot,
    Network,
    Subnet,
    Token,
    User,
    Container,
    Object,
    Queue,
    Message,
    Meter,
}

/// Running state of a compute instance
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
pub enum InstanceState {
    Creating,
    Starting,
    Running,
    Stopping,
    Stopped,
    Rebooting,
    Failed,
    Destroyed,
}

impl InstanceState {
    /// Returns true for states from which the instance can never reach a
    /// healthy target state without outside intervention.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, InstanceState::Failed)
    }
}

/// State of a storage volume
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
pub enum VolumeState {
    Creating,
    Available,
    Attaching,
    Attached,
    Detaching,
    Deleting,
    Error,
}

impl VolumeState {
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, VolumeState::Error)
    }
}

/// State of a machine image
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
pub enum ImageState {
    Queued,
    Saving,
    Active,
    Deactivated,
    Error,
    Deleted,
}

impl ImageState {
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, ImageState::Error)
    }
}

/// State of a point-in-time snapshot of a volume
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
pub enum SnapshotState {
    Creating,
    Available,
    Deleting,
    Error,
}

impl SnapshotState {
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, SnapshotState::Error)
    }
}

/// State of a virtual network
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
pub enum NetworkState {
    Building,
    Active,
    Down,
    Error,
}

impl NetworkState {
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, NetworkState::Error)
    }
}

/// A single page of results from a list endpoint
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct ResultsPage<T> {
    /// list of items on this page of results
    pub items: Vec<T>,
    /// token used to fetch the next page of results (if any)
    pub next_page: Option<String>,
}
