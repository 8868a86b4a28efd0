// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response shape checks
//!
//! Typed deserialization already rejects grossly malformed bodies, but it
//! also tolerates some drift (extra fields, string/number coercions done in
//! custom deserializers) that a conformance harness wants to flag.  The
//! validators here describe the documented JSON shape of each endpoint's
//! response and are checked against the raw body before typed parsing.
//!
//! Unknown extra fields are deliberately accepted: services may extend
//! their responses without breaking older harnesses.

use serde_json::Value;
use thiserror::Error;

/// Expected JSON type of one field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
    /// any type, including null
    Any,
}

impl FieldKind {
    fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
            FieldKind::Any => "any",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
            FieldKind::Any => true,
        }
    }
}

/// One field of a response body
#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    /// required fields must be present and non-null; optional fields may be
    /// absent or null but must match `kind` when they carry a value
    pub required: bool,
}

/// Documented shape of one endpoint's response body
#[derive(Clone, Copy, Debug)]
pub struct ResponseSchema {
    pub title: &'static str,
    pub fields: &'static [Field],
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum SchemaError {
    #[error("{title}: response body is not an object")]
    NotAnObject { title: &'static str },
    #[error("{title}: missing required field \"{field}\"")]
    MissingField { title: &'static str, field: &'static str },
    #[error(
        "{title}: field \"{field}\" has the wrong type \
         (expected {expected}, found {found})"
    )]
    WrongType {
        title: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl ResponseSchema {
    /// Check `value` against this schema.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        let object = value.as_object().ok_or(SchemaError::NotAnObject {
            title: self.title,
        })?;
        for field in self.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(SchemaError::MissingField {
                            title: self.title,
                            field: field.name,
                        });
                    }
                }
                Some(observed) => {
                    if !field.kind.matches(observed) {
                        return Err(SchemaError::WrongType {
                            title: self.title,
                            field: field.name,
                            expected: field.kind.name(),
                            found: json_type_name(observed),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Check a list response whose `items` are each expected to match this
    /// schema.
    pub fn validate_page(&self, value: &Value) -> Result<(), SchemaError> {
        let object = value.as_object().ok_or(SchemaError::NotAnObject {
            title: self.title,
        })?;
        let items = match object.get("items") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(SchemaError::WrongType {
                    title: self.title,
                    field: "items",
                    expected: "array",
                    found: json_type_name(other),
                })
            }
            None => {
                return Err(SchemaError::MissingField {
                    title: self.title,
                    field: "items",
                })
            }
        };
        for item in items {
            self.validate(item)?;
        }
        Ok(())
    }
}

const ID: Field =
    Field { name: "id", kind: FieldKind::String, required: true };
const NAME: Field =
    Field { name: "name", kind: FieldKind::String, required: true };
const DESCRIPTION: Field =
    Field { name: "description", kind: FieldKind::String, required: true };
const TIME_CREATED: Field =
    Field { name: "time_created", kind: FieldKind::String, required: true };
const TIME_MODIFIED: Field =
    Field { name: "time_modified", kind: FieldKind::String, required: true };
const STATE: Field =
    Field { name: "state", kind: FieldKind::String, required: true };

/// Shape of a compute instance view
pub static INSTANCE_VIEW: ResponseSchema = ResponseSchema {
    title: "instance",
    fields: &[
        ID,
        NAME,
        DESCRIPTION,
        TIME_CREATED,
        TIME_MODIFIED,
        STATE,
        Field { name: "project_id", kind: FieldKind::String, required: true },
        Field { name: "ncpus", kind: FieldKind::Integer, required: true },
        Field { name: "memory", kind: FieldKind::Integer, required: true },
        Field { name: "image_id", kind: FieldKind::String, required: true },
        Field {
            name: "network_id",
            kind: FieldKind::String,
            required: false,
        },
    ],
};

/// Shape of an image view
pub static IMAGE_VIEW: ResponseSchema = ResponseSchema {
    title: "image",
    fields: &[
        ID,
        NAME,
        DESCRIPTION,
        TIME_CREATED,
        TIME_MODIFIED,
        STATE,
        Field { name: "os", kind: FieldKind::String, required: true },
        Field { name: "version", kind: FieldKind::String, required: true },
        Field { name: "size", kind: FieldKind::Integer, required: false },
    ],
};

/// Shape of a volume view
pub static VOLUME_VIEW: ResponseSchema = ResponseSchema {
    title: "volume",
    fields: &[
        ID,
        NAME,
        DESCRIPTION,
        TIME_CREATED,
        TIME_MODIFIED,
        STATE,
        Field { name: "size", kind: FieldKind::Integer, required: true },
        Field {
            name: "attached_instance_id",
            kind: FieldKind::String,
            required: false,
        },
    ],
};

/// Shape of a network view
pub static NETWORK_VIEW: ResponseSchema = ResponseSchema {
    title: "network",
    fields: &[ID, NAME, DESCRIPTION, TIME_CREATED, TIME_MODIFIED, STATE],
};

/// Shape of a token-issue response
pub static TOKEN_VIEW: ResponseSchema = ResponseSchema {
    title: "token",
    fields: &[
        Field { name: "token", kind: FieldKind::String, required: true },
        Field {
            name: "expires_at",
            kind: FieldKind::String,
            required: true,
        },
        Field {
            name: "project_id",
            kind: FieldKind::String,
            required: true,
        },
        Field { name: "catalog", kind: FieldKind::Array, required: true },
    ],
};
