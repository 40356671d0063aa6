//! Document store wire format
//!
//! Field values cross the wire as externally tagged objects
//! (`{"stringValue": "Ana"}`, `{"integerValue": "2020"}`, ...). Integers are
//! string-encoded on the wire; timestamps are RFC 3339.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unilink_domain::{DocumentFields, FieldValue};

/// A single wire-encoded field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WireValue {
    #[serde(rename = "stringValue")]
    Str(String),
    #[serde(rename = "integerValue", with = "int_as_string")]
    Int(i64),
    #[serde(rename = "timestampValue")]
    Timestamp(DateTime<Utc>),
    #[serde(rename = "nullValue")]
    Null(()),
}

impl From<&FieldValue> for WireValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Str(s) => WireValue::Str(s.clone()),
            FieldValue::Int(n) => WireValue::Int(*n),
            FieldValue::Timestamp(ts) => WireValue::Timestamp(*ts),
            FieldValue::Null => WireValue::Null(()),
        }
    }
}

impl From<WireValue> for FieldValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Str(s) => FieldValue::Str(s),
            WireValue::Int(n) => FieldValue::Int(n),
            WireValue::Timestamp(ts) => FieldValue::Timestamp(ts),
            WireValue::Null(()) => FieldValue::Null,
        }
    }
}

/// A document payload: `{"fields": {...}}`. The store echoes a `name` on
/// reads which we do not need and ignore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireDocument {
    pub fields: BTreeMap<String, WireValue>,
}

impl WireDocument {
    pub fn from_fields(fields: &DocumentFields) -> Self {
        Self {
            fields: fields.iter().map(|(k, v)| (k.clone(), WireValue::from(v))).collect(),
        }
    }

    pub fn into_fields(self) -> DocumentFields {
        self.fields.into_iter().map(|(k, v)| (k, FieldValue::from(v))).collect()
    }
}

mod int_as_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
