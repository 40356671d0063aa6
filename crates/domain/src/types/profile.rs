//! User profile types
//!
//! The profile record stored in the remote document store, keyed by the
//! provider-issued uid (one-to-one with Identity).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::{DocumentFields, FieldValue};

/// Profile record stored in the remote document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub university_title: String,
    pub graduation_year: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Render the record as typed document fields (uid is the document key,
    /// not a field).
    pub fn to_fields(&self) -> DocumentFields {
        let mut fields = DocumentFields::new();
        fields.insert("name".into(), FieldValue::Str(self.name.clone()));
        fields.insert("email".into(), FieldValue::Str(self.email.clone()));
        fields
            .insert("university_title".into(), FieldValue::Str(self.university_title.clone()));
        fields.insert("graduation_year".into(), FieldValue::Int(self.graduation_year));
        fields.insert("created_at".into(), FieldValue::Timestamp(self.created_at));
        fields.insert("updated_at".into(), FieldValue::Timestamp(self.updated_at));
        fields
    }

    /// Rebuild a record from stored fields.
    ///
    /// Records written by older application versions may miss fields; string
    /// fields back-fill as empty, numeric as zero, and timestamps default to
    /// the epoch so callers never observe undefined fields.
    pub fn from_fields(uid: &str, fields: &DocumentFields) -> Self {
        let text = |key: &str| {
            fields.get(key).and_then(FieldValue::as_str).unwrap_or_default().to_string()
        };
        let stamp = |key: &str| {
            fields.get(key).and_then(FieldValue::as_timestamp).unwrap_or_default()
        };

        Self {
            uid: uid.to_string(),
            name: text("name"),
            email: text("email"),
            university_title: text("university_title"),
            graduation_year: fields
                .get("graduation_year")
                .and_then(FieldValue::as_int)
                .unwrap_or_default(),
            created_at: stamp("created_at"),
            updated_at: stamp("updated_at"),
        }
    }
}

/// Raw registration input, as typed by the user. Numeric fields arrive as
/// text and are parsed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub university_title: String,
    pub graduation_year: String,
}

/// Partial profile mutation. Absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub university_title: Option<String>,
    pub graduation_year: Option<i64>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.university_title.is_none()
            && self.graduation_year.is_none()
    }
}
