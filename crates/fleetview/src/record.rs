//! Core record types for fleetview.
//!
//! A [`Record`] is one vehicle as handed out by a record provider. Its id is
//! assigned by the provider and never changes; the display fields are plain
//! strings that this layer does not validate.

use serde::{Deserialize, Serialize};

/// Stable identifier of a record, unique within one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single vehicle record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier.
    pub id: RecordId,

    /// Display name of the vehicle.
    pub name: String,

    /// Manufacturer.
    pub make: String,

    /// Model designation.
    pub model: String,
}

impl Record {
    /// Create a record with an already-assigned id.
    #[must_use]
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            make: make.into(),
            model: model.into(),
        }
    }
}

/// A record that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Display name of the vehicle.
    pub name: String,
    /// Manufacturer.
    pub make: String,
    /// Model designation.
    pub model: String,
}

impl NewRecord {
    /// Create a new unsaved record.
    #[must_use]
    pub fn new(name: impl Into<String>, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            make: make.into(),
            model: model.into(),
        }
    }
}
