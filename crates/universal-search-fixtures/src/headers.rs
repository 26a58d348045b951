// crates/universal-search-fixtures/src/headers.rs
// ============================================================================
// Module: Header Map
// Description: Case-insensitive, insertion-ordered HTTP header mapping.
// Purpose: Give canned responses real header lookup semantics.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`HeaderMap`] keeps headers in insertion order and preserves the casing a
//! fixture author wrote, while lookups compare names ASCII case-insensitively.
//! Invariants:
//! - At most one entry exists per case-insensitive name; `insert` replaces the
//!   value in place and keeps the original position.
//! - Serialization emits a JSON object in insertion order.
//! - Equality ignores name casing and insertion order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Canonical content type header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// JSON media type used by canned success responses.
pub const APPLICATION_JSON: &str = "application/json";

// ============================================================================
// SECTION: Header Map
// ============================================================================

/// Ordered header mapping with case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    /// Entries in insertion order, names in their original casing.
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Creates an empty header map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Header map holding only `Content-Type: application/json`.
    #[must_use]
    pub fn json() -> Self {
        let mut headers = Self::new();
        headers.insert(CONTENT_TYPE, APPLICATION_JSON);
        headers
    }

    /// Inserts or replaces a header, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Returns the value stored under `name`, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|index| self.entries[index].1.as_str())
    }

    /// Returns true when `name` is present, ignoring ASCII case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|index| self.entries.remove(index).1)
    }

    /// Number of headers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no headers are present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Index of the entry matching `name` case-insensitively.
    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

impl PartialEq for HeaderMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for HeaderMap {}

impl<K, V> FromIterator<(K, V)> for HeaderMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

// ============================================================================
// SECTION: Serde
// ============================================================================

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeaderMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HeaderMapVisitor)
    }
}

/// Visitor that keeps duplicate names last-wins, in first-seen position.
struct HeaderMapVisitor;

impl<'de> Visitor<'de> for HeaderMapVisitor {
    type Value = HeaderMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of header names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut headers = HeaderMap::new();
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            headers.insert(name, value);
        }
        Ok(headers)
    }
}
