// crates/universal-search-fixtures/src/catalog.rs
// ============================================================================
// Module: Mock Response Catalog
// Description: Canned HTTP outcomes for search backend tests.
// Purpose: Substitute real backend responses with immutable descriptors.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`MockResponse`] describes one HTTP outcome: a status code plus either a
//! JSON payload with headers (success) or an error label and message
//! (failure). The built-in catalog exposes `success`, `error`, `notFound` and
//! `empty` through [`mock_responses`].
//! Invariants:
//! - Success descriptors (2xx) carry `data` and `headers`.
//! - Failure descriptors carry `error` and `message`, never `data` or `headers`.
//! - The built-in catalog is initialised once and never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::headers::HeaderMap;
use crate::model::empty_results;
use crate::model::search_response;

// ============================================================================
// SECTION: Descriptor
// ============================================================================

/// Canned HTTP outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON payload for successful outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Response headers for successful outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    /// Error label for failed outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MockResponse {
    /// Bare descriptor with only a status code.
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self {
            status,
            data: None,
            headers: None,
            error: None,
            message: None,
        }
    }

    /// Successful descriptor carrying `data` with JSON headers.
    #[must_use]
    pub fn with_payload(status: u16, data: Value) -> Self {
        Self {
            data: Some(data),
            headers: Some(HeaderMap::json()),
            ..Self::new(status)
        }
    }

    /// Failed descriptor carrying an error label and message.
    #[must_use]
    pub fn failure(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: Some(message.into()),
            ..Self::new(status)
        }
    }

    /// Replaces the headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Checks the success/failure field invariant.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidDescriptor`] naming the violated rule.
    pub fn validate(&self, name: &str) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidDescriptor {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if !(100..=599).contains(&self.status) {
            return Err(invalid("status must be between 100 and 599"));
        }
        if self.is_success() {
            if self.data.is_none() {
                return Err(invalid("success descriptors require data"));
            }
            if self.headers.is_none() {
                return Err(invalid("success descriptors require headers"));
            }
            if self.error.is_some() || self.message.is_some() {
                return Err(invalid("success descriptors must not carry error fields"));
            }
        } else {
            if self.error.is_none() || self.message.is_none() {
                return Err(invalid("failure descriptors require error and message"));
            }
            if self.data.is_some() || self.headers.is_some() {
                return Err(invalid("failure descriptors must not carry data or headers"));
            }
        }
        Ok(())
    }

    /// Serializes the descriptor into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Named entries of the built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MockResponseKind {
    /// 200 with a populated search response.
    Success,
    /// 500 server error.
    Error,
    /// 404 not found.
    NotFound,
    /// 200 with zero results.
    Empty,
}

impl MockResponseKind {
    /// All kinds in catalog order.
    pub const ALL: [Self; 4] = [Self::Success, Self::Error, Self::NotFound, Self::Empty];

    /// Returns the stable catalog name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::NotFound => "notFound",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for MockResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MockResponseKind {
    type Err = CatalogError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == raw)
            .ok_or_else(|| CatalogError::UnknownKind(raw.to_string()))
    }
}

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Name does not match a catalog entry.
    #[error("unknown mock response: {0}")]
    UnknownKind(String),
    /// Catalog JSON is missing a required entry.
    #[error("mock response catalog missing entry: {0}")]
    MissingEntry(&'static str),
    /// Descriptor violates the success/failure field rules.
    #[error("invalid mock response {name}: {reason}")]
    InvalidDescriptor {
        /// Catalog entry name.
        name: String,
        /// Violated rule.
        reason: String,
    },
    /// Catalog JSON could not be parsed.
    #[error("invalid mock response catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable set of canned responses.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponseCatalog {
    /// Descriptor returned for [`MockResponseKind::Success`].
    success: MockResponse,
    /// Descriptor returned for [`MockResponseKind::Error`].
    error: MockResponse,
    /// Descriptor returned for [`MockResponseKind::NotFound`].
    not_found: MockResponse,
    /// Descriptor returned for [`MockResponseKind::Empty`].
    empty: MockResponse,
}

impl MockResponseCatalog {
    /// Builds the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let success = serde_json::to_value(search_response()).unwrap_or(Value::Null);
        let empty = serde_json::to_value(empty_results()).unwrap_or(Value::Null);
        Self {
            success: MockResponse::with_payload(200, success),
            error: MockResponse::failure(500, "Internal Server Error", "Something went wrong"),
            not_found: MockResponse::failure(
                404,
                "Not Found",
                "The requested resource was not found",
            ),
            empty: MockResponse::with_payload(200, empty),
        }
    }

    /// Parses a catalog from a JSON object keyed by catalog name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the JSON is malformed, an entry is missing
    /// or unknown, or a descriptor violates the field rules.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, MockResponse> = serde_json::from_str(raw)?;
        let mut by_kind = BTreeMap::new();
        for (name, descriptor) in entries {
            let kind = name.parse::<MockResponseKind>()?;
            descriptor.validate(&name)?;
            by_kind.insert(kind, descriptor);
        }
        let mut take = |kind: MockResponseKind| {
            by_kind.remove(&kind).ok_or(CatalogError::MissingEntry(kind.as_str()))
        };
        Ok(Self {
            success: take(MockResponseKind::Success)?,
            error: take(MockResponseKind::Error)?,
            not_found: take(MockResponseKind::NotFound)?,
            empty: take(MockResponseKind::Empty)?,
        })
    }

    /// Returns the descriptor for `kind`.
    #[must_use]
    pub const fn get(&self, kind: MockResponseKind) -> &MockResponse {
        match kind {
            MockResponseKind::Success => &self.success,
            MockResponseKind::Error => &self.error,
            MockResponseKind::NotFound => &self.not_found,
            MockResponseKind::Empty => &self.empty,
        }
    }

    /// 200 with a populated search response.
    #[must_use]
    pub const fn success(&self) -> &MockResponse {
        &self.success
    }

    /// 500 server error.
    #[must_use]
    pub const fn error(&self) -> &MockResponse {
        &self.error
    }

    /// 404 not found.
    #[must_use]
    pub const fn not_found(&self) -> &MockResponse {
        &self.not_found
    }

    /// 200 with zero results.
    #[must_use]
    pub const fn empty(&self) -> &MockResponse {
        &self.empty
    }

    /// Iterates `(kind, descriptor)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (MockResponseKind, &MockResponse)> {
        MockResponseKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Process-wide built-in catalog.
static MOCK_RESPONSES: LazyLock<MockResponseCatalog> = LazyLock::new(MockResponseCatalog::builtin);

/// Returns the built-in catalog.
#[must_use]
pub fn mock_responses() -> &'static MockResponseCatalog {
    &MOCK_RESPONSES
}
