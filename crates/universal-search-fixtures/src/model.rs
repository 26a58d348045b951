// crates/universal-search-fixtures/src/model.rs
// ============================================================================
// Module: Search Shapes
// Description: Request and response shapes exchanged with search backends.
// Purpose: Give fixtures a typed view of the payloads the component consumes.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The search response shape mirrors the JSON the Universal Search component
//! expects from a backend: an ordered `results` list plus `total`, `page` and
//! `hasMore` pagination metadata.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One hit returned by a search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Stable result identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Link target for the hit.
    pub url: String,
    /// Optional highlighted excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Optional relevance score reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Paged search response.
///
/// # Invariants
/// - `results.len()` never exceeds `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Ordered hits for the requested page.
    pub results: Vec<SearchResult>,
    /// Total number of hits across all pages.
    pub total: u64,
    /// One-based page number.
    pub page: u32,
    /// Whether another page follows.
    pub has_more: bool,
}

/// Query handed to a search adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text query.
    pub query: String,
    /// One-based page number; zero is treated as the first page by backends.
    #[serde(default)]
    pub page: u32,
    /// Optional page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Facet filters keyed by field name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

impl SearchRequest {
    /// Builds a first-page request for `query`.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            ..Self::default()
        }
    }

    /// Sets the page number.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Adds a facet filter.
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }
}

// ============================================================================
// SECTION: Canned Data
// ============================================================================

/// Canned result list returned by the stub adapter and the success payload.
#[must_use]
pub fn search_results() -> Vec<SearchResult> {
    vec![
        SearchResult {
            id: "doc-1".to_string(),
            title: "Getting started with Universal Search".to_string(),
            url: "https://example.com/docs/getting-started".to_string(),
            snippet: Some("Install the component and mount it on any page.".to_string()),
            score: Some(0.98),
        },
        SearchResult {
            id: "doc-2".to_string(),
            title: "Configuring search adapters".to_string(),
            url: "https://example.com/docs/adapters".to_string(),
            snippet: Some("Adapters connect the component to a search backend.".to_string()),
            score: Some(0.87),
        },
        SearchResult {
            id: "doc-3".to_string(),
            title: "Theming the results panel".to_string(),
            url: "https://example.com/docs/theming".to_string(),
            snippet: None,
            score: Some(0.64),
        },
    ]
}

/// Full first-page response wrapping [`search_results`].
#[must_use]
pub fn search_response() -> SearchResponse {
    let results = search_results();
    SearchResponse {
        total: results.len() as u64,
        results,
        page: 1,
        has_more: false,
    }
}

/// Response with zero hits.
#[must_use]
pub const fn empty_results() -> SearchResponse {
    SearchResponse {
        results: Vec::new(),
        total: 0,
        page: 1,
        has_more: false,
    }
}
