// crates/universal-search-fixtures/src/adapter.rs
// ============================================================================
// Module: Search Adapters
// Description: Adapter interface and a recording stub implementation.
// Purpose: Satisfy adapter-shaped dependencies in tests without connectivity.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! [`SearchAdapter`] is the capability set a Universal Search backend adapter
//! offers: `search`, `connect` and `disconnect`. [`StubAdapter`] answers each
//! with a canned value and records every call through a [`StubMethod`].
//! Invariants:
//! - Stub calls never fail and never validate their arguments.
//! - Separate stub instances never share call logs or canned values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::calls::StubMethod;
use crate::model::SearchRequest;
use crate::model::SearchResult;
use crate::model::search_results;
use crate::telemetry::AdapterMethod;
use crate::telemetry::FixtureEvent;
use crate::telemetry::FixtureEventSink;
use crate::telemetry::NoopEventSink;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Adapter errors.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Backend connection could not be established or was lost.
    #[error("adapter connection error: {0}")]
    Connection(String),
    /// Backend rejected or failed the query.
    #[error("adapter search error: {0}")]
    Search(String),
}

/// Backend adapter consumed by the search component.
#[async_trait]
pub trait SearchAdapter: Send + Sync {
    /// Runs a query.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the backend cannot answer.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, AdapterError>;

    /// Opens the backend connection; resolves to whether it is connected.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the connection attempt fails.
    async fn connect(&self) -> Result<bool, AdapterError>;

    /// Closes the backend connection; resolves to whether it was closed.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when teardown fails.
    async fn disconnect(&self) -> Result<bool, AdapterError>;
}

// ============================================================================
// SECTION: Stub Adapter
// ============================================================================

/// Adapter stub with canned returns and call recording.
pub struct StubAdapter {
    /// `search` stub; returns [`search_results`] by default.
    search: StubMethod<SearchRequest, Vec<SearchResult>>,
    /// `connect` stub; returns `true` by default.
    connect: StubMethod<(), bool>,
    /// `disconnect` stub; returns `true` by default.
    disconnect: StubMethod<(), bool>,
    /// Event destination.
    sink: Arc<dyn FixtureEventSink>,
}

impl Default for StubAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl StubAdapter {
    /// Creates a stub with the default canned values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search: StubMethod::new(AdapterMethod::Search.as_str(), search_results()),
            connect: StubMethod::new(AdapterMethod::Connect.as_str(), true),
            disconnect: StubMethod::new(AdapterMethod::Disconnect.as_str(), true),
            sink: Arc::new(NoopEventSink),
        }
    }

    /// Routes adapter events to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn FixtureEventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replaces the canned search results.
    #[must_use]
    pub fn with_search_results(self, results: Vec<SearchResult>) -> Self {
        self.search.set_return(results);
        self
    }

    /// `search` stub, for call assertions and reconfiguration.
    #[must_use]
    pub const fn search_stub(&self) -> &StubMethod<SearchRequest, Vec<SearchResult>> {
        &self.search
    }

    /// `connect` stub, for call assertions and reconfiguration.
    #[must_use]
    pub const fn connect_stub(&self) -> &StubMethod<(), bool> {
        &self.connect
    }

    /// `disconnect` stub, for call assertions and reconfiguration.
    #[must_use]
    pub const fn disconnect_stub(&self) -> &StubMethod<(), bool> {
        &self.disconnect
    }

    /// Clears every call log.
    pub fn reset(&self) {
        self.search.reset();
        self.connect.reset();
        self.disconnect.reset();
    }

    /// Emits an adapter call event.
    fn record(&self, method: AdapterMethod, call_count: usize) {
        self.sink.record(&FixtureEvent::AdapterCall {
            method,
            call_count,
        });
    }
}

#[async_trait]
impl SearchAdapter for StubAdapter {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, AdapterError> {
        let (results, count) = self.search.invoke(request.clone());
        self.record(AdapterMethod::Search, count);
        Ok(results)
    }

    async fn connect(&self) -> Result<bool, AdapterError> {
        let (connected, count) = self.connect.invoke(());
        self.record(AdapterMethod::Connect, count);
        Ok(connected)
    }

    async fn disconnect(&self) -> Result<bool, AdapterError> {
        let (disconnected, count) = self.disconnect.invoke(());
        self.record(AdapterMethod::Disconnect, count);
        Ok(disconnected)
    }
}

/// Builds a fresh [`StubAdapter`] with default canned values.
#[must_use]
pub fn create_stub_adapter() -> StubAdapter {
    StubAdapter::new()
}
