// crates/universal-search-fixtures/src/lib.rs
// ============================================================================
// Module: Universal Search Fixtures
// Description: Canned responses and stub collaborators for Universal Search tests.
// Purpose: Stand in for the search backend and adapters without real I/O.
// Dependencies: async-trait, serde, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! This crate ships the test doubles consumed by Universal Search unit,
//! integration and browser tests: a static catalog of canned HTTP outcomes,
//! a fake fetch that turns one outcome into a response object, a stub search
//! adapter that records its calls, and a bounded wait-for-condition primitive.
//! Invariants:
//! - Stubs never perform network I/O and resolve exactly once per call.
//! - Catalog descriptors are immutable after construction.
//! - Waits are always bounded by an explicit timeout.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod adapter;
pub mod calls;
pub mod catalog;
pub mod fetch;
pub mod headers;
pub mod model;
pub mod telemetry;
pub mod wait;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use adapter::AdapterError;
pub use adapter::SearchAdapter;
pub use adapter::StubAdapter;
pub use adapter::create_stub_adapter;
pub use calls::StubMethod;
pub use catalog::CatalogError;
pub use catalog::MockResponse;
pub use catalog::MockResponseCatalog;
pub use catalog::MockResponseKind;
pub use catalog::mock_responses;
pub use fetch::FakeFetch;
pub use fetch::Fetch;
pub use fetch::FetchError;
pub use fetch::FetchRequest;
pub use fetch::FetchResponse;
pub use fetch::create_fake_fetch;
pub use headers::HeaderMap;
pub use model::SearchRequest;
pub use model::SearchResponse;
pub use model::SearchResult;
pub use model::empty_results;
pub use model::search_results;
pub use telemetry::FixtureEvent;
pub use telemetry::FixtureEventSink;
pub use telemetry::NoopEventSink;
pub use wait::WaitError;
pub use wait::WaitPolicy;
pub use wait::Waited;
pub use wait::wait_until;
