// crates/universal-search-fixtures/src/fetch.rs
// ============================================================================
// Module: Fake Fetch
// Description: In-memory fetch that resolves canned responses.
// Purpose: Replace network calls with descriptor-backed responses in tests.
// Dependencies: async-trait, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`Fetch`] is the seam code under test uses to reach a search backend.
//! [`FakeFetch`] implements it from one [`MockResponse`]: every call resolves
//! to a fresh [`FetchResponse`] whose `ok`, `status`, body and headers are
//! derived from the descriptor. Requests are recorded for later assertions.
//! Invariants:
//! - `ok` is true exactly when `200 <= status < 300`.
//! - `json()` yields `data` when present, otherwise the whole descriptor.
//! - Header lookup never fails; a descriptor without headers yields an empty map.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::MockResponse;
use crate::headers::HeaderMap;
use crate::telemetry::FixtureEvent;
use crate::telemetry::FixtureEventSink;
use crate::telemetry::NoopEventSink;

// ============================================================================
// SECTION: Request / Response
// ============================================================================

/// Outbound request handed to a [`Fetch`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// HTTP method, upper case.
    pub method: String,
    /// Target URL.
    pub url: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl FetchRequest {
    /// GET request for `url`.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// POST request for `url` carrying a JSON body.
    #[must_use]
    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            headers: HeaderMap::json(),
            body: Some(body),
        }
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Response produced by a [`Fetch`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// HTTP status code.
    status: u16,
    /// Response headers.
    headers: HeaderMap,
    /// Decoded JSON body.
    body: Value,
}

impl FetchResponse {
    /// Derives a response from a descriptor.
    #[must_use]
    pub fn from_descriptor(descriptor: &MockResponse) -> Self {
        let body = descriptor.data.clone().unwrap_or_else(|| descriptor.to_value());
        Self {
            status: descriptor.status,
            headers: descriptor.headers.clone().unwrap_or_default(),
            body,
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers; empty when the descriptor carried none.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Resolves the JSON body.
    #[allow(clippy::unused_async, reason = "Mirrors the asynchronous body accessor of fetch.")]
    pub async fn json(&self) -> Value {
        self.body.clone()
    }

    /// Decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] when the body does not match `T`.
    pub async fn json_as<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let body = self.json().await;
        serde_json::from_value(body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Fetch errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Body did not decode into the requested shape.
    #[error("fetch body decode error: {0}")]
    Decode(String),
}

/// Asynchronous request/response seam.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issues `request` and resolves to its response.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when no response can be produced.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError>;
}

// ============================================================================
// SECTION: Fake Fetch
// ============================================================================

/// Fetch stand-in that serves one canned descriptor.
pub struct FakeFetch {
    /// Descriptor every call resolves from.
    descriptor: MockResponse,
    /// Requests received, oldest first.
    requests: Mutex<Vec<FetchRequest>>,
    /// Event destination.
    sink: Arc<dyn FixtureEventSink>,
}

impl FakeFetch {
    /// Creates a fake fetch serving `descriptor`.
    #[must_use]
    pub fn new(descriptor: MockResponse) -> Self {
        Self {
            descriptor,
            requests: Mutex::new(Vec::new()),
            sink: Arc::new(NoopEventSink),
        }
    }

    /// Routes fetch events to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn FixtureEventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Descriptor served by this fake.
    #[must_use]
    pub const fn descriptor(&self) -> &MockResponse {
        &self.descriptor
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl Fetch for FakeFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let response = FetchResponse::from_descriptor(&self.descriptor);
        self.sink.record(&FixtureEvent::FetchServed {
            url: request.url.clone(),
            status: response.status(),
            ok: response.ok(),
        });
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        Ok(response)
    }
}

/// Builds a [`FakeFetch`] serving a copy of `descriptor`.
#[must_use]
pub fn create_fake_fetch(descriptor: &MockResponse) -> FakeFetch {
    FakeFetch::new(descriptor.clone())
}
