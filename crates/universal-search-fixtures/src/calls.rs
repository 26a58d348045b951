// crates/universal-search-fixtures/src/calls.rs
// ============================================================================
// Module: Stub Methods
// Description: Canned-return wrappers that record every invocation.
// Purpose: Back stub collaborators with inspectable call history.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`StubMethod`] holds the value a stubbed operation returns and the
//! arguments of every call made to it. Tests configure the return with
//! [`StubMethod::set_return`] and inspect calls afterwards.
//! Invariants:
//! - Calls are recorded before the canned value is handed out.
//! - A poisoned lock never panics; the inner state is recovered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::PoisonError;

// ============================================================================
// SECTION: Stub Method
// ============================================================================

/// Stubbed operation with a canned return value and a call log.
#[derive(Debug)]
pub struct StubMethod<A, R> {
    /// Operation name, used in diagnostics.
    name: &'static str,
    /// Value handed to every caller.
    canned: Mutex<R>,
    /// Arguments of each call in order.
    calls: Mutex<Vec<A>>,
}

impl<A: Clone, R: Clone> StubMethod<A, R> {
    /// Creates a stub that returns `canned`.
    #[must_use]
    pub const fn new(name: &'static str, canned: R) -> Self {
        Self {
            name,
            canned: Mutex::new(canned),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Records `args` and returns a copy of the canned value together with
    /// the call count including this call.
    pub fn invoke(&self, args: A) -> (R, usize) {
        let count = {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push(args);
            calls.len()
        };
        let canned = self.canned.lock().unwrap_or_else(PoisonError::into_inner).clone();
        (canned, count)
    }

    /// Replaces the canned value for subsequent calls.
    pub fn set_return(&self, value: R) {
        *self.canned.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }

    /// Returns the operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true when at least one call was recorded.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Arguments of every recorded call, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<A> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Arguments of the most recent call.
    #[must_use]
    pub fn last_call(&self) -> Option<A> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    /// Clears the call log; the canned value is kept.
    pub fn reset(&self) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
