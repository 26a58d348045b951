// system-tests/src/lib.rs
// ============================================================================
// Module: Universal Search System Tests Library
// Description: Shared configuration and servers for browser system tests.
// Purpose: Provide common utilities for Universal Search system-test binaries.
// Dependencies: axum, tokio, url
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration and the example page server used by
//! the Universal Search system-tests binaries in `system-tests/tests` and by
//! the `universal_search_demo_server` binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod page_server;
