// crates/universal-search-fixtures/src/telemetry.rs
// ============================================================================
// Module: Fixture Telemetry
// Description: Structured events emitted by stubs and waits.
// Purpose: Log fixture activity as JSON lines without a logging stack.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Fixtures report what they served through a [`FixtureEventSink`]. Sinks
//! receive typed [`FixtureEvent`] values and decide where they go:
//! an append-only file, memory (for assertions) or nowhere.
//! Invariants:
//! - Sinks never fail the caller; write errors are dropped.
//! - Each emitted line is one JSON object carrying `timestamp_ms`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Stub method identifiers used in adapter events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterMethod {
    /// `search` call.
    Search,
    /// `connect` call.
    Connect,
    /// `disconnect` call.
    Disconnect,
}

impl AdapterMethod {
    /// Returns a stable label for the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
        }
    }
}

/// Fixture activity event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FixtureEvent {
    /// A fake fetch resolved a request.
    FetchServed {
        /// Requested URL.
        url: String,
        /// Status code served.
        status: u16,
        /// Whether the status is in the 2xx range.
        ok: bool,
    },
    /// A stub adapter method was invoked.
    AdapterCall {
        /// Invoked method.
        method: AdapterMethod,
        /// Total calls to the method including this one.
        call_count: usize,
    },
    /// A bounded wait observed its condition.
    WaitSatisfied {
        /// Caller-supplied wait label.
        label: String,
        /// Number of checks issued.
        attempts: u32,
        /// Elapsed time in milliseconds.
        elapsed_ms: u64,
    },
    /// A bounded wait gave up.
    WaitTimedOut {
        /// Caller-supplied wait label.
        label: String,
        /// Number of checks issued.
        attempts: u32,
        /// Elapsed time in milliseconds.
        elapsed_ms: u64,
        /// Last check error, when the check failed rather than reported "not yet".
        last_error: Option<String>,
    },
}

/// Timestamped envelope written by line-oriented sinks.
#[derive(Debug, Serialize)]
struct FixtureLogRecord<'a> {
    /// Milliseconds since the Unix epoch.
    timestamp_ms: u128,
    /// Wrapped event.
    #[serde(flatten)]
    event: &'a FixtureEvent,
}

impl<'a> FixtureLogRecord<'a> {
    /// Wraps `event` with the current wall-clock time.
    fn now(event: &'a FixtureEvent) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis());
        Self {
            timestamp_ms,
            event,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Destination for fixture events.
pub trait FixtureEventSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: &FixtureEvent);
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the log file in append mode, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl FixtureEventSink for FileEventSink {
    fn record(&self, event: &FixtureEvent) {
        if let Ok(payload) = serde_json::to_string(&FixtureLogRecord::now(event))
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Sink that keeps events in memory for later assertions.
#[derive(Default)]
pub struct MemoryEventSink {
    /// Captured events in arrival order.
    events: Mutex<Vec<FixtureEvent>>,
}

impl MemoryEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the captured events.
    #[must_use]
    pub fn events(&self) -> Vec<FixtureEvent> {
        self.events.lock().map_or_else(|_| Vec::new(), |events| events.clone())
    }
}

impl FixtureEventSink for MemoryEventSink {
    fn record(&self, event: &FixtureEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// No-op sink.
pub struct NoopEventSink;

impl FixtureEventSink for NoopEventSink {
    fn record(&self, _event: &FixtureEvent) {}
}
