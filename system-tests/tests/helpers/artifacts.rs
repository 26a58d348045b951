// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Scenario Artifacts
// Description: Per-scenario output directory for browser system-tests.
// Purpose: Keep the wait event log and the scenario outcome of each run.
// Dependencies: system-tests, universal-search-fixtures, serde_json
// ============================================================================

//! ## Overview
//! Each scenario writes into its own directory under the run root: the
//! fixture event log (`events.jsonl`) and an `outcome.json` recording
//! whether the scenario passed, hit a browser failure or failed a check.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use system_tests::config::SystemTestConfig;
use universal_search_fixtures::telemetry::FileEventSink;

use super::scenarios::ScenarioFailure;

/// Name of the JSON-lines fixture event log in each scenario directory.
pub const EVENTS_FILE: &str = "events.jsonl";
/// Name of the scenario outcome record.
pub const OUTCOME_FILE: &str = "outcome.json";

/// How a scenario ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Every check held.
    Passed,
    /// The page could not be driven.
    BrowserFailure,
    /// The page was driven but showed the wrong content.
    AssertionFailure,
}

/// Outcome record written at the end of a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub status: OutcomeStatus,
    pub message: Option<String>,
    pub duration_ms: u128,
}

impl ScenarioOutcome {
    /// Classifies a scenario result.
    pub fn from_result(
        scenario: &str,
        result: &Result<(), ScenarioFailure>,
        elapsed: Duration,
    ) -> Self {
        let (status, message) = match result {
            Ok(()) => (OutcomeStatus::Passed, None),
            Err(failure @ ScenarioFailure::Browser(_)) => {
                (OutcomeStatus::BrowserFailure, Some(failure.to_string()))
            }
            Err(failure @ ScenarioFailure::Assertion(_)) => {
                (OutcomeStatus::AssertionFailure, Some(failure.to_string()))
            }
        };
        Self {
            scenario: scenario.to_string(),
            status,
            message,
            duration_ms: elapsed.as_millis(),
        }
    }
}

/// Artifact directory for a single scenario.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    root: PathBuf,
}

impl RunArtifacts {
    /// Creates `<run root>/<scenario>`, defaulting the run root under `target/`.
    pub fn create(config: &SystemTestConfig, scenario: &str) -> io::Result<Self> {
        let root = config.run_root.as_ref().map_or_else(
            || default_run_root().join(scenario),
            |run_root| run_root.join(scenario),
        );
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Scenario directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Opens the fixture event log for this scenario.
    pub fn event_sink(&self) -> io::Result<FileEventSink> {
        FileEventSink::new(&self.root.join(EVENTS_FILE))
    }

    /// Writes the outcome record and returns its path.
    pub fn write_outcome(&self, outcome: &ScenarioOutcome) -> io::Result<PathBuf> {
        let path = self.root.join(OUTCOME_FILE);
        let bytes = serde_json::to_vec_pretty(outcome).map_err(io::Error::other)?;
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

fn default_run_root() -> PathBuf {
    let stamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
    PathBuf::from("target/system-tests").join(format!("run_{stamp}"))
}
