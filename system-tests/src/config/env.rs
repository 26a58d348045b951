// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for browser system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8, empty values and unknown literals fail
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional Chrome/Chromium executable used when launching a browser.
    ChromeExecutable,
    /// Optional DevTools endpoint of an already running browser.
    CdpUrl,
    /// Optional external example page URL.
    DemoUrl,
    /// Optional directory served as the example page.
    DemoRoot,
    /// Optional bind address for the demo page server binary.
    HttpBind,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Run the browser with a visible window (`true`/`false` or `1`/`0`).
    Headed,
    /// Optional directory for per-test artifacts.
    RunRoot,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChromeExecutable => "UNIVERSAL_SEARCH_SYSTEM_TEST_CHROME",
            Self::CdpUrl => "UNIVERSAL_SEARCH_SYSTEM_TEST_CDP_URL",
            Self::DemoUrl => "UNIVERSAL_SEARCH_SYSTEM_TEST_DEMO_URL",
            Self::DemoRoot => "UNIVERSAL_SEARCH_SYSTEM_TEST_DEMO_ROOT",
            Self::HttpBind => "UNIVERSAL_SEARCH_SYSTEM_TEST_HTTP_BIND",
            Self::TimeoutSeconds => "UNIVERSAL_SEARCH_SYSTEM_TEST_TIMEOUT_SEC",
            Self::Headed => "UNIVERSAL_SEARCH_SYSTEM_TEST_HEADED",
            Self::RunRoot => "UNIVERSAL_SEARCH_SYSTEM_TEST_RUN_ROOT",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional browser executable; auto-detected when unset.
    pub chrome_executable: Option<PathBuf>,
    /// Optional DevTools endpoint; a browser is launched when unset.
    pub cdp_url: Option<String>,
    /// Optional external example page URL, used exactly as given.
    pub demo_url: Option<String>,
    /// Optional directory served as the example page.
    pub demo_root: Option<PathBuf>,
    /// Optional bind address for the demo page server binary.
    pub http_bind: Option<String>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
    /// Run the browser with a visible window.
    pub headed: bool,
    /// Optional directory for per-test artifacts.
    pub run_root: Option<PathBuf>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid URL, timeout or boolean).
    pub fn load() -> Result<Self, String> {
        let chrome_executable =
            read_env_nonempty(SystemTestEnv::ChromeExecutable.as_str())?.map(PathBuf::from);
        let cdp_url = read_env_nonempty(SystemTestEnv::CdpUrl.as_str())?
            .map(|value| {
                parse_url(SystemTestEnv::CdpUrl.as_str(), &value, &["ws", "wss", "http", "https"])
            })
            .transpose()?;
        let demo_url = read_env_nonempty(SystemTestEnv::DemoUrl.as_str())?
            .map(|value| parse_url(SystemTestEnv::DemoUrl.as_str(), &value, &["http", "https"]))
            .transpose()?;
        let demo_root = read_env_nonempty(SystemTestEnv::DemoRoot.as_str())?.map(PathBuf::from);
        let http_bind = read_env_nonempty(SystemTestEnv::HttpBind.as_str())?;
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let headed = parse_bool_env(
            SystemTestEnv::Headed.as_str(),
            read_env_nonempty(SystemTestEnv::Headed.as_str())?,
        )?;
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        Ok(Self {
            chrome_executable,
            cdp_url,
            demo_url,
            demo_root,
            http_bind,
            timeout,
            headed,
            run_root,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Validates a URL against the allowed schemes and returns it unchanged.
///
/// # Errors
///
/// Returns an error when the value does not parse or uses another scheme.
fn parse_url(name: &str, raw: &str, schemes: &[&str]) -> Result<String, String> {
    let trimmed = raw.trim();
    let url =
        url::Url::parse(trimmed).map_err(|err| format!("{name} must be a valid URL: {err}"))?;
    if !schemes.contains(&url.scheme()) {
        return Err(format!("{name} must use one of: {}", schemes.join(", ")));
    }
    Ok(trimmed.to_string())
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable, defaulting to `false` when unset.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
