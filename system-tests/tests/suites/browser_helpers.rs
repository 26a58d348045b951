// system-tests/tests/suites/browser_helpers.rs
// ============================================================================
// Module: Browser Helper Tests
// Description: Smoke scenario logic driven against an in-memory page.
// Purpose: Validate navigation, bounded waits and failure kinds.
// Dependencies: system-tests helpers, tempfile
// ============================================================================

//! ## Overview
//! Smoke scenario logic driven against an in-memory page.
//! Invariants:
//! - Launch failures, navigation timeouts, wait timeouts and content
//!   mismatches surface as distinct failures.
//! - Navigation resets page state between scenarios.

use std::error::Error;
use std::net::TcpListener;
use std::time::Duration;

use helpers::browser::BrowserError;
use helpers::chromium::TestBrowser;
use helpers::chromium::browser_config;
use helpers::example_page::BUNDLE_SCRIPT_SELECTOR;
use helpers::example_page::GLOBAL_NAME;
use helpers::example_page::TITLE_LABEL;
use helpers::fake_page::FakeNavigation;
use helpers::fake_page::FakePage;
use helpers::fake_page::FakePageSpec;
use helpers::scenarios;
use helpers::scenarios::SAMPLE_QUERY;
use helpers::scenarios::ScenarioFailure;
use system_tests::config::SystemTestConfig;
use universal_search_fixtures::FixtureEvent;
use universal_search_fixtures::NoopEventSink;
use universal_search_fixtures::WaitError;
use universal_search_fixtures::WaitPolicy;
use universal_search_fixtures::telemetry::MemoryEventSink;

use crate::helpers;

const PAGE_URL: &str = "http://example.test/index.html";

fn fast_policy(timeout_ms: u64) -> WaitPolicy {
    WaitPolicy::with_timeout(Duration::from_millis(timeout_ms)).interval(Duration::from_millis(5))
}

#[tokio::test(flavor = "multi_thread")]
async fn healthy_page_passes_every_scenario() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec::example());
    let policy = fast_policy(1_000);

    let title = scenarios::observe_title(&page, PAGE_URL, &policy, &NoopEventSink).await?;
    scenarios::check_title(&title)?;
    let scripts =
        scenarios::observe_bundle_scripts(&page, PAGE_URL, &policy, &NoopEventSink).await?;
    scenarios::check_bundle_scripts(scripts.value)?;
    let waited = scenarios::observe_global_type(&page, PAGE_URL, &policy, &NoopEventSink).await?;
    scenarios::check_global_type(&waited.value)?;
    let typed = scenarios::observe_typed_query(&page, PAGE_URL, SAMPLE_QUERY).await?;
    scenarios::check_typed_query(SAMPLE_QUERY, &typed)?;

    assert_eq!(page.navigated_urls(), vec![PAGE_URL.to_string(); 4]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn late_title_is_awaited() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        title_after_reads: 2,
        ..FakePageSpec::example()
    });
    let sink = MemoryEventSink::new();
    let title = scenarios::observe_title(&page, PAGE_URL, &fast_policy(1_000), &sink).await?;

    scenarios::check_title(&title)?;
    assert_eq!(page.title_reads(), 3);
    assert!(matches!(
        sink.events().as_slice(),
        [FixtureEvent::WaitSatisfied { label, attempts: 3, .. }] if label == TITLE_LABEL
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_title_is_an_assertion_failure() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        title: "Some Other Page".to_string(),
        ..FakePageSpec::example()
    });
    let sink = MemoryEventSink::new();
    let title = scenarios::observe_title(&page, PAGE_URL, &fast_policy(50), &sink).await?;

    assert_eq!(title, "Some Other Page");
    assert!(matches!(
        scenarios::check_title(&title),
        Err(ScenarioFailure::Assertion(ref message)) if message.contains("Some Other Page")
    ));
    assert!(matches!(sink.events().last(), Some(FixtureEvent::WaitTimedOut { .. })));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn navigation_timeout_is_a_browser_failure() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        navigation: FakeNavigation::Timeout,
        ..FakePageSpec::example()
    });
    let observed = scenarios::observe_title(&page, PAGE_URL, &fast_policy(50), &NoopEventSink).await;

    assert!(matches!(
        observed,
        Err(BrowserError::NavigationTimeout { ref url, .. }) if url == PAGE_URL
    ));
    assert_eq!(page.title_reads(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn bundle_script_attached_late_is_found() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        scripts_after_queries: 3,
        ..FakePageSpec::example()
    });
    let sink = MemoryEventSink::new();
    let waited =
        scenarios::observe_bundle_scripts(&page, PAGE_URL, &fast_policy(2_000), &sink).await?;

    scenarios::check_bundle_scripts(waited.value)?;
    assert_eq!(waited.value, 1);
    assert_eq!(waited.attempts, 4);
    assert_eq!(page.script_queries(), 4);
    assert!(matches!(
        sink.events().as_slice(),
        [FixtureEvent::WaitSatisfied { label, attempts: 4, .. }] if label == BUNDLE_SCRIPT_SELECTOR
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_bundle_script_times_out() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        script_sources: vec!["./dist/other.js".to_string()],
        ..FakePageSpec::example()
    });
    let observed =
        scenarios::observe_bundle_scripts(&page, PAGE_URL, &fast_policy(100), &NoopEventSink)
            .await;

    match observed {
        Err(BrowserError::Wait(WaitError::Timeout {
            label,
            attempts,
            ..
        })) => {
            assert_eq!(label, BUNDLE_SCRIPT_SELECTOR);
            assert!(attempts >= 1);
            assert_eq!(page.script_queries(), attempts);
        }
        other => return Err(format!("expected wait timeout, got {other:?}").into()),
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn global_wait_polls_until_defined() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        global_defined_after_polls: Some(3),
        ..FakePageSpec::example()
    });
    let sink = MemoryEventSink::new();
    let waited =
        scenarios::observe_global_type(&page, PAGE_URL, &fast_policy(2_000), &sink).await?;

    assert_eq!(waited.value, "object");
    assert_eq!(waited.attempts, 4);
    assert_eq!(page.global_polls(), 4);
    let expected_label = format!("window.{GLOBAL_NAME}");
    assert!(matches!(
        sink.events().as_slice(),
        [FixtureEvent::WaitSatisfied { label, attempts: 4, .. }] if *label == expected_label
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn navigation_resets_global_polling() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        global_defined_after_polls: Some(1),
        ..FakePageSpec::example()
    });
    let policy = fast_policy(1_000);
    let first = scenarios::observe_global_type(&page, PAGE_URL, &policy, &NoopEventSink).await?;
    let second = scenarios::observe_global_type(&page, PAGE_URL, &policy, &NoopEventSink).await?;

    assert_eq!(first.attempts, 2);
    assert_eq!(second.attempts, 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn undefined_global_times_out() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        global_defined_after_polls: None,
        ..FakePageSpec::example()
    });
    let sink = MemoryEventSink::new();
    let observed = scenarios::observe_global_type(&page, PAGE_URL, &fast_policy(100), &sink).await;

    match observed {
        Err(BrowserError::Wait(WaitError::Timeout {
            label,
            attempts,
            ..
        })) => {
            assert_eq!(label, format!("window.{GLOBAL_NAME}"));
            assert!(attempts >= 1);
        }
        other => return Err(format!("expected wait timeout, got {other:?}").into()),
    }
    assert!(matches!(sink.events().last(), Some(FixtureEvent::WaitTimedOut { .. })));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn non_object_global_is_an_assertion_failure() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        global_type: "function".to_string(),
        ..FakePageSpec::example()
    });
    let waited =
        scenarios::observe_global_type(&page, PAGE_URL, &fast_policy(1_000), &NoopEventSink)
            .await?;

    assert!(matches!(
        scenarios::check_global_type(&waited.value),
        Err(ScenarioFailure::Assertion(_))
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn navigation_clears_typed_input() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec::example());
    let first = scenarios::observe_typed_query(&page, PAGE_URL, "first query").await?;
    let second = scenarios::observe_typed_query(&page, PAGE_URL, SAMPLE_QUERY).await?;

    assert_eq!(first, "first query");
    assert_eq!(second, SAMPLE_QUERY);
    scenarios::check_typed_query(SAMPLE_QUERY, &second)?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_search_input_is_reported() -> Result<(), Box<dyn Error>> {
    let page = FakePage::new(FakePageSpec {
        input_selector: "#other-input".to_string(),
        ..FakePageSpec::example()
    });
    let observed = scenarios::observe_typed_query(&page, PAGE_URL, SAMPLE_QUERY).await;

    assert!(matches!(
        observed,
        Err(BrowserError::ElementNotFound(ref selector)) if selector == "#search-input"
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_browser_executable_is_a_launch_failure() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let config = SystemTestConfig {
        chrome_executable: Some(dir.path().join("no-such-chrome")),
        ..SystemTestConfig::default()
    };
    let started = TestBrowser::start(&config, Duration::from_secs(5)).await;

    assert!(matches!(started, Err(BrowserError::Launch(_))));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_devtools_endpoint_is_reported() -> Result<(), Box<dyn Error>> {
    let addr = TcpListener::bind("127.0.0.1:0")?.local_addr()?;
    let url = format!("ws://{addr}/devtools/browser/missing");
    let config = SystemTestConfig {
        cdp_url: Some(url.clone()),
        ..SystemTestConfig::default()
    };
    let started = TestBrowser::start(&config, Duration::from_secs(5)).await;

    assert!(matches!(started, Err(BrowserError::Launch(ref message)) if message.contains(&url)));
    Ok(())
}

#[test]
fn explicit_executable_skips_browser_detection() {
    let config = SystemTestConfig {
        chrome_executable: Some("/opt/chromium/chrome".into()),
        headed: true,
        ..SystemTestConfig::default()
    };
    assert!(browser_config(&config, Duration::from_secs(5)).is_ok());
}
