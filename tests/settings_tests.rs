//! Integration tests for the Selenium settings accessor
//!
//! Tests for defaulting, case-insensitive parsing, single evaluation under
//! concurrent access, failure caching and file loading.

use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use selenium_settings::config::{
    Browser, ConfigError, DocumentFormat, FileLoader, RawLoader, SeleniumConfiguration,
    SeleniumSettings, StaticLoader, DEFAULT_FILE_NAME,
};
use selenium_settings::driver::{DriverOptions, TestPlatform};

/// Loader that counts how often it is asked for text
#[derive(Debug)]
struct CountingLoader {
    text: String,
    calls: AtomicUsize,
}

impl CountingLoader {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RawLoader for CountingLoader {
    fn load(&self) -> Result<String, ConfigError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

/// Snapshot of every accessor field for comparisons
#[derive(Debug, PartialEq)]
struct Fields {
    browser: Browser,
    arguments: Option<Vec<String>>,
    capabilities: Option<HashMap<String, String>>,
    default_timeout: Option<f64>,
    polling_interval: Option<f64>,
    test_platform: String,
}

fn fields(config: &dyn SeleniumConfiguration) -> Fields {
    Fields {
        browser: config.browser().unwrap(),
        arguments: config.arguments().unwrap().map(<[String]>::to_vec),
        capabilities: config.capabilities().unwrap().cloned(),
        default_timeout: config.default_timeout().unwrap(),
        polling_interval: config.polling_interval().unwrap(),
        test_platform: config.test_platform().unwrap().to_string(),
    }
}

const FULL_DOCUMENT: &str = r#"{
    "selenium": {
        "browser": "safari",
        "arguments": ["--headless", "--window-size=1280,720"],
        "capabilities": {"acceptInsecureCerts": "true", "pageLoadStrategy": "eager"},
        "defaultTimeout": 15,
        "pollingInterval": 0.2,
        "testPlatform": "lambdatest"
    }
}"#;

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_empty_input_uses_defaults() {
    for text in ["", "   ", "\n\t\r\n"] {
        let settings = SeleniumSettings::from_json(text);
        assert_eq!(settings.browser().unwrap(), Browser::default());
        assert_eq!(settings.test_platform().unwrap(), "local");
        assert_eq!(settings.arguments().unwrap(), None);
        assert_eq!(settings.capabilities().unwrap(), None);
        assert_eq!(settings.default_timeout().unwrap(), None);
        assert_eq!(settings.polling_interval().unwrap(), None);
    }
}

#[test]
fn test_partial_document() {
    let settings = SeleniumSettings::from_json(
        r#"{"selenium":{"browser":"chrome","arguments":["--headless"],"defaultTimeout":30}}"#,
    );
    assert_eq!(settings.browser().unwrap(), Browser::Chrome);
    assert_eq!(
        settings.arguments().unwrap(),
        Some(&["--headless".to_string()][..])
    );
    assert_eq!(settings.default_timeout().unwrap(), Some(30.0));
    assert_eq!(settings.polling_interval().unwrap(), None);
    assert_eq!(settings.test_platform().unwrap(), "local");
}

#[test]
fn test_mismatched_case() {
    let settings = SeleniumSettings::from_json(r#"{"SELENIUM":{"Browser":"Firefox"}}"#);
    assert_eq!(settings.browser().unwrap(), Browser::Firefox);
    assert_eq!(settings.browser().unwrap().to_string(), "firefox");
}

#[test]
fn test_malformed_input_fails_every_access() {
    let loader = CountingLoader::new(r#"{"selenium":"#);
    let settings = SeleniumSettings::new(&loader);

    assert!(matches!(settings.browser(), Err(ConfigError::JsonError(_))));
    assert!(matches!(settings.arguments(), Err(ConfigError::JsonError(_))));
    assert!(matches!(settings.test_platform(), Err(ConfigError::JsonError(_))));
    assert_eq!(loader.calls(), 1);
}

#[test]
fn test_unknown_browser_is_a_parse_failure() {
    let settings = SeleniumSettings::from_json(r#"{"selenium":{"browser":"mosaic"}}"#);
    let err = settings.browser().unwrap_err();
    assert!(matches!(err, ConfigError::JsonError(_)));
    assert!(err.to_string().contains("mosaic"));
}

#[test]
fn test_null_browser_is_a_parse_failure() {
    let settings = SeleniumSettings::from_json(r#"{"selenium":{"browser":null}}"#);
    assert!(matches!(settings.browser(), Err(ConfigError::JsonError(_))));
    assert!(matches!(settings.test_platform(), Err(ConfigError::JsonError(_))));
}

#[test]
fn test_browser_ordinal() {
    let settings = SeleniumSettings::from_json(r#"{"selenium":{"browser":2}}"#);
    assert_eq!(settings.browser().unwrap(), Browser::Edge);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_parsing_is_deterministic() {
    let first = SeleniumSettings::from_json(FULL_DOCUMENT);
    let second = SeleniumSettings::from_json(FULL_DOCUMENT);
    assert_eq!(fields(&first), fields(&second));
    assert_eq!(first.document().unwrap(), second.document().unwrap());
}

#[test]
fn test_repeated_reads_load_once() {
    let loader = CountingLoader::new(FULL_DOCUMENT);
    let settings = SeleniumSettings::new(&loader);
    assert_eq!(loader.calls(), 0);

    let before = fields(&settings);
    let after = fields(&settings);

    assert_eq!(before, after);
    assert_eq!(loader.calls(), 1);
    assert_eq!(before.browser, Browser::Safari);
    assert_eq!(before.test_platform, "lambdatest");
    assert_eq!(before.polling_interval, Some(0.2));
    assert_eq!(
        before.capabilities.as_ref().and_then(|c| c.get("pageLoadStrategy")),
        Some(&"eager".to_string())
    );
}

#[test]
fn test_concurrent_first_access_loads_once() {
    const THREADS: usize = 16;

    let loader = Arc::new(CountingLoader::new(FULL_DOCUMENT));
    let settings = Arc::new(SeleniumSettings::new(Arc::clone(&loader)));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let settings = Arc::clone(&settings);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let addr = settings.document().unwrap() as *const _ as usize;
                (addr, settings.browser().unwrap())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(loader.calls(), 1);
    let (first_addr, _) = results[0];
    for (addr, browser) in results {
        assert_eq!(addr, first_addr);
        assert_eq!(browser, Browser::Safari);
    }
}

#[test]
fn test_absent_and_empty_collections_differ() {
    let absent = SeleniumSettings::from_json(r#"{"selenium":{}}"#);
    let empty = SeleniumSettings::from_json(r#"{"selenium":{"arguments":[],"capabilities":{}}}"#);

    assert_eq!(absent.arguments().unwrap(), None);
    assert_eq!(absent.capabilities().unwrap(), None);

    assert_eq!(empty.arguments().unwrap().map(<[String]>::len), Some(0));
    assert_eq!(empty.capabilities().unwrap().map(HashMap::len), Some(0));
}

#[test]
fn test_platform_default_rules() {
    for text in [
        "",
        "null",
        r#"{"selenium":null}"#,
        r#"{"selenium":{}}"#,
        r#"{"selenium":{"testPlatform":null}}"#,
    ] {
        let settings = SeleniumSettings::from_json(text);
        assert_eq!(settings.test_platform().unwrap(), "local", "input: {text}");
    }

    let settings = SeleniumSettings::from_json(r#"{"selenium":{"testPlatform":"Local "}}"#);
    assert_eq!(settings.test_platform().unwrap(), "Local ");
}

#[test]
fn test_unknown_fields_ignored() {
    let settings = SeleniumSettings::from_json(
        r#"{"version": 2, "selenium": {"browser": "edge", "grid": {"url": "x"}}, "playwright": {}}"#,
    );
    assert_eq!(settings.browser().unwrap(), Browser::Edge);
}

#[test]
fn test_document_not_cached_as_default() {
    let settings = SeleniumSettings::from_json("");
    let document = settings.document().unwrap();
    assert_eq!(document.selenium().test_platform(), None);
    assert_eq!(settings.test_platform().unwrap(), "local");
}

#[test]
fn test_toml_matches_json() {
    let toml = SeleniumSettings::new(StaticLoader::toml(
        r#"
            [selenium]
            browser = "safari"
            arguments = ["--headless", "--window-size=1280,720"]
            defaultTimeout = 15
            pollingInterval = 0.2
            testPlatform = "lambdatest"

            [selenium.capabilities]
            acceptInsecureCerts = "true"
            pageLoadStrategy = "eager"
        "#,
    ));
    let json = SeleniumSettings::from_json(FULL_DOCUMENT);
    assert_eq!(fields(&toml), fields(&json));
}

// ============================================================================
// File loading
// ============================================================================

#[test]
fn test_missing_file_is_empty_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let settings = SeleniumSettings::new(FileLoader::discover(dir.path()));

    assert_eq!(settings.browser().unwrap(), Browser::Chrome);
    assert_eq!(settings.test_platform().unwrap(), "local");
}

#[test]
fn test_discovered_json_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_FILE_NAME), FULL_DOCUMENT).unwrap();

    let settings = SeleniumSettings::new(FileLoader::discover(dir.path()));
    assert_eq!(settings.browser().unwrap(), Browser::Safari);
    assert_eq!(settings.default_timeout().unwrap(), Some(15.0));
}

#[test]
fn test_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selenium.toml");
    fs::write(&path, "[Selenium]\nBrowser = \"edge\"\ntestplatform = \"grid\"\n").unwrap();

    let loader = FileLoader::new(&path);
    assert_eq!(loader.format(), DocumentFormat::Toml);

    let settings = SeleniumSettings::new(loader);
    assert_eq!(settings.browser().unwrap(), Browser::Edge);
    assert_eq!(settings.test_platform().unwrap(), "grid");
}

#[test]
fn test_unreadable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a file
    let settings = SeleniumSettings::new(FileLoader::new(dir.path()));

    let err = settings.browser().unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
    assert!(matches!(settings.test_platform(), Err(ConfigError::IoError { .. })));
}

// ============================================================================
// Driver options
// ============================================================================

#[test]
fn test_driver_options_from_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_FILE_NAME), FULL_DOCUMENT).unwrap();

    let settings = SeleniumSettings::new(FileLoader::discover(dir.path()));
    let options = DriverOptions::from_configuration(&settings).unwrap();

    assert_eq!(options.browser, Browser::Safari);
    assert_eq!(options.arguments.len(), 2);
    assert_eq!(options.capabilities.len(), 2);
    assert_eq!(options.default_timeout.as_secs(), 15);
    assert_eq!(options.polling_interval.as_millis(), 200);
    assert_eq!(options.platform, TestPlatform::Remote("lambdatest".to_string()));
}
