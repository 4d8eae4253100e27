//! Selenium settings for browser automation.
//!
//! This module provides:
//! - Raw loaders supplying settings text (files, environment, in-memory)
//! - A parsed, immutable settings document with case-insensitive keys
//! - A lazily evaluated accessor exposing typed fields with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use selenium_settings::config::{FileLoader, SeleniumConfiguration, SeleniumSettings};
//!
//! // Nothing is read until the first field access
//! let settings = SeleniumSettings::new(FileLoader::discover("."));
//!
//! let browser = settings.browser().unwrap();
//! let platform = settings.test_platform().unwrap();
//! ```

mod browser;
mod document;
mod loader;
mod settings;

pub use browser::Browser;
pub use document::{ConfigurationDocument, DocumentFormat, SeleniumSection};
pub use loader::{FileLoader, RawLoader, StaticLoader, DEFAULT_FILE_NAME, SETTINGS_FILE_ENV};
pub use settings::{ConfigError, SeleniumConfiguration, SeleniumSettings, DEFAULT_TEST_PLATFORM};
