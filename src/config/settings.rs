//! Lazily evaluated Selenium settings.
//!
//! [`SeleniumSettings`] asks its [`RawLoader`] for the document text on the
//! first field read, parses it once and caches the outcome for the rest of its
//! lifetime. A failed parse is cached too: every later read reports the same
//! error without touching the loader again.

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::browser::Browser;
use super::document::{ConfigurationDocument, SeleniumSection};
use super::loader::{RawLoader, StaticLoader};

/// Platform reported when the document does not name one.
pub const DEFAULT_TEST_PLATFORM: &str = "local";

/// Errors that can occur while loading, parsing or validating settings.
///
/// Cloneable so a cached failure can be handed to every caller.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("Failed to read settings file {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Failed to parse JSON settings.
    #[error("Failed to parse JSON settings: {0}")]
    JsonError(#[source] Arc<serde_json::Error>),

    /// Failed to parse TOML settings.
    #[error("Failed to parse TOML settings: {0}")]
    TomlParseError(#[source] Arc<toml::de::Error>),

    /// Browser name not in the lookup table.
    #[error("Unknown browser: {0}. Valid browsers are: {}", Browser::NAMES.join(", "))]
    UnknownBrowser(String),

    /// Invalid settings value.
    #[error("Invalid settings: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonError(Arc::new(err))
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParseError(Arc::new(err))
    }
}

/// Read-only view of the Selenium settings consumed by driver builders.
pub trait SeleniumConfiguration {
    /// The browser to drive. Defaults to [`Browser::Chrome`].
    fn browser(&self) -> Result<Browser, ConfigError>;

    /// Launch arguments; `None` when the document does not specify any.
    fn arguments(&self) -> Result<Option<&[String]>, ConfigError>;

    /// Driver capabilities; `None` when the document does not specify any.
    fn capabilities(&self) -> Result<Option<&HashMap<String, String>>, ConfigError>;

    /// Default wait timeout in seconds.
    fn default_timeout(&self) -> Result<Option<f64>, ConfigError>;

    /// Wait polling interval in seconds.
    fn polling_interval(&self) -> Result<Option<f64>, ConfigError>;

    /// Platform to execute against, `"local"` unless specified.
    fn test_platform(&self) -> Result<&str, ConfigError>;
}

/// Settings accessor backed by a [`RawLoader`].
///
/// # Example
///
/// ```rust
/// use selenium_settings::config::{Browser, SeleniumConfiguration, SeleniumSettings};
///
/// let settings = SeleniumSettings::from_json(r#"{"selenium": {"browser": "edge"}}"#);
/// assert!(!settings.is_loaded());
///
/// assert_eq!(settings.browser().unwrap(), Browser::Edge);
/// assert_eq!(settings.test_platform().unwrap(), "local");
/// assert!(settings.is_loaded());
/// ```
pub struct SeleniumSettings<L> {
    loader: L,
    document: OnceCell<Result<ConfigurationDocument, ConfigError>>,
}

impl SeleniumSettings<StaticLoader> {
    /// Creates settings over an in-memory JSON document.
    pub fn from_json(text: impl Into<String>) -> Self {
        Self::new(StaticLoader::json(text))
    }
}

impl<L: RawLoader> SeleniumSettings<L> {
    /// Creates settings that will read from `loader` on first access.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            document: OnceCell::new(),
        }
    }

    /// Returns the parsed document, loading it if this is the first access.
    ///
    /// Concurrent first callers block until the single load completes.
    pub fn document(&self) -> Result<&ConfigurationDocument, ConfigError> {
        self.document
            .get_or_init(|| self.load_document())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether the document has been loaded (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.document.get().is_some()
    }

    /// The underlying loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn section(&self) -> Result<&SeleniumSection, ConfigError> {
        Ok(self.document()?.selenium())
    }

    fn load_document(&self) -> Result<ConfigurationDocument, ConfigError> {
        let format = self.loader.format();
        debug!(%format, "Loading Selenium settings");

        let result = self
            .loader
            .load()
            .and_then(|text| ConfigurationDocument::parse(&text, format));

        match &result {
            Ok(document) => {
                let section = document.selenium();
                info!(
                    browser = %section.browser(),
                    platform = section.test_platform().unwrap_or(DEFAULT_TEST_PLATFORM),
                    "Selenium settings loaded"
                );
            }
            Err(e) => warn!("Failed to load Selenium settings: {}", e),
        }

        result
    }
}

impl<L: RawLoader> SeleniumConfiguration for SeleniumSettings<L> {
    fn browser(&self) -> Result<Browser, ConfigError> {
        Ok(self.section()?.browser())
    }

    fn arguments(&self) -> Result<Option<&[String]>, ConfigError> {
        Ok(self.section()?.arguments())
    }

    fn capabilities(&self) -> Result<Option<&HashMap<String, String>>, ConfigError> {
        Ok(self.section()?.capabilities())
    }

    fn default_timeout(&self) -> Result<Option<f64>, ConfigError> {
        Ok(self.section()?.default_timeout())
    }

    fn polling_interval(&self) -> Result<Option<f64>, ConfigError> {
        Ok(self.section()?.polling_interval())
    }

    fn test_platform(&self) -> Result<&str, ConfigError> {
        Ok(self
            .section()?
            .test_platform()
            .unwrap_or(DEFAULT_TEST_PLATFORM))
    }
}

impl<L> std::fmt::Debug for SeleniumSettings<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeleniumSettings")
            .field("document", &self.document.get())
            .finish_non_exhaustive()
    }
}
