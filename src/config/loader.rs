//! Raw settings loaders.
//!
//! A loader only supplies text; it never parses. Returning an empty string
//! means "no settings supplied" and is not an error.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::document::DocumentFormat;
use super::settings::ConfigError;

/// File name looked up by [`FileLoader::discover`].
pub const DEFAULT_FILE_NAME: &str = "selenium.actions.json";

/// Environment variable naming an explicit settings file.
pub const SETTINGS_FILE_ENV: &str = "SELENIUM_SETTINGS_FILE";

/// Source of raw settings text.
pub trait RawLoader {
    /// Returns the document text, or an empty string when there is none.
    fn load(&self) -> Result<String, ConfigError>;

    /// Format of the text returned by [`load`](RawLoader::load).
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Json
    }
}

impl RawLoader for str {
    fn load(&self) -> Result<String, ConfigError> {
        Ok(self.to_string())
    }
}

impl RawLoader for String {
    fn load(&self) -> Result<String, ConfigError> {
        Ok(self.clone())
    }
}

impl<T: RawLoader + ?Sized> RawLoader for &T {
    fn load(&self) -> Result<String, ConfigError> {
        (**self).load()
    }

    fn format(&self) -> DocumentFormat {
        (**self).format()
    }
}

impl<T: RawLoader + ?Sized> RawLoader for Box<T> {
    fn load(&self) -> Result<String, ConfigError> {
        (**self).load()
    }

    fn format(&self) -> DocumentFormat {
        (**self).format()
    }
}

impl<T: RawLoader + ?Sized> RawLoader for Arc<T> {
    fn load(&self) -> Result<String, ConfigError> {
        (**self).load()
    }

    fn format(&self) -> DocumentFormat {
        (**self).format()
    }
}

/// In-memory settings text with an explicit format.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    text: String,
    format: DocumentFormat,
}

impl StaticLoader {
    /// Creates a loader over JSON text.
    pub fn json(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: DocumentFormat::Json,
        }
    }

    /// Creates a loader over TOML text.
    pub fn toml(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: DocumentFormat::Toml,
        }
    }
}

impl RawLoader for StaticLoader {
    fn load(&self) -> Result<String, ConfigError> {
        Ok(self.text.clone())
    }

    fn format(&self) -> DocumentFormat {
        self.format
    }
}

/// Reads settings from a file on disk.
///
/// A missing file is treated as "no settings". The format is detected from
/// the extension: `.toml` is TOML, anything else is JSON.
///
/// # Example
///
/// ```rust,no_run
/// use selenium_settings::config::{FileLoader, SeleniumConfiguration, SeleniumSettings};
///
/// let settings = SeleniumSettings::new(FileLoader::discover("."));
/// println!("browser: {}", settings.browser().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    /// Creates a loader for an explicit path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Creates a loader for [`DEFAULT_FILE_NAME`] inside `dir`.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// Uses the path in [`SETTINGS_FILE_ENV`] if set, otherwise `default`.
    pub fn from_env_or<P: Into<PathBuf>>(default: P) -> Self {
        match env::var_os(SETTINGS_FILE_ENV) {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::new(default),
        }
    }

    /// The path this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawLoader for FileLoader {
    fn load(&self) -> Result<String, ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                debug!(path = %self.path.display(), "Read settings file");
                Ok(content)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Settings file not found");
                Ok(String::new())
            }
            Err(e) => Err(ConfigError::IoError {
                path: self.path.clone(),
                source: Arc::new(e),
            }),
        }
    }

    fn format(&self) -> DocumentFormat {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "toml" => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}
