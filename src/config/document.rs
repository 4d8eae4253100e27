//! Parsed settings document.
//!
//! The document is produced by the deserializer and never mutated afterwards.
//! Fields are only settable inside this module; consumers read them through
//! [`SeleniumConfiguration`](super::SeleniumConfiguration) or the getters here.
//!
//! Keys of the root object and of the `selenium` section are matched without
//! regard to case, and unknown keys are skipped. Keys inside `capabilities`
//! are kept exactly as written. When a key appears more than once the last
//! occurrence wins.

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use super::browser::Browser;
use super::settings::ConfigError;

/// Serialization format of a raw settings document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// JSON text.
    #[default]
    Json,
    /// TOML text.
    Toml,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            DocumentFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Root of a settings document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationDocument {
    selenium: SeleniumSection,
}

/// The `selenium` section holding every recognized setting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeleniumSection {
    browser: Browser,
    arguments: Option<Vec<String>>,
    capabilities: Option<HashMap<String, String>>,
    default_timeout: Option<f64>,
    polling_interval: Option<f64>,
    test_platform: Option<String>,
}

impl ConfigurationDocument {
    /// Parses raw settings text.
    ///
    /// Empty or whitespace-only text is not parsed at all and yields the
    /// default document, as does a literal `null` document.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            debug!("No settings document supplied, using defaults");
            return Ok(Self::default());
        }

        debug!(%format, bytes = text.len(), "Parsing settings document");

        let parsed: Option<Self> = match format {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Toml => Some(toml::from_str(text)?),
        };

        Ok(parsed.unwrap_or_else(|| {
            warn!("Settings document is null, using defaults");
            Self::default()
        }))
    }

    /// The `selenium` section.
    pub fn selenium(&self) -> &SeleniumSection {
        &self.selenium
    }
}

impl SeleniumSection {
    pub fn browser(&self) -> Browser {
        self.browser
    }

    pub fn arguments(&self) -> Option<&[String]> {
        self.arguments.as_deref()
    }

    pub fn capabilities(&self) -> Option<&HashMap<String, String>> {
        self.capabilities.as_ref()
    }

    pub fn default_timeout(&self) -> Option<f64> {
        self.default_timeout
    }

    pub fn polling_interval(&self) -> Option<f64> {
        self.polling_interval
    }

    /// The platform exactly as written; `None` when absent or null.
    pub fn test_platform(&self) -> Option<&str> {
        self.test_platform.as_deref()
    }
}

// ============================================================================
// Case-insensitive deserialization
// ============================================================================

enum RootField {
    Selenium,
    Ignored,
}

enum SectionField {
    Browser,
    Arguments,
    Capabilities,
    DefaultTimeout,
    PollingInterval,
    TestPlatform,
    Ignored,
}

impl RootField {
    fn from_key(key: &str) -> Self {
        if key.eq_ignore_ascii_case("selenium") {
            RootField::Selenium
        } else {
            RootField::Ignored
        }
    }
}

impl SectionField {
    fn from_key(key: &str) -> Self {
        match key.to_ascii_lowercase().as_str() {
            "browser" => SectionField::Browser,
            "arguments" => SectionField::Arguments,
            "capabilities" => SectionField::Capabilities,
            "defaulttimeout" => SectionField::DefaultTimeout,
            "pollinginterval" => SectionField::PollingInterval,
            "testplatform" => SectionField::TestPlatform,
            _ => SectionField::Ignored,
        }
    }
}

/// Visitor for object keys, mapped through a case-folding lookup.
struct KeyVisitor<F>(fn(&str) -> F);

impl<'de, F> Visitor<'de> for KeyVisitor<F> {
    type Value = F;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a settings key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<F, E> {
        Ok((self.0)(v))
    }
}

impl<'de> Deserialize<'de> for RootField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_identifier(KeyVisitor(RootField::from_key))
    }
}

impl<'de> Deserialize<'de> for SectionField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_identifier(KeyVisitor(SectionField::from_key))
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = ConfigurationDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a settings object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut document = ConfigurationDocument::default();
        while let Some(field) = map.next_key::<RootField>()? {
            match field {
                RootField::Selenium => {
                    document.selenium = map
                        .next_value::<Option<SeleniumSection>>()?
                        .unwrap_or_default();
                }
                RootField::Ignored => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(document)
    }
}

impl<'de> Deserialize<'de> for ConfigurationDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct SectionVisitor;

impl<'de> Visitor<'de> for SectionVisitor {
    type Value = SeleniumSection;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a selenium settings object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut section = SeleniumSection::default();
        while let Some(field) = map.next_key::<SectionField>()? {
            match field {
                SectionField::Browser => section.browser = map.next_value()?,
                SectionField::Arguments => section.arguments = map.next_value()?,
                SectionField::Capabilities => section.capabilities = map.next_value()?,
                SectionField::DefaultTimeout => section.default_timeout = map.next_value()?,
                SectionField::PollingInterval => section.polling_interval = map.next_value()?,
                SectionField::TestPlatform => section.test_platform = map.next_value()?,
                SectionField::Ignored => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(section)
    }
}

impl<'de> Deserialize<'de> for SeleniumSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SectionVisitor)
    }
}
