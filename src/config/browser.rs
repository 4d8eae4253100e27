//! Browser driver enumeration and its name lookup.

use once_cell::sync::Lazy;
use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
use std::collections::HashMap;
use std::fmt;

use super::settings::ConfigError;

/// The browser driver a test session should be started with.
///
/// Variant order is significant: the position of a variant is its ordinal,
/// which is accepted in place of the name when deserializing. `Chrome` is
/// ordinal 0 and therefore the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Browser {
    /// Google Chrome / Chromium.
    Chrome,
    /// Mozilla Firefox.
    Firefox,
    /// Microsoft Edge.
    Edge,
    /// Apple Safari.
    Safari,
    /// Microsoft Internet Explorer.
    InternetExplorer,
    /// A remote WebDriver endpoint (grid or cloud provider).
    Remote,
    /// No real browser; useful for dry runs.
    Noop,
}

impl Default for Browser {
    fn default() -> Self {
        Self::Chrome
    }
}

/// Lower-case browser names accepted in settings documents.
static BROWSER_NAMES: Lazy<HashMap<&'static str, Browser>> = Lazy::new(|| {
    HashMap::from([
        ("chrome", Browser::Chrome),
        ("firefox", Browser::Firefox),
        ("edge", Browser::Edge),
        ("safari", Browser::Safari),
        ("internetexplorer", Browser::InternetExplorer),
        ("remote", Browser::Remote),
        ("noop", Browser::Noop),
    ])
});

impl Browser {
    /// All browsers in ordinal order.
    pub const ALL: [Browser; 7] = [
        Browser::Chrome,
        Browser::Firefox,
        Browser::Edge,
        Browser::Safari,
        Browser::InternetExplorer,
        Browser::Remote,
        Browser::Noop,
    ];

    /// Canonical names, used in error messages.
    pub const NAMES: &'static [&'static str] = &[
        "chrome",
        "firefox",
        "edge",
        "safari",
        "internetexplorer",
        "remote",
        "noop",
    ];

    /// Returns the canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
            Browser::Edge => "edge",
            Browser::Safari => "safari",
            Browser::InternetExplorer => "internetexplorer",
            Browser::Remote => "remote",
            Browser::Noop => "noop",
        }
    }

    /// Looks a browser up by its ordinal.
    ///
    /// ```rust
    /// use selenium_settings::config::Browser;
    ///
    /// assert_eq!(Browser::from_ordinal(1), Some(Browser::Firefox));
    /// assert_eq!(Browser::from_ordinal(99), None);
    /// ```
    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Browser {
    type Err = ConfigError;

    /// Case-insensitive lookup by name.
    ///
    /// ```rust
    /// use selenium_settings::config::Browser;
    ///
    /// assert_eq!("FireFox".parse::<Browser>().unwrap(), Browser::Firefox);
    /// assert!("netscape".parse::<Browser>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BROWSER_NAMES
            .get(s.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ConfigError::UnknownBrowser(s.to_string()))
    }
}

struct BrowserVisitor;

impl<'de> Visitor<'de> for BrowserVisitor {
    type Value = Browser;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a browser name or ordinal")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Browser, E> {
        v.parse()
            .map_err(|_| E::unknown_variant(v, Browser::NAMES))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Browser, E> {
        Browser::from_ordinal(v).ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Browser, E> {
        u64::try_from(v)
            .ok()
            .and_then(Browser::from_ordinal)
            .ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
    }
}

impl<'de> Deserialize<'de> for Browser {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BrowserVisitor)
    }
}
