//! # Selenium Settings
//!
//! Lazily evaluated, strongly typed Selenium settings for browser automation.
//!
//! A settings document names the browser to drive, its launch arguments and
//! capabilities, wait timeouts and the platform to run on. This crate reads
//! that document once, on first use, and exposes it as read-only typed fields.
//!
//! ## Quick Start
//!
//! ```rust
//! use selenium_settings::{
//!     config::{Browser, SeleniumConfiguration, SeleniumSettings},
//!     driver::DriverOptions,
//! };
//!
//! let settings = SeleniumSettings::from_json(
//!     r#"{"selenium": {"browser": "chrome", "arguments": ["--headless"]}}"#,
//! );
//!
//! assert_eq!(settings.browser().unwrap(), Browser::Chrome);
//! assert_eq!(settings.test_platform().unwrap(), "local");
//!
//! let options = DriverOptions::from_configuration(&settings).unwrap();
//! assert_eq!(options.arguments, vec!["--headless"]);
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: Raw loaders, the parsed document and the lazy settings accessor
//! - [`driver`]: Validated session options for a WebDriver launcher
//!
//! ## Settings Document
//!
//! ```json
//! {
//!   "selenium": {
//!     "browser": "firefox",
//!     "arguments": ["--headless"],
//!     "capabilities": { "acceptInsecureCerts": "true" },
//!     "defaultTimeout": 30,
//!     "pollingInterval": 0.5,
//!     "testPlatform": "local"
//!   }
//! }
//! ```
//!
//! Every field is optional and keys are matched without regard to case.

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Full version string with name
pub const FULL_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Module Exports
// ============================================================================

/// Settings loading, parsing and lazy access.
pub mod config;

/// Session options derived from the settings.
pub mod driver;

// ============================================================================
// Re-exports for Convenience
// ============================================================================

pub use config::{
    Browser, ConfigError, ConfigurationDocument, DocumentFormat, FileLoader, RawLoader,
    SeleniumConfiguration, SeleniumSection, SeleniumSettings, StaticLoader,
};

pub use driver::{DriverOptions, TestPlatform};

// ============================================================================
// Prelude Module
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust
/// use selenium_settings::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{
        Browser, ConfigError, FileLoader, RawLoader, SeleniumConfiguration, SeleniumSettings,
    };
    pub use crate::driver::{DriverOptions, TestPlatform};
    pub use crate::{FULL_VERSION, NAME, VERSION};
}
