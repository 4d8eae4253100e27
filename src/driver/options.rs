//! Driver session options.
//!
//! [`DriverOptions`] is what a WebDriver launcher consumes: it is built from a
//! [`SeleniumConfiguration`], fills in wait defaults and validates ranges the
//! settings accessor passes through untouched.
//!
//! # Example
//!
//! ```rust
//! use selenium_settings::config::SeleniumSettings;
//! use selenium_settings::driver::{DriverOptions, TestPlatform};
//! use std::time::Duration;
//!
//! let settings = SeleniumSettings::from_json(
//!     r#"{"selenium": {"browser": "firefox", "defaultTimeout": 30}}"#,
//! );
//! let options = DriverOptions::from_configuration(&settings).unwrap();
//!
//! assert_eq!(options.default_timeout, Duration::from_secs(30));
//! assert_eq!(options.platform, TestPlatform::Local);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::config::{Browser, ConfigError, SeleniumConfiguration, DEFAULT_TEST_PLATFORM};

/// Wait timeout used when the settings do not specify one.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Polling interval used when the settings do not specify one.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_millis(500);

/// Where a test session runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TestPlatform {
    /// A browser started on this machine.
    #[default]
    Local,
    /// A named remote platform (grid, cloud provider or hub URL).
    Remote(String),
}

impl TestPlatform {
    /// Classifies a platform string; `"local"` in any case is [`TestPlatform::Local`].
    pub fn parse(platform: &str) -> Self {
        if platform.eq_ignore_ascii_case(DEFAULT_TEST_PLATFORM) {
            TestPlatform::Local
        } else {
            TestPlatform::Remote(platform.to_string())
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, TestPlatform::Local)
    }
}

impl fmt::Display for TestPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestPlatform::Local => f.write_str(DEFAULT_TEST_PLATFORM),
            TestPlatform::Remote(name) => f.write_str(name),
        }
    }
}

/// Options for starting a WebDriver session.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOptions {
    /// Browser to launch.
    pub browser: Browser,

    /// Browser launch arguments.
    pub arguments: Vec<String>,

    /// Additional driver capabilities.
    pub capabilities: HashMap<String, String>,

    /// Default timeout for waits.
    pub default_timeout: Duration,

    /// Interval between wait condition checks.
    pub polling_interval: Duration,

    /// Platform the session runs on.
    pub platform: TestPlatform,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            browser: Browser::default(),
            arguments: Vec::new(),
            capabilities: HashMap::new(),
            default_timeout: DEFAULT_WAIT_TIMEOUT,
            polling_interval: DEFAULT_POLLING_INTERVAL,
            platform: TestPlatform::Local,
        }
    }
}

/// Converts seconds to a duration, rejecting values a `Duration` cannot hold.
fn seconds(field: &str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        ConfigError::ValidationError(format!(
            "{} must be a finite, non-negative number of seconds (got {})",
            field, value
        ))
    })
}

impl DriverOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds validated options from settings.
    ///
    /// # Errors
    ///
    /// Returns the settings' load error, or a validation error if the
    /// resulting options are inconsistent.
    pub fn from_configuration(config: &dyn SeleniumConfiguration) -> Result<Self, ConfigError> {
        let mut options = Self::new().browser(config.browser()?);

        if let Some(args) = config.arguments()? {
            options.arguments = args.to_vec();
        }
        if let Some(caps) = config.capabilities()? {
            options.capabilities = caps.clone();
        }
        if let Some(timeout) = config.default_timeout()? {
            options.default_timeout = seconds("defaultTimeout", timeout)?;
        }
        if let Some(interval) = config.polling_interval()? {
            options.polling_interval = seconds("pollingInterval", interval)?;
        }
        options.platform = TestPlatform::parse(config.test_platform()?);

        options.validate()?;

        debug!(
            browser = %options.browser,
            platform = %options.platform,
            arguments = options.arguments.len(),
            capabilities = options.capabilities.len(),
            "Driver options built"
        );

        Ok(options)
    }

    /// Sets the browser.
    pub fn browser(mut self, browser: Browser) -> Self {
        self.browser = browser;
        self
    }

    /// Adds a browser launch argument.
    pub fn add_arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    /// Adds a driver capability, replacing any previous value.
    pub fn capability(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.capabilities.insert(key.into(), value.into());
        self
    }

    /// Sets the default wait timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Sets the wait polling interval.
    pub fn polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = interval;
        self
    }

    /// Sets the platform.
    pub fn platform(mut self, platform: TestPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Validates the options.
    ///
    /// ```rust
    /// use selenium_settings::driver::DriverOptions;
    /// use std::time::Duration;
    ///
    /// assert!(DriverOptions::default().validate().is_ok());
    /// assert!(DriverOptions::default().timeout(Duration::ZERO).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "defaultTimeout must be greater than zero".to_string(),
            ));
        }

        if self.polling_interval > self.default_timeout {
            return Err(ConfigError::ValidationError(format!(
                "pollingInterval ({:?}) cannot exceed defaultTimeout ({:?})",
                self.polling_interval, self.default_timeout
            )));
        }

        if self.browser == Browser::Remote && self.platform.is_local() {
            return Err(ConfigError::ValidationError(
                "The remote browser requires a non-local testPlatform".to_string(),
            ));
        }

        Ok(())
    }
}
