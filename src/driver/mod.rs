//! Driver-facing view of the settings.
//!
//! - [`options`] - Session options built from a [`SeleniumConfiguration`](crate::config::SeleniumConfiguration)

pub mod options;

pub use options::{DriverOptions, TestPlatform, DEFAULT_POLLING_INTERVAL, DEFAULT_WAIT_TIMEOUT};
