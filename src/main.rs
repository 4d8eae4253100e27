//! Selenium Settings - Main Entry Point
//!
//! Loads a settings document, resolves it into driver options and prints
//! them. Useful for checking what a test run will pick up before starting it.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use selenium_settings::{
    config::{FileLoader, RawLoader, SeleniumSettings, DEFAULT_FILE_NAME},
    driver::DriverOptions,
    NAME, VERSION,
};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
}

/// Print the resolved options as a human-readable summary
fn print_summary(source: &str, options: &DriverOptions) {
    println!(
        "{bold}{blue}Selenium settings{reset} {dim}({source}){reset}",
        bold = colors::BOLD,
        blue = colors::BLUE,
        dim = colors::DIM,
        reset = colors::RESET
    );
    println!(
        "  {dim}Browser:{reset}          {green}{}{reset}",
        options.browser,
        dim = colors::DIM,
        green = colors::GREEN,
        reset = colors::RESET
    );
    println!(
        "  {dim}Platform:{reset}         {}",
        if options.platform.is_local() {
            format!("{green}{}{reset}", options.platform, green = colors::GREEN, reset = colors::RESET)
        } else {
            format!("{yellow}{}{reset}", options.platform, yellow = colors::YELLOW, reset = colors::RESET)
        },
        dim = colors::DIM,
        reset = colors::RESET
    );
    println!(
        "  {dim}Timeout:{reset}          {:?}",
        options.default_timeout,
        dim = colors::DIM,
        reset = colors::RESET
    );
    println!(
        "  {dim}Polling:{reset}          {:?}",
        options.polling_interval,
        dim = colors::DIM,
        reset = colors::RESET
    );

    if !options.arguments.is_empty() {
        println!("  {dim}Arguments:{reset}", dim = colors::DIM, reset = colors::RESET);
        for arg in &options.arguments {
            println!("    {}", arg);
        }
    }

    if !options.capabilities.is_empty() {
        println!("  {dim}Capabilities:{reset}", dim = colors::DIM, reset = colors::RESET);
        let mut keys: Vec<_> = options.capabilities.keys().collect();
        keys.sort();
        for key in keys {
            println!("    {} = {}", key, options.capabilities[key]);
        }
    }
}

/// Render the resolved options as JSON
fn options_json(options: &DriverOptions) -> serde_json::Value {
    serde_json::json!({
        "browser": options.browser.as_str(),
        "arguments": options.arguments,
        "capabilities": options.capabilities,
        "defaultTimeout": options.default_timeout.as_secs_f64(),
        "pollingInterval": options.polling_interval.as_secs_f64(),
        "testPlatform": options.platform.to_string(),
    })
}

/// Build the CLI command parser
fn build_cli() -> Command {
    Command::new(NAME)
        .version(VERSION)
        .about("Inspect the Selenium settings a test run will use")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to settings file (JSON or TOML)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .value_name("DIR")
                .help("Directory searched for selenium.actions.json (default: current)")
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with("config"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print resolved options as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress logging except errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
}

/// Pick the loader from CLI arguments and environment
fn resolve_loader(matches: &clap::ArgMatches) -> FileLoader {
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        return FileLoader::new(path);
    }

    let dir = matches
        .get_one::<PathBuf>("dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    FileLoader::from_env_or(dir.join(DEFAULT_FILE_NAME))
}

/// Initialize the tracing/logging subsystem
fn init_tracing(verbosity: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main application entry point
fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    init_tracing(matches.get_count("verbose"), matches.get_flag("quiet"));

    let loader = resolve_loader(&matches);
    let source = loader.path().display().to_string();
    debug!(path = %source, format = %loader.format(), "Using settings file");

    let settings = SeleniumSettings::new(loader);
    let options = DriverOptions::from_configuration(&settings)
        .with_context(|| format!("Failed to resolve Selenium settings from {}", source))?;

    info!(browser = %options.browser, platform = %options.platform, "Settings resolved");

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&options_json(&options))?);
    } else {
        print_summary(&source, &options);
    }

    Ok(())
}
