//! Logging system setup and configuration
//!
//! This module handles the initialization of the tracing-based logging system
//! used throughout the server for debugging, monitoring, and diagnostic output.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Args;

/// Initialize the logging system
///
/// Sets up structured logging using the tracing crate with configurable
/// output format and filtering levels. The logging level can be controlled
/// through command-line arguments or environment variables.
///
/// # Arguments
/// * `args` - Command line arguments containing debug flag
///
/// # Environment Variables
/// * `RUST_LOG` - Override the default logging filter (e.g., "debug", "my_crate=trace")
pub fn setup_logging(args: &Args) -> Result<()> {
    setup_logging_with_format(args, false)
}

/// Initialize logging with an optional JSON format
///
/// Structured JSON output is useful for log aggregation systems and
/// machine parsing.
///
/// # Arguments
/// * `args` - Command line arguments containing debug flag
/// * `json_format` - Whether to use JSON formatting
pub fn setup_logging_with_format(args: &Args, json_format: bool) -> Result<()> {
    let level = if args.debug { "debug" } else { "info" };

    // Create a filter that respects RUST_LOG environment variable,
    // falling back to the level determined from command-line args
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // try_init so tests that set up logging repeatedly don't panic
    let result = if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(false))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_setup() {
        let args = Args::default();

        // The first call should succeed, subsequent calls will fail
        // because the global logger can only be initialized once
        let result = setup_logging(&args);
        assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn test_debug_logging() {
        let args = Args {
            debug: true,
            ..Default::default()
        };

        let result = setup_logging(&args);
        assert!(result.is_ok() || result.is_err());
    }
}
