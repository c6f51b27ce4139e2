//! Command-line argument parsing
//!
//! This module defines the command-line interface for the remote-control
//! server using the clap crate for argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the remote-control server
///
/// These arguments allow users to override configuration file settings
/// and control server behavior from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    ///
    /// Specifies the path to the TOML configuration file.
    /// If the file doesn't exist, a default configuration will be created.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Listen address override
    ///
    /// Override the remote-control listen address from the configuration
    /// file. Format: "IP:PORT" (e.g., "127.0.0.1:29295")
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Remote-control password override
    ///
    /// Override the password from the configuration file. When neither is
    /// set, a random password is generated and logged at startup.
    #[arg(short, long)]
    pub password: Option<String>,

    /// Enable debug logging
    ///
    /// When enabled, sets the logging level to debug, providing more
    /// detailed output for troubleshooting.
    #[arg(short, long)]
    pub debug: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: PathBuf::from("config.toml"),
            listen: None,
            password: None,
            debug: false,
        }
    }
}
