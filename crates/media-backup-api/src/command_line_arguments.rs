//! Contains the command line arguments for the media-backup-api application.

use clap::{Parser, Subcommand};

use crate::registry::Endpoint;

/// Command line arguments for the media-backup-api application.
#[derive(Clone, Debug, Default, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArguments {
    /// The log level for the application.
    #[arg(short, long, default_value = "info", env)]
    pub log_level: String,
    /// Base address of the backup backend (scheme + host[:port]). Defaults to
    /// `http://localhost:5050`.
    #[arg(short = 'u', long, env)]
    pub base_url: Option<String>,
    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the media-backup-api application.
#[derive(Clone, Debug, Default, Subcommand)]
pub enum Command {
    /// Print every endpoint with its method and URL.
    #[default]
    List,
    /// Print the URL of a single endpoint.
    Resolve {
        /// Symbolic endpoint name, e.g. `BACKUP`.
        endpoint: Endpoint,
    },
    /// Send a request to an endpoint and print the response.
    Call {
        /// Symbolic endpoint name, e.g. `SCAN_MEDIA`.
        endpoint: Endpoint,
        /// Query parameter as `KEY=VALUE`. May be repeated.
        #[arg(short, long = "query", value_parser = parse_query_pair)]
        query: Vec<(String, String)>,
        /// JSON request body.
        #[arg(short = 'd', long)]
        body: Option<String>,
    },
    /// Report whether a device is attached to the backend.
    CheckDevice,
}

impl CommandLineArguments {
    /// Parse the command line arguments. Implemented manually to avoid exposing
    /// the `clap` dependency in the public API.
    #[must_use]
    pub fn parse_arguments() -> Self {
        <Self as Parser>::parse()
    }
}

fn parse_query_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}
