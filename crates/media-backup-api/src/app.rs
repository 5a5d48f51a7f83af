//! Application entry point and orchestration.

use std::{io::Write, sync::Arc};

use anyhow::{Context as _, Result};

use crate::{
    client::{ApiClient, BackupApi, EndpointRequest},
    command_line_arguments::{Command, CommandLineArguments},
    registry::{ApiConfig, Endpoint},
};

/// The main application struct that runs a single command against the
/// backend.
#[derive(Default)]
pub struct App {
    /// Client override; the default hyper client is used when unset.
    client: Option<Arc<dyn ApiClient>>,
}

impl App {
    /// Creates a new application instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an application that sends requests through `client`.
    #[cfg(test)]
    pub fn with_client(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Run the command described by `arguments`, writing results to stdout.
    ///
    /// # Errors
    ///
    /// If the base URL is invalid, the request cannot be sent, or stdout
    /// cannot be written.
    pub async fn run(&self, arguments: CommandLineArguments) -> Result<()> {
        let mut stdout = std::io::stdout();
        self.run_with_output(arguments, &mut stdout).await
    }

    /// Run the command described by `arguments`, writing results to `output`.
    ///
    /// # Errors
    ///
    /// If the base URL is invalid, the request cannot be sent, or `output`
    /// cannot be written.
    pub async fn run_with_output<W: Write>(
        &self,
        arguments: CommandLineArguments,
        output: &mut W,
    ) -> Result<()> {
        let config = Self::api_config(arguments.base_url)?;
        tracing::debug!(base_url = config.base_url(), "Using backend");

        match arguments.command {
            Command::List => Self::list(&config, output)?,
            Command::Resolve { endpoint } => writeln!(output, "{}", config.url(endpoint))?,
            Command::Call {
                endpoint,
                query,
                body,
            } => {
                let mut request = EndpointRequest::new();
                for (key, value) in query {
                    request = request.query(key, value);
                }
                if let Some(body) = body {
                    let body = serde_json::from_str(&body)
                        .context("request body is not valid JSON")?;
                    request = request.json(body);
                }

                let response = self.backup_api(config).call(endpoint, &request).await?;
                writeln!(output, "{}", response.status)?;
                output.write_all(&response.body)?;
                writeln!(output)?;
            }
            Command::CheckDevice => {
                let connected = self.backup_api(config).check_device().await?;
                let state = if connected {
                    "connected"
                } else {
                    "disconnected"
                };
                writeln!(output, "{state}")?;
            }
        }

        Ok(())
    }

    /// Builds the configuration from an optional base URL override.
    fn api_config(base_url: Option<String>) -> Result<ApiConfig> {
        let mut builder = ApiConfig::builder();
        if let Some(base_url) = base_url {
            builder = builder.base_url(base_url);
        }
        builder.build().map_err(Into::into)
    }

    fn backup_api(&self, config: ApiConfig) -> BackupApi {
        let builder = BackupApi::builder(config);
        match &self.client {
            Some(client) => builder.client(Arc::clone(client)).build(),
            None => builder.build(),
        }
    }

    fn list<W: Write>(config: &ApiConfig, output: &mut W) -> Result<()> {
        for endpoint in Endpoint::ALL {
            writeln!(
                output,
                "{:<20} {:<5} {}",
                endpoint.symbolic_name(),
                endpoint.method().as_str(),
                config.url(endpoint)
            )?;
        }
        Ok(())
    }
}
