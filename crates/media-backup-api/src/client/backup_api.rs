//! Typed access to the backup backend's endpoints.
//!
//! [`BackupApi`] resolves endpoint URLs through an [`ApiConfig`] and sends the
//! requests through an [`ApiClient`]. [`BackupApi::call`] passes payloads
//! through as JSON without interpreting them; the endpoint wrappers decode the
//! backend's response shapes into typed payloads such as [`BackupProgress`].

use std::{borrow::Cow, sync::Arc};

use anyhow::{Context as _, Result, bail};
use http_body_util::Full;
use hyper::{HeaderMap, Request, StatusCode, body::Bytes, header::CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    client::{
        api_client::{ApiClient, https_client},
        payloads::{
            BackupBody, BackupProgress, DeletedCount, FilesBody, MediaFile, RemoteDeleteResult,
            RemoteDeleteResults, RemoteFile,
        },
    },
    registry::{ApiConfig, Endpoint},
};

/// Query parameters and JSON body for a single endpoint call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EndpointRequest {
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl EndpointRequest {
    /// An empty request: no query string and no body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter. Parameters keep their insertion order.
    #[must_use]
    pub fn query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response from the backend with its body fully read.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// HTTP status returned by the backend.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Bytes,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).context("response body is not valid JSON")
    }

    /// The body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Body returned by the device check.
#[derive(Deserialize)]
struct DeviceStatus {
    connected: bool,
}

/// Client for the media backup backend.
#[derive(Clone)]
pub struct BackupApi {
    config: ApiConfig,
    client: Arc<dyn ApiClient>,
}

impl BackupApi {
    /// Creates a client for the backend at `config`, using the default hyper
    /// client.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::builder(config).build()
    }

    /// Start building a `BackupApi` for the backend at `config`.
    #[must_use]
    pub fn builder(config: ApiConfig) -> BackupApiBuilder {
        BackupApiBuilder {
            config,
            client: None,
        }
    }

    /// The configuration endpoint URLs are resolved against.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Builds the HTTP request for `endpoint` without sending it.
    ///
    /// The URI is the resolved endpoint URL, followed by a form encoded query
    /// string when `request` has query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or body cannot be encoded, or if the
    /// resulting URI is invalid.
    pub fn request_for(
        &self,
        endpoint: Endpoint,
        request: &EndpointRequest,
    ) -> Result<Request<Full<Bytes>>> {
        let mut uri = self.config.url(endpoint);
        if !request.query.is_empty() {
            uri.push('?');
            uri.push_str(&serde_urlencoded::to_string(&request.query)?);
        }

        let builder = Request::builder().method(endpoint.method()).uri(uri);
        let request = if let Some(body) = &request.body {
            builder
                .header(CONTENT_TYPE, "application/json")
                .body(Full::new(Bytes::from(serde_json::to_vec(body)?)))?
        } else {
            builder.body(Full::new(Bytes::new()))?
        };

        Ok(request)
    }

    /// Sends `request` to `endpoint`.
    ///
    /// Non-2xx statuses are returned as part of the [`ApiResponse`], not as
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the backend cannot
    /// be reached.
    pub async fn call(
        &self,
        endpoint: Endpoint,
        request: &EndpointRequest,
    ) -> Result<ApiResponse> {
        let request = self.request_for(endpoint, request)?;
        tracing::debug!(
            %endpoint,
            method = %request.method(),
            uri = %request.uri(),
            "Sending request"
        );

        let response = self
            .client
            .send(request)
            .await
            .inspect_err(|e| tracing::error!("Error sending request to {endpoint}: {e}"))
            .with_context(|| format!("request to {endpoint} failed"))?;

        let (parts, body) = response.into_parts();
        tracing::info!(%endpoint, status = %parts.status, "Received response");

        Ok(ApiResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }

    /// Asks the backend whether a device is attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached, answers with a
    /// non-2xx status, or the body lacks the `connected` flag.
    pub async fn check_device(&self) -> Result<bool> {
        let response = self
            .call(Endpoint::CheckDevice, &EndpointRequest::new())
            .await?;
        let response = require_success(Endpoint::CheckDevice, response)?;

        let status: DeviceStatus = serde_json::from_slice(&response.body)
            .context("device check response is missing `connected`")?;
        Ok(status.connected)
    }

    /// Scans `path` on the device for media files.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    pub async fn scan_media(&self, path: &str) -> Result<ApiResponse> {
        let request = EndpointRequest::new().json(serde_json::json!({ "path": path }));
        self.call(Endpoint::ScanMedia, &request).await
    }

    /// Copies `files` from the device into `backup_dir` on the backend host.
    ///
    /// The backend answers with one progress record per copied file; they are
    /// returned in the order they were sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached, answers with a
    /// non-2xx status, or streams a malformed progress record.
    pub async fn backup(
        &self,
        files: &[MediaFile],
        backup_dir: &str,
    ) -> Result<Vec<BackupProgress>> {
        let body = serde_json::to_value(BackupBody { files, backup_dir })?;
        let response = self
            .call(Endpoint::Backup, &EndpointRequest::new().json(body))
            .await?;
        let response = require_success(Endpoint::Backup, response)?;

        let records = BackupProgress::parse_stream(&response.body)?;
        tracing::debug!(records = records.len(), "Backup finished");
        Ok(records)
    }

    /// Lists the files of the latest backup into `backup_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    pub async fn preview_backup(&self, backup_dir: &str) -> Result<ApiResponse> {
        let request = EndpointRequest::new().query("backup_dir", backup_dir);
        self.call(Endpoint::PreviewBackup, &request).await
    }

    /// Deletes backed up `files` from the device.
    ///
    /// The backend refuses the whole batch with a 5xx status when any local
    /// copy does not match its device original.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached, refuses the batch,
    /// or answers without per-file results.
    pub async fn delete_remote_files(
        &self,
        files: &[RemoteFile],
    ) -> Result<Vec<RemoteDeleteResult>> {
        let body = serde_json::to_value(FilesBody { files })?;
        let response = self
            .call(Endpoint::DeleteRemoteFiles, &EndpointRequest::new().json(body))
            .await?;
        let response = require_success(Endpoint::DeleteRemoteFiles, response)?;

        let results: RemoteDeleteResults = serde_json::from_slice(&response.body)
            .context("delete response is missing `results`")?;
        Ok(results.results)
    }

    /// Deletes local backup copies, returning how many existed and were
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached, answers with a
    /// non-2xx status, or the body lacks the `count` field.
    pub async fn delete_local_files<S: AsRef<str>>(&self, paths: &[S]) -> Result<u64> {
        let files: Vec<&str> = paths.iter().map(AsRef::as_ref).collect();
        let body = serde_json::to_value(FilesBody {
            files: files.as_slice(),
        })?;
        let response = self
            .call(Endpoint::DeleteLocalFiles, &EndpointRequest::new().json(body))
            .await?;
        let response = require_success(Endpoint::DeleteLocalFiles, response)?;

        let deleted: DeletedCount = serde_json::from_slice(&response.body)
            .context("delete response is missing `count`")?;
        Ok(deleted.count)
    }

    /// Downloads a backed up media file.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    pub async fn get_media_file(&self, file_path: &str) -> Result<ApiResponse> {
        let request = EndpointRequest::new().query("file_path", file_path);
        self.call(Endpoint::GetMediaFile, &request).await
    }
}

/// Turns a non-2xx `response` into an error naming `endpoint`, keeping the
/// backend's explanation when it sent one.
fn require_success(endpoint: Endpoint, response: ApiResponse) -> Result<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let reason = response.text();
    let reason = reason.trim();
    if reason.is_empty() {
        bail!("{endpoint} returned {}", response.status);
    }
    bail!("{endpoint} returned {}: {reason}", response.status);
}

/// Builder for [`BackupApi`].
pub struct BackupApiBuilder {
    config: ApiConfig,
    client: Option<Arc<dyn ApiClient>>,
}

impl BackupApiBuilder {
    /// Provide a custom HTTP client (e.g. a test double).
    #[must_use]
    pub fn client(mut self, client: Arc<dyn ApiClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the `BackupApi`.
    #[must_use]
    pub fn build(self) -> BackupApi {
        let client = self
            .client
            .unwrap_or_else(|| Arc::new(https_client()) as Arc<dyn ApiClient>);

        BackupApi {
            config: self.config,
            client,
        }
    }
}
