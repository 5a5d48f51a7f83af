//! HTTP client for the media backup backend.

pub mod api_client;
mod backup_api;
pub mod payloads;

#[cfg(test)]
pub mod fake_api_client;

pub use api_client::ApiClient;
pub use backup_api::{ApiResponse, BackupApi, BackupApiBuilder, EndpointRequest};
pub use payloads::{BackupProgress, MediaFile, RemoteDeleteResult, RemoteFile};
