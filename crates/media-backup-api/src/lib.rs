//! Endpoint registry and HTTP client for the Android media backup backend.
//!
//! The backend serves a fixed set of endpoints below a single base address.
//! [`Endpoint`] names them, [`ApiConfig`] resolves them to full URLs and
//! [`BackupApi`] sends requests to them.
//!
//! ```
//! use media_backup_api::{Endpoint, api_url};
//!
//! assert_eq!(api_url(Endpoint::Backup), "http://localhost:5050/api/backup");
//! ```

mod app;
mod client;
mod command_line_arguments;
mod registry;

pub use app::App;
pub use client::{
    ApiClient, ApiResponse, BackupApi, BackupApiBuilder, BackupProgress, EndpointRequest,
    MediaFile, RemoteDeleteResult, RemoteFile,
};
pub use command_line_arguments::{Command, CommandLineArguments};
pub use registry::{
    ApiConfig, ApiConfigBuilder, ApiConfigError, Endpoint, UnknownEndpointError, api_url,
    constants,
};
