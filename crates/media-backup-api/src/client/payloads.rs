//! JSON payloads exchanged with the backup, delete and scan endpoints.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

/// A media file on the device, as listed by a media scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Absolute path on the device.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Modification time as a Unix timestamp.
    #[serde(default)]
    pub modified_time: i64,
    /// Whether the file is selected for backup.
    #[serde(default)]
    pub selected: bool,
}

/// One progress record streamed back while a backup runs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BackupProgress {
    /// Percentage of `total_size` copied so far.
    pub progress: f64,
    /// File name of the file that was just copied.
    pub current_file: String,
    /// Bytes copied so far.
    pub copied_size: u64,
    /// Bytes selected for backup in total.
    pub total_size: u64,
    /// Number of files copied successfully so far.
    pub count_success: u64,
}

impl BackupProgress {
    /// Parses a backup response body: JSON records separated by blank lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not UTF-8 or a record is not a valid
    /// progress record.
    pub fn parse_stream(body: &[u8]) -> Result<Vec<Self>> {
        let body = std::str::from_utf8(body).context("backup response is not UTF-8")?;

        body.split("\n\n")
            .map(str::trim)
            .filter(|record| !record.is_empty())
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_str(record)
                    .with_context(|| format!("backup progress record {index} is malformed"))
            })
            .collect()
    }
}

/// A backed up file to remove from the device.
///
/// The backend compares checksums of both copies before deleting anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RemoteFile {
    /// Path on the device.
    pub remote_path: String,
    /// Path of the local backup copy.
    pub local_path: String,
}

/// Outcome of deleting one file from the device.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RemoteDeleteResult {
    /// Path on the device.
    pub path: String,
    /// Whether the file was removed.
    pub delete_success: bool,
    /// ISO 8601 time of the attempt.
    pub delete_time: String,
}

#[derive(Serialize)]
pub(crate) struct BackupBody<'a> {
    pub files: &'a [MediaFile],
    pub backup_dir: &'a str,
}

#[derive(Serialize)]
pub(crate) struct FilesBody<'a, T: Serialize> {
    pub files: &'a [T],
}

#[derive(Deserialize)]
pub(crate) struct RemoteDeleteResults {
    pub results: Vec<RemoteDeleteResult>,
}

#[derive(Deserialize)]
pub(crate) struct DeletedCount {
    pub count: u64,
}
