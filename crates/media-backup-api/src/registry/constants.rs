//! Address constants for the media backup backend.
//!
//! Every path starts with a `/` so it can be appended to a base address
//! without adding a separator.

/// Base address the backend listens on when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";

/// Reports whether an Android device is attached.
pub const CHECK_DEVICE_PATH: &str = "/api/check-device";

/// Lists the media files found on the device.
pub const SCAN_MEDIA_PATH: &str = "/api/scan-media";

/// Copies selected media files off the device.
pub const BACKUP_PATH: &str = "/api/backup";

/// Lists the files produced by the most recent backup.
pub const PREVIEW_BACKUP_PATH: &str = "/api/preview-backup";

/// Removes backed up files from the device.
pub const DELETE_REMOTE_FILES_PATH: &str = "/api/delete-remote-files";

/// Removes files from the local backup directory.
pub const DELETE_LOCAL_FILES_PATH: &str = "/api/delete-local-files";

/// Serves a single backed up media file.
pub const GET_MEDIA_FILE_PATH: &str = "/api/get-media-file";
