//! The closed set of endpoints exposed by the media backup backend.

pub use implementation::{Endpoint, UnknownEndpointError};

mod implementation {
    use std::{fmt, str::FromStr};

    use hyper::Method;
    use thiserror::Error;

    use crate::registry::constants::{
        BACKUP_PATH, CHECK_DEVICE_PATH, DELETE_LOCAL_FILES_PATH, DELETE_REMOTE_FILES_PATH,
        GET_MEDIA_FILE_PATH, PREVIEW_BACKUP_PATH, SCAN_MEDIA_PATH,
    };

    /// Returned when text does not name one of the known endpoints.
    #[derive(Clone, Debug, Error, PartialEq, Eq)]
    #[error("unknown endpoint `{name}`, expected one of: {}", Endpoint::symbolic_names())]
    pub struct UnknownEndpointError {
        name: String,
    }

    impl UnknownEndpointError {
        /// The text that failed to match a symbolic name.
        #[must_use]
        pub fn name(&self) -> &str {
            &self.name
        }
    }

    /// A backend endpoint, identified by its symbolic name.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum Endpoint {
        /// `CHECK_DEVICE`
        CheckDevice,
        /// `SCAN_MEDIA`
        ScanMedia,
        /// `BACKUP`
        Backup,
        /// `PREVIEW_BACKUP`
        PreviewBackup,
        /// `DELETE_REMOTE_FILES`
        DeleteRemoteFiles,
        /// `DELETE_LOCAL_FILES`
        DeleteLocalFiles,
        /// `GET_MEDIA_FILE`
        GetMediaFile,
    }

    impl Endpoint {
        /// Every endpoint, in declaration order.
        pub const ALL: [Self; 7] = [
            Self::CheckDevice,
            Self::ScanMedia,
            Self::Backup,
            Self::PreviewBackup,
            Self::DeleteRemoteFiles,
            Self::DeleteLocalFiles,
            Self::GetMediaFile,
        ];

        /// Path relative to the base address, always starting with `/`.
        #[must_use]
        pub const fn path(self) -> &'static str {
            match self {
                Self::CheckDevice => CHECK_DEVICE_PATH,
                Self::ScanMedia => SCAN_MEDIA_PATH,
                Self::Backup => BACKUP_PATH,
                Self::PreviewBackup => PREVIEW_BACKUP_PATH,
                Self::DeleteRemoteFiles => DELETE_REMOTE_FILES_PATH,
                Self::DeleteLocalFiles => DELETE_LOCAL_FILES_PATH,
                Self::GetMediaFile => GET_MEDIA_FILE_PATH,
            }
        }

        /// The upper snake case name used to refer to the endpoint in text.
        #[must_use]
        pub const fn symbolic_name(self) -> &'static str {
            match self {
                Self::CheckDevice => "CHECK_DEVICE",
                Self::ScanMedia => "SCAN_MEDIA",
                Self::Backup => "BACKUP",
                Self::PreviewBackup => "PREVIEW_BACKUP",
                Self::DeleteRemoteFiles => "DELETE_REMOTE_FILES",
                Self::DeleteLocalFiles => "DELETE_LOCAL_FILES",
                Self::GetMediaFile => "GET_MEDIA_FILE",
            }
        }

        /// HTTP method the backend serves this endpoint with.
        #[must_use]
        pub fn method(self) -> Method {
            match self {
                Self::CheckDevice | Self::PreviewBackup | Self::GetMediaFile => Method::GET,
                Self::ScanMedia
                | Self::Backup
                | Self::DeleteRemoteFiles
                | Self::DeleteLocalFiles => Method::POST,
            }
        }

        fn symbolic_names() -> String {
            Self::ALL
                .into_iter()
                .map(Self::symbolic_name)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    impl fmt::Display for Endpoint {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.symbolic_name())
        }
    }

    impl FromStr for Endpoint {
        type Err = UnknownEndpointError;

        /// Parses an exact symbolic name. No case folding or prefix matching.
        fn from_str(name: &str) -> Result<Self, Self::Err> {
            Self::ALL
                .into_iter()
                .find(|endpoint| endpoint.symbolic_name() == name)
                .ok_or_else(|| UnknownEndpointError {
                    name: name.to_owned(),
                })
        }
    }
}
