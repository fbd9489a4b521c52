//! Error types emitted by the Dropoff CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use dropoff_client::ClientBuildError;
use dropoff_core::{DirectoryError, DraftError};
use thiserror::Error;

/// Errors emitted by the Dropoff CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Both snapshot sources were supplied.
    #[error("--{first} and --{second} are mutually exclusive")]
    ConflictingSources {
        /// First flag name.
        first: &'static str,
        /// Second flag name.
        second: &'static str,
    },
    /// Only one of `--lat` and `--lon` was supplied.
    #[error("--lat and --lon must be supplied together")]
    IncompleteDevicePosition,
    /// The device position is outside valid WGS84 ranges.
    #[error("device position ({lat}, {lon}) is outside valid latitude/longitude ranges")]
    DevicePositionOutOfRange {
        /// Latitude as supplied.
        lat: f64,
        /// Longitude as supplied.
        lon: f64,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected or opened.
    #[error("failed to read {field} path {path:?}: {source}")]
    ReadSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The customer snapshot JSON could not be decoded.
    #[error("failed to parse customer snapshot at {path:?}: {source}")]
    ParseSnapshot {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The new customer failed validation.
    #[error("invalid customer: {0}")]
    InvalidDraft(#[from] DraftError),
    /// Constructing the customer service client failed.
    #[error("failed to build customer service client for {api_url:?}: {source}")]
    BuildClient {
        /// Configured base URL.
        api_url: String,
        /// Construction error.
        #[source]
        source: ClientBuildError,
    },
    /// The customer service rejected or failed a request.
    #[error("customer service request failed: {0}")]
    Directory(#[from] DirectoryError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
