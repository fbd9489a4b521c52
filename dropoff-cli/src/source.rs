//! Where a command gets its customer snapshot and device position from.

use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use dropoff_client::HttpCustomerDirectory;
use dropoff_core::{Customer, CustomerDirectory};
use geo::Coord;

use crate::{ARG_API_URL, ARG_CUSTOMERS, CliError, fs};

/// Snapshot origin resolved from `--customers` / `--api-url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SnapshotSource {
    /// JSON array of customer records on disk.
    File(Utf8PathBuf),
    /// Live customer service.
    Api(String),
}

impl SnapshotSource {
    /// Pick exactly one of the two snapshot options.
    pub(crate) fn resolve(
        customers: Option<Utf8PathBuf>,
        api_url: Option<String>,
        env: &'static str,
    ) -> Result<Self, CliError> {
        match (customers, api_url) {
            (Some(path), None) => Ok(Self::File(path)),
            (None, Some(url)) => Ok(Self::Api(url)),
            (Some(_), Some(_)) => Err(CliError::ConflictingSources {
                first: ARG_CUSTOMERS,
                second: ARG_API_URL,
            }),
            (None, None) => Err(CliError::MissingArgument {
                field: ARG_API_URL,
                env,
            }),
        }
    }

    /// Fetch or read the snapshot.
    pub(crate) fn load(&self, builder: &dyn DirectoryBuilder) -> Result<Vec<Customer>, CliError> {
        match self {
            Self::File(path) => read_snapshot(path),
            Self::Api(url) => Ok(builder.build(url)?.list_customers()?),
        }
    }
}

/// Service URL left after merging layers.
///
/// A snapshot file named on the command line replaces a URL inherited from a
/// configuration file or the environment. Naming both on the command line
/// still conflicts.
pub(crate) fn layered_api_url(
    cli_customers: Option<&Utf8Path>,
    cli_api_url: Option<&str>,
    merged_api_url: Option<String>,
) -> Option<String> {
    if cli_customers.is_some() && cli_api_url.is_none() {
        None
    } else {
        merged_api_url
    }
}

/// Combine the optional `--lat` / `--lon` pair into a device position.
pub(crate) fn device_position(
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<Option<Coord<f64>>, CliError> {
    match (lat, lon) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => {
            if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
                Ok(Some(Coord { x: lon, y: lat }))
            } else {
                Err(CliError::DevicePositionOutOfRange { lat, lon })
            }
        }
        _ => Err(CliError::IncompleteDevicePosition),
    }
}

/// Builds a customer directory for commands talking to the live service.
pub(crate) trait DirectoryBuilder {
    fn build(&self, api_url: &str) -> Result<Box<dyn CustomerDirectory>, CliError>;
}

/// Builds [`HttpCustomerDirectory`] clients.
pub(crate) struct HttpDirectoryBuilder;

impl DirectoryBuilder for HttpDirectoryBuilder {
    fn build(&self, api_url: &str) -> Result<Box<dyn CustomerDirectory>, CliError> {
        let directory =
            HttpCustomerDirectory::new(api_url).map_err(|source| CliError::BuildClient {
                api_url: api_url.to_owned(),
                source,
            })?;
        Ok(Box::new(directory))
    }
}

fn read_snapshot(path: &Utf8Path) -> Result<Vec<Customer>, CliError> {
    require_existing(path, ARG_CUSTOMERS)?;
    let file = fs::open_utf8_file(path).map_err(|source| CliError::ReadSourceFile {
        field: ARG_CUSTOMERS,
        path: path.to_path_buf(),
        source,
    })?;
    let customers: Vec<Customer> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseSnapshot {
                path: path.to_path_buf(),
                source,
            }
        })?;
    log::debug!("read {} customers from {path}", customers.len());
    Ok(customers)
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::ReadSourceFile {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
