//! Test helpers: snapshot fixtures on disk and an in-memory directory builder.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use dropoff_core::test_support::MemoryDirectory;
use dropoff_core::{Customer, CustomerDirectory, DirectoryError};
use std::cell::RefCell;
use tempfile::TempDir;

/// Latitude of the depot used as the device position throughout the tests.
pub(super) const DEPOT_LAT: f64 = 51.5;
/// Longitude of the depot.
pub(super) const DEPOT_LON: f64 = -0.12;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Ada at the depot, Grace one degree north, Linus delivered at the depot and
/// Ken without a position.
pub(super) fn depot_snapshot() -> Vec<Customer> {
    vec![
        Customer::new("1", "Ada", "1 Analytical Way").with_position(DEPOT_LAT, DEPOT_LON),
        Customer::new("2", "Grace", "2 Compiler Road")
            .with_position(DEPOT_LAT + 1.0, DEPOT_LON)
            .with_order_details("Pizza margherita"),
        Customer::new("3", "Linus", "3 Kernel Street")
            .with_position(DEPOT_LAT, DEPOT_LON)
            .with_status("Delivered"),
        Customer::new("4", "Ken", "4 Pipe Lane"),
    ]
}

/// A temporary directory holding `customers.json`.
pub(super) struct SnapshotFile {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) path: Utf8PathBuf,
}

impl SnapshotFile {
    pub(super) fn with_customers(customers: &[Customer]) -> Self {
        let file = Self::empty();
        let payload = serde_json::to_vec_pretty(customers).expect("serialize snapshot");
        write_utf8(&file.path, &payload);
        file
    }

    /// The directory exists but `customers.json` has not been written.
    pub(super) fn empty() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("customers.json");
        Self {
            _dir: dir,
            root,
            path,
        }
    }
}

impl std::fmt::Debug for SnapshotFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotFile").field("path", &self.path).finish()
    }
}

/// Builds a fresh [`MemoryDirectory`] per command and records requested URLs.
#[derive(Debug, Default)]
pub(super) struct MemoryBuilder {
    customers: Vec<Customer>,
    failure: Option<DirectoryError>,
    pub(super) requested: RefCell<Vec<String>>,
}

impl MemoryBuilder {
    pub(super) fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers,
            ..Self::default()
        }
    }

    pub(super) fn failing(error: DirectoryError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }
}

impl DirectoryBuilder for MemoryBuilder {
    fn build(&self, api_url: &str) -> Result<Box<dyn CustomerDirectory>, CliError> {
        self.requested.borrow_mut().push(api_url.to_owned());
        let directory = match &self.failure {
            Some(error) => MemoryDirectory::failing(error.clone()),
            None => MemoryDirectory::with_customers(self.customers.clone()),
        };
        Ok(Box::new(directory))
    }
}

pub(super) fn parse_output(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("command output should be JSON")
}
