//! `rank` and `nearest` commands for the Dropoff CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use dropoff_core::{Customer, RankedEntry, filter_and_rank, find_nearest_eligible};
use geo::Coord;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::source::{DirectoryBuilder, SnapshotSource, device_position, layered_api_url};
use crate::{
    ARG_API_URL, ARG_CUSTOMERS, ARG_LAT, ARG_LON, ARG_QUERY, CliError, ENV_NEAREST_API_URL,
    ENV_RANK_API_URL, write_json,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the customers still awaiting delivery by great-circle \
                 distance from the device. The snapshot comes from a JSON \
                 file or from the customer service; customers without a \
                 position are listed last. A --customers path given on the \
                 command line overrides an api_url from configuration files \
                 or the environment.",
    about = "Rank customers by distance from the device"
)]
#[ortho_config(prefix = "DROPOFF")]
pub(crate) struct RankArgs {
    /// Path to a JSON array of customer records.
    #[arg(long = ARG_CUSTOMERS, value_name = "path")]
    #[serde(default)]
    pub(crate) customers: Option<Utf8PathBuf>,
    /// Base URL of the customer service (e.g. "http://localhost:3000/api").
    #[arg(long = ARG_API_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_url: Option<String>,
    /// Device latitude in decimal degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Device longitude in decimal degrees.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Case-insensitive text matched against name, address, courier and order.
    #[arg(long = ARG_QUERY, value_name = "text")]
    #[serde(default)]
    pub(crate) query: Option<String>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged.with_cli_source(&self))
    }

    fn with_cli_source(mut self, cli: &Self) -> Self {
        self.api_url =
            layered_api_url(cli.customers.as_deref(), cli.api_url.as_deref(), self.api_url);
        self
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    pub(crate) source: SnapshotSource,
    pub(crate) device: Option<Coord<f64>>,
    pub(crate) query: Option<String>,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            source: SnapshotSource::resolve(args.customers, args.api_url, ENV_RANK_API_URL)?,
            device: device_position(args.lat, args.lon)?,
            query: args.query,
        })
    }
}

/// CLI arguments for the `nearest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Pick the closest customer still awaiting delivery. Prints \
                 null when the device position is unknown or nobody eligible \
                 has a position. A --customers path given on the command line \
                 overrides an api_url from configuration files or the \
                 environment.",
    about = "Show the nearest eligible customer"
)]
#[ortho_config(prefix = "DROPOFF")]
pub(crate) struct NearestArgs {
    /// Path to a JSON array of customer records.
    #[arg(long = ARG_CUSTOMERS, value_name = "path")]
    #[serde(default)]
    pub(crate) customers: Option<Utf8PathBuf>,
    /// Base URL of the customer service.
    #[arg(long = ARG_API_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_url: Option<String>,
    /// Device latitude in decimal degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Device longitude in decimal degrees.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
}

impl NearestArgs {
    pub(crate) fn into_config(self) -> Result<NearestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearestConfig::try_from(merged.with_cli_source(&self))
    }

    fn with_cli_source(mut self, cli: &Self) -> Self {
        self.api_url =
            layered_api_url(cli.customers.as_deref(), cli.api_url.as_deref(), self.api_url);
        self
    }
}

/// Resolved `nearest` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearestConfig {
    pub(crate) source: SnapshotSource,
    pub(crate) device: Option<Coord<f64>>,
}

impl TryFrom<NearestArgs> for NearestConfig {
    type Error = CliError;

    fn try_from(args: NearestArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            source: SnapshotSource::resolve(args.customers, args.api_url, ENV_NEAREST_API_URL)?,
            device: device_position(args.lat, args.lon)?,
        })
    }
}

/// One line of command output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RankedRow<'a> {
    pub(crate) customer: &'a Customer,
    pub(crate) distance_metres: Option<u64>,
    pub(crate) arrived: bool,
}

impl<'a> From<RankedEntry<'a>> for RankedRow<'a> {
    fn from(entry: RankedEntry<'a>) -> Self {
        Self {
            customer: entry.customer,
            distance_metres: entry.distance_metres,
            arrived: entry.is_arrived(),
        }
    }
}

pub(crate) fn run_rank(
    args: RankArgs,
    builder: &dyn DirectoryBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_rank(&config, builder, writer)
}

pub(crate) fn execute_rank(
    config: &RankConfig,
    builder: &dyn DirectoryBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let customers = config.source.load(builder)?;
    let rows: Vec<RankedRow<'_>> =
        filter_and_rank(&customers, config.device, config.query.as_deref())
            .into_iter()
            .map(RankedRow::from)
            .collect();
    info!("ranked {} of {} customers", rows.len(), customers.len());
    write_json(writer, &rows)
}

pub(crate) fn run_nearest(
    args: NearestArgs,
    builder: &dyn DirectoryBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_nearest(&config, builder, writer)
}

pub(crate) fn execute_nearest(
    config: &NearestConfig,
    builder: &dyn DirectoryBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let customers = config.source.load(builder)?;
    let nearest = find_nearest_eligible(&customers, config.device).map(RankedRow::from);
    if nearest.is_none() {
        info!("no eligible customer with a known position");
    }
    write_json(writer, &nearest)
}

#[cfg(test)]
pub(crate) fn rank_config_from_layers_for_test(
    cli: &RankArgs,
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged.with_cli_source(cli))
}
