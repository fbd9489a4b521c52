//! Command-line interface for the Dropoff delivery tracker.
//!
//! `rank` and `nearest` read a customer snapshot from a JSON file or the live
//! customer service and print the proximity ranking as JSON. `add` and
//! `deliver` create customers and mark them delivered on the service.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::io::Write;

mod error;
mod fs;
mod manage;
mod rank;
mod source;

pub use error::CliError;

use manage::{AddArgs, DeliverArgs};
use rank::{NearestArgs, RankArgs};
use source::{DirectoryBuilder, HttpDirectoryBuilder};

pub(crate) const ARG_CUSTOMERS: &str = "customers";
pub(crate) const ARG_API_URL: &str = "api-url";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LON: &str = "lon";
pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_NAME: &str = "name";
pub(crate) const ARG_ADDRESS: &str = "address";
pub(crate) const ARG_ORDER_DETAILS: &str = "order-details";
pub(crate) const ARG_DELIVERY_PERSON: &str = "delivery-person";
pub(crate) const ARG_ID: &str = "id";
pub(crate) const ENV_RANK_API_URL: &str = "DROPOFF_CMDS_RANK_API_URL";
pub(crate) const ENV_NEAREST_API_URL: &str = "DROPOFF_CMDS_NEAREST_API_URL";
pub(crate) const ENV_ADD_API_URL: &str = "DROPOFF_CMDS_ADD_API_URL";
pub(crate) const ENV_DELIVER_API_URL: &str = "DROPOFF_CMDS_DELIVER_API_URL";
pub(crate) const ENV_DELIVER_ID: &str = "DROPOFF_CMDS_DELIVER_ID";

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "DROPOFF_LOG";

/// Run the Dropoff CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &HttpDirectoryBuilder, &mut stdout)
}

fn dispatch(
    command: Command,
    builder: &dyn DirectoryBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Rank(args) => rank::run_rank(args, builder, writer),
        Command::Nearest(args) => rank::run_nearest(args, builder, writer),
        Command::Add(args) => manage::run_add(args, builder, writer),
        Command::Deliver(args) => manage::run_deliver(args, builder, writer),
    }
}

/// Serialize `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *writer, value).map_err(CliError::SerializeOutput)?;
    writeln!(writer).map_err(CliError::WriteOutput)
}

#[derive(Debug, Parser)]
#[command(
    name = "dropoff",
    about = "Rank delivery customers by proximity and track drop-offs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List undelivered customers ordered by distance from the device.
    Rank(RankArgs),
    /// Show the closest customer still awaiting delivery.
    Nearest(NearestArgs),
    /// Create a customer on the customer service.
    Add(AddArgs),
    /// Mark a customer as delivered.
    Deliver(DeliverArgs),
}

#[cfg(test)]
mod tests;
