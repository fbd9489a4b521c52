//! `add` and `deliver` commands, which write to the customer service.

use std::io::Write;

use clap::Parser;
use dropoff_core::{CustomerDraft, mark_delivered};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::source::DirectoryBuilder;
use crate::{
    ARG_ADDRESS, ARG_API_URL, ARG_DELIVERY_PERSON, ARG_ID, ARG_LAT, ARG_LON, ARG_NAME,
    ARG_ORDER_DETAILS, CliError, ENV_ADD_API_URL, ENV_DELIVER_API_URL, ENV_DELIVER_ID,
    write_json,
};

/// CLI arguments for the `add` subcommand.
///
/// Coordinates are taken as raw text so the draft validator can report
/// malformed numbers the same way the entry form does.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Create a customer on the customer service")]
#[ortho_config(prefix = "DROPOFF")]
pub(crate) struct AddArgs {
    /// Base URL of the customer service.
    #[arg(long = ARG_API_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_url: Option<String>,
    /// Customer name.
    #[arg(long = ARG_NAME, value_name = "text")]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Delivery address.
    #[arg(long = ARG_ADDRESS, value_name = "text")]
    #[serde(default)]
    pub(crate) address: Option<String>,
    /// Latitude in decimal degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lat: Option<String>,
    /// Longitude in decimal degrees.
    #[arg(long = ARG_LON, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lon: Option<String>,
    /// What the customer ordered.
    #[arg(long = ARG_ORDER_DETAILS, value_name = "text")]
    #[serde(default)]
    pub(crate) order_details: Option<String>,
    /// Courier assigned to the delivery.
    #[arg(long = ARG_DELIVERY_PERSON, value_name = "text")]
    #[serde(default)]
    pub(crate) delivery_person: Option<String>,
}

impl AddArgs {
    pub(crate) fn into_config(self) -> Result<AddConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AddConfig::try_from(merged)
    }
}

/// Resolved `add` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AddConfig {
    pub(crate) api_url: String,
    pub(crate) draft: CustomerDraft,
}

impl TryFrom<AddArgs> for AddConfig {
    type Error = CliError;

    fn try_from(args: AddArgs) -> Result<Self, Self::Error> {
        let api_url = args.api_url.ok_or(CliError::MissingArgument {
            field: ARG_API_URL,
            env: ENV_ADD_API_URL,
        })?;
        let draft = CustomerDraft {
            name: args.name.unwrap_or_default(),
            address: args.address.unwrap_or_default(),
            latitude: args.lat,
            longitude: args.lon,
            order_details: args.order_details,
            delivery_person: args.delivery_person,
        };
        Ok(Self { api_url, draft })
    }
}

/// CLI arguments for the `deliver` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Mark a customer as delivered")]
#[ortho_config(prefix = "DROPOFF")]
pub(crate) struct DeliverArgs {
    /// Identifier of the customer to mark delivered.
    #[arg(value_name = ARG_ID)]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Base URL of the customer service.
    #[arg(long = ARG_API_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_url: Option<String>,
}

impl DeliverArgs {
    pub(crate) fn into_config(self) -> Result<DeliverConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DeliverConfig::try_from(merged)
    }
}

/// Resolved `deliver` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeliverConfig {
    pub(crate) api_url: String,
    pub(crate) id: String,
}

impl TryFrom<DeliverArgs> for DeliverConfig {
    type Error = CliError;

    fn try_from(args: DeliverArgs) -> Result<Self, Self::Error> {
        let id = args
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_ID,
                env: ENV_DELIVER_ID,
            })?;
        let api_url = args.api_url.ok_or(CliError::MissingArgument {
            field: ARG_API_URL,
            env: ENV_DELIVER_API_URL,
        })?;
        Ok(Self { api_url, id })
    }
}

pub(crate) fn run_add(
    args: AddArgs,
    builder: &dyn DirectoryBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_add(&config, builder, writer)
}

pub(crate) fn execute_add(
    config: &AddConfig,
    builder: &dyn DirectoryBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let new_customer = config.draft.validate()?;
    let directory = builder.build(&config.api_url)?;
    let created = directory.create_customer(&new_customer)?;
    info!("created customer {} ({})", created.id, created.name);
    write_json(writer, &created)
}

pub(crate) fn run_deliver(
    args: DeliverArgs,
    builder: &dyn DirectoryBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_deliver(&config, builder, writer)
}

pub(crate) fn execute_deliver(
    config: &DeliverConfig,
    builder: &dyn DirectoryBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let directory = builder.build(&config.api_url)?;
    let updated = mark_delivered(directory.as_ref(), &config.id)?;
    info!("marked customer {} as {}", updated.id, updated.status);
    write_json(writer, &updated)
}
