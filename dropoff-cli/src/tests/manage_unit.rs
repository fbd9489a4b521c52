//! Unit tests for the `add` and `deliver` commands.

use super::helpers::{MemoryBuilder, depot_snapshot, parse_output};
use super::*;
use crate::manage::{AddConfig, DeliverConfig, execute_add, execute_deliver};
use dropoff_core::{CustomerDraft, DirectoryError, DraftError};
use rstest::rstest;
use serde_json::json;

const API_URL: &str = "http://depot.example/api";

fn add_config(draft: CustomerDraft) -> AddConfig {
    AddConfig {
        api_url: API_URL.to_owned(),
        draft,
    }
}

#[rstest]
fn converting_add_without_api_url_errors() {
    let args = AddArgs {
        name: Some("Ada".into()),
        ..AddArgs::default()
    };
    let err = AddConfig::try_from(args).expect_err("missing api url");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_API_URL);
            assert_eq!(env, ENV_ADD_API_URL);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn add_args_become_a_raw_draft() {
    let args = AddArgs {
        api_url: Some(API_URL.into()),
        name: Some(" Ada ".into()),
        address: None,
        lat: Some("51.5".into()),
        lon: Some("-0.12".into()),
        order_details: Some("Tea".into()),
        delivery_person: None,
    };
    let config = AddConfig::try_from(args).expect("config should build");
    assert_eq!(
        config.draft,
        CustomerDraft {
            name: " Ada ".into(),
            address: String::new(),
            latitude: Some("51.5".into()),
            longitude: Some("-0.12".into()),
            order_details: Some("Tea".into()),
            delivery_person: None,
        }
    );
}

#[rstest]
fn add_creates_the_validated_customer() {
    let builder = MemoryBuilder::with_customers(depot_snapshot());
    let config = add_config(CustomerDraft {
        name: " Barbara ".into(),
        address: "5 Liskov Close".into(),
        latitude: Some("51.6".into()),
        longitude: Some(" -0.2 ".into()),
        delivery_person: Some("Sam".into()),
        ..CustomerDraft::default()
    });
    let mut buffer = Vec::new();
    execute_add(&config, &builder, &mut buffer).expect("add should succeed");

    let output = parse_output(&buffer);
    assert_eq!(output["id"], json!("5"));
    assert_eq!(output["name"], json!("Barbara"));
    assert_eq!(output["latitude"], json!(51.6));
    assert_eq!(output["longitude"], json!(-0.2));
    assert_eq!(output["deliveryPerson"], json!("Sam"));
    assert_eq!(output["status"], json!("pending"));
    assert_eq!(*builder.requested.borrow(), vec![API_URL.to_owned()]);
}

#[rstest]
#[case(
    CustomerDraft {
        address: "5 Liskov Close".into(),
        ..CustomerDraft::default()
    },
    DraftError::MissingName
)]
#[case(
    CustomerDraft {
        name: "Barbara".into(),
        address: "5 Liskov Close".into(),
        latitude: Some("51.6".into()),
        ..CustomerDraft::default()
    },
    DraftError::IncompletePosition
)]
fn add_rejects_invalid_drafts_before_contacting_the_service(
    #[case] draft: CustomerDraft,
    #[case] expected: DraftError,
) {
    let builder = MemoryBuilder::default();
    let mut buffer = Vec::new();
    let err = execute_add(&add_config(draft), &builder, &mut buffer).expect_err("invalid draft");
    match err {
        CliError::InvalidDraft(source) => assert_eq!(source, expected),
        other => panic!("expected InvalidDraft, found {other:?}"),
    }
    assert!(builder.requested.borrow().is_empty());
    assert!(buffer.is_empty());
}

#[rstest]
#[case(None, Some(API_URL), ARG_ID, ENV_DELIVER_ID)]
#[case(Some("  "), Some(API_URL), ARG_ID, ENV_DELIVER_ID)]
#[case(Some("7"), None, ARG_API_URL, ENV_DELIVER_API_URL)]
fn converting_deliver_without_required_fields_errors(
    #[case] id: Option<&str>,
    #[case] api_url: Option<&str>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = DeliverArgs {
        id: id.map(str::to_owned),
        api_url: api_url.map(str::to_owned),
    };
    let err = DeliverConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn deliver_marks_the_customer_delivered() {
    let builder = MemoryBuilder::with_customers(depot_snapshot());
    let config = DeliverConfig {
        api_url: API_URL.to_owned(),
        id: "2".to_owned(),
    };
    let mut buffer = Vec::new();
    execute_deliver(&config, &builder, &mut buffer).expect("deliver should succeed");

    let output = parse_output(&buffer);
    assert_eq!(output["id"], json!("2"));
    assert_eq!(output["status"], json!("delivered"));
}

#[rstest]
fn deliver_reports_unknown_customers() {
    let builder = MemoryBuilder::with_customers(depot_snapshot());
    let config = DeliverConfig {
        api_url: API_URL.to_owned(),
        id: "99".to_owned(),
    };
    let mut buffer = Vec::new();
    let err = execute_deliver(&config, &builder, &mut buffer).expect_err("unknown id");
    match err {
        CliError::Directory(DirectoryError::NotFound { id }) => assert_eq!(id, "99"),
        other => panic!("expected NotFound, found {other:?}"),
    }
}

#[rstest]
fn dispatch_routes_the_deliver_subcommand() {
    let cli = Cli::try_parse_from(["dropoff", "deliver", "--api-url", API_URL, "1"])
        .expect("arguments should parse");
    let builder = MemoryBuilder::with_customers(depot_snapshot());
    let mut buffer = Vec::new();
    dispatch(cli.command, &builder, &mut buffer).expect("deliver should succeed");
    assert_eq!(parse_output(&buffer)["status"], json!("delivered"));
}

#[rstest]
fn add_accepts_negative_coordinate_text() {
    let cli = Cli::try_parse_from([
        "dropoff", "add", "--api-url", API_URL, "--name", "Ada", "--address", "1 Way", "--lat",
        "-33.86", "--lon", "-70.6",
    ])
    .expect("arguments should parse");
    match cli.command {
        Command::Add(args) => {
            assert_eq!(args.lat.as_deref(), Some("-33.86"));
            assert_eq!(args.lon.as_deref(), Some("-70.6"));
        }
        other => panic!("expected add command, found {other:?}"),
    }
}
