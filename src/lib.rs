//! Facade crate for the Dropoff delivery tracker.
//!
//! This crate re-exports the proximity ranking core and exposes the HTTP
//! customer directory behind the `client` feature.

#![forbid(unsafe_code)]

pub use dropoff_core::{
    ARRIVAL_RADIUS_METRES, Customer, CustomerDirectory, CustomerDraft, DeliveryStatus,
    DirectoryError, DraftError, EARTH_RADIUS_METRES, FlashKind, FlashMessage, FlashRelay,
    NewCustomer, ProximityRanker, RankedEntry, Ranking, distance_metres, filter_and_rank,
    find_nearest_eligible, haversine_metres, is_arrived, mark_delivered,
};

#[cfg(feature = "test-support")]
pub use dropoff_core::test_support;

#[cfg(feature = "client")]
pub use dropoff_client::{
    ClientBuildError, HttpCustomerDirectory, HttpCustomerDirectoryConfig, extract_error_message,
};
