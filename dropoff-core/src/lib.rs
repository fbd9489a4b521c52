//! Core domain types for the Dropoff delivery tracker.
//!
//! The crate is free of I/O. It models customer records as delivered by the
//! remote customer service, ranks them by great-circle distance from the
//! device, picks the nearest customer still awaiting delivery, validates new
//! customer drafts, and relays one-shot flash messages between screens.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use dropoff_core::{Customer, filter_and_rank, find_nearest_eligible};
//!
//! let customers = vec![
//!     Customer::new("a", "Ada", "1 Analytical Way").with_position(0.0, 0.0),
//!     Customer::new("b", "Grace", "2 Compiler Road").with_position(0.0, 1.0),
//! ];
//! let device = Some(Coord { x: 0.0, y: 0.0 });
//!
//! let ranked = filter_and_rank(&customers, device, None);
//! assert_eq!(ranked[0].customer.id, "a");
//!
//! let nearest = find_nearest_eligible(&customers, device).expect("nearest customer");
//! assert_eq!(nearest.distance_metres, Some(0));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod customer;
pub mod directory;
pub mod distance;
mod draft;
pub mod ranker;
pub mod relay;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use customer::{Customer, DeliveryStatus};
pub use directory::{CustomerDirectory, DirectoryError, mark_delivered};
pub use distance::{EARTH_RADIUS_METRES, distance_metres, haversine_metres};
pub use draft::{CustomerDraft, DraftError, NewCustomer};
pub use ranker::{
    ARRIVAL_RADIUS_METRES, ProximityRanker, RankedEntry, Ranking, filter_and_rank,
    find_nearest_eligible, is_arrived,
};
pub use relay::{FlashKind, FlashMessage, FlashRelay};
