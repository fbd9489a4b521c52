//! Proximity ranking and nearest-customer selection.
//!
//! Both operations are pure functions of a caller-supplied snapshot: they
//! borrow the customer slice, hold no state between calls and never mutate
//! their input. Re-run them whenever the device position, the snapshot or the
//! search text changes.
//!
//! Delivered customers are dropped before anything else happens. Cancelled
//! customers stay in the list.

use geo::Coord;
use log::{debug, warn};

use crate::Customer;
use crate::distance::distance_metres;

/// Distance at or below which the courier counts as having arrived.
pub const ARRIVAL_RADIUS_METRES: u64 = 100;

/// Whether `distance_metres` is within [`ARRIVAL_RADIUS_METRES`].
///
/// # Examples
/// ```
/// use dropoff_core::is_arrived;
///
/// assert!(is_arrived(100));
/// assert!(!is_arrived(101));
/// ```
#[must_use]
pub const fn is_arrived(distance_metres: u64) -> bool {
    distance_metres <= ARRIVAL_RADIUS_METRES
}

/// A customer paired with its distance from the device, when known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry<'a> {
    /// The ranked customer record.
    pub customer: &'a Customer,
    /// Rounded great-circle distance in metres. `None` when either the device
    /// or the customer has no position.
    pub distance_metres: Option<u64>,
}

impl<'a> RankedEntry<'a> {
    fn measure(customer: &'a Customer, device: Option<Coord<f64>>) -> Self {
        if customer.has_partial_position() {
            warn!(
                "customer {} has an incomplete coordinate pair; treating it as unpositioned",
                customer.id
            );
        }
        let distance = device
            .zip(customer.position())
            .map(|(from, to)| distance_metres(from, to));
        Self {
            customer,
            distance_metres: distance,
        }
    }

    /// Whether the distance is known and within [`ARRIVAL_RADIUS_METRES`].
    #[must_use]
    pub fn is_arrived(&self) -> bool {
        self.distance_metres.is_some_and(is_arrived)
    }
}

/// Ordered customer list together with the nearest eligible pick.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    /// Output of [`filter_and_rank`].
    pub entries: Vec<RankedEntry<'a>>,
    /// Output of [`find_nearest_eligible`]; ignores the search text.
    pub nearest: Option<RankedEntry<'a>>,
}

/// Filter `customers` by status and search text, then sort by distance.
///
/// Delivered customers are removed. A query that is non-empty after trimming
/// keeps only customers whose name, address, courier or order details contain
/// it, ignoring case. The result is stably sorted by ascending distance with
/// entries lacking a distance placed last in input order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dropoff_core::{Customer, filter_and_rank};
///
/// let customers = vec![
///     Customer::new("far", "Far", "Elsewhere").with_position(0.0, 1.0),
///     Customer::new("unknown", "Unknown", "Nowhere"),
///     Customer::new("near", "Near", "Here").with_position(0.0, 0.0),
///     Customer::new("done", "Done", "Here").with_position(0.0, 0.0).with_status("Delivered"),
/// ];
///
/// let ranked = filter_and_rank(&customers, Some(Coord { x: 0.0, y: 0.0 }), None);
/// let ids: Vec<_> = ranked.iter().map(|e| e.customer.id.as_str()).collect();
/// assert_eq!(ids, ["near", "far", "unknown"]);
/// ```
#[must_use]
pub fn filter_and_rank<'a>(
    customers: &'a [Customer],
    device: Option<Coord<f64>>,
    query: Option<&str>,
) -> Vec<RankedEntry<'a>> {
    let needle = query
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_lowercase);

    let mut ranked: Vec<RankedEntry<'a>> = customers
        .iter()
        .filter(|customer| !customer.is_delivered())
        .filter(|customer| {
            needle
                .as_deref()
                .is_none_or(|text| matches_query(customer, text))
        })
        .map(|customer| RankedEntry::measure(customer, device))
        .collect();

    // `sort_by_key` is stable, so ties and unmeasured entries keep input order.
    ranked.sort_by_key(|entry| unmeasured_last(entry.distance_metres));

    debug!(
        "ranked {} of {} customers (device position known: {}, query: {:?})",
        ranked.len(),
        customers.len(),
        device.is_some(),
        needle
    );
    ranked
}

/// Pick the closest positioned customer that is not yet delivered.
///
/// Returns `None` when the device position is unknown or no customer is
/// eligible. Ties resolve to the customer appearing first in `customers`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dropoff_core::{Customer, find_nearest_eligible};
///
/// let customers = vec![
///     Customer::new("a", "A", "Here").with_position(0.0, 0.0).with_status("delivered"),
///     Customer::new("b", "B", "There").with_position(0.0, 1.0),
/// ];
///
/// let nearest = find_nearest_eligible(&customers, Some(Coord { x: 0.0, y: 0.0 }));
/// assert_eq!(nearest.map(|e| e.customer.id.as_str()), Some("b"));
/// assert!(find_nearest_eligible(&customers, None).is_none());
/// ```
#[must_use]
pub fn find_nearest_eligible(
    customers: &[Customer],
    device: Option<Coord<f64>>,
) -> Option<RankedEntry<'_>> {
    let device = device?;
    let mut nearest: Option<(&Customer, u64)> = None;

    for customer in customers.iter().filter(|customer| !customer.is_delivered()) {
        let Some(position) = customer.position() else {
            continue;
        };
        let distance = distance_metres(device, position);
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((customer, distance));
        }
    }

    nearest.map(|(customer, distance)| RankedEntry {
        customer,
        distance_metres: Some(distance),
    })
}

/// Stateless front for the ranking functions.
///
/// Useful where a ranker is passed around as a value, for example into a
/// presentation layer that re-ranks on every position update.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dropoff_core::{Customer, ProximityRanker};
///
/// let customers = vec![Customer::new("a", "Pizza Palace", "Main St").with_position(0.0, 0.0)];
/// let ranking = ProximityRanker.rank(&customers, Some(Coord { x: 0.0, y: 0.0 }), Some("pizza"));
///
/// assert_eq!(ranking.entries.len(), 1);
/// assert!(ranking.nearest.is_some_and(|entry| entry.is_arrived()));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ProximityRanker;

impl ProximityRanker {
    /// See [`filter_and_rank`].
    #[must_use]
    #[expect(
        clippy::unused_self,
        reason = "the ranker is a stateless handle kept for call-site symmetry"
    )]
    pub fn filter_and_rank<'a>(
        self,
        customers: &'a [Customer],
        device: Option<Coord<f64>>,
        query: Option<&str>,
    ) -> Vec<RankedEntry<'a>> {
        filter_and_rank(customers, device, query)
    }

    /// See [`find_nearest_eligible`].
    #[must_use]
    #[expect(
        clippy::unused_self,
        reason = "the ranker is a stateless handle kept for call-site symmetry"
    )]
    pub fn find_nearest_eligible(
        self,
        customers: &[Customer],
        device: Option<Coord<f64>>,
    ) -> Option<RankedEntry<'_>> {
        find_nearest_eligible(customers, device)
    }

    /// Run both operations over the same snapshot.
    #[must_use]
    #[expect(
        clippy::unused_self,
        reason = "the ranker is a stateless handle kept for call-site symmetry"
    )]
    pub fn rank<'a>(
        self,
        customers: &'a [Customer],
        device: Option<Coord<f64>>,
        query: Option<&str>,
    ) -> Ranking<'a> {
        Ranking {
            entries: filter_and_rank(customers, device, query),
            nearest: find_nearest_eligible(customers, device),
        }
    }
}

fn matches_query(customer: &Customer, needle: &str) -> bool {
    [
        Some(customer.name.as_str()),
        Some(customer.address.as_str()),
        customer.delivery_person.as_deref(),
        customer.order_details.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

const fn unmeasured_last(distance: Option<u64>) -> (bool, u64) {
    match distance {
        Some(metres) => (false, metres),
        None => (true, 0),
    }
}
