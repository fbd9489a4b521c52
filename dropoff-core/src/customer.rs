//! Customer records as delivered by the remote customer service.

use std::fmt;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const DELIVERED_LABEL: &str = "delivered";
const CANCELLED_LABEL: &str = "cancelled";
const PENDING_LABEL: &str = "pending";

/// Delivery state derived from a customer's free-text status label.
///
/// Labels are compared case-insensitively against `"delivered"` and
/// `"cancelled"`; every other label, including an empty one, is pending.
///
/// # Examples
/// ```
/// use dropoff_core::DeliveryStatus;
///
/// assert_eq!(DeliveryStatus::from_label("DELIVERED"), DeliveryStatus::Delivered);
/// assert_eq!(DeliveryStatus::from_label("Cancelled"), DeliveryStatus::Cancelled);
/// assert_eq!(DeliveryStatus::from_label("out for delivery"), DeliveryStatus::Pending);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    /// Awaiting delivery.
    Pending,
    /// Handed over to the customer.
    Delivered,
    /// Cancelled by the customer or dispatcher. Still listed.
    Cancelled,
}

impl DeliveryStatus {
    /// Classify a raw status label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let lowered = label.to_lowercase();
        match lowered.as_str() {
            DELIVERED_LABEL => Self::Delivered,
            CANCELLED_LABEL => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    /// Canonical lower-case label sent to the remote service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => PENDING_LABEL,
            Self::Delivered => DELIVERED_LABEL,
            Self::Cancelled => CANCELLED_LABEL,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer awaiting (or having received) a delivery.
///
/// Latitude and longitude are stored independently so that records carrying
/// only one half of a coordinate survive decoding. Such records have no
/// [`position`](Self::position).
///
/// # Examples
/// ```
/// use dropoff_core::{Customer, DeliveryStatus};
///
/// let customer = Customer::new("c-1", "Ada", "1 Analytical Way")
///     .with_position(51.5, -0.12)
///     .with_order_details("2x pizza");
///
/// assert_eq!(customer.delivery_status(), DeliveryStatus::Pending);
/// let position = customer.position().expect("complete coordinate pair");
/// assert_eq!((position.x, position.y), (-0.12, 51.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Customer {
    /// Opaque identifier assigned by the remote service.
    #[cfg_attr(feature = "serde", serde(alias = "_id"))]
    pub id: String,
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Free-text delivery address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: String,
    /// Latitude in degrees.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub longitude: Option<f64>,
    /// What is being delivered.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub order_details: Option<String>,
    /// Courier assigned to the delivery.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub delivery_person: Option<String>,
    /// Raw status label, see [`DeliveryStatus::from_label`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: String,
}

impl Customer {
    /// Construct a pending customer without position or order details.
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            latitude: None,
            longitude: None,
            order_details: None,
            delivery_person: None,
            status: PENDING_LABEL.to_owned(),
        }
    }

    /// Set both halves of the coordinate pair.
    #[must_use]
    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Replace the raw status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the order details.
    #[must_use]
    pub fn with_order_details(mut self, details: impl Into<String>) -> Self {
        self.order_details = Some(details.into());
        self
    }

    /// Set the assigned courier.
    #[must_use]
    pub fn with_delivery_person(mut self, person: impl Into<String>) -> Self {
        self.delivery_person = Some(person.into());
        self
    }

    /// The customer's position, present only when both halves are known.
    #[must_use]
    pub const fn position(&self) -> Option<Coord<f64>> {
        match (self.latitude, self.longitude) {
            (Some(y), Some(x)) => Some(Coord { x, y }),
            _ => None,
        }
    }

    /// Whether exactly one of latitude or longitude is set.
    #[must_use]
    pub const fn has_partial_position(&self) -> bool {
        self.latitude.is_some() != self.longitude.is_some()
    }

    /// Delivery state derived from [`status`](Self::status).
    #[must_use]
    pub fn delivery_status(&self) -> DeliveryStatus {
        DeliveryStatus::from_label(&self.status)
    }

    /// Shorthand for `delivery_status() == DeliveryStatus::Delivered`.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.delivery_status() == DeliveryStatus::Delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("delivered", DeliveryStatus::Delivered)]
    #[case("Delivered", DeliveryStatus::Delivered)]
    #[case("DELIVERED", DeliveryStatus::Delivered)]
    #[case("cancelled", DeliveryStatus::Cancelled)]
    #[case("CanCelled", DeliveryStatus::Cancelled)]
    #[case("pending", DeliveryStatus::Pending)]
    #[case("", DeliveryStatus::Pending)]
    #[case(" delivered", DeliveryStatus::Pending)]
    #[case("canceled", DeliveryStatus::Pending)]
    fn classifies_status_labels(#[case] label: &str, #[case] expected: DeliveryStatus) {
        assert_eq!(DeliveryStatus::from_label(label), expected);
    }

    #[rstest]
    #[case(Some(1.0), None)]
    #[case(None, Some(1.0))]
    fn half_a_coordinate_is_no_position(
        #[case] latitude: Option<f64>,
        #[case] longitude: Option<f64>,
    ) {
        let mut customer = Customer::new("1", "Ada", "Somewhere");
        customer.latitude = latitude;
        customer.longitude = longitude;
        assert_eq!(customer.position(), None);
        assert!(customer.has_partial_position());
    }

    #[rstest]
    fn position_maps_longitude_to_x() {
        let customer = Customer::new("1", "Ada", "Somewhere").with_position(10.0, 20.0);
        assert_eq!(customer.position(), Some(Coord { x: 20.0, y: 10.0 }));
        assert!(!customer.has_partial_position());
    }

    #[rstest]
    fn new_customers_are_pending() {
        let customer = Customer::new("1", "Ada", "Somewhere");
        assert_eq!(customer.status, "pending");
        assert!(!customer.is_delivered());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn decodes_camel_case_records_with_missing_fields() {
        let json = r#"{"_id":"abc","name":"Ada","latitude":51.5,"orderDetails":"Pizza"}"#;
        let customer: Customer = serde_json::from_str(json).expect("decode customer");
        assert_eq!(customer.id, "abc");
        assert_eq!(customer.address, "");
        assert_eq!(customer.order_details.as_deref(), Some("Pizza"));
        assert_eq!(customer.position(), None);
        assert_eq!(customer.delivery_status(), DeliveryStatus::Pending);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn encodes_without_absent_optionals() {
        let customer = Customer::new("abc", "Ada", "Somewhere").with_delivery_person("Bob");
        let value = serde_json::to_value(&customer).expect("encode customer");
        assert_eq!(value["deliveryPerson"], "Bob");
        assert!(value.get("latitude").is_none());
        assert!(value.get("orderDetails").is_none());
    }
}
