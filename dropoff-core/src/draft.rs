//! Validation of the "add customer" form.

use thiserror::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::DeliveryStatus;

/// Raw form input for a new customer, exactly as typed.
///
/// # Examples
/// ```
/// use dropoff_core::CustomerDraft;
///
/// # fn main() -> Result<(), dropoff_core::DraftError> {
/// let draft = CustomerDraft {
///     name: " Ada ".into(),
///     address: "1 Analytical Way".into(),
///     latitude: Some("51.5".into()),
///     longitude: Some("-0.12".into()),
///     ..CustomerDraft::default()
/// };
/// let customer = draft.validate()?;
/// assert_eq!(customer.name, "Ada");
/// assert_eq!(customer.latitude, Some(51.5));
/// assert_eq!(customer.status, "pending");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    /// Display name.
    pub name: String,
    /// Delivery address.
    pub address: String,
    /// Latitude text; blank counts as absent.
    pub latitude: Option<String>,
    /// Longitude text; blank counts as absent.
    pub longitude: Option<String>,
    /// Order details; blank counts as absent.
    pub order_details: Option<String>,
    /// Assigned courier; blank counts as absent.
    pub delivery_person: Option<String>,
}

/// A validated customer ready to be created by the remote service.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NewCustomer {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Trimmed, non-empty address.
    pub address: String,
    /// Latitude in `-90..=90`; present iff `longitude` is.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub latitude: Option<f64>,
    /// Longitude in `-180..=180`; present iff `latitude` is.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub longitude: Option<f64>,
    /// Trimmed order details.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub order_details: Option<String>,
    /// Trimmed courier name.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub delivery_person: Option<String>,
    /// Initial status label, always `"pending"`.
    pub status: String,
}

/// Errors returned by [`CustomerDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// The name was blank.
    #[error("customer name is required")]
    MissingName,
    /// The address was blank.
    #[error("customer address is required")]
    MissingAddress,
    /// Only one of latitude and longitude was supplied.
    #[error("latitude and longitude must be supplied together")]
    IncompletePosition,
    /// A coordinate could not be parsed as a finite number.
    #[error("{field} {value:?} is not a number")]
    InvalidNumber {
        /// Which coordinate failed.
        field: &'static str,
        /// Text as entered.
        value: String,
    },
    /// Latitude outside `-90..=90`.
    #[error("latitude {value} must be between -90 and 90")]
    LatitudeOutOfRange {
        /// Text as entered.
        value: String,
    },
    /// Longitude outside `-180..=180`.
    #[error("longitude {value} must be between -180 and 180")]
    LongitudeOutOfRange {
        /// Text as entered.
        value: String,
    },
}

impl CustomerDraft {
    /// Validate and normalise the draft.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] describing the first problem found, checking
    /// name, address, then coordinates.
    pub fn validate(&self) -> Result<NewCustomer, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        let address = self.address.trim();
        if address.is_empty() {
            return Err(DraftError::MissingAddress);
        }

        let (latitude, longitude) = match (
            non_blank(self.latitude.as_deref()),
            non_blank(self.longitude.as_deref()),
        ) {
            (Some(lat), Some(lon)) => (Some(parse_latitude(lat)?), Some(parse_longitude(lon)?)),
            (None, None) => (None, None),
            _ => return Err(DraftError::IncompletePosition),
        };

        Ok(NewCustomer {
            name: name.to_owned(),
            address: address.to_owned(),
            latitude,
            longitude,
            order_details: non_blank(self.order_details.as_deref()).map(str::to_owned),
            delivery_person: non_blank(self.delivery_person.as_deref()).map(str::to_owned),
            status: DeliveryStatus::Pending.as_str().to_owned(),
        })
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_coordinate(field: &'static str, text: &str) -> Result<f64, DraftError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| DraftError::InvalidNumber {
            field,
            value: text.to_owned(),
        })
}

fn parse_latitude(text: &str) -> Result<f64, DraftError> {
    let value = parse_coordinate("latitude", text)?;
    if (-90.0..=90.0).contains(&value) {
        Ok(value)
    } else {
        Err(DraftError::LatitudeOutOfRange {
            value: text.to_owned(),
        })
    }
}

fn parse_longitude(text: &str) -> Result<f64, DraftError> {
    let value = parse_coordinate("longitude", text)?;
    if (-180.0..=180.0).contains(&value) {
        Ok(value)
    } else {
        Err(DraftError::LongitudeOutOfRange {
            value: text.to_owned(),
        })
    }
}
