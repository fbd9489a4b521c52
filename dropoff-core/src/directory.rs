//! Access to the remote store of customer records.
//!
//! The [`CustomerDirectory`] trait abstracts the REST service that owns
//! customer records. The ranker never calls it; presentation code fetches a
//! snapshot, ranks it, and calls [`mark_delivered`] when the courier completes
//! a drop, then fetches a fresh snapshot.

use thiserror::Error;

use crate::{Customer, DeliveryStatus, NewCustomer};

/// Errors from [`CustomerDirectory`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service could not be reached.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with a non-success status.
    #[error("{url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder error description.
        message: String,
    },
    /// No customer has the given identifier.
    #[error("customer {id} not found")]
    NotFound {
        /// Identifier that was looked up.
        id: String,
    },
}

/// CRUD operations on customer records.
///
/// # Examples
///
/// ```rust
/// use dropoff_core::{Customer, CustomerDirectory, DirectoryError, NewCustomer};
///
/// struct Fixed(Vec<Customer>);
///
/// impl CustomerDirectory for Fixed {
///     fn list_customers(&self) -> Result<Vec<Customer>, DirectoryError> {
///         Ok(self.0.clone())
///     }
///
///     fn create_customer(&self, _: &NewCustomer) -> Result<Customer, DirectoryError> {
///         Err(DirectoryError::Network { url: "offline".into(), message: "read only".into() })
///     }
///
///     fn update_status(&self, id: &str, _: &str) -> Result<Customer, DirectoryError> {
///         Err(DirectoryError::NotFound { id: id.into() })
///     }
/// }
///
/// let directory = Fixed(vec![Customer::new("1", "Ada", "Somewhere")]);
/// assert_eq!(directory.list_customers()?.len(), 1);
/// # Ok::<(), DirectoryError>(())
/// ```
pub trait CustomerDirectory {
    /// Fetch every customer record.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] when the service cannot be queried.
    fn list_customers(&self) -> Result<Vec<Customer>, DirectoryError>;

    /// Create a customer, returning the stored record with its identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] when the service rejects the record.
    fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, DirectoryError>;

    /// Replace the status label of customer `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] for unknown identifiers, or another
    /// [`DirectoryError`] when the service cannot be reached.
    fn update_status(&self, id: &str, status: &str) -> Result<Customer, DirectoryError>;
}

/// Mark customer `id` as delivered.
///
/// # Errors
///
/// Propagates the error from [`CustomerDirectory::update_status`].
pub fn mark_delivered<D>(directory: &D, id: &str) -> Result<Customer, DirectoryError>
where
    D: CustomerDirectory + ?Sized,
{
    let updated = directory.update_status(id, DeliveryStatus::Delivered.as_str())?;
    log::debug!("marked customer {id} as delivered");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::MemoryDirectory;

    #[rstest]
    fn mark_delivered_updates_the_status_label() {
        let directory = MemoryDirectory::with_customers([Customer::new("7", "Ada", "Somewhere")]);
        let updated = mark_delivered(&directory, "7").expect("customer exists");
        assert_eq!(updated.status, "delivered");
        let listed = directory.list_customers().expect("list customers");
        assert!(listed.iter().all(Customer::is_delivered));
    }

    #[rstest]
    fn mark_delivered_reports_unknown_ids() {
        let directory = MemoryDirectory::default();
        let err = mark_delivered(&directory, "missing").expect_err("unknown id");
        assert_eq!(
            err,
            DirectoryError::NotFound {
                id: "missing".into()
            }
        );
    }

    #[rstest]
    fn works_through_a_trait_object() {
        let directory: Box<dyn CustomerDirectory> =
            Box::new(MemoryDirectory::with_customers([Customer::new("1", "A", "B")]));
        assert!(mark_delivered(directory.as_ref(), "1").is_ok());
    }
}
