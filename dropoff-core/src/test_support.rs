//! Test-only, in-memory `CustomerDirectory` used by unit and behaviour tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{Customer, CustomerDirectory, DirectoryError, NewCustomer};

/// In-memory [`CustomerDirectory`].
///
/// Identifiers for created customers are sequential integers rendered as
/// strings, starting after the number of seeded customers.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    customers: Vec<Customer>,
    next_id: u64,
    failure: Option<DirectoryError>,
}

impl MemoryDirectory {
    /// Create a directory seeded with `customers`.
    pub fn with_customers<I>(customers: I) -> Self
    where
        I: IntoIterator<Item = Customer>,
    {
        let seeded: Vec<Customer> = customers.into_iter().collect();
        let next_id = u64::try_from(seeded.len()).unwrap_or(u64::MAX);
        Self {
            state: Mutex::new(State {
                customers: seeded,
                next_id,
                failure: None,
            }),
        }
    }

    /// Create a directory whose every operation fails with `error`.
    #[must_use]
    pub fn failing(error: DirectoryError) -> Self {
        Self {
            state: Mutex::new(State {
                failure: Some(error),
                ..State::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DirectoryError> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        Ok(state)
    }
}

impl CustomerDirectory for MemoryDirectory {
    fn list_customers(&self) -> Result<Vec<Customer>, DirectoryError> {
        Ok(self.lock()?.customers.clone())
    }

    fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, DirectoryError> {
        let mut state = self.lock()?;
        state.next_id = state.next_id.saturating_add(1);
        let created = Customer {
            id: state.next_id.to_string(),
            name: customer.name.clone(),
            address: customer.address.clone(),
            latitude: customer.latitude,
            longitude: customer.longitude,
            order_details: customer.order_details.clone(),
            delivery_person: customer.delivery_person.clone(),
            status: customer.status.clone(),
        };
        state.customers.push(created.clone());
        Ok(created)
    }

    fn update_status(&self, id: &str, status: &str) -> Result<Customer, DirectoryError> {
        let mut state = self.lock()?;
        let customer = state
            .customers
            .iter_mut()
            .find(|customer| customer.id == id)
            .ok_or_else(|| DirectoryError::NotFound { id: id.to_owned() })?;
        status.clone_into(&mut customer.status);
        Ok(customer.clone())
    }
}
