use std::sync::Arc;

use anyhow::Result;
use inn_core::{InnError, InnService, ServiceCapabilities};
use inn_model::{Customer, Reservation};
use inn_store::JsonStore;
use serde::Deserialize;
use tracing::{debug, info};

/// Input for [`CustomerService::create`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

/// Partial update for a customer; absent or invalid fields keep the stored
/// value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CustomerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn apply(&self, current: &Customer) -> Customer {
        let mut next = current.clone();

        if let Some(name) = &self.name {
            match next.with_name(name) {
                Ok(renamed) => next = renamed,
                Err(e) => debug!(customer_id = %current.id(), error = %e, "keeping previous customer name"),
            }
        }
        if let Some(email) = &self.email {
            match next.with_email(email) {
                Ok(readdressed) => next = readdressed,
                Err(e) => debug!(customer_id = %current.id(), error = %e, "keeping previous email"),
            }
        }

        next
    }
}

#[derive(Clone)]
pub struct CustomerService {
    store: Arc<JsonStore>,
    capabilities: ServiceCapabilities,
}

impl CustomerService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self {
            store,
            capabilities: ServiceCapabilities::standard_crud(),
        }
    }

    pub fn create(&self, name: &str, email: &str) -> Result<Customer> {
        let mut customers: Vec<Customer> = self.store.load();
        let customer = Customer::create(name, email)?;
        customers.push(customer.clone());
        self.store.save(&customers).map_err(InnError::from)?;

        info!(customer_id = %customer.id(), "created customer");
        Ok(customer)
    }

    pub fn get(&self, id: &str) -> Option<Customer> {
        self.store.load::<Customer>().into_iter().find(|c| c.id() == id)
    }

    pub fn find(&self) -> Vec<Customer> {
        self.store.load()
    }

    pub fn update(&self, id: &str, patch: CustomerPatch) -> Result<Option<Customer>> {
        let mut customers: Vec<Customer> = self.store.load();
        let Some(slot) = customers.iter_mut().find(|c| c.id() == id) else {
            return Ok(None);
        };

        let updated = patch.apply(slot);
        *slot = updated.clone();
        self.store.save(&customers).map_err(InnError::from)?;

        Ok(Some(updated))
    }

    /// Remove the customer and all of their reservations.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut customers: Vec<Customer> = self.store.load();
        let before = customers.len();
        customers.retain(|c| c.id() != id);
        if customers.len() == before {
            return Ok(false);
        }

        let mut reservations: Vec<Reservation> = self.store.load();
        let booked = reservations.len();
        reservations.retain(|r| r.customer_id() != id);
        let cascaded = booked - reservations.len();

        self.store.save(&reservations).map_err(InnError::from)?;
        self.store.save(&customers).map_err(InnError::from)?;

        info!(customer_id = id, cascaded, "deleted customer");
        Ok(true)
    }
}

impl InnService<Customer> for CustomerService {
    type Draft = NewCustomer;
    type Patch = CustomerPatch;

    fn capabilities(&self) -> ServiceCapabilities {
        self.capabilities.clone()
    }

    fn find(&self) -> Result<Vec<Customer>> {
        Ok(CustomerService::find(self))
    }

    fn get(&self, id: &str) -> Result<Option<Customer>> {
        Ok(CustomerService::get(self, id))
    }

    fn create(&self, data: NewCustomer) -> Result<Customer> {
        CustomerService::create(self, &data.name, &data.email)
    }

    fn patch(&self, id: &str, data: CustomerPatch) -> Result<Option<Customer>> {
        CustomerService::update(self, id, data)
    }

    fn remove(&self, id: &str) -> Result<bool> {
        CustomerService::delete(self, id)
    }
}
