//! Customer repository.

use uuid::Uuid;

use domain::models::Customer;

use crate::metrics::OpTimer;
use crate::store::{Store, StoreError};

/// Repository for customer membership rows.
#[derive(Clone)]
pub struct CustomerRepository {
    store: Store,
}

impl CustomerRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn insert(&self, customer: Customer) -> Result<(), StoreError> {
        let timer = OpTimer::new("customers.insert");
        let result = self.store.insert(customer);
        timer.record();
        result
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<Customer> {
        self.store.get_by_id(id)
    }

    /// QR-scan resolution: scan codes are unique per commerce.
    pub fn find_by_scan_code(&self, commerce_id: Uuid, scan_code: &str) -> Option<Customer> {
        self.store
            .filter::<Customer>(|c| c.commerce_id == commerce_id && c.scan_code == scan_code)
            .into_iter()
            .next()
    }

    pub fn list_by_commerce(&self, commerce_id: Uuid) -> Vec<Customer> {
        self.store.filter(|c: &Customer| c.commerce_id == commerce_id)
    }

    /// Whether a phone number is already enrolled in this commerce.
    pub fn phone_enrolled(&self, commerce_id: Uuid, phone: &str) -> bool {
        !self
            .store
            .filter::<Customer>(|c| c.commerce_id == commerce_id && c.phone == phone)
            .is_empty()
    }

    /// Replace a customer row with its accrual-engine successor.
    pub fn save(&self, customer: Customer) -> Result<Customer, StoreError> {
        let timer = OpTimer::new("customers.save");
        let result = self
            .store
            .update::<Customer>(customer.id, |row| *row = customer.clone());
        timer.record();
        result
    }
}
