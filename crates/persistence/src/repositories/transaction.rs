//! Transaction repository.
//!
//! Transactions are append-only; there is deliberately no update method.

use uuid::Uuid;

use domain::models::Transaction;

use crate::metrics::OpTimer;
use crate::store::{Store, StoreError};

/// Repository for the append-only transaction log.
#[derive(Clone)]
pub struct TransactionRepository {
    store: Store,
}

impl TransactionRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn append(&self, transaction: Transaction) -> Result<(), StoreError> {
        let timer = OpTimer::new("transactions.append");
        let result = self.store.insert(transaction);
        timer.record();
        result
    }

    pub fn list_by_customer(&self, customer_id: Uuid) -> Vec<Transaction> {
        self.store
            .filter(|t: &Transaction| t.customer_id == customer_id)
    }

    pub fn list_by_commerce(&self, commerce_id: Uuid) -> Vec<Transaction> {
        self.store
            .filter(|t: &Transaction| t.commerce_id == commerce_id)
    }
}
