// src/store.rs
use crate::error::LedgerError;
use crate::models::{NewTransaction, Transaction};
use crate::validation::validate;
use async_trait::async_trait;
use log::info;
use tokio::sync::RwLock;
use uuid::Uuid;

/// CRUD over transaction records. Implemented by the server-side backends and
/// by the HTTP client, so callers can swap one for the other.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Transaction>, LedgerError>;

    async fn get(&self, id: &str) -> Result<Transaction, LedgerError>;

    /// Stores a new record and returns it with its assigned id.
    async fn create(&self, trade: NewTransaction) -> Result<Transaction, LedgerError>;

    /// Replaces the fields of an existing record.
    async fn update(&self, id: &str, trade: NewTransaction) -> Result<Transaction, LedgerError>;

    async fn delete(&self, id: &str) -> Result<(), LedgerError>;
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.transactions.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Transaction, LedgerError> {
        self.transactions
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    async fn create(&self, trade: NewTransaction) -> Result<Transaction, LedgerError> {
        let transaction = Transaction::new(new_id(), validate(trade)?);
        self.transactions.write().await.push(transaction.clone());
        info!("Stored transaction {} in memory", transaction.id);
        Ok(transaction)
    }

    async fn update(&self, id: &str, trade: NewTransaction) -> Result<Transaction, LedgerError> {
        let trade = validate(trade)?;
        let mut transactions = self.transactions.write().await;
        let existing = transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        existing.trade = trade;
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), LedgerError> {
        let mut transactions = self.transactions.write().await;
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        if transactions.len() == before {
            return Err(LedgerError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use chrono::{TimeZone, Utc};

    fn trade(name: &str) -> NewTransaction {
        NewTransaction::new(
            name,
            10.0,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap(),
        )
        .with_prices(100.0, 120.0)
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let store = MemoryStore::new();
        let created = store.create(trade("TCS")).await.unwrap();
        store.create(trade("INFY")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], created);
        assert_eq!(all[0].trade, trade("TCS"));
        assert_eq!(all[1].trade.stock_name, "INFY");
        assert_ne!(all[0].id, all[1].id);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = MemoryStore::new();
        let created = store.create(trade("TCS")).await.unwrap();

        let updated = store
            .update(&created.id, trade("TCS").with_amounts(900.0, 1300.0))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(store.get(&created.id).await.unwrap().trade.invested_amount, Some(900.0));
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.get("nope").await, Err(LedgerError::NotFound(_))));
        assert!(matches!(store.update("nope", trade("TCS")).await, Err(LedgerError::NotFound(_))));
        assert!(matches!(store.delete("nope").await, Err(LedgerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemoryStore::new();
        let a = store.create(trade("A")).await.unwrap();
        let b = store.create(trade("B")).await.unwrap();

        store.delete(&a.id).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn test_invalid_records_are_rejected() {
        let store = MemoryStore::new();
        let err = store.create(trade(" ")).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(ValidationError::EmptyStockName)));
        assert!(store.list().await.unwrap().is_empty());
    }
}
