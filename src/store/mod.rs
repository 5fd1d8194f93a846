//! The transaction store and the key-value storage it persists through.
//!
//! The `Storage` trait is the boundary with whatever holds the data. `FileStorage` keeps each key
//! in a JSON file inside the data directory and `MemoryStorage` keeps keys in memory for tests.

mod file_storage;
mod memory_storage;

use crate::model::{NewTransaction, Transaction};
use crate::Result;
use anyhow::Context;
use tracing::{debug, trace, warn};

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// The storage key under which the full transaction sequence is kept.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// A very small key-value interface for persisting serialized data.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored at `key`, or `None` if nothing has been stored there.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored at `key`.
    async fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// The ordered, in-memory sequence of transactions along with the storage that it is written
/// through to.
///
/// Insertion order is the only ordering. Every successful `add` or `remove` writes the whole
/// sequence back to storage before returning.
#[derive(Debug)]
pub struct TransactionStore<S: Storage> {
    storage: S,
    transactions: Vec<Transaction>,
}

impl<S: Storage> TransactionStore<S> {
    /// Loads the transactions from `storage`.
    ///
    /// An absent key, a `null` payload and a payload that cannot be parsed all produce an empty
    /// store. Errors from the storage backend itself are returned.
    pub async fn load(storage: S) -> Result<Self> {
        let transactions = match storage
            .get(TRANSACTIONS_KEY)
            .await
            .context("Unable to read stored transactions")?
        {
            None => {
                debug!("No stored transactions found, starting empty");
                Vec::new()
            }
            Some(payload) => parse_transactions(&payload),
        };
        debug!("Loaded {} transactions", transactions.len());
        Ok(Self {
            storage,
            transactions,
        })
    }

    /// The current transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validates `new`, assigns it an id, appends it and persists the full sequence.
    ///
    /// # Errors
    /// - A `ValidationError` naming the invalid fields. The store is not changed and nothing is
    ///   written.
    /// - No id is left to assign because the store already holds `i64::MAX`. The store is not
    ///   changed and nothing is written.
    /// - Any error from the storage backend while writing.
    pub async fn add(&mut self, new: NewTransaction) -> Result<&[Transaction]> {
        new.validate()?;
        let id = self.next_id()?;
        let transaction = Transaction::new(id, new);
        trace!("Adding {transaction:?}");
        self.transactions.push(transaction);
        self.save().await?;
        Ok(&self.transactions)
    }

    /// Removes the transaction with `id` and persists the full sequence. Removing an id that is
    /// not present leaves the sequence unchanged and is not an error.
    pub async fn remove(&mut self, id: i64) -> Result<&[Transaction]> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id() != id);
        if self.transactions.len() == before {
            debug!("No transaction with id {id} to remove");
        }
        self.save().await?;
        Ok(&self.transactions)
    }

    /// Returns the creation time in milliseconds, bumped past the largest id already in the
    /// store so that two additions in the same millisecond still get distinct ids.
    fn next_id(&self) -> Result<i64> {
        let now = chrono::Utc::now().timestamp_millis();
        match self.transactions.iter().map(Transaction::id).max() {
            Some(max) if max >= now => max
                .checked_add(1)
                .with_context(|| format!("No id is left after the largest stored id {max}")),
            _ => Ok(now),
        }
    }

    async fn save(&mut self) -> Result<()> {
        let payload =
            serde_json::to_string(&self.transactions).context("Unable to serialize transactions")?;
        self.storage
            .set(TRANSACTIONS_KEY, &payload)
            .await
            .context("Unable to write transactions to storage")
    }
}

/// Parses the stored payload. Malformed data is logged and treated as empty.
fn parse_transactions(payload: &str) -> Vec<Transaction> {
    match serde_json::from_str::<Option<Vec<Transaction>>>(payload) {
        Ok(Some(transactions)) => transactions,
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Stored transactions are malformed and will be ignored: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, ValidationError};
    use crate::model::{Amount, TransactionType};

    fn salary() -> NewTransaction {
        NewTransaction::new("Salary", 1000.0, TransactionType::Income, "Job", "2024-05")
    }

    fn rent() -> NewTransaction {
        NewTransaction::new("Rent", 400.0, TransactionType::Expense, "Housing", "2024-05")
    }

    async fn store_with(payload: &str) -> TransactionStore<MemoryStorage> {
        let mut storage = MemoryStorage::default();
        storage.set(TRANSACTIONS_KEY, payload).await.unwrap();
        TransactionStore::load(storage).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_absent() {
        let store = TransactionStore::load(MemoryStorage::default()).await.unwrap();
        assert!(store.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_load_null() {
        let store = store_with("null").await;
        assert!(store.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed() {
        for payload in ["{not json", "{\"id\":1}", "[{\"text\":\"no id\"}]", "42"] {
            let store = store_with(payload).await;
            assert!(store.transactions().is_empty(), "payload {payload}");
        }
    }

    #[tokio::test]
    async fn test_load_existing() {
        let store = store_with(
            r#"[{"id":1,"text":"Salary","amount":1000,"type":"income","category":"Job","month":"2024-05"},
                {"id":2,"text":"Rent","amount":400,"type":"expense","category":"Housing","month":"2024-04"}]"#,
        )
        .await;
        let texts: Vec<&str> = store.transactions().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["Salary", "Rent"]);
    }

    #[tokio::test]
    async fn test_add_appends_and_persists() {
        let mut store = TransactionStore::load(MemoryStorage::default()).await.unwrap();
        store.add(salary()).await.unwrap();
        let all = store.add(rent()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text(), "Salary");
        assert_eq!(all[1].text(), "Rent");
        assert_eq!(store.storage().writes(), 2);

        let stored = store.storage().get(TRANSACTIONS_KEY).await.unwrap().unwrap();
        let reloaded: Vec<Transaction> = serde_json::from_str(&stored).unwrap();
        assert_eq!(reloaded, store.transactions());
    }

    #[tokio::test]
    async fn test_add_assigns_unique_ids() {
        let mut store = TransactionStore::load(MemoryStorage::default()).await.unwrap();
        for _ in 0..50 {
            store.add(salary()).await.unwrap();
        }
        let mut ids: Vec<i64> = store.transactions().iter().map(|t| t.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[tokio::test]
    async fn test_add_id_after_future_id() {
        let far_future = i64::MAX / 2;
        let mut store = store_with(&format!(
            r#"[{{"id":{far_future},"text":"x","amount":1,"type":"income","category":"","month":"2024-05"}}]"#
        ))
        .await;
        let all = store.add(salary()).await.unwrap();
        assert_eq!(all[1].id(), far_future + 1);
    }

    #[tokio::test]
    async fn test_add_id_exhausted() {
        let mut store = store_with(&format!(
            r#"[{{"id":{},"text":"x","amount":1,"type":"income","category":"","month":"2024-05"}}]"#,
            i64::MAX
        ))
        .await;
        let err = store.add(salary()).await.unwrap_err();
        assert!(err.to_string().contains("No id is left"), "{err}");
        assert!(err.downcast_ref::<ValidationError>().is_none());
        assert_eq!(store.transactions().len(), 1);
        // Only the seeding write.
        assert_eq!(store.storage().writes(), 1);
    }

    #[tokio::test]
    async fn test_add_invalid_does_not_mutate() {
        let mut store = TransactionStore::load(MemoryStorage::default()).await.unwrap();
        store.add(salary()).await.unwrap();
        let mut bad = rent();
        bad.text = String::new();
        bad.month = String::new();

        let err = store.add(bad).await.unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(validation.fields(), &[Field::Text, Field::Month]);
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.storage().writes(), 1);
    }

    #[tokio::test]
    async fn test_add_negative_expense_is_rejected() {
        let mut store = TransactionStore::load(MemoryStorage::default()).await.unwrap();
        let mut refund = rent();
        refund.amount = Amount::new(-50.0);

        let err = store.add(refund).await.unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(validation.fields(), &[Field::Amount]);
        assert!(store.transactions().is_empty());
        assert_eq!(store.storage().writes(), 0);
    }

    #[tokio::test]
    async fn test_added_record_is_in_its_month() {
        use crate::view::{filter_by_month, MonthFilter};

        let mut store = TransactionStore::load(MemoryStorage::default()).await.unwrap();
        store.add(salary()).await.unwrap();
        for new in [rent(), salary(), rent()] {
            let month = MonthFilter::Month(new.month.clone());
            let all = store.add(new).await.unwrap();
            let added = all.last().unwrap().clone();
            assert!(filter_by_month(all, &month).contains(&added));
        }
    }

    #[tokio::test]
    async fn test_remove() {
        let mut store = TransactionStore::load(MemoryStorage::default()).await.unwrap();
        store.add(salary()).await.unwrap();
        store.add(rent()).await.unwrap();
        let id = store.transactions()[0].id();

        let remaining = store.remove(id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text(), "Rent");

        let stored = store.storage().get(TRANSACTIONS_KEY).await.unwrap().unwrap();
        let reloaded: Vec<Transaction> = serde_json::from_str(&stored).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_absent_is_idempotent() {
        let mut store = TransactionStore::load(MemoryStorage::default()).await.unwrap();
        store.add(salary()).await.unwrap();
        let first = store.remove(-1).await.unwrap().to_vec();
        let second = store.remove(-1).await.unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
