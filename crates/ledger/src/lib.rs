//! Flat record store for the Khata expense tracker.
//!
//! The ledger keeps two disjoint collections ("expenses" and "incomes") as
//! serialized sequences in a key-value store, and derives a merged, origin
//! tagged transaction view on demand. There is no update operation: records
//! are appended, listed and deleted, nothing else.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use amount::Amount;
pub use error::LedgerError;
pub use i18n::{Catalog, Language, Text};
pub use records::{Collection, Record};
pub use store::{KeyValueStore, MemoryStore, SqlStore};
pub use view::{Transaction, sort_newest_first};

mod amount;
mod error;
mod i18n;
mod records;
mod store;
mod view;

pub type ResultLedger<T> = Result<T, LedgerError>;

/// The record store.
///
/// Every operation is a full read-modify-write of one collection's serialized
/// sequence. Mutating operations take `&mut self`, so a ledger has at most
/// one writer at a time; callers that share a ledger across tasks must wrap
/// it in their own lock.
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
}

impl<S: KeyValueStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads and deserializes one collection.
    ///
    /// An absent key yields an empty sequence. So does unparsable stored
    /// state: the parse failure is logged and swallowed, and the next write
    /// replaces the corrupt value.
    async fn read_records(&self, collection: Collection) -> ResultLedger<Vec<Record>> {
        let Some(raw) = self.store.get(collection.key()).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::warn!("discarding unparsable {collection} state: {err}");
                Ok(Vec::new())
            }
        }
    }

    async fn write_records(&mut self, collection: Collection, records: &[Record]) -> ResultLedger<()> {
        let payload = serde_json::to_string(records)?;
        self.store.set(collection.key(), &payload).await
    }

    /// Appends a new record to a collection and persists it immediately.
    ///
    /// Returns the created record, id included.
    pub async fn append(
        &mut self,
        collection: Collection,
        name: &str,
        amount: Amount,
        created_at: DateTime<Utc>,
    ) -> ResultLedger<Record> {
        let record = Record::new(name.to_string(), amount, created_at);

        let mut records = self.read_records(collection).await?;
        records.push(record.clone());
        self.write_records(collection, &records).await?;

        Ok(record)
    }

    /// Returns a collection's records in append order.
    pub async fn list(&self, collection: Collection) -> ResultLedger<Vec<Record>> {
        self.read_records(collection).await
    }

    /// Deletes the record with the given id, if present.
    ///
    /// Deleting an id the collection does not contain is a no-op: the
    /// unchanged sequence is written back.
    pub async fn delete(&mut self, collection: Collection, id: Uuid) -> ResultLedger<()> {
        let mut records = self.read_records(collection).await?;
        records.retain(|record| record.id != id);
        self.write_records(collection, &records).await
    }

    /// The merged transaction view: both collections, tagged by origin,
    /// sorted by creation time descending (ties list expenses first).
    pub async fn transactions(&self) -> ResultLedger<Vec<Transaction>> {
        let expenses = self.read_records(Collection::Expenses).await?;
        let incomes = self.read_records(Collection::Incomes).await?;
        Ok(view::merge(expenses, incomes))
    }

    /// Sum of a collection's amounts.
    pub async fn total(&self, collection: Collection) -> ResultLedger<Amount> {
        let records = self.read_records(collection).await?;

        let mut total = Amount::ZERO;
        for record in records {
            total = total
                .checked_add(record.amount)
                .ok_or_else(|| LedgerError::InvalidAmount("total overflow".to_string()))?;
        }
        Ok(total)
    }
}
