//! The merged transaction view.
//!
//! The view is derived on every read: it owns no storage and is recomputed
//! from the two collections each time it is requested.

use serde::Serialize;

use crate::records::{Collection, Record};

/// A record tagged with its origin collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(rename = "type", serialize_with = "serialize_tag")]
    pub collection: Collection,
    #[serde(flatten)]
    pub record: Record,
}

fn serialize_tag<S>(collection: &Collection, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(collection.tag())
}

impl Transaction {
    /// Amount in cents, negative for expenses and positive for incomes.
    #[must_use]
    pub fn signed_cents(&self) -> i64 {
        match self.collection {
            Collection::Expenses => -self.record.amount.cents(),
            Collection::Incomes => self.record.amount.cents(),
        }
    }
}

/// Sorts records newest-first, the order the per-collection lists use.
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| b.created_time.cmp(&a.created_time));
}

/// Merges the two collections into a single view sorted by creation time
/// descending.
///
/// The sort is stable over the expenses-then-incomes concatenation, so
/// records created at the same instant list expenses first.
pub(crate) fn merge(expenses: Vec<Record>, incomes: Vec<Record>) -> Vec<Transaction> {
    let mut transactions: Vec<Transaction> = expenses
        .into_iter()
        .map(|record| Transaction {
            collection: Collection::Expenses,
            record,
        })
        .chain(incomes.into_iter().map(|record| Transaction {
            collection: Collection::Incomes,
            record,
        }))
        .collect();

    transactions.sort_by(|a, b| b.record.created_time.cmp(&a.record.created_time));
    transactions
}
