//! Record primitives.
//!
//! A `Record` is a single expense or income entry; a `Collection` names the
//! group it belongs to. The two collections are disjoint and independently
//! persisted.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, LedgerError};

/// The named collection a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Expenses,
    Incomes,
}

impl Collection {
    /// Logical storage key the collection is persisted under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Collection::Expenses => "expenses",
            Collection::Incomes => "incomes",
        }
    }

    /// Origin tag carried by entries of the merged transaction view.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Collection::Expenses => "expense",
            Collection::Incomes => "income",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

impl TryFrom<&str> for Collection {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expenses" | "expense" => Ok(Collection::Expenses),
            "incomes" | "income" => Ok(Collection::Incomes),
            other => Err(LedgerError::UnknownCollection(other.to_string())),
        }
    }
}

/// A single expense or income entry.
///
/// Records are immutable once created; the only lifecycle operations are
/// append and delete. The persisted form keeps the legacy field names
/// (`createdTime` as integer milliseconds, `amount` as a decimal string).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stable identifier, generated once at creation.
    pub id: Uuid,
    pub name: String,
    pub amount: Amount,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_time: DateTime<Utc>,
}

impl Record {
    pub fn new(name: String, amount: Amount, created_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            amount,
            // The wire format keeps millisecond precision.
            created_time: created_time.trunc_subsecs(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_keys_and_tags() {
        assert_eq!(Collection::Expenses.key(), "expenses");
        assert_eq!(Collection::Incomes.key(), "incomes");
        assert_eq!(Collection::Expenses.tag(), "expense");
        assert_eq!(Collection::Incomes.tag(), "income");
    }

    #[test]
    fn collection_parses_singular_and_plural() {
        assert_eq!(
            Collection::try_from("expenses").unwrap(),
            Collection::Expenses
        );
        assert_eq!(Collection::try_from("Income").unwrap(), Collection::Incomes);
        assert!(Collection::try_from("wallet").is_err());
    }

    #[test]
    fn record_wire_format_is_stable() {
        let created = DateTime::from_timestamp_millis(1_692_000_000_000).unwrap();
        let mut record = Record::new("Coffee".to_string(), "3.50".parse().unwrap(), created);
        record.id = Uuid::nil();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "name": "Coffee",
                "amount": "3.50",
                "createdTime": 1_692_000_000_000_i64,
            })
        );

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
