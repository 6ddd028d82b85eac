//! Key-value persistence.
//!
//! Collections are persisted as serialized text under a logical key, so the
//! only surface the ledger needs from a backend is `get`/`set` over strings.
//! `SqlStore` is the durable implementation (a two-column table managed by
//! sea-orm); `MemoryStore` backs tests and ephemeral databases.

use std::collections::HashMap;

use sea_orm::{ActiveValue, DatabaseConnection, entity::prelude::*, sea_query::OnConflict};

use crate::ResultLedger;

/// Backend surface required by the ledger.
///
/// `set` takes `&mut self` so a store has at most one writer at a time, the
/// same discipline the ledger itself enforces through `&mut` methods.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Returns the text stored under `key`, if any.
    async fn get(&self, key: &str) -> ResultLedger<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&mut self, key: &str, value: &str) -> ResultLedger<()>;
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "storage")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Durable store backed by the `storage` table.
#[derive(Clone, Debug)]
pub struct SqlStore {
    database: DatabaseConnection,
}

impl SqlStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

impl KeyValueStore for SqlStore {
    async fn get(&self, key: &str) -> ResultLedger<Option<String>> {
        let model = Entity::find_by_id(key).one(&self.database).await?;
        Ok(model.map(|model| model.value))
    }

    async fn set(&mut self, key: &str, value: &str) -> ResultLedger<()> {
        let model = ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value.to_string()),
        };
        Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::Key)
                    .update_column(Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(&self.database)
            .await?;
        Ok(())
    }
}

/// Non-durable store used by tests and the `memory` database setting.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> ResultLedger<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> ResultLedger<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
