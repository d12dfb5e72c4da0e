//! SQLite implementation of the EntityStore.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::models::{Entity, EntityId};
use crate::domain::ports::EntityStore;

#[derive(Clone)]
pub struct SqliteEntityStore {
    pool: SqlitePool,
}

impl SqliteEntityStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an entity, replacing any existing row with the same id.
    pub async fn upsert(&self, entity: &Entity) -> StoreResult<()> {
        let id_json = serde_json::to_string(&entity.id)?;
        let fields_json = serde_json::to_string(&entity.fields)?;

        sqlx::query(
            r"INSERT INTO entities (id, fields, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   fields = excluded.fields,
                   updated_at = excluded.updated_at"
        )
        .bind(&id_json)
        .bind(&fields_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entities")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl EntityStore for SqliteEntityStore {
    async fn find(&self, id: &EntityId) -> StoreResult<Option<Entity>> {
        let id_json = serde_json::to_string(id)?;

        let row: Option<EntityRow> = sqlx::query_as(
            "SELECT id, fields FROM entities WHERE id = ?"
        )
        .bind(&id_json)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Entity::try_from).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct EntityRow {
    id: String,
    fields: String,
}

impl TryFrom<EntityRow> for Entity {
    type Error = StoreError;

    fn try_from(row: EntityRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: serde_json::from_str(&row.id)?,
            fields: serde_json::from_str(&row.fields)?,
        })
    }
}
