//! PostgreSQL document store
//!
//! Documents live in a single JSONB table keyed by (collection path, id).
//! Uses runtime `sqlx::query` (not macros) since document shapes are open.

use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::document::{apply_updates, merge_fields, Document, Fields, WriteOp};
use crate::error::StoreError;
use crate::path::{CollectionPath, DocumentPath};
use crate::query::{Direction, Query};
use crate::DocumentStore;

/// Document store backed by PostgreSQL
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run the embedded migrations
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Migration failed: {}", e)))?;
        tracing::info!("Document store migrations applied");
        Ok(Self::new(pool))
    }
}

fn into_fields(id: &str, value: Value) -> Result<Fields, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Corrupt(format!(
            "document {} is not an object: {}",
            id, other
        ))),
    }
}

/// Lock and load a document inside a transaction
async fn select_for_update(
    transaction: &mut Transaction<'_, Postgres>,
    path: &DocumentPath,
) -> Result<Option<Fields>, StoreError> {
    let row: Option<(Json<Value>,)> = sqlx::query_as(
        r#"
        SELECT data FROM documents
        WHERE collection = $1 AND id = $2
        FOR UPDATE
        "#,
    )
    .bind(path.parent().key())
    .bind(path.id())
    .fetch_optional(&mut **transaction)
    .await?;

    row.map(|(Json(data),)| into_fields(path.id(), data))
        .transpose()
}

async fn upsert(
    transaction: &mut Transaction<'_, Postgres>,
    path: &DocumentPath,
    data: Fields,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO documents (collection, id, data)
        VALUES ($1, $2, $3)
        ON CONFLICT (collection, id)
        DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
        "#,
    )
    .bind(path.parent().key())
    .bind(path.id())
    .bind(Json(Value::Object(data)))
    .execute(&mut **transaction)
    .await?;
    Ok(())
}

async fn apply(
    transaction: &mut Transaction<'_, Postgres>,
    op: WriteOp,
) -> Result<(), StoreError> {
    match op {
        WriteOp::Create { path, data } => {
            let result = sqlx::query(
                r#"
                INSERT INTO documents (collection, id, data)
                VALUES ($1, $2, $3)
                ON CONFLICT (collection, id) DO NOTHING
                "#,
            )
            .bind(path.parent().key())
            .bind(path.id())
            .bind(Json(Value::Object(data)))
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::AlreadyExists(path.to_string()));
            }
        }
        WriteOp::Set { path, data, merge } => {
            let data = if merge {
                let mut existing = select_for_update(transaction, &path)
                    .await?
                    .unwrap_or_default();
                merge_fields(&mut existing, &data);
                existing
            } else {
                data
            };
            upsert(transaction, &path, data).await?;
        }
        WriteOp::Update { path, updates } => {
            let mut existing = select_for_update(transaction, &path)
                .await?
                .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
            apply_updates(&mut existing, &updates)?;
            upsert(transaction, &path, existing).await?;
        }
        WriteOp::Delete { path } => {
            sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
                .bind(path.parent().key())
                .bind(path.id())
                .execute(&mut **transaction)
                .await?;
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl DocumentStore for PostgresStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        let row: Option<(Json<Value>,)> =
            sqlx::query_as("SELECT data FROM documents WHERE collection = $1 AND id = $2")
                .bind(path.parent().key())
                .bind(path.id())
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(Json(data),)| {
            into_fields(path.id(), data).map(|fields| Document::new(path.id(), fields))
        })
        .transpose()
    }

    async fn query(
        &self,
        collection: &CollectionPath,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError> {
        let rows: Vec<(String, Json<Value>)> = match &query.order_by {
            Some((field, direction)) => {
                let field_path: Vec<String> = field.split('.').map(str::to_string).collect();
                // direction is an enum, never user input
                let order = match direction {
                    Direction::Ascending => "ASC",
                    Direction::Descending => "DESC",
                };
                let sql = format!(
                    r#"
                    SELECT id, data FROM documents
                    WHERE collection = $1 AND data #> $2 IS NOT NULL
                    ORDER BY data #> $2 {order}, seq ASC
                    LIMIT $3
                    "#
                );
                sqlx::query_as(&sql)
                    .bind(collection.key())
                    .bind(field_path)
                    .bind(query.limit.map(|l| l as i64))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT id, data FROM documents
                    WHERE collection = $1
                    ORDER BY seq ASC
                    LIMIT $2
                    "#,
                )
                .bind(collection.key())
                .bind(query.limit.map(|l| l as i64))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter()
            .map(|(id, Json(data))| {
                let fields = into_fields(&id, data)?;
                Ok(Document::new(id, fields))
            })
            .collect()
    }

    async fn commit(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        let writes = ops.len();
        let mut transaction = self.pool.begin().await?;
        for op in ops {
            apply(&mut transaction, op).await?;
        }
        transaction.commit().await?;
        tracing::debug!(writes, "Committed document batch");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
