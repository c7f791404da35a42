//! Document store backed by PostgreSQL.
//!
//! Each collection is a table `(seq, id, document JSONB)`; unique document fields
//! are enforced with expression indexes.

use crate::domain::model::{Collection, Document, RecordId, ID_FIELD};
use crate::storage::store::{take_id, DocumentStore, StoreError};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool, Row};

const UNIQUE_VIOLATION: &str = "23505";
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database named in `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips a trivial query.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

async fn ensure_collection(
    conn: &mut PgConnection,
    collection: Collection,
) -> Result<(), sqlx::Error> {
    sqlx::query(&collection.create_table_sql())
        .execute(&mut *conn)
        .await?;
    for sql in collection.create_index_sql() {
        sqlx::query(&sql).execute(&mut *conn).await?;
    }
    Ok(())
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

fn map_sqlx_error(collection: Collection, err: sqlx::Error) -> StoreError {
    if sqlstate(&err).as_deref() == Some(UNIQUE_VIOLATION) {
        let detail = err
            .as_database_error()
            .map(|db| match db.constraint() {
                Some(c) if c.ends_with("_pkey") => format!("{} ({})", ID_FIELD, db.message()),
                Some(c) => format!("{} ({})", c, db.message()),
                None => db.message().to_string(),
            })
            .unwrap_or_default();
        return StoreError::DuplicateKey { collection, detail };
    }
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
        other => StoreError::Database(other),
    }
}

fn is_undefined_table(err: &sqlx::Error) -> bool {
    sqlstate(err).as_deref() == Some(UNDEFINED_TABLE)
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn drop_collection(&self, collection: Collection) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {}", collection.name()))
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;
        ensure_collection(&mut tx, collection)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        tx.commit().await.map_err(|e| map_sqlx_error(collection, e))?;
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> Result<Vec<RecordId>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;
        ensure_collection(&mut tx, collection)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        let sql = format!(
            "INSERT INTO {} (id, document) VALUES ($1, $2)",
            collection.name()
        );
        let mut ids = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = take_id(collection, &mut document)?;
            sqlx::query(&sql)
                .bind(id.as_str())
                .bind(JsonValue::Object(document))
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error(collection, e))?;
            ids.push(id);
        }

        tx.commit().await.map_err(|e| map_sqlx_error(collection, e))?;
        Ok(ids)
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let rows = match sqlx::query(&format!(
            "SELECT id, document FROM {} ORDER BY seq",
            collection.name()
        ))
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) if is_undefined_table(&e) => return Ok(Vec::new()),
            Err(e) => return Err(map_sqlx_error(collection, e)),
        };

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| map_sqlx_error(collection, e))?;
            let body: JsonValue = row
                .try_get("document")
                .map_err(|e| map_sqlx_error(collection, e))?;
            let JsonValue::Object(mut document) = body else {
                return Err(StoreError::Malformed {
                    collection,
                    reason: format!("row {} does not hold a JSON object", id),
                });
            };
            document.insert(ID_FIELD.to_string(), JsonValue::String(id));
            documents.push(document);
        }
        Ok(documents)
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        match sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", collection.name()))
            .fetch_one(&self.pool)
            .await
        {
            Ok(n) => Ok(n.max(0) as u64),
            Err(e) if is_undefined_table(&e) => Ok(0),
            Err(e) => Err(map_sqlx_error(collection, e)),
        }
    }
}
