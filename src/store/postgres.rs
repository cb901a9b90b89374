//! PostgreSQL-backed document store (JSONB bodies, one shared `documents` table)

use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, Pool, Postgres, QueryBuilder};

use super::{apply_projection, new_id, Direction, Document, DocumentStore, Filter, Query};
use crate::{config::DatabaseConfig, error::StoreResult};

#[derive(FromRow)]
struct DocumentRow {
    id: String,
    body: Json<Value>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            body: row.body.0,
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    /// Open the pool and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

        tracing::info!("Database migrations completed");
        Ok(Self { pool })
    }

    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Append the WHERE condition for a filter
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            builder.push("TRUE");
        }
        Filter::Eq(field, value) => {
            builder.push("body @> ").push_bind(Json(json!({ field.as_str(): value })));
        }
        Filter::Contains(field, value) => {
            builder
                .push("(body @> ")
                .push_bind(Json(json!({ field.as_str(): [value] })))
                .push(" OR body @> ")
                .push_bind(Json(json!({ field.as_str(): value })))
                .push(")");
        }
        Filter::IdIn(ids) => {
            builder.push("id = ANY(").push_bind(ids.clone()).push(")");
        }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    async fn find(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT id, body FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string()).push(" AND ");
        push_filter(&mut builder, &query.filter);

        match query.sort {
            Some(ref sort) => {
                let direction = match sort.direction {
                    Direction::Asc => "ASC NULLS FIRST",
                    Direction::Desc => "DESC NULLS LAST",
                };
                // byte-wise, like MemoryStore, whatever the database collation
                builder
                    .push(" ORDER BY (body ->> ")
                    .push_bind(sort.field.clone())
                    .push(") COLLATE \"C\" ")
                    .push(direction)
                    .push(", seq");
            }
            None => {
                builder.push(" ORDER BY seq");
            }
        }

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let doc = Document::from(row);
                Document {
                    body: apply_projection(doc.body, query.projection.as_deref()),
                    id: doc.id,
                }
            })
            .collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*)::bigint FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string()).push(" AND ");
        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn insert(&self, collection: &str, body: Value) -> StoreResult<Document> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            RETURNING id, body
            "#,
        )
        .bind(collection)
        .bind(new_id())
        .bind(Json(body))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn replace(&self, collection: &str, id: &str, body: Value) -> StoreResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents SET body = $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING id, body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(body))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
