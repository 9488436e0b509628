use super::store::{assign_id, DocumentStore, FieldMatch};
use super::{Collection, StoreResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::{debug, warn};

/// PostgreSQL document store: one JSONB table per collection.
///
/// Each table has `id TEXT PRIMARY KEY, doc JSONB`; the `doc` column holds the
/// full document including `_id`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the collection tables if they do not exist yet
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;

        // lower() only folds non-ASCII letters in a UTF-8 database
        let encoding: String = sqlx::query_scalar("SHOW server_encoding")
            .fetch_one(&self.pool)
            .await?;
        if !encoding.eq_ignore_ascii_case("UTF8") {
            warn!(
                encoding = %encoding,
                "Database is not UTF-8; substring search folds ASCII case only"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let sql = format!(
            "SELECT doc FROM {} ORDER BY created_at, id",
            collection.name()
        );
        let docs = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(docs)
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> StoreResult<Option<Value>> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", collection.name());
        let doc = sqlx::query_scalar::<_, Value>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn find_by_fields(
        &self,
        collection: Collection,
        matches: &[FieldMatch<'_>],
    ) -> StoreResult<Vec<Value>> {
        // JSONB containment gives exact equality on every listed key
        let pattern: Map<String, Value> = matches
            .iter()
            .map(|m| (m.field.to_string(), Value::String(m.value.to_string())))
            .collect();

        let sql = format!(
            "SELECT doc FROM {} WHERE doc @> $1 ORDER BY created_at, id",
            collection.name()
        );
        let docs = sqlx::query_scalar::<_, Value>(&sql)
            .bind(Value::Object(pattern))
            .fetch_all(&self.pool)
            .await?;

        Ok(docs)
    }

    async fn find_containing(
        &self,
        collection: Collection,
        fields: &[&str],
        term: &str,
    ) -> StoreResult<Vec<Value>> {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();

        let sql = format!(
            r#"
            SELECT doc FROM {}
            WHERE EXISTS (
                SELECT 1 FROM unnest($1::text[]) AS f(name)
                WHERE strpos(lower(doc ->> f.name), lower($2)) > 0
            )
            ORDER BY created_at, id
            "#,
            collection.name()
        );
        let docs = sqlx::query_scalar::<_, Value>(&sql)
            .bind(fields)
            .bind(term)
            .fetch_all(&self.pool)
            .await?;

        Ok(docs)
    }

    async fn save(&self, collection: Collection, document: Value) -> StoreResult<Value> {
        let (id, object) = assign_id(document)?;

        let sql = format!(
            r#"
            INSERT INTO {} (id, doc)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc, updated_at = NOW()
            RETURNING doc
            "#,
            collection.name()
        );
        let saved = sqlx::query_scalar::<_, Value>(&sql)
            .bind(&id)
            .bind(Value::Object(object))
            .fetch_one(&self.pool)
            .await?;

        debug!(%collection, %id, "document saved");
        Ok(saved)
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.name());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        debug!(%collection, %id, deleted = result.rows_affected(), "document delete");
        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, collection: Collection, id: &str) -> StoreResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
            collection.name()
        );
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
