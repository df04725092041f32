use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Record, RecordId, Result, StoreError,
    store::TableStore,
};

/// PostgreSQL-backed table store implementation.
///
/// Each record is one row in a `records` table with its fields in a JSONB
/// column, so partial updates are a server-side `fields || patch` merge and
/// numeric increments a single-statement `jsonb_set`: the read-modify-write
/// never leaves the database.
#[derive(Clone)]
pub struct PostgresTableStore {
    pool: PgPool,
}

impl PostgresTableStore {
    /// Creates a new PostgreSQL table store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the given database URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPool::connect(url).await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_record(row: &PgRow) -> Result<Record> {
        let fields: serde_json::Value = row.try_get("fields")?;
        Ok(serde_json::from_value(fields)?)
    }
}

#[async_trait]
impl TableStore for PostgresTableStore {
    async fn get(&self, table: &str, key: RecordId) -> Result<Option<Record>> {
        let row = sqlx::query("SELECT fields FROM records WHERE table_name = $1 AND id = $2")
            .bind(table)
            .bind(key.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn put(&self, table: &str, key: RecordId, record: Record) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO records (table_name, id, fields)
            VALUES ($1, $2, $3)
            ON CONFLICT (table_name, id) DO UPDATE SET fields = EXCLUDED.fields
            "#,
        )
        .bind(table)
        .bind(key.as_i64())
        .bind(serde_json::Value::from(record))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, table: &str, key: RecordId, patch: Record) -> Result<Record> {
        let row = sqlx::query(
            r#"
            UPDATE records
            SET fields = fields || $3
            WHERE table_name = $1 AND id = $2
            RETURNING fields
            "#,
        )
        .bind(table)
        .bind(key.as_i64())
        .bind(serde_json::Value::from(patch))
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_record(&row),
            None => Err(StoreError::not_found(table, key)),
        }
    }

    async fn increment(
        &self,
        table: &str,
        key: RecordId,
        deltas: &[(&str, f64)],
    ) -> Result<Record> {
        let mut tx = self.pool.begin().await?;

        let mut last_row = None;
        for &(field, delta) in deltas {
            let row = sqlx::query(
                r#"
                UPDATE records
                SET fields = jsonb_set(
                    fields,
                    ARRAY[$3],
                    to_jsonb(COALESCE((fields ->> $3)::double precision, 0) + $4),
                    true
                )
                WHERE table_name = $1 AND id = $2
                RETURNING fields
                "#,
            )
            .bind(table)
            .bind(key.as_i64())
            .bind(field)
            .bind(delta)
            .fetch_optional(&mut *tx)
            .await?;

            match row {
                Some(row) => last_row = Some(row),
                None => {
                    tx.rollback().await?;
                    return Err(StoreError::not_found(table, key));
                }
            }
        }
        tx.commit().await?;

        match last_row {
            Some(row) => Self::row_to_record(&row),
            // Empty delta list: nothing changed, return the current record.
            None => match self.get(table, key).await? {
                Some(record) => Ok(record),
                None => Err(StoreError::not_found(table, key)),
            },
        }
    }

    async fn delete(&self, table: &str, key: RecordId) -> Result<()> {
        sqlx::query("DELETE FROM records WHERE table_name = $1 AND id = $2")
            .bind(table)
            .bind(key.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn next_id(&self, table: &str) -> Result<RecordId> {
        let value: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO counters (table_name, value)
            VALUES ($1, 1)
            ON CONFLICT (table_name) DO UPDATE SET value = counters.value + 1
            RETURNING value
            "#,
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;

        Ok(RecordId::new(value))
    }

    async fn scan(&self, table: &str) -> Result<Vec<Record>> {
        let rows = sqlx::query("SELECT fields FROM records WHERE table_name = $1")
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_record).collect()
    }
}
