//! Claim record repository implementation

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::DatabaseError;

/// A stored claim record row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecordRow {
    pub id: String,
    pub client_id: String,
    pub claim_number: String,
    pub claim_amount: String,
    pub claim_date: NaiveDate,
    pub status: String,
    pub record_type: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Repository for the `records` table
#[derive(Debug, Clone)]
pub struct RecordRepository {
    pool: SqlitePool,
}

impl RecordRepository {
    /// Creates a new RecordRepository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists the records of the given clients, oldest claim date first
    pub async fn for_clients(&self, client_ids: &[String]) -> Result<Vec<RecordRow>, DatabaseError> {
        if client_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, client_id, claim_number, claim_amount, claim_date, status, \
             record_type, description, created_at FROM records WHERE client_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in client_ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(") ORDER BY claim_date, created_at, rowid");

        let rows = builder
            .build_query_as::<RecordRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Inserts a record row
    ///
    /// An unknown `client_id` surfaces as a foreign key violation.
    pub async fn insert(&self, row: &RecordRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO records (
                id, client_id, claim_number, claim_amount, claim_date, status,
                record_type, description, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.client_id)
        .bind(&row.claim_number)
        .bind(&row.claim_amount)
        .bind(row.claim_date)
        .bind(&row.status)
        .bind(&row.record_type)
        .bind(&row.description)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Deletes a single record
    pub async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Record", id));
        }
        Ok(())
    }
}
