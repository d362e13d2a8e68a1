//! Client repository implementation
//!
//! Rows are returned in the shape stored; conversion to the domain `Client`
//! happens in the adapter.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DatabaseError;

const CLIENT_COLUMNS: &str = "id, name, email, phone, customer_id, vehicle_plate, company, \
     insurance_category, insurance_type, business_type, premium, premium_paid, \
     start_date, expiry_date, created_at";

/// A stored client row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientRow {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub customer_id: Option<String>,
    pub vehicle_plate: Option<String>,
    pub company: Option<String>,
    pub insurance_category: Option<String>,
    pub insurance_type: Option<String>,
    pub business_type: Option<String>,
    pub premium: String,
    pub premium_paid: String,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Repository for the `clients` table
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists every client ordered by name (case-insensitive)
    pub async fn list_by_name(&self) -> Result<Vec<ClientRow>, DatabaseError> {
        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY name COLLATE NOCASE, created_at, rowid"
        );
        let rows = sqlx::query_as::<_, ClientRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Lists every client ordered by expiry date; rows without one sort first
    pub async fn list_by_expiry(&self) -> Result<Vec<ClientRow>, DatabaseError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY expiry_date, rowid");
        let rows = sqlx::query_as::<_, ClientRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Retrieves a client by storage key
    ///
    /// # Returns
    ///
    /// The client row or a NotFound error
    pub async fn get_by_id(&self, id: &str) -> Result<ClientRow, DatabaseError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?");
        sqlx::query_as::<_, ClientRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Client", id))
    }

    /// Returns true if a client with the key exists
    pub async fn exists(&self, id: &str) -> Result<bool, DatabaseError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Finds rows sharing a case-insensitive name and an exact phone, oldest first
    pub async fn find_by_identity(&self, name: &str, phone: &str) -> Result<Vec<ClientRow>, DatabaseError> {
        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients \
             WHERE LOWER(name) = LOWER(?) AND phone = ? \
             ORDER BY created_at, rowid"
        );
        let rows = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(name)
            .bind(phone)
            .fetch_all(&self.pool)
            .await?;
        debug!(matches = rows.len(), "identity lookup");
        Ok(rows)
    }

    /// Inserts a new client row
    pub async fn insert(&self, row: &ClientRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, name, email, phone, customer_id, vehicle_plate, company,
                insurance_category, insurance_type, business_type, premium, premium_paid,
                start_date, expiry_date, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.customer_id)
        .bind(&row.vehicle_plate)
        .bind(&row.company)
        .bind(&row.insurance_category)
        .bind(&row.insurance_type)
        .bind(&row.business_type)
        .bind(&row.premium)
        .bind(&row.premium_paid)
        .bind(row.start_date)
        .bind(row.expiry_date)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Replaces the editable fields of an existing client
    ///
    /// `id` and `created_at` of `row` are ignored except to locate the row.
    pub async fn update(&self, row: &ClientRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = ?, email = ?, phone = ?, customer_id = ?, vehicle_plate = ?,
                company = ?, insurance_category = ?, insurance_type = ?, business_type = ?,
                premium = ?, premium_paid = ?, start_date = ?, expiry_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.customer_id)
        .bind(&row.vehicle_plate)
        .bind(&row.company)
        .bind(&row.insurance_category)
        .bind(&row.insurance_type)
        .bind(&row.business_type)
        .bind(&row.premium)
        .bind(&row.premium_paid)
        .bind(row.start_date)
        .bind(row.expiry_date)
        .bind(&row.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Client", &row.id));
        }
        Ok(())
    }

    /// Deletes a client and its records in one transaction
    ///
    /// # Returns
    ///
    /// The number of records removed
    pub async fn delete_with_records(&self, id: &str) -> Result<u64, DatabaseError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let records = sqlx::query("DELETE FROM records WHERE client_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let clients = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if clients == 0 {
            // Dropping the transaction rolls it back
            return Err(DatabaseError::not_found("Client", id));
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        Ok(records)
    }

    /// Verifies the connection with a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
