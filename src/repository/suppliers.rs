//! Suppliers repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{CylinderStatus, EntityStatus},
        supplier::{InventoryCounts, Supplier, SupplierPayload},
    },
};

#[derive(Clone)]
pub struct SuppliersRepository {
    pool: Pool<Postgres>,
}

impl SuppliersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List suppliers, optionally filtered by status
    pub async fn list(&self, status: Option<EntityStatus>) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE ($1::text IS NULL OR status = $1) ORDER BY id",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Supplier with ID {} not found", id)))
    }

    /// Case-insensitive name search, substring or exact
    pub async fn search_by_name(&self, name: &str, exact: bool) -> AppResult<Vec<Supplier>> {
        let query = if exact {
            "SELECT * FROM suppliers WHERE LOWER(name) = LOWER($1) ORDER BY id"
        } else {
            "SELECT * FROM suppliers WHERE name ILIKE '%' || $1 || '%' ORDER BY id"
        };

        let rows = sqlx::query_as::<_, Supplier>(query)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, data: &SupplierPayload) -> AppResult<Supplier> {
        let row = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, contact_person, phone, email, address, license_number, status, cylinder_count)
            VALUES ($1, $2, $3, $4, $5, $6, 'ACTIVE', 0)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(data.contact_person.trim())
        .bind(&data.phone)
        .bind(data.email.trim())
        .bind(data.address.trim())
        .bind(data.license_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, data: &SupplierPayload) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $2, contact_person = $3, phone = $4, email = $5, address = $6, license_number = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.trim())
        .bind(data.contact_person.trim())
        .bind(&data.phone)
        .bind(data.email.trim())
        .bind(data.address.trim())
        .bind(data.license_number)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Supplier with ID {} not found", id)))
    }

    pub async fn set_status(&self, id: i64, status: EntityStatus) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>("UPDATE suppliers SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Supplier with ID {} not found", id)))
    }

    /// Cylinder counts by status for one supplier
    pub async fn inventory_counts(&self, supplier_id: i64) -> AppResult<InventoryCounts> {
        let rows = sqlx::query(
            "SELECT status, COUNT(*) AS total FROM cylinders WHERE supplier_id = $1 GROUP BY status",
        )
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;

        let mut counts = InventoryCounts::default();
        for row in rows {
            let status: CylinderStatus = row.get("status");
            let total: i64 = row.get("total");
            match status {
                CylinderStatus::Available => counts.available = total,
                CylinderStatus::Booked => counts.booked = total,
                CylinderStatus::OutOfStock => counts.out_of_stock = total,
            }
        }
        Ok(counts)
    }
}
