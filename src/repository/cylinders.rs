//! Cylinders repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        cylinder::{CreateCylinder, Cylinder, CylinderQuery, UpdateCylinder},
        enums::CylinderStatus,
        supplier::Supplier,
    },
};

#[derive(Clone)]
pub struct CylindersRepository {
    pool: Pool<Postgres>,
}

impl CylindersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List cylinders matching the optional filters
    pub async fn list(&self, query: &CylinderQuery) -> AppResult<Vec<Cylinder>> {
        let rows = sqlx::query_as::<_, Cylinder>(
            r#"
            SELECT * FROM cylinders
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR cylinder_type = $2)
              AND ($3::bigint IS NULL OR supplier_id = $3)
            ORDER BY id
            "#,
        )
        .bind(query.status)
        .bind(query.cylinder_type)
        .bind(query.supplier_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Cylinder> {
        sqlx::query_as::<_, Cylinder>("SELECT * FROM cylinders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cylinder not found with ID: {}", id)))
    }

    /// Insert a cylinder and bump the supplier's cylinder count.
    /// Returns the cylinder and the supplier as updated.
    pub async fn create(&self, data: &CreateCylinder) -> AppResult<(Cylinder, Supplier)> {
        let mut tx = self.pool.begin().await?;

        let cylinder = sqlx::query_as::<_, Cylinder>(
            r#"
            INSERT INTO cylinders (cylinder_type, status, last_refill_date, supplier_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.cylinder_type)
        .bind(data.status.unwrap_or(CylinderStatus::Available))
        .bind(data.last_refill_date)
        .bind(data.supplier_id)
        .fetch_one(&mut *tx)
        .await?;

        let supplier = sqlx::query_as::<_, Supplier>(
            "UPDATE suppliers SET cylinder_count = cylinder_count + 1 WHERE id = $1 RETURNING *",
        )
        .bind(data.supplier_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((cylinder, supplier))
    }

    pub async fn update(&self, id: i64, data: &UpdateCylinder) -> AppResult<Cylinder> {
        sqlx::query_as::<_, Cylinder>(
            r#"
            UPDATE cylinders SET
                cylinder_type = COALESCE($2, cylinder_type),
                status = COALESCE($3, status),
                last_refill_date = COALESCE($4, last_refill_date)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.cylinder_type)
        .bind(data.status)
        .bind(data.last_refill_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cylinder not found with ID: {}", id)))
    }

    pub async fn set_refill_date(&self, id: i64, date: NaiveDate) -> AppResult<Cylinder> {
        sqlx::query_as::<_, Cylinder>(
            "UPDATE cylinders SET last_refill_date = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cylinder not found with ID: {}", id)))
    }

    /// Delete a cylinder that no booking references and decrement the supplier's count.
    /// Returns the supplier as updated.
    pub async fn delete(&self, id: i64) -> AppResult<Supplier> {
        let mut tx = self.pool.begin().await?;

        let referenced: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bookings WHERE cylinder_id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if referenced {
            return Err(AppError::Conflict(format!(
                "Cylinder {} is referenced by bookings and cannot be deleted",
                id
            )));
        }

        let supplier_id: i64 =
            sqlx::query_scalar("DELETE FROM cylinders WHERE id = $1 RETURNING supplier_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Cylinder not found with ID: {}", id)))?;

        let supplier = sqlx::query_as::<_, Supplier>(
            "UPDATE suppliers SET cylinder_count = GREATEST(cylinder_count - 1, 0) WHERE id = $1 RETURNING *",
        )
        .bind(supplier_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(supplier)
    }
}
