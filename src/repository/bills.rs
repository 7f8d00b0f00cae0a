//! Bills repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::bill::{Bill, BillCharges},
};

#[derive(Clone)]
pub struct BillsRepository {
    pool: Pool<Postgres>,
}

impl BillsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Bill>> {
        let rows = sqlx::query_as::<_, Bill>("SELECT * FROM bills ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Bill>> {
        let rows =
            sqlx::query_as::<_, Bill>("SELECT * FROM bills WHERE user_id = $1 ORDER BY id DESC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Bill> {
        sqlx::query_as::<_, Bill>("SELECT * FROM bills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bill not found with ID: {}", id)))
    }

    /// Overwrite all charges of a bill
    pub async fn update(&self, id: i64, charges: &BillCharges) -> AppResult<Bill> {
        sqlx::query_as::<_, Bill>(
            r#"
            UPDATE bills
            SET price = $2, gst = $3, delivery_charge = $4, cle_charge = $5, total_price = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(charges.price)
        .bind(charges.gst)
        .bind(charges.delivery_charge)
        .bind(charges.cle_charge)
        .bind(charges.total_price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Bill not found with ID: {}", id)))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Bill not found with ID: {}", id)));
        }
        Ok(())
    }
}
