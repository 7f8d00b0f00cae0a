//! Users repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{ConnectionStatus, UserRole},
        user::{CreateUser, UpdateUser, User},
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List users, optionally filtered by connection status
    pub async fn list(&self, status: Option<ConnectionStatus>) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::text IS NULL OR connection_status = $1)
            ORDER BY last_name, first_name
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found with ID: {}", id)))
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Check whether an email is used by another user
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND ($2::bigint IS NULL OR id != $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Check whether a phone number is used by another user
    pub async fn phone_exists(&self, phone: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE phone = $1 AND ($2::bigint IS NULL OR id != $2))",
        )
        .bind(phone)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a new user with a pre-generated ID and password hash
    pub async fn create(
        &self,
        id: i64,
        password_hash: &str,
        user: &CreateUser,
        registration_date: NaiveDate,
    ) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, password_hash, first_name, last_name, email, phone, address,
                registration_date, connection_status, connection_type, role
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .bind(user.first_name.trim())
        .bind(user.last_name.trim())
        .bind(user.email.trim())
        .bind(user.phone.as_deref().filter(|p| !p.is_empty()))
        .bind(&user.address)
        .bind(registration_date)
        .bind(user.connection_status.unwrap_or(ConnectionStatus::Active))
        .bind(user.connection_type)
        .bind(user.role.unwrap_or(UserRole::Customer))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Update contact details and connection type
    pub async fn update(&self, id: i64, user: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                connection_type = COALESCE($5, connection_type)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user.email.as_deref().map(str::trim))
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.connection_type)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found with ID: {}", id)))
    }

    pub async fn set_connection_status(&self, id: i64, status: ConnectionStatus) -> AppResult<User> {
        sqlx::query_as::<_, User>("UPDATE users SET connection_status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found with ID: {}", id)))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User not found with ID: {}", id)));
        }
        Ok(())
    }
}
