//! Repository layer for database operations

pub mod bills;
pub mod bookings;
pub mod cylinders;
pub mod suppliers;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub suppliers: suppliers::SuppliersRepository,
    pub cylinders: cylinders::CylindersRepository,
    pub bookings: bookings::BookingsRepository,
    pub bills: bills::BillsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            suppliers: suppliers::SuppliersRepository::new(pool.clone()),
            cylinders: cylinders::CylindersRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            bills: bills::BillsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
