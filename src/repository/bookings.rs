//! Bookings repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        bill::BillCharges,
        booking::{Booking, BookingDetails, BookingDetailsRow, NewBooking, UpdateBooking},
        enums::{BookingStatus, CylinderStatus},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.cylinder_count, b.time_slot, b.delivery_option, b.payment_mode,
           b.payment_status, b.booking_status, b.booking_date, b.delivery_date,
           u.id AS user_id, u.first_name, u.last_name, u.email, u.phone, u.address,
           c.id AS cylinder_id, c.cylinder_type, c.status AS cylinder_status,
           c.last_refill_date, c.supplier_id,
           bl.id AS bill_id, bl.price, bl.gst, bl.delivery_charge, bl.cle_charge, bl.total_price
    FROM bookings b
    JOIN users u ON u.id = b.user_id
    JOIN cylinders c ON c.id = b.cylinder_id
    LEFT JOIN bills bl ON bl.booking_id = b.id
"#;

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All bookings, newest first
    pub async fn list(&self) -> AppResult<Vec<BookingDetails>> {
        let query = format!("{} ORDER BY b.booking_date DESC, b.id DESC", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, BookingDetailsRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BookingDetails::from).collect())
    }

    pub async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<BookingDetails>> {
        let query = format!(
            "{} WHERE b.user_id = $1 ORDER BY b.booking_date DESC, b.id DESC",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, BookingDetailsRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BookingDetails::from).collect())
    }

    pub async fn get_details(&self, id: i64) -> AppResult<BookingDetails> {
        let query = format!("{} WHERE b.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, BookingDetailsRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BookingDetails::from)
            .ok_or_else(|| AppError::NotFound(format!("Booking not found with ID: {}", id)))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking not found with ID: {}", id)))
    }

    /// Date of the user's most recent booking, cancelled ones included
    pub async fn last_booking_date(&self, user_id: i64) -> AppResult<Option<NaiveDate>> {
        let date: Option<NaiveDate> = sqlx::query_scalar(
            "SELECT MAX(booking_date) FROM bookings WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(date)
    }

    /// Cylinders booked by the user between two dates inclusive, cancellations excluded
    pub async fn cylinders_booked_between(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(cylinder_count), 0)::bigint FROM bookings
            WHERE user_id = $1
              AND booking_status != 'CANCELLED'
              AND booking_date BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn user_has_bookings(&self, user_id: i64) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bookings WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Reserve the cylinder, insert the booking and its bill atomically.
    /// Fails with a conflict when the cylinder is no longer available.
    pub async fn create(&self, booking: &NewBooking, charges: &BillCharges) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let reserved = sqlx::query("UPDATE cylinders SET status = $2 WHERE id = $1 AND status = $3")
            .bind(booking.cylinder_id)
            .bind(CylinderStatus::Booked)
            .bind(CylinderStatus::Available)
            .execute(&mut *tx)
            .await?;
        if reserved.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "Cylinder {} is not available for booking",
                booking.cylinder_id
            )));
        }

        let booking_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (
                user_id, cylinder_id, cylinder_count, time_slot, delivery_option, payment_mode,
                payment_status, booking_status, booking_date, delivery_date
            )
            VALUES ($1, $2, 1, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(booking.user_id)
        .bind(booking.cylinder_id)
        .bind(booking.time_slot)
        .bind(booking.delivery_option)
        .bind(booking.payment_mode)
        .bind(booking.payment_status)
        .bind(booking.booking_status)
        .bind(booking.booking_date)
        .bind(booking.delivery_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO bills (booking_id, user_id, price, gst, delivery_charge, cle_charge, total_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(booking_id)
        .bind(booking.user_id)
        .bind(charges.price)
        .bind(charges.gst)
        .bind(charges.delivery_charge)
        .bind(charges.cle_charge)
        .bind(charges.total_price)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking_id)
    }

    /// Apply a partial update, guarded on the status the caller checked against.
    /// `release` puts the cylinder back in stock in the same transaction.
    pub async fn update(
        &self,
        id: i64,
        data: &UpdateBooking,
        expected_status: BookingStatus,
        release: bool,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let cylinder_id: i64 = sqlx::query_scalar(
            r#"
            UPDATE bookings SET
                time_slot = COALESCE($2, time_slot),
                delivery_option = COALESCE($3, delivery_option),
                payment_mode = COALESCE($4, payment_mode),
                payment_status = COALESCE($5, payment_status),
                booking_status = COALESCE($6, booking_status)
            WHERE id = $1 AND booking_status = $7
            RETURNING cylinder_id
            "#,
        )
        .bind(id)
        .bind(data.time_slot)
        .bind(data.delivery_option)
        .bind(data.payment_mode)
        .bind(data.payment_status)
        .bind(data.booking_status)
        .bind(expected_status)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!("Booking {} was modified concurrently, retry", id))
        })?;

        if release {
            release_cylinder(&mut tx, cylinder_id).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Mark cancelled and put the cylinder back in stock
    pub async fn cancel(&self, id: i64, cylinder_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let cancelled = sqlx::query(
            "UPDATE bookings SET booking_status = $2 WHERE id = $1 AND booking_status IN ($3, $4)",
        )
        .bind(id)
        .bind(BookingStatus::Cancelled)
        .bind(BookingStatus::Pending)
        .bind(BookingStatus::Confirmed)
        .execute(&mut *tx)
        .await?;
        if cancelled.rows_affected() == 0 {
            return Err(AppError::InvalidOperation(format!(
                "Booking {} is no longer open",
                id
            )));
        }
        release_cylinder(&mut tx, cylinder_id).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn set_status(&self, id: i64, status: BookingStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE bookings SET booking_status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Booking not found with ID: {}", id)));
        }
        Ok(())
    }

    /// Delete a booking; its bill goes with it. Unless the booking was already
    /// cancelled, its cylinder goes back in stock.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let (cylinder_id, status): (i64, BookingStatus) = sqlx::query_as(
            "DELETE FROM bookings WHERE id = $1 RETURNING cylinder_id, booking_status",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking not found with ID: {}", id)))?;

        if status != BookingStatus::Cancelled {
            release_cylinder(&mut tx, cylinder_id).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

async fn release_cylinder(tx: &mut Transaction<'_, Postgres>, cylinder_id: i64) -> AppResult<()> {
    sqlx::query("UPDATE cylinders SET status = $2 WHERE id = $1 AND status = $3")
        .bind(cylinder_id)
        .bind(CylinderStatus::Available)
        .bind(CylinderStatus::Booked)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
