//! Booking rules, lifecycle and invoices

use chrono::{Local, NaiveDate};

use crate::{
    config::BillingConfig,
    error::{AppError, AppResult},
    models::{
        bill::BillCharges,
        booking::{
            booking_eligibility, calendar_year, BookingDetails, CreateBooking, NewBooking,
            UpdateBooking,
        },
        enums::{BookingStatus, CylinderStatus, PaymentStatus},
        user::BookingEligibility,
    },
    pdf,
    repository::Repository,
};

use super::{email::EmailService, notifications};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    email: EmailService,
    config: BillingConfig,
}

impl BookingsService {
    pub fn new(repository: Repository, email: EmailService, config: BillingConfig) -> Self {
        Self { repository, email, config }
    }

    pub async fn list(&self) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.list().await
    }

    pub async fn get(&self, id: i64) -> AppResult<BookingDetails> {
        self.repository.bookings.get_details(id).await
    }

    pub async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.bookings.list_by_user(user_id).await
    }

    pub async fn eligibility(&self, user_id: i64) -> AppResult<BookingEligibility> {
        self.repository.users.get_by_id(user_id).await?;
        let last = self.repository.bookings.last_booking_date(user_id).await?;
        let (eligible, next) =
            booking_eligibility(last, today(), self.config.booking_interval_days);
        Ok(BookingEligibility {
            eligible,
            last_booking_date: last,
            next_eligible_date: next,
        })
    }

    /// Place a booking: checks run in order and the booking, its bill and the
    /// cylinder reservation are written in one transaction.
    pub async fn create(&self, data: CreateBooking) -> AppResult<BookingDetails> {
        let booking_date = today();

        let user = self.repository.users.get_by_id(data.user_id).await?;
        let cylinder = self.repository.cylinders.get_by_id(data.cylinder_id).await?;

        let last = self.repository.bookings.last_booking_date(user.id).await?;
        let (eligible, next) =
            booking_eligibility(last, booking_date, self.config.booking_interval_days);
        if !eligible {
            return Err(AppError::InvalidOperation(format!(
                "You can only book one cylinder every {} days. Next booking allowed on {}.",
                self.config.booking_interval_days,
                next.map(|d| d.to_string()).unwrap_or_default()
            )));
        }

        if cylinder.status != CylinderStatus::Available {
            return Err(AppError::Conflict(format!(
                "Cylinder {} is {} and cannot be booked",
                cylinder.id, cylinder.status
            )));
        }

        let delivery_date = data
            .delivery_option
            .delivery_date(booking_date, data.delivery_date)?;

        let (year_start, _) = calendar_year(booking_date);
        let booked_this_year = self
            .repository
            .bookings
            .cylinders_booked_between(user.id, year_start, booking_date)
            .await?;
        let charges = BillCharges::compute(
            &self.config,
            limit_reached(booked_this_year, self.config.yearly_cylinder_limit),
        );

        let booking = NewBooking {
            user_id: user.id,
            cylinder_id: cylinder.id,
            time_slot: data.time_slot,
            delivery_option: data.delivery_option,
            payment_mode: data.payment_mode,
            payment_status: data.payment_status.unwrap_or(PaymentStatus::Paid),
            booking_status: data.booking_status.unwrap_or(BookingStatus::Pending),
            booking_date,
            delivery_date,
        };

        let id = self.repository.bookings.create(&booking, &charges).await?;
        tracing::info!(
            booking_id = id,
            user_id = user.id,
            cylinder_id = cylinder.id,
            cle_charge = %charges.cle_charge,
            "Booking created"
        );

        let details = self.repository.bookings.get_details(id).await?;
        let invoice = match pdf::booking_invoice(&details) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(booking_id = id, "Invoice rendering failed: {}", e);
                None
            }
        };
        self.email
            .notify(notifications::booking_confirmation(&details, invoice))
            .await;

        Ok(details)
    }

    pub async fn update(&self, id: i64, data: UpdateBooking) -> AppResult<BookingDetails> {
        let current = self.repository.bookings.get_by_id(id).await?;
        let cancelling = match data.booking_status {
            Some(target) => check_status_change(current.booking_status, target)?,
            None => false,
        };
        self.repository
            .bookings
            .update(id, &data, current.booking_status, cancelling)
            .await?;

        let details = self.repository.bookings.get_details(id).await?;
        if cancelling {
            tracing::info!(booking_id = id, "Booking cancelled through update");
            self.email.notify(notifications::booking_cancelled(&details)).await;
        }
        Ok(details)
    }

    pub async fn cancel(&self, id: i64) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(id).await?;
        check_cancellable(booking.booking_status)?;

        self.repository.bookings.cancel(id, booking.cylinder_id).await?;
        tracing::info!(booking_id = id, "Booking cancelled");

        let details = self.repository.bookings.get_details(id).await?;
        self.email.notify(notifications::booking_cancelled(&details)).await;
        Ok(details)
    }

    pub async fn deliver(&self, id: i64) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(id).await?;
        if booking.booking_status == BookingStatus::Cancelled {
            return Err(AppError::InvalidOperation(format!(
                "Booking {} is cancelled and cannot be delivered",
                id
            )));
        }

        self.repository
            .bookings
            .set_status(id, BookingStatus::Delivered)
            .await?;
        tracing::info!(booking_id = id, "Booking delivered");
        self.repository.bookings.get_details(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.bookings.delete(id).await?;
        tracing::info!(booking_id = id, "Booking deleted");
        Ok(())
    }

    pub async fn invoice_pdf(&self, id: i64) -> AppResult<Vec<u8>> {
        let details = self.repository.bookings.get_details(id).await?;
        pdf::booking_invoice(&details)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether the yearly allowance is used up by earlier bookings
fn limit_reached(booked_this_year: i64, yearly_limit: i64) -> bool {
    booked_this_year >= yearly_limit
}

fn check_cancellable(status: BookingStatus) -> AppResult<()> {
    match status {
        BookingStatus::Cancelled => Err(AppError::InvalidOperation(
            "Booking is already cancelled".to_string(),
        )),
        BookingStatus::Delivered => Err(AppError::InvalidOperation(
            "Delivered bookings cannot be cancelled".to_string(),
        )),
        BookingStatus::Pending | BookingStatus::Confirmed => Ok(()),
    }
}

/// Validate a status change requested through update. Returns true when the
/// change cancels the booking and its cylinder must be released.
fn check_status_change(current: BookingStatus, target: BookingStatus) -> AppResult<bool> {
    if target == BookingStatus::Cancelled {
        check_cancellable(current)?;
        return Ok(true);
    }
    if current == BookingStatus::Cancelled {
        return Err(AppError::InvalidOperation(
            "Cancelled bookings cannot be reopened".to_string(),
        ));
    }
    Ok(false)
}
