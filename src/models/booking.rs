//! Booking model, eligibility window and delivery date rules

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::bill::Bill;
use super::cylinder::Cylinder;
use super::enums::{
    BookingStatus, CylinderStatus, CylinderType, DeliveryOption, PaymentMode, PaymentStatus, TimeSlot,
};
use super::user::UserShort;
use crate::error::{AppError, AppResult};

/// Booking row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub cylinder_id: i64,
    pub cylinder_count: i32,
    pub time_slot: TimeSlot,
    pub delivery_option: DeliveryOption,
    pub payment_mode: PaymentMode,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    pub booking_date: NaiveDate,
    pub delivery_date: NaiveDate,
}

/// Booking with its user, cylinder and bill, as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i64,
    pub cylinder_count: i32,
    pub time_slot: TimeSlot,
    pub delivery_option: DeliveryOption,
    pub payment_mode: PaymentMode,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    pub booking_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub user: UserShort,
    pub cylinder: Cylinder,
    pub bill: Option<Bill>,
}

/// Flat row of the bookings/users/cylinders/bills join
#[derive(Debug, FromRow)]
pub struct BookingDetailsRow {
    pub id: i64,
    pub cylinder_count: i32,
    pub time_slot: TimeSlot,
    pub delivery_option: DeliveryOption,
    pub payment_mode: PaymentMode,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    pub booking_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub cylinder_id: i64,
    pub cylinder_type: CylinderType,
    pub cylinder_status: CylinderStatus,
    pub last_refill_date: NaiveDate,
    pub supplier_id: i64,
    pub bill_id: Option<i64>,
    pub price: Option<Decimal>,
    pub gst: Option<Decimal>,
    pub delivery_charge: Option<Decimal>,
    pub cle_charge: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

impl From<BookingDetailsRow> for BookingDetails {
    fn from(r: BookingDetailsRow) -> Self {
        let bill = r.bill_id.map(|bill_id| Bill {
            id: bill_id,
            booking_id: r.id,
            user_id: r.user_id,
            price: r.price.unwrap_or_default(),
            gst: r.gst.unwrap_or_default(),
            delivery_charge: r.delivery_charge.unwrap_or_default(),
            cle_charge: r.cle_charge.unwrap_or_default(),
            total_price: r.total_price.unwrap_or_default(),
        });

        Self {
            id: r.id,
            cylinder_count: r.cylinder_count,
            time_slot: r.time_slot,
            delivery_option: r.delivery_option,
            payment_mode: r.payment_mode,
            payment_status: r.payment_status,
            booking_status: r.booking_status,
            booking_date: r.booking_date,
            delivery_date: r.delivery_date,
            user: UserShort {
                id: r.user_id,
                first_name: r.first_name,
                last_name: r.last_name,
                email: r.email,
                phone: r.phone,
                address: r.address,
            },
            cylinder: Cylinder {
                id: r.cylinder_id,
                cylinder_type: r.cylinder_type,
                status: r.cylinder_status,
                last_refill_date: r.last_refill_date,
                supplier_id: r.supplier_id,
            },
            bill,
        }
    }
}

/// Create booking request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub user_id: i64,
    pub cylinder_id: i64,
    pub time_slot: TimeSlot,
    pub delivery_option: DeliveryOption,
    pub payment_mode: PaymentMode,
    /// Defaults to PAID
    pub payment_status: Option<PaymentStatus>,
    /// Defaults to PENDING
    pub booking_status: Option<BookingStatus>,
    /// Required for SCHEDULED delivery, ignored otherwise
    pub delivery_date: Option<NaiveDate>,
}

/// Fully resolved booking ready to be inserted
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i64,
    pub cylinder_id: i64,
    pub time_slot: TimeSlot,
    pub delivery_option: DeliveryOption,
    pub payment_mode: PaymentMode,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    pub booking_date: NaiveDate,
    pub delivery_date: NaiveDate,
}

/// Update booking request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBooking {
    pub time_slot: Option<TimeSlot>,
    pub delivery_option: Option<DeliveryOption>,
    pub payment_mode: Option<PaymentMode>,
    pub payment_status: Option<PaymentStatus>,
    pub booking_status: Option<BookingStatus>,
}

impl DeliveryOption {
    /// Delivery date for a booking placed on `booking_date`
    pub fn delivery_date(
        &self,
        booking_date: NaiveDate,
        requested: Option<NaiveDate>,
    ) -> AppResult<NaiveDate> {
        match self {
            DeliveryOption::Standard => Ok(booking_date + Duration::days(3)),
            DeliveryOption::Express => Ok(booking_date + Duration::days(2)),
            DeliveryOption::SameDay => Ok(booking_date),
            DeliveryOption::Scheduled => match requested {
                Some(date) if date >= booking_date => Ok(date),
                _ => Err(AppError::InvalidOperation(
                    "Scheduled delivery requires a valid future date.".to_string(),
                )),
            },
        }
    }
}

/// Eligibility of a user given the date of their latest active booking
pub fn booking_eligibility(
    last_booking_date: Option<NaiveDate>,
    today: NaiveDate,
    interval_days: i64,
) -> (bool, Option<NaiveDate>) {
    match last_booking_date {
        None => (true, None),
        Some(last) => {
            let next = last + Duration::days(interval_days);
            (today >= next, Some(next))
        }
    }
}

/// First and last day of the calendar year containing `date`
pub fn calendar_year(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year = date.year();
    (
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(date),
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(date),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_delivery_offsets() {
        let today = date(2024, 12, 30);
        assert_eq!(DeliveryOption::Standard.delivery_date(today, None).unwrap(), date(2025, 1, 2));
        assert_eq!(DeliveryOption::Express.delivery_date(today, None).unwrap(), date(2025, 1, 1));
        assert_eq!(DeliveryOption::SameDay.delivery_date(today, None).unwrap(), today);
        // requested date only matters for scheduled delivery
        assert_eq!(
            DeliveryOption::Express.delivery_date(today, Some(date(2025, 3, 1))).unwrap(),
            date(2025, 1, 1)
        );
    }

    #[test]
    fn test_scheduled_delivery_requires_date_not_in_past() {
        let today = date(2024, 6, 10);
        assert_eq!(
            DeliveryOption::Scheduled.delivery_date(today, Some(date(2024, 6, 20))).unwrap(),
            date(2024, 6, 20)
        );
        assert_eq!(DeliveryOption::Scheduled.delivery_date(today, Some(today)).unwrap(), today);
        assert!(matches!(
            DeliveryOption::Scheduled.delivery_date(today, None),
            Err(AppError::InvalidOperation(_))
        ));
        assert!(DeliveryOption::Scheduled.delivery_date(today, Some(date(2024, 6, 9))).is_err());
    }

    #[test]
    fn test_eligibility_window() {
        let last = date(2024, 3, 1);
        assert_eq!(booking_eligibility(None, last, 30), (true, None));

        let (eligible, next) = booking_eligibility(Some(last), date(2024, 3, 30), 30);
        assert!(!eligible);
        assert_eq!(next, Some(date(2024, 3, 31)));

        assert!(booking_eligibility(Some(last), date(2024, 3, 31), 30).0);
        assert!(booking_eligibility(Some(last), date(2024, 5, 1), 30).0);
    }

    #[test]
    fn test_calendar_year_bounds() {
        assert_eq!(calendar_year(date(2024, 7, 4)), (date(2024, 1, 1), date(2024, 12, 31)));
    }
}
