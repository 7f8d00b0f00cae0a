//! Booking rules exercised through the services against a real database
//!
//! Needs `DATABASE_URL` pointing at a PostgreSQL instance; migrations are
//! applied on connect.

use chrono::Local;
use sqlx::postgres::PgPoolOptions;

use fuel_agency_server::{
    config::AppConfig,
    error::AppError,
    models::{
        booking::{BookingDetails, CreateBooking, UpdateBooking},
        cylinder::CreateCylinder,
        enums::{
            BookingStatus, ConnectionType, CylinderStatus, CylinderType, DeliveryOption,
            PaymentMode, TimeSlot,
        },
        supplier::SupplierPayload,
        user::{CreateUser, User},
    },
    repository::Repository,
    services::Services,
};
use rust_decimal::Decimal;

async fn services(config: &AppConfig) -> Services {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Services::new(Repository::new(pool), config)
}

fn unique_digits(len: usize) -> String {
    let raw = uuid::Uuid::new_v4().as_u128().to_string();
    raw[raw.len() - len..].to_string()
}

async fn customer(services: &Services) -> User {
    services
        .users
        .create(CreateUser {
            first_name: "Rules".to_string(),
            last_name: "Customer".to_string(),
            email: format!("rules-{}@example.com", uuid::Uuid::new_v4().simple()),
            phone: Some(format!("7{}", unique_digits(9))),
            address: None,
            connection_type: ConnectionType::Domestic,
            connection_status: None,
            role: None,
        })
        .await
        .expect("Failed to create user")
}

async fn cylinders(services: &Services, count: usize) -> Vec<i64> {
    let supplier = services
        .suppliers
        .create(SupplierPayload {
            name: "Rules Depot".to_string(),
            contact_person: "Depot Manager".to_string(),
            phone: format!("9{}", unique_digits(9)),
            email: format!("depot-{}@example.com", uuid::Uuid::new_v4().simple()),
            address: "2 Test Lane".to_string(),
            license_number: format!("2{}", unique_digits(6)).parse().unwrap(),
        })
        .await
        .expect("Failed to create supplier");

    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let cylinder = services
            .cylinders
            .create(CreateCylinder {
                supplier_id: supplier.id,
                cylinder_type: CylinderType::Domestic,
                status: None,
                last_refill_date: Local::now().date_naive(),
            })
            .await
            .expect("Failed to create cylinder");
        ids.push(cylinder.id);
    }
    ids
}

async fn book(services: &Services, user_id: i64, cylinder_id: i64) -> Result<BookingDetails, AppError> {
    services
        .bookings
        .create(CreateBooking {
            user_id,
            cylinder_id,
            time_slot: TimeSlot::Afternoon,
            delivery_option: DeliveryOption::SameDay,
            payment_mode: PaymentMode::Cash,
            payment_status: None,
            booking_status: None,
            delivery_date: None,
        })
        .await
}

async fn cylinder_status(services: &Services, id: i64) -> CylinderStatus {
    services.cylinders.get(id).await.unwrap().status
}

fn set_status(status: BookingStatus) -> UpdateBooking {
    UpdateBooking {
        booking_status: Some(status),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_booked_cylinder_conflicts() {
    let services = services(&AppConfig::default()).await;
    let cylinder = cylinders(&services, 1).await[0];
    let first = customer(&services).await;
    let second = customer(&services).await;

    book(&services, first.id, cylinder).await.unwrap();
    assert_eq!(cylinder_status(&services, cylinder).await, CylinderStatus::Booked);

    let result = book(&services, second.id, cylinder).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn test_cancelled_booking_cannot_release_a_rebooked_cylinder() {
    let services = services(&AppConfig::default()).await;
    let cylinder = cylinders(&services, 1).await[0];
    let first = customer(&services).await;
    let second = customer(&services).await;
    let third = customer(&services).await;

    let original = book(&services, first.id, cylinder).await.unwrap();
    let cancelled = services
        .bookings
        .update(original.id, set_status(BookingStatus::Cancelled))
        .await
        .unwrap();
    assert_eq!(cancelled.booking_status, BookingStatus::Cancelled);
    assert_eq!(cancelled.cylinder.status, CylinderStatus::Available);

    book(&services, second.id, cylinder).await.unwrap();

    // re-cancelling the old booking must not free the cylinder again
    let result = services
        .bookings
        .update(original.id, set_status(BookingStatus::Cancelled))
        .await;
    assert!(matches!(result, Err(AppError::InvalidOperation(_))));
    assert_eq!(cylinder_status(&services, cylinder).await, CylinderStatus::Booked);

    // nor can it be reopened
    let result = services
        .bookings
        .update(original.id, set_status(BookingStatus::Pending))
        .await;
    assert!(matches!(result, Err(AppError::InvalidOperation(_))));

    let result = book(&services, third.id, cylinder).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn test_delivered_booking_cannot_be_cancelled_through_update() {
    let services = services(&AppConfig::default()).await;
    let cylinder = cylinders(&services, 1).await[0];
    let user = customer(&services).await;

    let booking = book(&services, user.id, cylinder).await.unwrap();
    services.bookings.deliver(booking.id).await.unwrap();

    let result = services
        .bookings
        .update(booking.id, set_status(BookingStatus::Cancelled))
        .await;
    assert!(matches!(result, Err(AppError::InvalidOperation(_))));
    let current = services.bookings.get(booking.id).await.unwrap();
    assert_eq!(current.booking_status, BookingStatus::Delivered);
}

#[tokio::test]
#[ignore]
async fn test_delete_releases_cylinder() {
    let services = services(&AppConfig::default()).await;
    let ids = cylinders(&services, 2).await;
    let first = customer(&services).await;
    let second = customer(&services).await;

    let delivered = book(&services, first.id, ids[0]).await.unwrap();
    services.bookings.deliver(delivered.id).await.unwrap();
    services.bookings.delete(delivered.id).await.unwrap();
    assert_eq!(cylinder_status(&services, ids[0]).await, CylinderStatus::Available);

    let pending = book(&services, second.id, ids[1]).await.unwrap();
    services.bookings.delete(pending.id).await.unwrap();
    assert_eq!(cylinder_status(&services, ids[1]).await, CylinderStatus::Available);
    assert!(matches!(
        services.bills.list_by_user(second.id).await.map(|bills| bills.len()),
        Ok(0)
    ));
}

#[tokio::test]
#[ignore]
async fn test_cancelled_booking_still_counts_for_interval() {
    let services = services(&AppConfig::default()).await;
    let ids = cylinders(&services, 2).await;
    let user = customer(&services).await;

    let booking = book(&services, user.id, ids[0]).await.unwrap();
    services.bookings.cancel(booking.id).await.unwrap();

    let eligibility = services.bookings.eligibility(user.id).await.unwrap();
    assert!(!eligibility.eligible);
    let result = book(&services, user.id, ids[1]).await;
    assert!(matches!(result, Err(AppError::InvalidOperation(_))));
}

#[tokio::test]
#[ignore]
async fn test_seventh_booking_of_the_year_pays_cle() {
    let mut config = AppConfig::default();
    config.billing.booking_interval_days = 0;
    let services = services(&config).await;
    let ids = cylinders(&services, 8).await;
    let user = customer(&services).await;

    // a cancelled booking does not use up the allowance
    let cancelled = book(&services, user.id, ids[7]).await.unwrap();
    services.bookings.cancel(cancelled.id).await.unwrap();

    for id in &ids[..6] {
        let booking = book(&services, user.id, *id).await.unwrap();
        assert_eq!(booking.bill.unwrap().cle_charge, Decimal::ZERO);
    }

    let seventh = book(&services, user.id, ids[6]).await.unwrap();
    let bill = seventh.bill.unwrap();
    assert_eq!(bill.cle_charge, Decimal::new(230, 0));
    assert_eq!(bill.total_price, Decimal::new(1380, 0));
}
