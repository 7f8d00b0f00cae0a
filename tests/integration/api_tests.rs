//! API integration tests
//!
//! These run against a live server with a migrated database.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

fn unique_digits(len: usize) -> String {
    let raw = uuid::Uuid::new_v4().as_u128().to_string();
    raw[raw.len() - len..].to_string()
}

async fn create_supplier(client: &Client) -> Value {
    let response = client
        .post(format!("{}/suppliers", BASE_URL))
        .json(&json!({
            "name": "Integration Gas Depot",
            "contact_person": "Test Contact",
            "phone": format!("9{}", unique_digits(9)),
            "email": format!("supplier-{}@example.com", uuid::Uuid::new_v4().simple()),
            "address": "1 Test Street",
            "license_number": format!("1{}", unique_digits(6)).parse::<i32>().unwrap()
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse supplier")
}

async fn create_cylinder(client: &Client, supplier_id: i64) -> Value {
    let response = client
        .post(format!("{}/cylinders", BASE_URL))
        .json(&json!({
            "supplier_id": supplier_id,
            "cylinder_type": "domestic",
            "last_refill_date": "2024-01-15"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse cylinder")
}

async fn create_customer(client: &Client) -> Value {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "first_name": "Integration",
            "last_name": "Customer",
            "email": format!("customer-{}@example.com", uuid::Uuid::new_v4().simple()),
            "phone": format!("8{}", unique_digits(9)),
            "connection_type": "DOMESTIC"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse user")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_supplier_lifecycle() {
    let client = Client::new();
    let supplier = create_supplier(&client).await;
    let id = supplier["id"].as_i64().unwrap();
    assert_eq!(supplier["status"], "ACTIVE");
    assert_eq!(supplier["cylinder_count"], 0);

    let response = client
        .put(format!("{}/suppliers/{}/deactivate", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "INACTIVE");

    // inactive suppliers cannot receive cylinders
    let response = client
        .post(format!("{}/cylinders", BASE_URL))
        .json(&json!({
            "supplier_id": id,
            "cylinder_type": "domestic",
            "last_refill_date": "2024-01-15"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .get(format!("{}/suppliers/pdf?status=INACTIVE", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    assert_eq!(response.headers()["content-type"], "application/pdf");
    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
#[ignore]
async fn test_booking_flow() {
    let client = Client::new();
    let supplier = create_supplier(&client).await;
    let cylinder = create_cylinder(&client, supplier["id"].as_i64().unwrap()).await;
    let spare = create_cylinder(&client, supplier["id"].as_i64().unwrap()).await;
    let user = create_customer(&client).await;
    let user_id = user["id"].as_i64().unwrap();
    assert!((1_000_000_000..1_900_000_000).contains(&user_id));

    let booking_request = |cylinder_id: i64| {
        json!({
            "user_id": user_id,
            "cylinder_id": cylinder_id,
            "time_slot": "MORNING_SLOT",
            "delivery_option": "STANDARD",
            "payment_mode": "UPI"
        })
    };

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_request(cylinder["id"].as_i64().unwrap()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking: Value = response.json().await.unwrap();
    let booking_id = booking["id"].as_i64().unwrap();
    assert_eq!(booking["booking_status"], "PENDING");
    assert_eq!(booking["payment_status"], "PAID");
    assert_eq!(booking["cylinder"]["status"], "Booked");
    let total: f64 = booking["bill"]["total_price"].as_str().unwrap().parse().unwrap();
    assert_eq!(total, 1150.0);

    // second booking inside the interval is refused
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_request(spare["id"].as_i64().unwrap()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let eligibility: Value = client
        .get(format!("{}/users/{}/eligibility", BASE_URL, user_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(eligibility["eligible"], false);

    let response = client
        .put(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let cancelled: Value = response.json().await.unwrap();
    assert_eq!(cancelled["booking_status"], "CANCELLED");
    assert_eq!(cancelled["cylinder"]["status"], "Available");

    // cancelling twice is a rule violation
    let response = client
        .put(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bills: Value = client
        .get(format!("{}/users/{}/bills", BASE_URL, user_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bills.as_array().unwrap().len(), 1);

    let response = client
        .get(format!("{}/bookings/{}/pdf", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_booked_cylinder_is_exclusive() {
    let client = Client::new();
    let supplier = create_supplier(&client).await;
    let cylinder = create_cylinder(&client, supplier["id"].as_i64().unwrap()).await;
    let cylinder_id = cylinder["id"].as_i64().unwrap();
    let first = create_customer(&client).await;
    let second = create_customer(&client).await;

    let booking_request = |user: &Value| {
        json!({
            "user_id": user["id"],
            "cylinder_id": cylinder_id,
            "time_slot": "EVENING_SLOT",
            "delivery_option": "EXPRESS",
            "payment_mode": "CASH"
        })
    };

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_request(&first))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking: Value = response.json().await.unwrap();
    let booking_id = booking["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_request(&second))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // cancel through update releases the cylinder
    let response = client
        .put(format!("{}/bookings/{}", BASE_URL, booking_id))
        .json(&json!({ "booking_status": "CANCELLED" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["cylinder"]["status"], "Available");

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_request(&second))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let rebooked: Value = response.json().await.unwrap();

    // the cancelled booking can neither release nor reclaim the cylinder now
    for status in ["CANCELLED", "PENDING"] {
        let response = client
            .put(format!("{}/bookings/{}", BASE_URL, booking_id))
            .json(&json!({ "booking_status": status }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    let current: Value = client
        .get(format!("{}/cylinders/{}", BASE_URL, cylinder_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current["status"], "Booked");

    // a delivered booking frees its cylinder when deleted
    let rebooked_id = rebooked["id"].as_i64().unwrap();
    let response = client
        .put(format!("{}/bookings/{}/deliver", BASE_URL, rebooked_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let response = client
        .delete(format!("{}/bookings/{}", BASE_URL, rebooked_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let current: Value = client
        .get(format!("{}/cylinders/{}", BASE_URL, cylinder_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current["status"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_login_with_wrong_password() {
    let client = Client::new();
    let user = create_customer(&client).await;

    let response = client
        .post(format!("{}/users/login", BASE_URL))
        .json(&json!({
            "user_id": user["id"],
            "password": "definitely-wrong",
            "role": "CUSTOMER"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_rejected() {
    let client = Client::new();
    let user = create_customer(&client).await;

    let response = client
        .get(format!("{}/users/check-email", BASE_URL))
        .query(&[("email", user["email"].as_str().unwrap())])
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["available"], false);

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "first_name": "Copy",
            "last_name": "Cat",
            "email": user["email"],
            "connection_type": "DOMESTIC"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/cylinders/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "NoSuchEntity");
}
