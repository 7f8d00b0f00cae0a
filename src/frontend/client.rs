//! Typed client for the REST API

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::{
        bill::Bill,
        booking::{BookingDetails, CreateBooking},
        cylinder::{CreateCylinder, Cylinder, UpdateCylinder},
        enums::{ConnectionStatus, EntityStatus},
        supplier::{Supplier, SupplierPayload},
        user::{BookingEligibility, CreateUser, LoginRequest, UpdateUser, User},
    },
};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Backend unreachable: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, %body, "Backend returned an error");
        Err(error_from_body(status, &body))
    }

    async fn json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> AppResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| AppError::Upstream(format!("Unexpected backend response: {}", e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.json(self.http.get(self.url(path))).await
    }

    async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.json(self.http.put(self.url(path))).await
    }

    // Users

    pub async fn login(&self, request: &LoginRequest) -> AppResult<User> {
        self.json(self.http.post(self.url("/users/login")).json(request)).await
    }

    pub async fn users(&self) -> AppResult<Vec<User>> {
        self.get("/users").await
    }

    pub async fn user(&self, id: i64) -> AppResult<User> {
        self.get(&format!("/users/{}", id)).await
    }

    pub async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        self.json(self.http.post(self.url("/users")).json(data)).await
    }

    pub async fn update_user(&self, id: i64, data: &UpdateUser) -> AppResult<User> {
        self.json(self.http.put(self.url(&format!("/users/{}", id))).json(data))
            .await
    }

    pub async fn set_user_status(&self, id: i64, status: ConnectionStatus) -> AppResult<User> {
        let request = self
            .http
            .put(self.url(&format!("/users/{}/status", id)))
            .query(&[("status", status.as_str())]);
        self.json(request).await
    }

    pub async fn user_bookings(&self, id: i64) -> AppResult<Vec<BookingDetails>> {
        self.get(&format!("/users/{}/bookings", id)).await
    }

    pub async fn user_bills(&self, id: i64) -> AppResult<Vec<Bill>> {
        self.get(&format!("/users/{}/bills", id)).await
    }

    pub async fn eligibility(&self, id: i64) -> AppResult<BookingEligibility> {
        self.get(&format!("/users/{}/eligibility", id)).await
    }

    // Bills

    pub async fn bill(&self, id: i64) -> AppResult<Bill> {
        self.get(&format!("/bills/{}", id)).await
    }

    // Suppliers

    pub async fn suppliers(&self) -> AppResult<Vec<Supplier>> {
        self.get("/suppliers").await
    }

    pub async fn supplier(&self, id: i64) -> AppResult<Supplier> {
        self.get(&format!("/suppliers/{}", id)).await
    }

    pub async fn create_supplier(&self, data: &SupplierPayload) -> AppResult<Supplier> {
        self.json(self.http.post(self.url("/suppliers")).json(data)).await
    }

    pub async fn update_supplier(&self, id: i64, data: &SupplierPayload) -> AppResult<Supplier> {
        self.json(self.http.put(self.url(&format!("/suppliers/{}", id))).json(data))
            .await
    }

    pub async fn activate_supplier(&self, id: i64) -> AppResult<Supplier> {
        self.put_empty(&format!("/suppliers/{}/activate", id)).await
    }

    pub async fn deactivate_supplier(&self, id: i64) -> AppResult<Supplier> {
        self.put_empty(&format!("/suppliers/{}/deactivate", id)).await
    }

    pub async fn suppliers_pdf(&self, status: EntityStatus) -> AppResult<Vec<u8>> {
        let request = self
            .http
            .get(self.url("/suppliers/pdf"))
            .query(&[("status", status.as_str())]);
        let bytes = self
            .send(request)
            .await?
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read PDF: {}", e)))?;
        Ok(bytes.to_vec())
    }

    // Cylinders

    pub async fn cylinders(&self, available_only: bool) -> AppResult<Vec<Cylinder>> {
        let mut request = self.http.get(self.url("/cylinders"));
        if available_only {
            request = request.query(&[("status", "Available")]);
        }
        self.json(request).await
    }

    pub async fn cylinder(&self, id: i64) -> AppResult<Cylinder> {
        self.get(&format!("/cylinders/{}", id)).await
    }

    pub async fn create_cylinder(&self, data: &CreateCylinder) -> AppResult<Cylinder> {
        self.json(self.http.post(self.url("/cylinders")).json(data)).await
    }

    pub async fn update_cylinder(&self, id: i64, data: &UpdateCylinder) -> AppResult<Cylinder> {
        self.json(self.http.put(self.url(&format!("/cylinders/{}", id))).json(data))
            .await
    }

    pub async fn delete_cylinder(&self, id: i64) -> AppResult<()> {
        self.send(self.http.delete(self.url(&format!("/cylinders/{}", id))))
            .await?;
        Ok(())
    }

    // Bookings

    pub async fn bookings(&self) -> AppResult<Vec<BookingDetails>> {
        self.get("/bookings").await
    }

    pub async fn create_booking(&self, data: &CreateBooking) -> AppResult<BookingDetails> {
        self.json(self.http.post(self.url("/bookings")).json(data)).await
    }

    pub async fn cancel_booking(&self, id: i64) -> AppResult<BookingDetails> {
        self.put_empty(&format!("/bookings/{}/cancel", id)).await
    }

    pub async fn deliver_booking(&self, id: i64) -> AppResult<BookingDetails> {
        self.put_empty(&format!("/bookings/{}/deliver", id)).await
    }
}

/// Rebuild the backend's error from a non-success response body
pub fn error_from_body(status: StatusCode, body: &str) -> AppError {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) => error.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    AppError::from_status(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_message_is_surfaced() {
        let body = r#"{"code":7,"error":"RuleViolation","message":"You can only book one cylinder every 30 days."}"#;
        let error = error_from_body(StatusCode::BAD_REQUEST, body);
        assert!(matches!(error, AppError::BadRequest(ref m) if m.starts_with("You can only book")));
    }

    #[test]
    fn test_plain_text_and_empty_bodies() {
        let error = error_from_body(StatusCode::CONFLICT, "already booked");
        assert!(matches!(error, AppError::Conflict(ref m) if m == "already booked"));

        let error = error_from_body(StatusCode::BAD_GATEWAY, "");
        assert_eq!(error.parts().2, "Bad Gateway");
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(client.url("/users"), "http://localhost:8080/api/users");
    }
}
