//! Page handlers
//!
//! GET handlers render a page from API data. POST handlers call the API and
//! redirect, carrying the outcome in `?message=` or `?error=`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{views, views::Flash, FrontendState};
use crate::{
    api::pdf_response,
    error::{AppError, AppResult},
    models::{
        booking::CreateBooking,
        cylinder::{CreateCylinder, UpdateCylinder},
        enums::{
            ConnectionStatus, ConnectionType, CylinderStatus, CylinderType, DeliveryOption,
            EntityStatus, PaymentMode, TimeSlot, UserRole,
        },
        supplier::SupplierPayload,
        user::{CreateUser, LoginRequest, UpdateUser},
    },
};

/// API failure rendered as an HTML error page
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, _, message) = self.0.parts();
        (status, Html(views::error_page(&message))).into_response()
    }
}

type PageResult = Result<Html<String>, PageError>;

/// Redirect target with a flash value appended to the query string
pub fn flash_location(path: &str, key: &str, value: &str) -> String {
    let mut url = match reqwest::Url::parse("http://frontend.local").and_then(|base| base.join(path)) {
        Ok(url) => url,
        Err(_) => return path.to_string(),
    };
    url.query_pairs_mut().append_pair(key, value);
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Redirect to `success` with `message`, or back to `failure` with the API error
fn redirect_outcome<T>(result: AppResult<T>, success: &str, message: &str, failure: &str) -> Redirect {
    match result {
        Ok(_) => Redirect::to(&flash_location(success, "message", message)),
        Err(e) => {
            let (status, _, text) = e.parts();
            tracing::debug!(%status, "Form submission rejected: {}", text);
            Redirect::to(&flash_location(failure, "error", &text))
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_field<T: std::str::FromStr>(value: &str, label: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{} is not valid", label)))
}

fn parse_date(value: &str, label: &str) -> AppResult<Option<NaiveDate>> {
    match non_empty(value) {
        Some(v) => NaiveDate::parse_from_str(&v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be a date (YYYY-MM-DD)", label))),
        None => Ok(None),
    }
}

// Public pages

pub async fn home() -> Html<String> {
    Html(views::home())
}

pub async fn login_form(Query(flash): Query<Flash>) -> Html<String> {
    Html(views::login_page(&flash))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub user_id: String,
    pub password: String,
    pub role: UserRole,
}

pub async fn login(State(state): State<FrontendState>, Form(form): Form<LoginForm>) -> Redirect {
    let user_id: i64 = match parse_field(&form.user_id, "User ID") {
        Ok(id) => id,
        Err(e) => return Redirect::to(&flash_location("/login", "error", &e.parts().2)),
    };

    let request = LoginRequest {
        user_id,
        password: form.password,
        role: form.role,
    };
    match state.client.login(&request).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, role = %user.role, "User logged in");
            Redirect::to(&format!("/dashboard/{}/{}", user.role, user.id))
        }
        Err(e) => Redirect::to(&flash_location("/login", "error", &e.parts().2)),
    }
}

pub async fn dashboard(
    State(state): State<FrontendState>,
    Path((role, id)): Path<(String, i64)>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let role: UserRole = parse_field(&role, "Role")?;
    let user = state.client.user(id).await?;
    if user.role != role {
        return Err(AppError::Authorization("Role does not match this account".to_string()).into());
    }
    Ok(Html(views::dashboard(&user, &flash)))
}

// Admin: customers

pub async fn admin_users(
    State(state): State<FrontendState>,
    Path(admin_id): Path<i64>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let users = state.client.users().await?;
    Ok(Html(views::users_page(admin_id, &users, &flash)))
}

#[derive(Debug, Deserialize)]
pub struct RegisterUserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub connection_type: ConnectionType,
}

pub async fn register_user(
    State(state): State<FrontendState>,
    Path(admin_id): Path<i64>,
    Form(form): Form<RegisterUserForm>,
) -> Redirect {
    let data = CreateUser {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: non_empty(&form.phone),
        address: non_empty(&form.address),
        connection_type: form.connection_type,
        connection_status: None,
        role: None,
    };
    let path = format!("/admin/{}/users", admin_id);
    let result = state.client.create_user(&data).await;
    let message = match &result {
        Ok(user) => format!("Customer registered with ID {}. Credentials were emailed.", user.id),
        Err(_) => String::new(),
    };
    redirect_outcome(result, &path, &message, &path)
}

pub async fn edit_user_form(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let user = state.client.user(id).await?;
    Ok(Html(views::user_edit_page(admin_id, &user, &flash)))
}

#[derive(Debug, Deserialize)]
pub struct EditUserForm {
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub connection_type: ConnectionType,
}

pub async fn update_user(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
    Form(form): Form<EditUserForm>,
) -> Redirect {
    let data = UpdateUser {
        email: non_empty(&form.email),
        phone: non_empty(&form.phone),
        address: non_empty(&form.address),
        connection_type: Some(form.connection_type),
    };
    let result = state.client.update_user(id, &data).await;
    redirect_outcome(
        result,
        &format!("/admin/{}/users", admin_id),
        "Customer updated",
        &format!("/admin/{}/users/{}/edit", admin_id, id),
    )
}

pub async fn toggle_user(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
) -> Redirect {
    let result = async {
        let user = state.client.user(id).await?;
        let status = match user.connection_status {
            ConnectionStatus::Active => ConnectionStatus::Inactive,
            ConnectionStatus::Inactive => ConnectionStatus::Active,
        };
        state.client.set_user_status(id, status).await
    }
    .await;
    let path = format!("/admin/{}/users", admin_id);
    redirect_outcome(result, &path, "Connection status updated", &path)
}

// Admin: suppliers

pub async fn admin_suppliers(
    State(state): State<FrontendState>,
    Path(admin_id): Path<i64>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let suppliers = state.client.suppliers().await?;
    Ok(Html(views::suppliers_page(admin_id, &suppliers, &flash)))
}

pub async fn new_supplier_form(Path(admin_id): Path<i64>, Query(flash): Query<Flash>) -> Html<String> {
    Html(views::supplier_form(admin_id, None, &flash))
}

pub async fn edit_supplier_form(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let supplier = state.client.supplier(id).await?;
    Ok(Html(views::supplier_form(admin_id, Some(&supplier), &flash)))
}

#[derive(Debug, Deserialize)]
pub struct SupplierForm {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub license_number: String,
}

impl SupplierForm {
    fn payload(self) -> AppResult<SupplierPayload> {
        Ok(SupplierPayload {
            license_number: parse_field(&self.license_number, "License number")?,
            name: self.name.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

pub async fn create_supplier(
    State(state): State<FrontendState>,
    Path(admin_id): Path<i64>,
    Form(form): Form<SupplierForm>,
) -> Redirect {
    let result = match form.payload() {
        Ok(data) => state.client.create_supplier(&data).await,
        Err(e) => Err(e),
    };
    redirect_outcome(
        result,
        &format!("/admin/{}/suppliers", admin_id),
        "Supplier added",
        &format!("/admin/{}/suppliers/new", admin_id),
    )
}

pub async fn update_supplier(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
    Form(form): Form<SupplierForm>,
) -> Redirect {
    let result = match form.payload() {
        Ok(data) => state.client.update_supplier(id, &data).await,
        Err(e) => Err(e),
    };
    redirect_outcome(
        result,
        &format!("/admin/{}/suppliers", admin_id),
        "Supplier updated",
        &format!("/admin/{}/suppliers/{}/edit", admin_id, id),
    )
}

pub async fn activate_supplier(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
) -> Redirect {
    let path = format!("/admin/{}/suppliers", admin_id);
    redirect_outcome(state.client.activate_supplier(id).await, &path, "Supplier activated", &path)
}

pub async fn deactivate_supplier(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
) -> Redirect {
    let path = format!("/admin/{}/suppliers", admin_id);
    redirect_outcome(state.client.deactivate_supplier(id).await, &path, "Supplier deactivated", &path)
}

#[derive(Debug, Deserialize)]
pub struct PdfQuery {
    pub status: EntityStatus,
}

pub async fn suppliers_pdf(
    State(state): State<FrontendState>,
    Path(_admin_id): Path<i64>,
    Query(query): Query<PdfQuery>,
) -> Result<Response, PageError> {
    let bytes = state.client.suppliers_pdf(query.status).await?;
    let filename = format!("{}_suppliers.pdf", query.status.as_str().to_lowercase());
    Ok(pdf_response(bytes, &filename))
}

// Admin: cylinders

pub async fn admin_cylinders(
    State(state): State<FrontendState>,
    Path(admin_id): Path<i64>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let cylinders = state.client.cylinders(false).await?;
    Ok(Html(views::cylinders_page(admin_id, &cylinders, &flash)))
}

pub async fn new_cylinder_form(
    State(state): State<FrontendState>,
    Path(admin_id): Path<i64>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let suppliers = state.client.suppliers().await?;
    Ok(Html(views::cylinder_form(admin_id, None, &suppliers, &flash)))
}

pub async fn edit_cylinder_form(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let cylinder = state.client.cylinder(id).await?;
    Ok(Html(views::cylinder_form(admin_id, Some(&cylinder), &[], &flash)))
}

#[derive(Debug, Deserialize)]
pub struct CylinderForm {
    #[serde(default)]
    pub supplier_id: String,
    pub cylinder_type: CylinderType,
    pub status: CylinderStatus,
    pub last_refill_date: String,
}

pub async fn create_cylinder(
    State(state): State<FrontendState>,
    Path(admin_id): Path<i64>,
    Form(form): Form<CylinderForm>,
) -> Redirect {
    let result = async {
        let last_refill_date = parse_date(&form.last_refill_date, "Last refill date")?
            .ok_or_else(|| AppError::BadRequest("Last refill date is required".to_string()))?;
        let data = CreateCylinder {
            supplier_id: parse_field(&form.supplier_id, "Supplier")?,
            cylinder_type: form.cylinder_type,
            status: Some(form.status),
            last_refill_date,
        };
        state.client.create_cylinder(&data).await
    }
    .await;
    redirect_outcome(
        result,
        &format!("/admin/{}/cylinders", admin_id),
        "Cylinder added",
        &format!("/admin/{}/cylinders/new", admin_id),
    )
}

pub async fn update_cylinder(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
    Form(form): Form<CylinderForm>,
) -> Redirect {
    let result = async {
        let data = UpdateCylinder {
            cylinder_type: Some(form.cylinder_type),
            status: Some(form.status),
            last_refill_date: parse_date(&form.last_refill_date, "Last refill date")?,
        };
        state.client.update_cylinder(id, &data).await
    }
    .await;
    redirect_outcome(
        result,
        &format!("/admin/{}/cylinders", admin_id),
        "Cylinder updated",
        &format!("/admin/{}/cylinders/{}/edit", admin_id, id),
    )
}

pub async fn delete_cylinder(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
) -> Redirect {
    let path = format!("/admin/{}/cylinders", admin_id);
    redirect_outcome(state.client.delete_cylinder(id).await, &path, "Cylinder deleted", &path)
}

// Admin: bookings

pub async fn admin_reports(
    State(state): State<FrontendState>,
    Path(admin_id): Path<i64>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let bookings = state.client.bookings().await?;
    Ok(Html(views::reports_page(admin_id, &bookings, &flash)))
}

pub async fn admin_cancel_booking(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
) -> Redirect {
    let path = format!("/admin/{}/reports", admin_id);
    redirect_outcome(state.client.cancel_booking(id).await, &path, "Booking cancelled", &path)
}

pub async fn admin_deliver_booking(
    State(state): State<FrontendState>,
    Path((admin_id, id)): Path<(i64, i64)>,
) -> Redirect {
    let path = format!("/admin/{}/reports", admin_id);
    redirect_outcome(state.client.deliver_booking(id).await, &path, "Booking marked as delivered", &path)
}

// Customer pages

pub async fn customer_bookings(
    State(state): State<FrontendState>,
    Path(user_id): Path<i64>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let bookings = state.client.user_bookings(user_id).await?;
    Ok(Html(views::bookings_page(user_id, &bookings, &flash)))
}

pub async fn new_booking_form(
    State(state): State<FrontendState>,
    Path(user_id): Path<i64>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let (eligibility, cylinders) = tokio::try_join!(
        state.client.eligibility(user_id),
        state.client.cylinders(true)
    )?;
    Ok(Html(views::booking_form(
        user_id,
        &cylinders,
        &eligibility,
        state.booking_interval_days,
        &flash,
    )))
}

#[derive(Debug, Deserialize)]
pub struct BookingForm {
    pub cylinder_id: String,
    pub time_slot: TimeSlot,
    pub delivery_option: DeliveryOption,
    #[serde(default)]
    pub delivery_date: String,
    pub payment_mode: PaymentMode,
}

pub async fn create_booking(
    State(state): State<FrontendState>,
    Path(user_id): Path<i64>,
    Form(form): Form<BookingForm>,
) -> Redirect {
    let result = async {
        let data = CreateBooking {
            user_id,
            cylinder_id: parse_field(&form.cylinder_id, "Cylinder")?,
            time_slot: form.time_slot,
            delivery_option: form.delivery_option,
            payment_mode: form.payment_mode,
            payment_status: None,
            booking_status: None,
            delivery_date: parse_date(&form.delivery_date, "Delivery date")?,
        };
        state.client.create_booking(&data).await
    }
    .await;
    let message = match &result {
        Ok(booking) => format!(
            "Booking #{} placed. Delivery expected on {}.",
            booking.id, booking.delivery_date
        ),
        Err(_) => String::new(),
    };
    redirect_outcome(
        result,
        &format!("/customers/{}/bookings", user_id),
        &message,
        &format!("/customers/{}/bookings/new", user_id),
    )
}

pub async fn customer_cancel_booking(
    State(state): State<FrontendState>,
    Path((user_id, id)): Path<(i64, i64)>,
) -> Redirect {
    let path = format!("/customers/{}/bookings", user_id);
    redirect_outcome(state.client.cancel_booking(id).await, &path, "Booking cancelled", &path)
}

pub async fn customer_bills(
    State(state): State<FrontendState>,
    Path(user_id): Path<i64>,
    Query(flash): Query<Flash>,
) -> PageResult {
    let bills = state.client.user_bills(user_id).await?;
    Ok(Html(views::bills_page(user_id, &bills, &flash)))
}

pub async fn customer_bill(
    State(state): State<FrontendState>,
    Path((user_id, id)): Path<(i64, i64)>,
) -> PageResult {
    let bill = state.client.bill(id).await?;
    if bill.user_id != user_id {
        return Err(AppError::NotFound(format!("Bill with id {} not found", id)).into());
    }
    Ok(Html(views::bill_page(user_id, &bill)))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(views::error_page("Page not found")))
}
