//! User API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        bill::Bill,
        booking::BookingDetails,
        user::{
            AvailabilityQuery, AvailabilityResponse, BookingEligibility, CreateUser, LoginRequest,
            StatusQuery, UpdateUser, User, UserQuery,
        },
    },
};

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(UserQuery),
    responses(
        (status = 200, description = "List of users", body = Vec<User>)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list(query.status).await?;
    Ok(Json(users))
}

/// Register a user; credentials are emailed
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Email or phone already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    data.validate()?;
    let user = state.services.users.create(data).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Check user ID, password and role
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = User),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
        (status = 403, description = "Wrong role or inactive account", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<User>> {
    let user = state.services.users.login(&request).await?;
    Ok(Json(user))
}

/// Whether an email address is still free
#[utoipa::path(
    get,
    path = "/users/check-email",
    tag = "users",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse)
    )
)]
pub async fn check_email(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let email = query
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("email parameter is required".to_string()))?;
    let available = state.services.users.email_available(email.trim()).await?;
    Ok(Json(AvailabilityResponse { available }))
}

/// Whether a phone number is still free
#[utoipa::path(
    get,
    path = "/users/check-phone",
    tag = "users",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse)
    )
)]
pub async fn check_phone(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let phone = query
        .phone
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("phone parameter is required".to_string()))?;
    let available = state.services.users.phone_available(phone.trim()).await?;
    Ok(Json(AvailabilityResponse { available }))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get(id).await?;
    Ok(Json(user))
}

/// Update contact details and connection type
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Email or phone already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    data.validate()?;
    let user = state.services.users.update(id, data).await?;
    Ok(Json(user))
}

/// Delete a user without bookings
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 409, description = "User has bookings", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Activate or deactivate a connection
#[utoipa::path(
    put,
    path = "/users/{id}/status",
    tag = "users",
    params(("id" = i64, Path, description = "User ID"), StatusQuery),
    responses(
        (status = 200, description = "Status updated", body = User),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_user_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<User>> {
    let user = state.services.users.set_status(id, query.status).await?;
    Ok(Json(user))
}

/// Bookings of a user, newest first
#[utoipa::path(
    get,
    path = "/users/{id}/bookings",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User bookings", body = Vec<BookingDetails>)
    )
)]
pub async fn user_bookings(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.list_by_user(id).await?;
    Ok(Json(bookings))
}

/// Bills of a user
#[utoipa::path(
    get,
    path = "/users/{id}/bills",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User bills", body = Vec<Bill>)
    )
)]
pub async fn user_bills(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Bill>>> {
    let bills = state.services.bills.list_by_user(id).await?;
    Ok(Json(bills))
}

/// Whether the user may book today
#[utoipa::path(
    get,
    path = "/users/{id}/eligibility",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Booking eligibility", body = BookingEligibility)
    )
)]
pub async fn user_eligibility(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingEligibility>> {
    let eligibility = state.services.bookings.eligibility(id).await?;
    Ok(Json(eligibility))
}
