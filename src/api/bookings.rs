//! Booking API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::{
    error::AppResult,
    models::booking::{BookingDetails, CreateBooking, UpdateBooking},
};

use super::pdf_response;

/// List all bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    responses(
        (status = 200, description = "List of bookings", body = Vec<BookingDetails>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.list().await?;
    Ok(Json(bookings))
}

/// Book a cylinder
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created with its bill", body = BookingDetails),
        (status = 400, description = "Booked too recently or invalid delivery date", body = crate::error::ErrorResponse),
        (status = 404, description = "User or cylinder not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Cylinder not available", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state.services.bookings.create(data).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Get booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get(id).await?;
    Ok(Json(booking))
}

/// Update slot, delivery, payment or status
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Booking updated", body = BookingDetails),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateBooking>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.update(id, data).await?;
    Ok(Json(booking))
}

/// Cancel a booking and release its cylinder
#[utoipa::path(
    put,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingDetails),
        (status = 400, description = "Already cancelled or delivered", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.cancel(id).await?;
    Ok(Json(booking))
}

/// Mark a booking delivered
#[utoipa::path(
    put,
    path = "/bookings/{id}/deliver",
    tag = "bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking delivered", body = BookingDetails),
        (status = 400, description = "Booking cancelled", body = crate::error::ErrorResponse)
    )
)]
pub async fn deliver_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.deliver(id).await?;
    Ok(Json(booking))
}

/// Delete a booking and its bill
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Invoice PDF for a booking
#[utoipa::path(
    get,
    path = "/bookings/{id}/pdf",
    tag = "bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Invoice", content_type = "application/pdf"),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn booking_pdf(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let bytes = state.services.bookings.invoice_pdf(id).await?;
    Ok(pdf_response(bytes, &format!("booking-{}.pdf", id)))
}
