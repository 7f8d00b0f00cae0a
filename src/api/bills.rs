//! Bill API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::bill::{Bill, UpdateBill},
};

/// List all bills
#[utoipa::path(
    get,
    path = "/bills",
    tag = "bills",
    responses(
        (status = 200, description = "List of bills", body = Vec<Bill>)
    )
)]
pub async fn list_bills(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Bill>>> {
    let bills = state.services.bills.list().await?;
    Ok(Json(bills))
}

/// Get bill by ID
#[utoipa::path(
    get,
    path = "/bills/{id}",
    tag = "bills",
    params(("id" = i64, Path, description = "Bill ID")),
    responses(
        (status = 200, description = "Bill details", body = Bill),
        (status = 404, description = "Bill not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_bill(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Bill>> {
    let bill = state.services.bills.get(id).await?;
    Ok(Json(bill))
}

/// Change charges; the total is recomputed
#[utoipa::path(
    put,
    path = "/bills/{id}",
    tag = "bills",
    params(("id" = i64, Path, description = "Bill ID")),
    request_body = UpdateBill,
    responses(
        (status = 200, description = "Bill updated", body = Bill),
        (status = 400, description = "Negative amount", body = crate::error::ErrorResponse),
        (status = 404, description = "Bill not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_bill(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateBill>,
) -> AppResult<Json<Bill>> {
    let bill = state.services.bills.update(id, data).await?;
    Ok(Json(bill))
}

/// Delete a bill
#[utoipa::path(
    delete,
    path = "/bills/{id}",
    tag = "bills",
    params(("id" = i64, Path, description = "Bill ID")),
    responses(
        (status = 204, description = "Bill deleted"),
        (status = 404, description = "Bill not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_bill(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.bills.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
