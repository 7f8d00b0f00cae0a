//! Cylinder API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::cylinder::{CreateCylinder, Cylinder, CylinderQuery, RefillRequest, UpdateCylinder},
};

/// List cylinders, optionally by status and type
#[utoipa::path(
    get,
    path = "/cylinders",
    tag = "cylinders",
    params(CylinderQuery),
    responses(
        (status = 200, description = "List of cylinders", body = Vec<Cylinder>)
    )
)]
pub async fn list_cylinders(
    State(state): State<crate::AppState>,
    Query(query): Query<CylinderQuery>,
) -> AppResult<Json<Vec<Cylinder>>> {
    let cylinders = state.services.cylinders.list(&query).await?;
    Ok(Json(cylinders))
}

/// Add a cylinder to a supplier's inventory
#[utoipa::path(
    post,
    path = "/cylinders",
    tag = "cylinders",
    request_body = CreateCylinder,
    responses(
        (status = 201, description = "Cylinder added", body = Cylinder),
        (status = 400, description = "Supplier inactive", body = crate::error::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_cylinder(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateCylinder>,
) -> AppResult<(StatusCode, Json<Cylinder>)> {
    let cylinder = state.services.cylinders.create(data).await?;
    Ok((StatusCode::CREATED, Json(cylinder)))
}

/// Get cylinder by ID
#[utoipa::path(
    get,
    path = "/cylinders/{id}",
    tag = "cylinders",
    params(("id" = i64, Path, description = "Cylinder ID")),
    responses(
        (status = 200, description = "Cylinder details", body = Cylinder),
        (status = 404, description = "Cylinder not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_cylinder(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Cylinder>> {
    let cylinder = state.services.cylinders.get(id).await?;
    Ok(Json(cylinder))
}

/// Update type, status or refill date
#[utoipa::path(
    put,
    path = "/cylinders/{id}",
    tag = "cylinders",
    params(("id" = i64, Path, description = "Cylinder ID")),
    request_body = UpdateCylinder,
    responses(
        (status = 200, description = "Cylinder updated", body = Cylinder),
        (status = 404, description = "Cylinder not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_cylinder(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateCylinder>,
) -> AppResult<Json<Cylinder>> {
    let cylinder = state.services.cylinders.update(id, data).await?;
    Ok(Json(cylinder))
}

/// Record a refill
#[utoipa::path(
    put,
    path = "/cylinders/{id}/refill",
    tag = "cylinders",
    params(("id" = i64, Path, description = "Cylinder ID")),
    request_body = RefillRequest,
    responses(
        (status = 200, description = "Cylinder refilled", body = Cylinder),
        (status = 400, description = "Missing or future date, cylinder not available, or supplier inactive", body = crate::error::ErrorResponse)
    )
)]
pub async fn refill_cylinder(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<RefillRequest>,
) -> AppResult<Json<Cylinder>> {
    let cylinder = state.services.cylinders.refill(id, request).await?;
    Ok(Json(cylinder))
}

/// Delete a cylinder no booking refers to
#[utoipa::path(
    delete,
    path = "/cylinders/{id}",
    tag = "cylinders",
    params(("id" = i64, Path, description = "Cylinder ID")),
    responses(
        (status = 204, description = "Cylinder deleted"),
        (status = 409, description = "Cylinder referenced by bookings", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_cylinder(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.cylinders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
