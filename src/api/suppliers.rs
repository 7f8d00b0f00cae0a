//! Supplier API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::supplier::{Supplier, SupplierPayload, SupplierQuery, SupplierSearch},
};

use super::pdf_response;

/// List suppliers
#[utoipa::path(
    get,
    path = "/suppliers",
    tag = "suppliers",
    params(SupplierQuery),
    responses(
        (status = 200, description = "List of suppliers", body = Vec<Supplier>)
    )
)]
pub async fn list_suppliers(
    State(state): State<crate::AppState>,
    Query(query): Query<SupplierQuery>,
) -> AppResult<Json<Vec<Supplier>>> {
    let suppliers = state.services.suppliers.list(query.status).await?;
    Ok(Json(suppliers))
}

/// Register a supplier
#[utoipa::path(
    post,
    path = "/suppliers",
    tag = "suppliers",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Supplier created", body = Supplier),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_supplier(
    State(state): State<crate::AppState>,
    Json(data): Json<SupplierPayload>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    data.validate()?;
    let supplier = state.services.suppliers.create(data).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// Search suppliers by name
#[utoipa::path(
    get,
    path = "/suppliers/search",
    tag = "suppliers",
    params(SupplierSearch),
    responses(
        (status = 200, description = "Matching suppliers", body = Vec<Supplier>)
    )
)]
pub async fn search_suppliers(
    State(state): State<crate::AppState>,
    Query(query): Query<SupplierSearch>,
) -> AppResult<Json<Vec<Supplier>>> {
    let suppliers = state.services.suppliers.search(&query.name, query.exact).await?;
    Ok(Json(suppliers))
}

/// PDF report of suppliers with a given status
#[utoipa::path(
    get,
    path = "/suppliers/pdf",
    tag = "suppliers",
    params(SupplierQuery),
    responses(
        (status = 200, description = "PDF report", content_type = "application/pdf"),
        (status = 404, description = "No supplier has this status", body = crate::error::ErrorResponse)
    )
)]
pub async fn suppliers_pdf(
    State(state): State<crate::AppState>,
    Query(query): Query<SupplierQuery>,
) -> AppResult<Response> {
    let status = query
        .status
        .ok_or_else(|| AppError::BadRequest("status parameter is required".to_string()))?;
    let bytes = state.services.suppliers.status_report_pdf(status).await?;
    let filename = format!("{}_suppliers.pdf", status.as_str().to_lowercase());
    Ok(pdf_response(bytes, &filename))
}

/// Get supplier by ID
#[utoipa::path(
    get,
    path = "/suppliers/{id}",
    tag = "suppliers",
    params(("id" = i64, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier details", body = Supplier),
        (status = 404, description = "Supplier not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_supplier(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Supplier>> {
    let supplier = state.services.suppliers.get(id).await?;
    Ok(Json(supplier))
}

/// Update supplier details
#[utoipa::path(
    put,
    path = "/suppliers/{id}",
    tag = "suppliers",
    params(("id" = i64, Path, description = "Supplier ID")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Supplier updated", body = Supplier),
        (status = 404, description = "Supplier not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_supplier(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(data): Json<SupplierPayload>,
) -> AppResult<Json<Supplier>> {
    data.validate()?;
    let supplier = state.services.suppliers.update(id, data).await?;
    Ok(Json(supplier))
}

/// Activate a supplier
#[utoipa::path(
    put,
    path = "/suppliers/{id}/activate",
    tag = "suppliers",
    params(("id" = i64, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier activated", body = Supplier),
        (status = 400, description = "Already active", body = crate::error::ErrorResponse)
    )
)]
pub async fn activate_supplier(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Supplier>> {
    let supplier = state.services.suppliers.activate(id).await?;
    Ok(Json(supplier))
}

/// Deactivate a supplier
#[utoipa::path(
    put,
    path = "/suppliers/{id}/deactivate",
    tag = "suppliers",
    params(("id" = i64, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier deactivated", body = Supplier),
        (status = 400, description = "Already inactive", body = crate::error::ErrorResponse)
    )
)]
pub async fn deactivate_supplier(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Supplier>> {
    let supplier = state.services.suppliers.deactivate(id).await?;
    Ok(Json(supplier))
}
