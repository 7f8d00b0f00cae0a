//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bills, bookings, cylinders, health, suppliers, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fuel Pro API",
        version = "1.0.0",
        description = "Fuel agency management REST API: customers, suppliers, cylinders, bookings and bills"
    ),
    servers(
        (url = "/api", description = "REST API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::create_user,
        users::login,
        users::check_email,
        users::check_phone,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::set_user_status,
        users::user_bookings,
        users::user_bills,
        users::user_eligibility,
        // Suppliers
        suppliers::list_suppliers,
        suppliers::create_supplier,
        suppliers::search_suppliers,
        suppliers::suppliers_pdf,
        suppliers::get_supplier,
        suppliers::update_supplier,
        suppliers::activate_supplier,
        suppliers::deactivate_supplier,
        // Cylinders
        cylinders::list_cylinders,
        cylinders::create_cylinder,
        cylinders::get_cylinder,
        cylinders::update_cylinder,
        cylinders::refill_cylinder,
        cylinders::delete_cylinder,
        // Bookings
        bookings::list_bookings,
        bookings::create_booking,
        bookings::get_booking,
        bookings::update_booking,
        bookings::cancel_booking,
        bookings::deliver_booking,
        bookings::delete_booking,
        bookings::booking_pdf,
        // Bills
        bills::list_bills,
        bills::get_bill,
        bills::update_bill,
        bills::delete_bill,
    ),
    components(
        schemas(
            // Enums
            crate::models::enums::UserRole,
            crate::models::enums::ConnectionStatus,
            crate::models::enums::ConnectionType,
            crate::models::enums::EntityStatus,
            crate::models::enums::CylinderType,
            crate::models::enums::CylinderStatus,
            crate::models::enums::TimeSlot,
            crate::models::enums::DeliveryOption,
            crate::models::enums::PaymentMode,
            crate::models::enums::PaymentStatus,
            crate::models::enums::BookingStatus,
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::user::LoginRequest,
            crate::models::user::AvailabilityResponse,
            crate::models::user::BookingEligibility,
            // Suppliers
            crate::models::supplier::Supplier,
            crate::models::supplier::SupplierPayload,
            crate::models::supplier::InventoryCounts,
            // Cylinders
            crate::models::cylinder::Cylinder,
            crate::models::cylinder::CreateCylinder,
            crate::models::cylinder::UpdateCylinder,
            crate::models::cylinder::RefillRequest,
            // Bookings
            crate::models::booking::BookingDetails,
            crate::models::booking::CreateBooking,
            crate::models::booking::UpdateBooking,
            // Bills
            crate::models::bill::Bill,
            crate::models::bill::UpdateBill,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Customer and admin accounts"),
        (name = "suppliers", description = "Supplier management"),
        (name = "cylinders", description = "Cylinder inventory"),
        (name = "bookings", description = "Cylinder bookings"),
        (name = "bills", description = "Bills")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_booking_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/bookings"));
        assert!(doc.paths.paths.contains_key("/bookings/{id}/cancel"));
        assert!(doc.paths.paths.contains_key("/suppliers/pdf"));
        assert!(doc.paths.paths.contains_key("/users/{id}/eligibility"));
    }
}
