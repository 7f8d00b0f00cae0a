//! Server-rendered web frontend
//!
//! A separate axum application that renders HTML pages and performs every
//! read and write through the REST API with [`client::ApiClient`].

pub mod client;
pub mod handlers;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use client::ApiClient;

/// Frontend state shared across page handlers
#[derive(Clone)]
pub struct FrontendState {
    pub client: ApiClient,
    /// Shown in the booking form hint
    pub booking_interval_days: i64,
}

/// Create the frontend router with all pages
pub fn create_router(state: FrontendState) -> Router {
    let admin = Router::new()
        .route("/users", get(handlers::admin_users).post(handlers::register_user))
        .route(
            "/users/:id/edit",
            get(handlers::edit_user_form).post(handlers::update_user),
        )
        .route("/users/:id/toggle", post(handlers::toggle_user))
        .route("/suppliers", get(handlers::admin_suppliers))
        .route(
            "/suppliers/new",
            get(handlers::new_supplier_form).post(handlers::create_supplier),
        )
        .route("/suppliers/pdf", get(handlers::suppliers_pdf))
        .route(
            "/suppliers/:id/edit",
            get(handlers::edit_supplier_form).post(handlers::update_supplier),
        )
        .route("/suppliers/:id/activate", post(handlers::activate_supplier))
        .route("/suppliers/:id/deactivate", post(handlers::deactivate_supplier))
        .route("/cylinders", get(handlers::admin_cylinders))
        .route(
            "/cylinders/new",
            get(handlers::new_cylinder_form).post(handlers::create_cylinder),
        )
        .route(
            "/cylinders/:id/edit",
            get(handlers::edit_cylinder_form).post(handlers::update_cylinder),
        )
        .route("/cylinders/:id/delete", post(handlers::delete_cylinder))
        .route("/reports", get(handlers::admin_reports))
        .route("/bookings/:id/cancel", post(handlers::admin_cancel_booking))
        .route("/bookings/:id/deliver", post(handlers::admin_deliver_booking));

    let customer = Router::new()
        .route(
            "/bookings",
            get(handlers::customer_bookings).post(handlers::create_booking),
        )
        .route("/bookings/new", get(handlers::new_booking_form))
        .route("/bookings/:id/cancel", post(handlers::customer_cancel_booking))
        .route("/bills", get(handlers::customer_bills))
        .route("/bills/:id", get(handlers::customer_bill));

    Router::new()
        .route("/", get(handlers::home))
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/dashboard/:role/:id", get(handlers::dashboard))
        .nest("/admin/:admin_id", admin)
        .nest("/customers/:user_id", customer)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    /// Frontend pointed at a backend that refuses connections
    fn test_router() -> Router {
        create_router(FrontendState {
            client: ApiClient::new("http://127.0.0.1:1/api").unwrap(),
            booking_interval_days: 30,
        })
    }

    async fn send(method: Method, uri: &str, form: Option<&str>) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if form.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        }
        let request = builder
            .body(form.map(|f| Body::from(f.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        test_router().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_public_pages_render() {
        let response = send(Method::GET, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(Method::GET, "/login?error=Invalid+password", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Invalid password"));
    }

    #[tokio::test]
    async fn test_non_numeric_login_redirects_with_error() {
        let response = send(Method::POST, "/login", Some("user_id=abc&password=x&role=CUSTOMER")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.starts_with("/login?error="));
    }

    #[tokio::test]
    async fn test_backend_down_renders_error_page() {
        let response = send(Method::GET, "/admin/1/suppliers", None).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Backend unreachable"));
    }

    #[tokio::test]
    async fn test_unknown_page() {
        let response = send(Method::GET, "/nowhere", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
