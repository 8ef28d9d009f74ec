//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications, and Swagger UI
//! serves the generated document at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/auth/login` - Log in with email or phone and password
/// - `GET /api/auth/logout` - Logout current user
/// - `GET /api/auth/user` - Role and hostel scope of the current user
/// - `POST /api/rooms`, `DELETE /api/rooms/{room_id}`, `POST /api/rooms/{room_id}/restore`
/// - `GET /api/hostels/{hostel_id}/rooms`
/// - `POST /api/beds`, `DELETE /api/beds/{bed_id}`
/// - `POST /api/beds/{bed_id}/assign`, `POST /api/beds/{bed_id}/vacate`
/// - `GET /api/hostels/{hostel_id}/beds/available`
/// - `POST /api/tenants`, `GET /api/tenants/{tenant_id}`, `GET /api/tenants/{tenant_id}/stays`
/// - `POST /api/tenants/{tenant_id}/check-in`, `POST /api/tenants/{tenant_id}/check-out`
/// - `POST /api/visitors`, `POST /api/visitors/{user_id}/extend`,
///   `POST /api/visitors/{user_id}/revoke`, `GET /api/hostels/{hostel_id}/visitors`
/// - `GET /api/hostels/{hostel_id}/usage` - Plan usage of a hostel
///
/// # Returns
/// An Axum `Router<AppState>` with all routes and the Swagger UI, ready for state and the
/// session layer.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(app_state).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Hostel", description = "Hostel management API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::room::ROOM_TAG, description = "Room API routes"),
        (name = controller::bed::BED_TAG, description = "Bed and occupancy API routes"),
        (name = controller::tenant::TENANT_TAG, description = "Tenant and stay API routes"),
        (name = controller::visitor::VISITOR_TAG, description = "Visitor API routes"),
        (name = controller::subscription::SUBSCRIPTION_TAG, description = "Subscription API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::room::create_room))
        .routes(routes!(controller::room::list_rooms))
        .routes(routes!(controller::room::delete_room))
        .routes(routes!(controller::room::restore_room))
        .routes(routes!(controller::bed::create_bed))
        .routes(routes!(controller::bed::list_available_beds))
        .routes(routes!(controller::bed::assign_bed))
        .routes(routes!(controller::bed::vacate_bed))
        .routes(routes!(controller::bed::delete_bed))
        .routes(routes!(controller::tenant::create_tenant))
        .routes(routes!(controller::tenant::get_tenant))
        .routes(routes!(controller::tenant::check_in))
        .routes(routes!(controller::tenant::check_out))
        .routes(routes!(controller::tenant::stay_history))
        .routes(routes!(controller::visitor::create_visitor))
        .routes(routes!(controller::visitor::extend_visitor_access))
        .routes(routes!(controller::visitor::revoke_visitor_access))
        .routes(routes!(controller::visitor::get_active_visitors))
        .routes(routes!(controller::subscription::get_feature_usage))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
