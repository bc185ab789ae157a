use axum::{
    Router, middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    doc::ApiDoc,
    routes::{booking, health, room, user},
    utils::logging::log_request,
};

/// Shared state handed to every handler; the pool is the only thing requests share
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Resource routes, i.e. everything that sits behind authentication when enabled
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/rooms", get(room::list_rooms).post(room::create_room))
        .route(
            "/rooms/{id}",
            get(room::get_room)
                .put(room::update_room)
                .delete(room::delete_room),
        )
        .route(
            "/bookings",
            get(booking::list_bookings).post(booking::create_booking),
        )
        .route(
            "/bookings/{id}",
            get(booking::get_booking)
                .put(booking::update_booking)
                .delete(booking::delete_booking),
        )
        .route("/users/me", get(user::me))
        .route("/users/{id}", get(user::get_user))
        .with_state(state)
}

/// Self-service user registration, mounted only when no identity provider is configured
pub fn user_registration_router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(user::create_user))
        .with_state(state)
}

/// Adds the public endpoints and the cross-cutting layers around `api`
pub fn router(api: Router) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(middleware::from_fn(log_request))
        .layer(CompressionLayer::new())
}
