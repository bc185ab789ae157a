use axum::{
    Json,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
};
use database::services::user::UserService;
use tower_oauth2_resource_server::claims::DefaultClaims;
use uuid::Uuid;

use crate::{
    app::AppState,
    dtos::user::{CreateUserRequest, UserResponse},
    error::ApiError,
};

/// Subject of the bearer token validated by the identity provider layer
pub struct AuthenticatedSubject(pub String);

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedSubject {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DefaultClaims>()
            .and_then(|claims| claims.sub.clone())
            .map(Self)
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_owned()))
    }
}

/// Returns the caller's user record, creating it on first use
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedSubject(subject): AuthenticatedSubject,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserService::find_or_create(&state.db, &subject, None).await?;
    Ok(Json(user.into()))
}

/// Register a user by subject, returning the existing row if already known
///
/// Only routed while authentication is disabled.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 422, description = "Invalid user fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    body.validate()?;
    let user = UserService::find_or_create(&state.db, &body.subject, body.email).await?;
    Ok(Json(user.into()))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserService::get(&state.db, id).await?;
    Ok(Json(user.into()))
}
