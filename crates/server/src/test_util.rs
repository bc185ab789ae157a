use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use database::db::create_connection;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use crate::app::{self, AppState};

/// Unauthenticated app over a fresh in-memory database
pub async fn setup() -> (Router, DatabaseConnection) {
    let db = create_connection("sqlite::memory:", 1).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let state = AppState { db: db.clone() };
    let api = app::api_router(state.clone()).merge(app::user_registration_router(state));
    let app = app::router(api);
    (app, db)
}

/// Sends one request and decodes the JSON body (`Null` when there is none)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
