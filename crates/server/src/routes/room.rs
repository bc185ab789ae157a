use axum::{
    Json,
    extract::{Path, State},
};
use database::services::room::RoomService;

use crate::{
    app::AppState,
    dtos::room::{RoomRequest, RoomResponse},
    error::ApiError,
};

/// Create a room
#[utoipa::path(
    post,
    path = "/rooms",
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room created", body = RoomResponse),
        (status = 422, description = "Invalid room fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rooms"
)]
pub async fn create_room(
    State(state): State<AppState>,
    Json(body): Json<RoomRequest>,
) -> Result<Json<RoomResponse>, ApiError> {
    body.validate()?;
    let room = RoomService::create(&state.db, body.room_type, body.room_number).await?;
    Ok(Json(room.into()))
}

/// List all rooms
#[utoipa::path(
    get,
    path = "/rooms",
    responses(
        (status = 200, description = "All rooms", body = Vec<RoomResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rooms"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let rooms = RoomService::list(&state.db).await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// Get a room by ID
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room found", body = RoomResponse),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rooms"
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RoomResponse>, ApiError> {
    let room = RoomService::get(&state.db, id).await?;
    Ok(Json(room.into()))
}

/// Replace a room's type and number, returning the room as it was before
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room updated; body is the previous state", body = RoomResponse),
        (status = 404, description = "Room not found"),
        (status = 422, description = "Invalid room fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rooms"
)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<RoomRequest>,
) -> Result<Json<RoomResponse>, ApiError> {
    body.validate()?;
    let previous = RoomService::update(&state.db, id, body.room_type, body.room_number).await?;
    Ok(Json(previous.into()))
}

/// Delete a room (and, by cascade, its bookings)
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room deleted", body = RoomResponse),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rooms"
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RoomResponse>, ApiError> {
    let deleted = RoomService::delete(&state.db, id).await?;
    Ok(Json(deleted.into()))
}

#[cfg(test)]
mod tests {
    use crate::test_util::{send, setup};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_fetch_room() {
        let (app, _db) = setup().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/rooms",
            Some(json!({"room_type": "double", "room_number": "101"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_i64().expect("generated id");

        let (status, fetched) = send(&app, Method::GET, &format!("/rooms/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
        assert_eq!(fetched["room_type"], "double");
        assert_eq!(fetched["room_number"], "101");
    }

    #[tokio::test]
    async fn test_list_rooms() {
        let (app, _db) = setup().await;

        for number in ["101", "102", "103", "104"] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/rooms",
                Some(json!({"room_type": "single", "room_number": number})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, rooms) = send(&app, Method::GET, "/rooms", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rooms.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_missing_room_is_404() {
        let (app, _db) = setup().await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/rooms/99",
            Some(json!({"room_type": "suite", "room_number": "900"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Room not found");

        let (_, rooms) = send(&app, Method::GET, "/rooms", None).await;
        assert!(rooms.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_returns_previous_room() {
        let (app, _db) = setup().await;
        let (_, created) = send(
            &app,
            Method::POST,
            "/rooms",
            Some(json!({"room_type": "single", "room_number": "101"})),
        )
        .await;
        let uri = format!("/rooms/{}", created["id"]);

        let (status, previous) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"room_type": "suite", "room_number": "900"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(previous, created);

        let (_, current) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(current["room_type"], "suite");
        assert_eq!(current["room_number"], "900");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_404() {
        let (app, _db) = setup().await;
        let (_, created) = send(
            &app,
            Method::POST,
            "/rooms",
            Some(json!({"room_type": "double", "room_number": "202"})),
        )
        .await;
        let uri = format!("/rooms/{}", created["id"]);

        let (status, deleted) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, created);

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rejects_malformed_rooms() {
        let (app, _db) = setup().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/rooms",
            Some(json!({"room_type": "double", "room_number": "12345678901"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "room_number must be at most 10 characters");

        let (status, _) = send(
            &app,
            Method::POST,
            "/rooms",
            Some(json!({"room_type": "double"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
