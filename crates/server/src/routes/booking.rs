use axum::{
    Json,
    extract::{Path, State},
};
use database::services::booking::{BookingService, NewBooking};

use crate::{
    app::AppState,
    dtos::booking::{BookingResponse, CreateBookingRequest, UpdateBookingRequest},
    error::ApiError,
};

/// Create a booking for an existing room and user
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking created", body = BookingResponse),
        (status = 404, description = "Room or user not found"),
        (status = 422, description = "Invalid booking fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let new_booking = NewBooking::try_from(body)?;
    let booking = BookingService::create(&state.db, new_booking).await?;
    Ok(Json(booking.into()))
}

/// List all bookings
#[utoipa::path(
    get,
    path = "/bookings",
    responses(
        (status = 200, description = "All bookings", body = Vec<BookingResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = BookingService::list(&state.db).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// Get a booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = BookingService::get(&state.db, id).await?;
    Ok(Json(booking.into()))
}

/// Change a booking's dates, returning the booking as it was before
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated; body is the previous state", body = BookingResponse),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let previous = BookingService::update(&state.db, id, body.into()).await?;
    Ok(Json(previous.into()))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking deleted", body = BookingResponse),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BookingResponse>, ApiError> {
    let deleted = BookingService::delete(&state.db, id).await?;
    Ok(Json(deleted.into()))
}
