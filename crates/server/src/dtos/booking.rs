use chrono::{DateTime, Utc};
use database::{
    entities::booking,
    services::booking::{BookingChanges, NewBooking},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{ROOM_TYPE_MAX_LEN, check_len};
use crate::error::ApiError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub user_id: Uuid,
    pub room_id: i32,
    /// Defaults to the time the booking is created
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
    #[schema(max_length = 20, example = "double")]
    pub room_type: String,
}

impl TryFrom<CreateBookingRequest> for NewBooking {
    type Error = ApiError;

    fn try_from(request: CreateBookingRequest) -> Result<Self, Self::Error> {
        check_len("room_type", &request.room_type, ROOM_TYPE_MAX_LEN)?;

        Ok(Self {
            user_id: request.user_id,
            room_id: request.room_id,
            start_date: request.start_date,
            end_date: request.end_date,
            room_type: request.room_type,
        })
    }
}

/// Only the dates of a booking can change; omitted fields keep their value
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<UpdateBookingRequest> for BookingChanges {
    fn from(request: UpdateBookingRequest) -> Self {
        Self {
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i32,
    pub user_id: Uuid,
    pub room_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub room_type: String,
}

impl From<booking::Model> for BookingResponse {
    fn from(booking: booking::Model) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            room_id: booking.room_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            room_type: booking.room_type,
        }
    }
}
