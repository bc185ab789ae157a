use database::entities::room;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ROOM_NUMBER_MAX_LEN, ROOM_TYPE_MAX_LEN, check_len};
use crate::error::ApiError;

/// Body of both room creation and (full-replace) room update
#[derive(Debug, Deserialize, ToSchema)]
pub struct RoomRequest {
    #[schema(max_length = 20, example = "double")]
    pub room_type: String,
    #[schema(max_length = 10, example = "101")]
    pub room_number: String,
}

impl RoomRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_len("room_type", &self.room_type, ROOM_TYPE_MAX_LEN)?;
        check_len("room_number", &self.room_number, ROOM_NUMBER_MAX_LEN)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomResponse {
    pub id: i32,
    pub room_type: String,
    pub room_number: String,
}

impl From<room::Model> for RoomResponse {
    fn from(room: room::Model) -> Self {
        Self {
            id: room.id,
            room_type: room.room_type,
            room_number: room.room_number,
        }
    }
}
