pub mod booking;
pub mod room;
pub mod user;

use crate::error::ApiError;

/// Column widths of the string fields
pub const ROOM_TYPE_MAX_LEN: usize = 20;
pub const ROOM_NUMBER_MAX_LEN: usize = 10;

/// Rejects values that would not fit their column
pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
