pub mod booking;
pub mod room;
pub mod user;

use sea_orm::DbErr;

/// Error returned when a requested row does not exist
pub(crate) fn not_found(message: &str) -> DbErr {
    DbErr::RecordNotFound(message.to_owned())
}
