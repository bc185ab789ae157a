use crate::{
    entities::{booking, room, user},
    services::{not_found, room::RoomService, user::UserService},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, TransactionTrait,
};
use uuid::Uuid;

/// Fields required to create a booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub room_id: i32,
    /// Defaults to the time of creation
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
    pub room_type: String,
}

/// Fields a booking update may change; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl BookingChanges {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

pub struct BookingService;

impl BookingService {
    pub const NOT_FOUND: &'static str = "Booking not found";

    /// Insert a booking after checking that its room and user exist
    ///
    /// No date ordering or overlap checks are made; two bookings may cover the
    /// same room over the same period.
    pub async fn create(
        db: &DatabaseConnection,
        new_booking: NewBooking,
    ) -> Result<booking::Model, DbErr> {
        let txn = db.begin().await?;

        if room::Entity::find_by_id(new_booking.room_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(not_found(RoomService::NOT_FOUND));
        }

        if user::Entity::find_by_id(new_booking.user_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(not_found(UserService::NOT_FOUND));
        }

        let booking = booking::ActiveModel {
            id: NotSet,
            user_id: Set(new_booking.user_id),
            room_id: Set(new_booking.room_id),
            start_date: Set(new_booking.start_date.unwrap_or_else(Utc::now)),
            end_date: Set(new_booking.end_date),
            room_type: Set(new_booking.room_type),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::debug!(
            "Created booking {} for room {} and user {}",
            booking.id,
            booking.room_id,
            booking.user_id
        );
        Ok(booking)
    }

    /// All bookings, in no particular order
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<booking::Model>, DbErr> {
        booking::Entity::find().all(db).await
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<booking::Model, DbErr> {
        Self::find(db, id).await
    }

    /// Change the dates present in `changes`
    ///
    /// Returns the booking as it was *before* the update.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: BookingChanges,
    ) -> Result<booking::Model, DbErr> {
        let txn = db.begin().await?;
        let existing = Self::find(&txn, id).await?;

        if !changes.is_empty() {
            let mut active: booking::ActiveModel = existing.clone().into();
            if let Some(start_date) = changes.start_date {
                active.start_date = Set(start_date);
            }
            if let Some(end_date) = changes.end_date {
                active.end_date = Set(end_date);
            }
            active.update(&txn).await?;
        }

        txn.commit().await?;
        log::debug!("Updated booking {id}");
        Ok(existing)
    }

    /// Delete a booking and return the deleted row
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<booking::Model, DbErr> {
        let txn = db.begin().await?;
        let existing = Self::find(&txn, id).await?;

        let result = booking::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            // Removed by a concurrent request after our read
            return Err(not_found(Self::NOT_FOUND));
        }

        txn.commit().await?;
        log::debug!("Deleted booking {id}");
        Ok(existing)
    }

    async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<booking::Model, DbErr> {
        booking::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| not_found(Self::NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::setup;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 14, 0, 0).unwrap()
    }

    fn expect_not_found(result: Result<booking::Model, DbErr>, expected: &str) {
        match result {
            Err(DbErr::RecordNotFound(message)) => assert_eq!(message, expected),
            other => panic!("expected RecordNotFound, got {other:?}"),
        }
    }

    async fn room_and_user(db: &DatabaseConnection) -> (room::Model, user::Model) {
        let room = RoomService::create(db, "double".to_owned(), "101".to_owned())
            .await
            .unwrap();
        let user = UserService::find_or_create(db, "auth0|guest", None)
            .await
            .unwrap();
        (room, user)
    }

    fn new_booking(room: &room::Model, user: &user::Model, start: u32, end: u32) -> NewBooking {
        NewBooking {
            user_id: user.id,
            room_id: room.id,
            start_date: Some(at(start)),
            end_date: at(end),
            room_type: room.room_type.clone(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let db = setup().await;
        let (room, user) = room_and_user(&db).await;

        let created = BookingService::create(&db, new_booking(&room, &user, 1, 4))
            .await
            .unwrap();
        assert_eq!(created.room_id, room.id);
        assert_eq!(created.user_id, user.id);
        assert_eq!(created.start_date, at(1));
        assert_eq!(created.end_date, at(4));

        assert_eq!(BookingService::get(&db, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_start_date_defaults_to_now() {
        let db = setup().await;
        let (room, user) = room_and_user(&db).await;

        let before = Utc::now();
        let mut booking = new_booking(&room, &user, 1, 4);
        booking.start_date = None;
        booking.end_date = before + chrono::Duration::days(3);

        let created = BookingService::create(&db, booking).await.unwrap();
        assert!(created.start_date >= before - chrono::Duration::seconds(1));
        assert!(created.start_date <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_with_missing_room() {
        let db = setup().await;
        let (room, user) = room_and_user(&db).await;

        let mut booking = new_booking(&room, &user, 1, 4);
        booking.room_id = room.id + 100;

        expect_not_found(
            BookingService::create(&db, booking).await,
            RoomService::NOT_FOUND,
        );
        assert!(BookingService::list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_missing_user() {
        let db = setup().await;
        let (room, user) = room_and_user(&db).await;

        let mut booking = new_booking(&room, &user, 1, 4);
        booking.user_id = Uuid::new_v4();

        expect_not_found(
            BookingService::create(&db, booking).await,
            UserService::NOT_FOUND,
        );
    }

    #[tokio::test]
    async fn test_overlapping_bookings_are_accepted() {
        let db = setup().await;
        let (room, user) = room_and_user(&db).await;

        BookingService::create(&db, new_booking(&room, &user, 1, 5))
            .await
            .unwrap();
        BookingService::create(&db, new_booking(&room, &user, 3, 7))
            .await
            .unwrap();

        assert_eq!(BookingService::list(&db).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let db = setup().await;
        let (room, user) = room_and_user(&db).await;
        let booking = BookingService::create(&db, new_booking(&room, &user, 1, 4))
            .await
            .unwrap();

        let previous = BookingService::update(
            &db,
            booking.id,
            BookingChanges {
                start_date: None,
                end_date: Some(at(9)),
            },
        )
        .await
        .unwrap();
        assert_eq!(previous, booking);

        let current = BookingService::get(&db, booking.id).await.unwrap();
        assert_eq!(current.start_date, at(1));
        assert_eq!(current.end_date, at(9));
        assert_eq!(current.room_id, booking.room_id);
        assert_eq!(current.user_id, booking.user_id);
        assert_eq!(current.room_type, booking.room_type);
    }

    #[tokio::test]
    async fn test_update_missing_booking() {
        let db = setup().await;

        expect_not_found(
            BookingService::update(&db, 7, BookingChanges::default()).await,
            BookingService::NOT_FOUND,
        );
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let db = setup().await;
        let (room, user) = room_and_user(&db).await;
        let booking = BookingService::create(&db, new_booking(&room, &user, 1, 4))
            .await
            .unwrap();

        assert_eq!(BookingService::delete(&db, booking.id).await.unwrap(), booking);
        expect_not_found(
            BookingService::get(&db, booking.id).await,
            BookingService::NOT_FOUND,
        );
    }

    #[tokio::test]
    async fn test_concurrent_deletes_succeed_once() {
        let db = setup().await;
        let (room, user) = room_and_user(&db).await;
        let booking = BookingService::create(&db, new_booking(&room, &user, 1, 4))
            .await
            .unwrap();

        let (first, second) = tokio::join!(
            BookingService::delete(&db, booking.id),
            BookingService::delete(&db, booking.id)
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let failed = results.into_iter().find(|r| r.is_err()).unwrap();
        expect_not_found(failed, BookingService::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deleting_room_removes_its_bookings() {
        let db = setup().await;
        let (room, user) = room_and_user(&db).await;
        BookingService::create(&db, new_booking(&room, &user, 1, 4))
            .await
            .unwrap();

        RoomService::delete(&db, room.id).await.unwrap();

        assert!(BookingService::list(&db).await.unwrap().is_empty());
    }
}
