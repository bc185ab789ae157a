use crate::{entities::room, services::not_found};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, TransactionTrait,
};

pub struct RoomService;

impl RoomService {
    pub const NOT_FOUND: &'static str = "Room not found";

    /// Insert a new room and return it with its generated identifier
    pub async fn create(
        db: &DatabaseConnection,
        room_type: String,
        room_number: String,
    ) -> Result<room::Model, DbErr> {
        let txn = db.begin().await?;

        let room = room::ActiveModel {
            id: NotSet,
            room_type: Set(room_type),
            room_number: Set(room_number),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::debug!("Created room {}", room.id);
        Ok(room)
    }

    /// All rooms, in no particular order
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<room::Model>, DbErr> {
        room::Entity::find().all(db).await
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<room::Model, DbErr> {
        Self::find(db, id).await
    }

    /// Replace both fields of a room
    ///
    /// Returns the room as it was *before* the update.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        room_type: String,
        room_number: String,
    ) -> Result<room::Model, DbErr> {
        let txn = db.begin().await?;
        let existing = Self::find(&txn, id).await?;

        let mut active: room::ActiveModel = existing.clone().into();
        active.room_type = Set(room_type);
        active.room_number = Set(room_number);
        active.update(&txn).await?;

        txn.commit().await?;
        log::debug!("Updated room {id}");
        Ok(existing)
    }

    /// Delete a room and return the deleted row
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<room::Model, DbErr> {
        let txn = db.begin().await?;
        let existing = Self::find(&txn, id).await?;

        let result = room::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            // Removed by a concurrent request after our read
            return Err(not_found(Self::NOT_FOUND));
        }

        txn.commit().await?;
        log::debug!("Deleted room {id}");
        Ok(existing)
    }

    async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<room::Model, DbErr> {
        room::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| not_found(Self::NOT_FOUND))
    }
}
