use crate::{entities::user, services::not_found};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};
use uuid::Uuid;

pub struct UserService;

impl UserService {
    pub const NOT_FOUND: &'static str = "User not found";

    /// Look up the local user for an identity provider subject, creating it on first sight
    pub async fn find_or_create(
        db: &DatabaseConnection,
        subject: &str,
        email: Option<String>,
    ) -> Result<user::Model, DbErr> {
        let txn = db.begin().await?;

        let existing = user::Entity::find()
            .filter(user::Column::Subject.eq(subject))
            .one(&txn)
            .await?;

        if let Some(user) = existing {
            return Ok(user);
        }

        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject: Set(subject.to_owned()),
            email: Set(email),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::info!("Provisioned user {} for subject {subject}", user.id);
        Ok(user)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<user::Model, DbErr> {
        user::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| not_found(Self::NOT_FOUND))
    }
}
