use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use crate::db::create_connection;

/// Fresh in-memory database with every migration applied
pub async fn setup() -> DatabaseConnection {
    // A single connection keeps the in-memory database alive for the whole test
    let db = create_connection("sqlite::memory:", 1).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}
