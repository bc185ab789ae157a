use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Creates a pooled database connection
///
/// The returned handle is cheap to clone; every clone shares the same pool.
pub async fn create_connection(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(max_connections)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging_level(log::LevelFilter::Debug);

    log::info!("Connecting to database (max {max_connections} connections)");
    Database::connect(options).await
}
