mod app;
mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

#[cfg(test)]
mod test_util;

use std::error::Error;

use app::AppState;
use config::Config;
use database::db::create_connection;
use log::{info, warn};
use migration::{Migrator, MigratorTrait};
use tower::ServiceBuilder;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utils::shutdown::shutdown_signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    let db = create_connection(&config.database_url, config.max_connections).await?;
    if config.run_migrations {
        info!("Applying pending migrations");
        Migrator::up(&db, None).await?;
    }

    let state = AppState { db };
    let api = app::api_router(state.clone());
    let api = match &config.oidc_issuer_url {
        Some(issuer_url) => {
            let oauth2_resource_server = <OAuth2ResourceServer>::builder()
                .issuer_url(issuer_url.as_str())
                .build()
                .await
                .map_err(|err| format!("failed to build OAuth2ResourceServer: {err:?}"))?;
            info!("Validating bearer tokens issued by {issuer_url}");

            api.layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()))
        }
        None => {
            warn!("OIDC_ISSUER_URL is not set; API routes are unauthenticated");
            api.merge(app::user_registration_router(state))
        }
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app::router(api))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
