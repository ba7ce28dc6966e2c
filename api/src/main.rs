use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use spear_api::app::create_app;
use spear_api::routes::auth::AppState;
use spear_api::telemetry::init_tracing;
use spear_core::services::auth::AuthService;
use spear_core::services::token::{KeyMaterialProvider, TokenService, TokenServiceConfig};
use spear_infra::{ConfigLoader, GraphQlUserDirectory};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ConfigLoader::from_env()
        .load()
        .await
        .context("failed to load configuration")?;

    init_tracing(&config.logging)?;
    info!(environment = %config.environment, "Starting Spear auth server");

    // Parse the key pair once, before any worker can race for it
    let provider = KeyMaterialProvider::from_config(&config.auth.jwt);
    let token_service = TokenService::from_provider(
        TokenServiceConfig::from(&config.auth.jwt),
        &provider,
    )
    .context("invalid JWT key material")?;

    let directory = GraphQlUserDirectory::new(&config.user_directory)
        .context("failed to build user directory client")?;
    info!(url = %config.user_directory.url, "User directory configured");

    let auth_service = Arc::new(AuthService::new(
        Arc::new(directory),
        Arc::new(token_service),
    ));
    let app_state = web::Data::new(AppState::new(auth_service));

    let bind_address = config.server.bind_address();
    let api_prefix = config.server.api_prefix.clone();
    info!(address = %bind_address, prefix = %api_prefix, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &api_prefix))
        .shutdown_timeout(config.server.shutdown_timeout);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    info!("Server exiting");
    Ok(())
}
