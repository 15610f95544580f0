use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_items::{ItemService, JsonFileItemStore};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let store = JsonFileItemStore::new(config.storage.data_path());
    if store.ensure_exists().await? {
        info!("Created empty item collection at {}", store.path().display());
    }
    info!("Serving items from {}", store.path().display());

    let state = AppState {
        service: ItemService::new(store),
        config,
    };

    let api_routes = api::routes(&state);

    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.cors).await?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting Catalog API with graceful shutdown ({:?} timeout)",
        state.config.server.shutdown_timeout
    );

    create_production_app(
        app,
        &state.config.server,
        state.config.server.shutdown_timeout,
        async move {
            info!("Shutting down: no open resources to release");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
