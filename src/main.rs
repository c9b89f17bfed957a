use admin_gui::{config::Config, resources, settings, web, AppState};
use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting admin GUI service");

    // Load configuration from environment
    let config = Config::load()?;
    tracing::info!(
        environment = ?config.environment,
        tenant = %config.tenant,
        "Configuration loaded"
    );

    // Load and validate the service configuration (logs summary internally);
    // validation failure aborts startup before the listener is bound
    let service_config = settings::load_service_config(&config.service_config)?;

    // Load the resource type catalog and the inventory store
    let (resource_types, store) = resources::load_inventory(config.inventory_seed.as_ref())?;
    tracing::info!(
        resource_types = resource_types.len(),
        resources = store.len(),
        "Inventory initialized"
    );

    // Maps importer against the config generator service
    let importer = resources::MapsImporter::new(&config, &service_config)?;

    // Create shared application state
    let state = Arc::new(AppState {
        config: Arc::new(config.clone()),
        service_config: Arc::new(service_config),
        resource_types,
        store,
        importer,
        routes: web::ResourceRoutes::resources(),
    });

    // Build router
    let app = web::create_router(state);

    // Bind and serve
    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Admin GUI listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
