//! Catalog server: reads settings, picks a store, creates the schema, serves the API.

use catalog_api::{app, ensure_database_exists, AppState, CatalogStore, MemoryStore, PgStore, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("catalog_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store: Arc<dyn CatalogStore> = match &settings.database_url {
        Some(url) => {
            ensure_database_exists(url).await?;
            Arc::new(PgStore::connect(url, settings.max_connections).await?)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };
    if settings.create_schema {
        store.create_schema().await?;
    }

    let router = app(AppState::new(store), settings.admin_routes);
    let listener = TcpListener::bind(&settings.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
