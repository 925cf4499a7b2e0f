// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use ingest_core::kernel::{BaseAI, OpenAIService, PostgresCompanyStore, ServerDeps};
use ingest_core::server::{build_app, AppOptions};
use ingest_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ingest_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting company ingest API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let ai: Option<Arc<dyn BaseAI>> = match (&config.openai_api_key, config.openai_enabled()) {
        (Some(api_key), true) => {
            tracing::info!(model = %config.openai_model, "AI enrichment enabled");
            Some(Arc::new(
                OpenAIService::new(api_key.clone(), config.openai_model.clone())
                    .with_timeout(config.enrichment_timeout),
            ))
        }
        _ => {
            tracing::info!("AI enrichment disabled");
            None
        }
    };

    let deps = ServerDeps::new(
        Arc::new(PostgresCompanyStore::new(pool)),
        ai,
        config.enrichment_settings(),
    );

    // Build application
    let app = build_app(
        deps,
        AppOptions {
            allowed_origins: config.allowed_origins.clone(),
            max_upload_bytes: config.max_upload_bytes,
        },
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
