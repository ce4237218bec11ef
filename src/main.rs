use std::{path::Path, sync::Arc};

use anyhow::Context;
use teamtodo_server::{
    app_state::AppState, authentication::auth, build_app, data_access::data_context::DataContext,
    settings::Settings,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Settings & logging ─────────────────────────────────────
    let settings_path = Settings::path();
    let settings = Settings::load()?;
    init_tracing(&settings);

    if !Path::new(&settings_path).exists() {
        tracing::warn!(path = %settings_path, "settings file not found, using defaults");
    }

    // ── Storage ────────────────────────────────────────────────
    let data_context = DataContext::open(&settings.database_path)
        .with_context(|| format!("failed to open database {}", settings.database_path))?;

    if auth::ensure_default_user(&data_context, &settings)? {
        tracing::info!(username = %settings.default_admin_username, "seeded default admin user");
    }
    tracing::info!(
        users = data_context.user_count()?,
        database = %settings.database_path,
        "storage ready"
    );

    // ── Router ─────────────────────────────────────────────────
    let addr = settings.bind_address();
    let state = Arc::new(AppState::new(data_context, settings));
    let app = build_app(state);

    // ── Start ──────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
