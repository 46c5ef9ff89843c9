use api_client::{AwesomeApiClient, RateSource};
use axum::{routing::get, Router};
use configuration::Config;
use database::DbRepository;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod pipeline;

pub use pipeline::{quote_and_store, Timeouts};

/// The shared application state that all handlers can access.
///
/// The pool inside `db_repo` is the only state shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RateSource>,
    pub db_repo: DbRepository,
    pub timeouts: Timeouts,
}

/// Builds the application router over an already assembled state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/cotacao", get(handlers::get_cotacao))
        .route("/cotacoes", get(handlers::get_recent_rates))
        .with_state(state)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Opens the database, wires the live upstream client, and serves until
/// `shutdown` resolves.
pub async fn run_server(
    config: &Config,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let db_pool = database::connect(&config.database).await?;
    database::run_migrations(&db_pool).await?;

    let app_state = Arc::new(AppState {
        source: Arc::new(AwesomeApiClient::new(&config.upstream)?),
        db_repo: DbRepository::new(db_pool.clone()),
        timeouts: Timeouts::from(&config.server),
    });
    let app = build_router(app_state);

    let listener = TcpListener::bind(config.server.addr).await?;
    tracing::info!(
        addr = %config.server.addr,
        fetch_timeout = ?config.server.fetch_timeout(),
        persist_timeout = ?config.server.persist_timeout(),
        "Web server listening."
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    db_pool.close().await;
    tracing::info!("Web server stopped.");
    Ok(())
}
