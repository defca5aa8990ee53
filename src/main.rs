//! Pollbox server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pollbox::adapters::http::{question_routes, QuestionHandlers};
use pollbox::adapters::PostgresPollStore;
use pollbox::application::handlers::question::{
    CreateQuestionHandler, DeleteQuestionHandler, GetQuestionHandler, ListQuestionsHandler,
    UpdateQuestionHandler,
};
use pollbox::config::AppConfig;
use pollbox::ports::PollStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let store: Arc<dyn PollStore> = Arc::new(PostgresPollStore::new(pool));

    let handlers = QuestionHandlers::new(
        Arc::new(CreateQuestionHandler::new(store.clone())),
        Arc::new(GetQuestionHandler::new(store.clone())),
        Arc::new(ListQuestionsHandler::new(store.clone())),
        Arc::new(UpdateQuestionHandler::new(store.clone())),
        Arc::new(DeleteQuestionHandler::new(store)),
    );

    let cors = build_cors(&config);
    let app = Router::new()
        .nest("/api/questions", question_routes(handlers))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
