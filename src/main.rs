use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use blog_api::application::services::tokens::TokenService;
use blog_api::bootstrap::app_context::{AppContext, AppServices};
use blog_api::bootstrap::config::Config;
use blog_api::infrastructure::db::repositories::blog_repository_mongo::MongoBlogRepository;
use blog_api::infrastructure::db::repositories::comment_repository_mongo::MongoCommentRepository;
use blog_api::infrastructure::db::repositories::user_repository_mongo::MongoUserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "blog_api=debug,tower_http=info,axum=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting blog API");

    let store = blog_api::infrastructure::db::connect(&cfg).await?;

    let services = AppServices::new(
        Arc::new(MongoUserRepository::new(store.clone())),
        Arc::new(MongoBlogRepository::new(store.clone())),
        Arc::new(MongoCommentRepository::new(store.clone())),
        Arc::new(store),
        TokenService::new(&cfg.token_secret, cfg.jwt_expires_secs),
    );
    let ctx = AppContext::new(cfg.clone(), services);
    let app = blog_api::presentation::http::router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    info!(%addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
}
