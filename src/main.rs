mod accounting;
mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod services;

use axum::{
    middleware::from_fn,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{config::Config, services::RedisStore};

#[tokio::main]
async fn main() {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");

    // Initialize Redis client and store
    let redis_client =
        Arc::new(redis::Client::open(config.redis.url).expect("Failed to connect to Redis"));
    let store = RedisStore::new(redis_client);

    // Session store setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session");

    // Create router with all routes
    let app = Router::new()
        // Auth routes
        .route("/", get(handlers::serve_login_page))
        .route(
            "/login",
            get(handlers::serve_login_page).post(handlers::handle_login),
        )
        .route(
            "/signup",
            get(handlers::serve_signup_page).post(handlers::handle_signup),
        )
        .route("/logout", get(handlers::handle_logout))
        // Dashboard
        .route("/dashboard", get(handlers::serve_dashboard))
        // Task routes
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/:task_id",
            axum::routing::put(handlers::update_task).delete(handlers::delete_task),
        )
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        // Add middleware
        .layer(from_fn(middleware::require_auth))
        .layer(session_layer)
        // Add state
        .with_state(store);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Server running on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Failed to start server");
}
