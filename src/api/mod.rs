mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::db::Database;
use crate::web;

/// Router with permissive CORS, for local use and tests.
pub fn create_router(db: Database) -> Router {
    create_router_with_config(db, ServerConfig::local())
}

/// Each endpoint is registered for exactly one method, so any other method
/// on a known path gets a 405 from the router itself.
pub fn create_router_with_config(db: Database, config: ServerConfig) -> Router {
    let api = Router::new()
        .route("/getTasks", get(handlers::get_tasks))
        .route("/addTask", post(handlers::add_task))
        .route("/updateTask", put(handlers::update_task))
        .route("/deleteTask", delete(handlers::delete_task))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(web::index))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer())
        .with_state(db)
}
