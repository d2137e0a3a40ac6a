//! Rutas HTTP
//!
//! Cada recurso expone su `Router<AppState>`; `create_app_router` los
//! anida bajo `/api` y aplica las capas comunes.

pub mod design_routes;
pub mod lr_routes;
pub mod print_routes;
pub mod share_routes;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::StorageBackendKind;
use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&state.config.cors_origins)
    };

    let lr_router = lr_routes::create_lr_router()
        .merge(print_routes::create_print_router())
        .merge(share_routes::create_share_router())
        .merge(design_routes::create_design_router());

    let mut router = Router::new()
        .route("/health", get(health_check))
        .nest("/api/lr", lr_router)
        .nest("/api/logos", design_routes::create_logo_router())
        .nest("/api/templates", design_routes::create_template_router());

    // Los archivos del storage local se sirven desde el propio backend
    if state.config.storage_backend == StorageBackendKind::Local {
        router = router.nest_service("/assets", ServeDir::new(&state.config.local_storage_dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "lr-management",
        "store": state.store.is_ready(),
        "storage": state.storage.is_ready(),
        "email": state.mailer.is_ready(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
