use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{header, HeaderMap},
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::DesignController;
use crate::dto::design_dto::{DesignRequest, DesignResponse, LogoUploadResponse, TemplateInfo};
use crate::dto::ApiResponse;
use crate::services::design_service::MAX_LOGO_BYTES;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de diseño anidadas bajo `/api/lr`
pub fn create_design_router() -> Router<AppState> {
    Router::new().route("/:id/design", patch(update_design))
}

/// Subida de logos. El límite de body deja pasar archivos algo mayores
/// que el máximo para responder con el error 413 propio.
pub fn create_logo_router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_logo))
        .layer(DefaultBodyLimit::max(MAX_LOGO_BYTES * 2))
}

pub fn create_template_router() -> Router<AppState> {
    Router::new().route("/", get(list_templates))
}

async fn list_templates(State(state): State<AppState>) -> Json<ApiResponse<Vec<TemplateInfo>>> {
    let controller = DesignController::new(state);
    Json(ApiResponse::success(controller.templates()))
}

async fn update_design(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DesignRequest>,
) -> Result<Json<ApiResponse<DesignResponse>>, AppError> {
    let controller = DesignController::new(state);
    let response = controller.update_design(id, request).await?;
    Ok(Json(response))
}

async fn upload_logo(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<LogoUploadResponse>>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let controller = DesignController::new(state);
    let response = controller.upload_logo(content_type, body.to_vec()).await?;
    Ok(Json(response))
}
