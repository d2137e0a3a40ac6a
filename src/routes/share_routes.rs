use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::ShareController;
use crate::dto::share_dto::{
    EmailShareRequest, EmailShareResponse, WhatsAppShareRequest, WhatsAppShareResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_share_router() -> Router<AppState> {
    Router::new()
        .route("/:id/share/whatsapp", post(share_whatsapp))
        .route("/:id/share/email", post(share_email))
}

async fn share_whatsapp(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<WhatsAppShareRequest>,
) -> Result<Json<ApiResponse<WhatsAppShareResponse>>, AppError> {
    let controller = ShareController::new(state);
    let response = controller.whatsapp(id, request).await?;
    Ok(Json(response))
}

async fn share_email(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EmailShareRequest>,
) -> Result<Json<ApiResponse<EmailShareResponse>>, AppError> {
    let controller = ShareController::new(state);
    let response = controller.email(id, request).await?;
    Ok(Json(response))
}
