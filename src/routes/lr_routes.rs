use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::LrController;
use crate::dto::lr_dto::{
    DeleteQuery, DeleteResponse, ListQuery, LrFormRequest, LrListResponse, NextNumberResponse,
};
use crate::dto::ApiResponse;
use crate::models::LrRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_lr_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lrs).post(create_lr))
        .route("/next-number", get(next_lr_number))
        .route("/:id", get(get_lr).put(update_lr).delete(delete_lr))
}

async fn next_lr_number(State(state): State<AppState>) -> Json<NextNumberResponse> {
    let controller = LrController::new(state);
    Json(controller.next_number().await)
}

async fn create_lr(
    State(state): State<AppState>,
    Json(request): Json<LrFormRequest>,
) -> Result<Json<ApiResponse<LrRecord>>, AppError> {
    let controller = LrController::new(state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_lrs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<LrListResponse>, AppError> {
    let controller = LrController::new(state);
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_lr(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LrRecord>, AppError> {
    let controller = LrController::new(state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_lr(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<LrFormRequest>,
) -> Result<Json<ApiResponse<LrRecord>>, AppError> {
    let controller = LrController::new(state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_lr(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<ApiResponse<DeleteResponse>>, AppError> {
    let controller = LrController::new(state);
    let response = controller.delete(id, query.confirm).await?;
    Ok(Json(response))
}
