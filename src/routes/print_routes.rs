use axum::{
    extract::{Path, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use uuid::Uuid;

use crate::controllers::PrintController;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const TOTAL_PIECES_HEADER: &str = "x-total-pieces";

pub fn create_print_router() -> Router<AppState> {
    Router::new().route("/:id/print", post(print_lr).get(print_lr))
}

/// Devuelve el PDF como descarga `LR_<lrNo>.pdf`
async fn print_lr(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let controller = PrintController::new(state);
    let artifact = controller.print(id).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ),
        (
            HeaderName::from_static(TOTAL_PIECES_HEADER),
            artifact.total_pieces.to_string(),
        ),
    ];

    Ok((headers, artifact.bytes).into_response())
}
