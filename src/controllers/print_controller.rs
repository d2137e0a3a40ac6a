use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::services::design_service::load_logo_for_print;
use crate::services::PrintArtifact;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct PrintController {
    state: AppState,
}

impl PrintController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Renderizar el PDF del registro tal como está ahora en el store
    ///
    /// El PDF queda en caché como último artefacto del registro, que es el
    /// que se adjunta al compartir por email.
    pub async fn print(&self, id: Uuid) -> AppResult<PrintArtifact> {
        let store = self.state.store.ready()?;
        let record = store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("LR", &id.to_string()))?;

        let logo = load_logo_for_print(
            self.state.logo_fetcher.as_ref(),
            record.details.custom_logo_url.as_deref(),
        )
        .await;

        info!("🖨️ Imprimiendo LR {}", record.details.lr_no);
        let pipeline = Arc::clone(&self.state.pipeline);
        let artifact = tokio::task::spawn_blocking(move || pipeline.render(&record, logo.as_ref()))
            .await
            .map_err(|e| AppError::Internal(format!("Render task failed: {}", e)))??;

        self.state.store_artifact(artifact.clone()).await;
        Ok(artifact)
    }
}
