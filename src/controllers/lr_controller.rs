use log::{info, warn};
use uuid::Uuid;

use crate::dto::lr_dto::{
    DeleteResponse, ListQuery, LrFormRequest, LrListResponse, NextNumberResponse,
};
use crate::dto::ApiResponse;
use crate::models::LrRecord;
use crate::services::lr_form_service::{
    fallback_lr_number, next_lr_number, normalize_form, normalize_update_form,
};
use crate::services::search_service::{resolve_per_page, search};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct LrController {
    state: AppState,
}

impl LrController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Siguiente número de LR (`PREFIJO/NNNNN`)
    ///
    /// Nunca falla: si el store no responde se propone el primer número.
    pub async fn next_number(&self) -> NextNumberResponse {
        let prefix = &self.state.config.lr_prefix;

        let count = match self.state.store.ready() {
            Ok(store) => store.count().await,
            Err(e) => Err(e),
        };

        match count {
            Ok(count) => NextNumberResponse {
                lr_no: next_lr_number(prefix, count),
                fallback: false,
            },
            Err(e) => {
                warn!("⚠️ No se pudo contar los LR ({}), usando número por defecto", e);
                NextNumberResponse {
                    lr_no: fallback_lr_number(prefix),
                    fallback: true,
                }
            }
        }
    }

    pub async fn create(&self, request: LrFormRequest) -> AppResult<ApiResponse<LrRecord>> {
        let store = self.state.store.ready()?;
        let details = normalize_form(request)?;

        let record = store.insert(&details).await?;
        info!("✅ LR {} creado ({})", record.details.lr_no, record.id);

        Ok(ApiResponse::success_with_message(
            record,
            "LR created successfully".to_string(),
        ))
    }

    /// Reemplazar el contenido de un LR
    ///
    /// `templateDesign` y `customLogoUrl` se ignoran; el diseño guardado se
    /// conserva y solo cambia con `update_design`.
    pub async fn update(
        &self,
        id: Uuid,
        request: LrFormRequest,
    ) -> AppResult<ApiResponse<LrRecord>> {
        let store = self.state.store.ready()?;
        let details = normalize_update_form(request)?;

        let record = store
            .update(id, &details)
            .await?
            .ok_or_else(|| not_found_error("LR", &id.to_string()))?;
        info!("✏️ LR {} actualizado", record.details.lr_no);

        Ok(ApiResponse::success_with_message(
            record,
            "LR updated successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<LrRecord> {
        let store = self.state.store.ready()?;
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("LR", &id.to_string()))
    }

    /// Listado más reciente primero, filtrado y recortado al tamaño de página
    pub async fn list(&self, query: ListQuery) -> AppResult<LrListResponse> {
        let per_page = resolve_per_page(query.per_page)?;
        let store = self.state.store.ready()?;

        let records = store.list_all().await?;
        let page = search(records, query.search.as_deref(), per_page);

        Ok(LrListResponse {
            shown: page.records.len(),
            records: page.records,
            total: page.total,
            matched: page.matched,
            per_page,
        })
    }

    /// Eliminar un LR. Sin confirmación explícita no se toca el store.
    pub async fn delete(&self, id: Uuid, confirm: bool) -> AppResult<ApiResponse<DeleteResponse>> {
        if !confirm {
            return Err(AppError::ConfirmationRequired(
                "Are you sure you want to delete this LR? Repeat the request with confirm=true"
                    .to_string(),
            ));
        }

        let store = self.state.store.ready()?;
        if !store.delete(id).await? {
            return Err(not_found_error("LR", &id.to_string()));
        }

        self.state.evict_artifact(id).await;
        info!("🗑️ LR {} eliminado", id);

        Ok(ApiResponse::success_with_message(
            DeleteResponse { id, deleted: true },
            "LR deleted successfully".to_string(),
        ))
    }
}
