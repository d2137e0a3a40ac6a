use log::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::design_dto::{DesignRequest, DesignResponse, LogoUploadResponse, TemplateInfo};
use crate::dto::ApiResponse;
use crate::models::TemplateDesign;
use crate::services::design_service::{logo_path, validate_logo};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::validation::validate_http_url;

pub struct DesignController {
    state: AppState,
}

impl DesignController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn templates(&self) -> Vec<TemplateInfo> {
        TemplateDesign::ALL.into_iter().map(TemplateInfo::from).collect()
    }

    /// Guardar plantilla y logo de un LR. Un logo vacío lo elimina.
    pub async fn update_design(
        &self,
        id: Uuid,
        mut request: DesignRequest,
    ) -> AppResult<ApiResponse<DesignResponse>> {
        request.custom_logo_url = request
            .custom_logo_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        request.validate()?;
        if let Some(url) = request.custom_logo_url.as_deref() {
            validate_http_url(url).map_err(|_| {
                validation_error(
                    "customLogoUrl",
                    "url",
                    "Logo URL must start with http:// or https://",
                )
            })?;
        }

        let store = self.state.store.ready()?;
        let record = store
            .update_design(
                id,
                request.template_design,
                request.custom_logo_url.as_deref(),
            )
            .await?
            .ok_or_else(|| not_found_error("LR", &id.to_string()))?;

        info!(
            "🎨 Diseño {} aplicado a LR {}",
            record.details.template_design.as_str(),
            record.details.lr_no
        );

        Ok(ApiResponse::success_with_message(
            DesignResponse {
                id: record.id,
                template_design: record.details.template_design,
                custom_logo_url: record.details.custom_logo_url,
            },
            "Design saved successfully".to_string(),
        ))
    }

    /// Validar y publicar un logo; devuelve su URL pública
    pub async fn upload_logo(
        &self,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) -> AppResult<ApiResponse<LogoUploadResponse>> {
        let logo = validate_logo(content_type, &data)?;
        let storage = self.state.storage.ready()?;

        let path = logo_path(logo.extension);
        let size = data.len();
        let url = storage.upload(&path, data, logo.content_type).await?;
        info!("🖼️ Logo subido: {} ({} bytes)", path, size);

        Ok(ApiResponse::success_with_message(
            LogoUploadResponse {
                url,
                path,
                content_type: logo.content_type.to_string(),
                size,
            },
            "Logo uploaded successfully".to_string(),
        ))
    }
}
