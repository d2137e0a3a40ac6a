use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::share_dto::{
    EmailShareRequest, EmailShareResponse, WhatsAppShareRequest, WhatsAppShareResponse,
};
use crate::dto::ApiResponse;
use crate::models::LrRecord;
use crate::services::email_service::build_lr_email;
use crate::services::share_service::{
    shared_pdf_path, whatsapp_link, whatsapp_message, whatsapp_phone,
};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct ShareController {
    state: AppState,
}

impl ShareController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    async fn find_record(&self, id: Uuid) -> AppResult<LrRecord> {
        let store = self.state.store.ready()?;
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("LR", &id.to_string()))
    }

    /// Enlace `wa.me` con el resumen del LR
    ///
    /// Si ya hay un PDF impreso se publica primero en el storage y el enlace
    /// público se añade al mensaje. Un fallo de subida aborta la operación.
    pub async fn whatsapp(
        &self,
        id: Uuid,
        request: WhatsAppShareRequest,
    ) -> AppResult<ApiResponse<WhatsAppShareResponse>> {
        request.validate()?;
        let record = self.find_record(id).await?;

        let digits = whatsapp_phone(&request.phone)?;

        let pdf_url = match self.state.get_artifact(id).await {
            Some(artifact) => {
                let storage = self.state.storage.ready()?;
                let path = shared_pdf_path(&record, Utc::now().timestamp_millis());
                let url = storage
                    .upload(&path, artifact.bytes, "application/pdf")
                    .await?;
                info!("📤 PDF de LR {} publicado en {}", record.details.lr_no, url);
                Some(url)
            }
            None => None,
        };

        let message = whatsapp_message(&record, pdf_url.as_deref());
        let link = whatsapp_link(&digits, &message)?;
        info!("💬 Enlace de WhatsApp generado para {}", digits);

        Ok(ApiResponse::success(WhatsAppShareResponse {
            link,
            message,
            pdf_url,
        }))
    }

    /// Enviar el último PDF impreso por email
    pub async fn email(
        &self,
        id: Uuid,
        request: EmailShareRequest,
    ) -> AppResult<ApiResponse<EmailShareResponse>> {
        request.validate()?;
        let record = self.find_record(id).await?;

        let Some(artifact) = self.state.get_artifact(id).await else {
            warn!("⚠️ Email solicitado para LR {} sin PDF generado", record.details.lr_no);
            return Err(AppError::PdfNotGenerated("Generate PDF first".to_string()));
        };

        let mailer = self.state.mailer.ready()?;
        let email = build_lr_email(&request.email, &record, &artifact, &self.state.branding);
        let receipt = mailer.send(&email).await?;
        info!("📧 LR {} enviado a {}", record.details.lr_no, email.to);

        Ok(ApiResponse::success_with_message(
            EmailShareResponse {
                email: email.to,
                subject: email.subject,
                file_name: artifact.file_name,
                provider_id: receipt.provider_id,
            },
            "Email sent successfully".to_string(),
        ))
    }
}
