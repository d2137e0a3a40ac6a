//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los colaboradores externos se inyectan
//! explícitamente y pueden quedar como "no configurados".

use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::{BrandingConfig, EnvironmentConfig};
use crate::repositories::LrStore;
use crate::services::print::RasterSettings;
use crate::services::{
    AssetStorage, EmailSender, HttpLogoFetcher, LogoFetcher, PrintArtifact, PrintPipeline,
};
use crate::utils::errors::{AppError, AppResult};

/// Colaborador listo para usar o sin configurar
pub enum Backend<T: ?Sized> {
    Ready(Arc<T>),
    NotConfigured(&'static str),
}

impl<T: ?Sized> Clone for Backend<T> {
    fn clone(&self) -> Self {
        match self {
            Backend::Ready(backend) => Backend::Ready(Arc::clone(backend)),
            Backend::NotConfigured(reason) => Backend::NotConfigured(reason),
        }
    }
}

impl<T: ?Sized> Backend<T> {
    /// El colaborador, o `ServiceUnavailable` si no está configurado
    pub fn ready(&self) -> AppResult<&Arc<T>> {
        match self {
            Backend::Ready(backend) => Ok(backend),
            Backend::NotConfigured(reason) => Err(AppError::ServiceUnavailable(reason.to_string())),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Backend::Ready(_))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub branding: BrandingConfig,
    pub store: Backend<dyn LrStore>,
    pub storage: Backend<dyn AssetStorage>,
    pub mailer: Backend<dyn EmailSender>,
    pub logo_fetcher: Arc<dyn LogoFetcher>,
    pub pipeline: Arc<PrintPipeline>,
    pub http_client: Client,
    pub artifacts: Arc<RwLock<HashMap<Uuid, PrintArtifact>>>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        branding: BrandingConfig,
        store: Backend<dyn LrStore>,
    ) -> Self {
        let http_client = Client::new();
        let pipeline = PrintPipeline::new(
            branding.clone(),
            RasterSettings {
                device_scale: config.render_device_scale,
            },
        );

        Self {
            config,
            branding,
            store,
            storage: Backend::NotConfigured("File storage is not configured"),
            mailer: Backend::NotConfigured("Email service is not configured (RESEND_API_KEY)"),
            logo_fetcher: Arc::new(HttpLogoFetcher::new(http_client.clone())),
            pipeline: Arc::new(pipeline),
            http_client,
            artifacts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_storage(mut self, storage: Backend<dyn AssetStorage>) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_mailer(mut self, mailer: Backend<dyn EmailSender>) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn with_logo_fetcher(mut self, logo_fetcher: Arc<dyn LogoFetcher>) -> Self {
        self.logo_fetcher = logo_fetcher;
        self
    }

    /// Guardar el último PDF de un registro (reemplaza el anterior)
    pub async fn store_artifact(&self, artifact: PrintArtifact) {
        log::info!("💾 PDF de LR {} guardado en caché", artifact.lr_no);
        self.artifacts
            .write()
            .await
            .insert(artifact.record_id, artifact);
    }

    pub async fn get_artifact(&self, record_id: Uuid) -> Option<PrintArtifact> {
        self.artifacts.read().await.get(&record_id).cloned()
    }

    pub async fn evict_artifact(&self, record_id: Uuid) {
        if self.artifacts.write().await.remove(&record_id).is_some() {
            log::info!("🗑️ PDF en caché eliminado para {}", record_id);
        }
    }
}
