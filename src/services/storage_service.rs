//! Almacenamiento de archivos (logos y PDFs compartidos)
//!
//! Toda subida devuelve una URL pública durable.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Subir `data` bajo `path` y devolver su URL pública
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> AppResult<String>;

    fn public_url(&self, path: &str) -> String;
}

fn check_path(path: &str) -> AppResult<()> {
    if path.is_empty() || path.starts_with('/') || path.split('/').any(|part| part == "..") {
        return Err(AppError::Storage(format!("invalid storage path '{}'", path)));
    }
    Ok(())
}

/// Storage de Supabase (API REST de objetos)
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(client: reqwest::Client, base_url: &str, service_key: String, bucket: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
        }
    }
}

#[async_trait]
impl AssetStorage for SupabaseStorage {
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> AppResult<String> {
        check_path(path)?;
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path);
        info!("📤 Subiendo {} ({} bytes) a Supabase Storage", path, data.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(data)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("❌ Supabase Storage respondió {}: {}", status, body);
            return Err(AppError::Storage(format!("upload failed with status {}: {}", status, body)));
        }

        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}

/// Archivos en disco servidos por el propio servicio bajo `/assets`
pub struct LocalStorage {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>, public_base_url: &str) -> AppResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)
            .await
            .map_err(|e| AppError::Storage(format!("cannot create {}: {}", base_path.display(), e)))?;

        Ok(Self {
            base_path,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

#[async_trait]
impl AssetStorage for LocalStorage {
    async fn upload(&self, path: &str, data: Vec<u8>, _content_type: &str) -> AppResult<String> {
        check_path(path)?;
        let target = self.base_path.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
        }
        fs::write(&target, data)
            .await
            .map_err(|e| AppError::Storage(format!("cannot write {}: {}", target.display(), e)))?;

        info!("💾 Archivo guardado en {}", target.display());
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/assets/{}", self.public_base_url, path)
    }
}

/// Storage en memoria para tests
#[derive(Default)]
pub struct MemoryStorage {
    objects: RwLock<HashMap<String, (String, Vec<u8>)>>,
    unavailable: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Rutas subidas, ordenadas
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub async fn get(&self, path: &str) -> Option<(String, Vec<u8>)> {
        self.objects.read().await.get(path).cloned()
    }
}

#[async_trait]
impl AssetStorage for MemoryStorage {
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> AppResult<String> {
        check_path(path)?;
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Storage("memory storage is unavailable".to_string()));
        }
        self.objects
            .write()
            .await
            .insert(path.to_string(), (content_type.to_string(), data));
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://assets/{}", path)
    }
}
