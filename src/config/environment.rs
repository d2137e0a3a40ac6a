//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Los colaboradores opcionales (email, storage) sin variables quedan
//! como "no configurados" en lugar de abortar el arranque.

use std::env;

use anyhow::{Context, Result};

/// Backend del store de registros LR
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackendKind {
    Postgres,
    Memory,
}

/// Backend de almacenamiento de archivos (logos, PDFs compartidos)
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackendKind {
    Supabase,
    Local,
    Memory,
    Disabled,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub lr_prefix: String,
    pub store_backend: StoreBackendKind,
    // Email (API compatible con Resend)
    pub email_api_url: String,
    pub resend_api_key: Option<String>,
    pub email_from: String,
    // Almacenamiento de archivos
    pub storage_backend: StorageBackendKind,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    pub storage_bucket: String,
    pub local_storage_dir: String,
    pub public_base_url: String,
    // Renderizado
    pub render_device_scale: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            lr_prefix: "DEL".to_string(),
            store_backend: StoreBackendKind::Postgres,
            email_api_url: "https://api.resend.com/emails".to_string(),
            resend_api_key: None,
            email_from: "SSK Cargo Services <onboarding@resend.dev>".to_string(),
            storage_backend: StorageBackendKind::Disabled,
            supabase_url: None,
            supabase_service_key: None,
            storage_bucket: "lr-assets".to_string(),
            local_storage_dir: "./data/assets".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
            render_device_scale: 2.0,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar configuración desde variables de entorno (con defaults de desarrollo)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(value) => value.parse().context("PORT must be a valid number")?,
            Err(_) => defaults.port,
        };

        let render_device_scale = match env::var("RENDER_DEVICE_SCALE") {
            Ok(value) => value
                .parse()
                .context("RENDER_DEVICE_SCALE must be a valid number")?,
            Err(_) => defaults.render_device_scale,
        };

        let store_backend = match optional("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackendKind::Postgres,
            Some("memory") => StoreBackendKind::Memory,
            Some(other) => anyhow::bail!("STORE_BACKEND '{}' is not supported", other),
        };

        let storage_backend = match optional("STORAGE_BACKEND").as_deref() {
            None => StorageBackendKind::Disabled,
            Some("supabase") => StorageBackendKind::Supabase,
            Some("local") => StorageBackendKind::Local,
            Some("memory") => StorageBackendKind::Memory,
            Some(other) => anyhow::bail!("STORAGE_BACKEND '{}' is not supported", other),
        };

        Ok(Self {
            environment: optional("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: optional("HOST").unwrap_or(defaults.host),
            cors_origins: optional("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            lr_prefix: optional("LR_PREFIX").unwrap_or(defaults.lr_prefix),
            store_backend,
            email_api_url: optional("EMAIL_API_URL").unwrap_or(defaults.email_api_url),
            resend_api_key: optional("RESEND_API_KEY"),
            email_from: optional("EMAIL_FROM").unwrap_or(defaults.email_from),
            storage_backend,
            supabase_url: optional("SUPABASE_URL"),
            supabase_service_key: optional("SUPABASE_SERVICE_KEY"),
            storage_bucket: optional("STORAGE_BUCKET").unwrap_or(defaults.storage_bucket),
            local_storage_dir: optional("LOCAL_STORAGE_DIR")
                .unwrap_or(defaults.local_storage_dir),
            public_base_url: optional("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            render_device_scale,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Variable de entorno no vacía
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
