use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lr_management::config::{
    BrandingConfig, DatabaseConfig, EnvironmentConfig, StorageBackendKind, StoreBackendKind,
};
use lr_management::database::{create_pool, ensure_schema};
use lr_management::repositories::{InMemoryLrStore, LrStore, PgLrStore};
use lr_management::services::{
    AssetStorage, EmailSender, LocalStorage, MemoryStorage, ResendEmailClient, SupabaseStorage,
};
use lr_management::{create_app_router, AppState, Backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;
    let branding = BrandingConfig::from_env();

    // Configurar logging (RUST_LOG tiene prioridad)
    let default_level = if config.is_development() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("🚚 LR Management - Lorry Receipts");
    info!("================================");

    let store = init_store(&config).await;
    let state = AppState::new(config.clone(), branding, store);
    let storage = init_storage(&config, &state.http_client).await;
    let mailer = init_mailer(&config, &state.http_client);
    let state = state.with_storage(storage).with_mailer(mailer);

    let app = create_app_router(state);
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Estado del servicio");
    info!("   GET    /api/lr?search=&per_page= - Listar LR");
    info!("   GET    /api/lr/next-number - Siguiente número de LR");
    info!("   POST   /api/lr - Crear LR");
    info!("   GET    /api/lr/:id - Obtener LR");
    info!("   PUT    /api/lr/:id - Actualizar LR");
    info!("   DELETE /api/lr/:id?confirm=true - Eliminar LR");
    info!("   POST   /api/lr/:id/print - Generar PDF");
    info!("   POST   /api/lr/:id/share/whatsapp - Enlace de WhatsApp");
    info!("   POST   /api/lr/:id/share/email - Enviar PDF por email");
    info!("   PATCH  /api/lr/:id/design - Guardar diseño");
    info!("   POST   /api/logos - Subir logo");
    info!("   GET    /api/templates - Plantillas disponibles");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Store de registros. Sin base de datos el servicio arranca igual y las
/// operaciones de LR responden 503.
async fn init_store(config: &EnvironmentConfig) -> Backend<dyn LrStore> {
    if config.store_backend == StoreBackendKind::Memory {
        warn!("⚠️ Usando store en memoria: los LR se pierden al reiniciar");
        return Backend::Ready(Arc::new(InMemoryLrStore::new()));
    }

    let Some(db_config) = DatabaseConfig::from_env() else {
        warn!("⚠️ DATABASE_URL no definida, store de LR no configurado");
        return Backend::NotConfigured("Record store is not configured (DATABASE_URL)");
    };

    let pool = match create_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Backend::NotConfigured("Record store is unavailable");
        }
    };

    if let Err(e) = ensure_schema(&pool).await {
        error!("❌ Error creando el schema lr_details: {}", e);
        return Backend::NotConfigured("Record store schema could not be created");
    }

    Backend::Ready(Arc::new(PgLrStore::new(pool)))
}

async fn init_storage(
    config: &EnvironmentConfig,
    client: &reqwest::Client,
) -> Backend<dyn AssetStorage> {
    match config.storage_backend {
        StorageBackendKind::Supabase => {
            match (&config.supabase_url, &config.supabase_service_key) {
                (Some(url), Some(key)) => {
                    info!("☁️ Storage Supabase (bucket {})", config.storage_bucket);
                    Backend::Ready(Arc::new(SupabaseStorage::new(
                        client.clone(),
                        url,
                        key.clone(),
                        config.storage_bucket.clone(),
                    )))
                }
                _ => {
                    warn!("⚠️ STORAGE_BACKEND=supabase sin SUPABASE_URL / SUPABASE_SERVICE_KEY");
                    Backend::NotConfigured("File storage is not configured (SUPABASE_URL)")
                }
            }
        }
        StorageBackendKind::Local => {
            match LocalStorage::new(&config.local_storage_dir, &config.public_base_url).await {
                Ok(storage) => {
                    info!("📁 Storage local en {}", storage.base_path().display());
                    Backend::Ready(Arc::new(storage))
                }
                Err(e) => {
                    error!("❌ No se pudo preparar el storage local: {}", e);
                    Backend::NotConfigured("Local file storage is unavailable")
                }
            }
        }
        StorageBackendKind::Memory => {
            warn!("⚠️ Usando storage en memoria: los archivos no son públicos");
            Backend::Ready(Arc::new(MemoryStorage::new()))
        }
        StorageBackendKind::Disabled => {
            info!("ℹ️ Storage de archivos deshabilitado");
            Backend::NotConfigured("File storage is not configured (STORAGE_BACKEND)")
        }
    }
}

fn init_mailer(config: &EnvironmentConfig, client: &reqwest::Client) -> Backend<dyn EmailSender> {
    match &config.resend_api_key {
        Some(key) => {
            info!("📧 Email habilitado ({})", config.email_api_url);
            Backend::Ready(Arc::new(ResendEmailClient::new(
                client.clone(),
                config.email_api_url.clone(),
                key.clone(),
                config.email_from.clone(),
            )))
        }
        None => {
            warn!("⚠️ RESEND_API_KEY no definida, envío por email deshabilitado");
            Backend::NotConfigured("Email service is not configured (RESEND_API_KEY)")
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
