//! Configuración de conexión a PostgreSQL
//!
//! Este módulo maneja la conexión a la base de datos y el schema de `lr_details`.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Schema de la tabla de LR. `items` es un documento JSON ordenado.
const LR_DETAILS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS lr_details (
    id UUID PRIMARY KEY,
    lr_type TEXT NOT NULL,
    lr_no TEXT NOT NULL,
    truck_no TEXT NOT NULL,
    from_place TEXT NOT NULL,
    to_place TEXT NOT NULL,
    date DATE NOT NULL,
    invoice TEXT,
    invoice_amount NUMERIC,
    invoice_date DATE,
    po_no TEXT,
    po_date DATE,
    eway_bill_no TEXT,
    eway_bill_date DATE,
    eway_ex_date DATE,
    method_of_packing TEXT,
    address_of_delivery TEXT,
    charged_weight NUMERIC,
    lorry_type TEXT,
    billing_party TEXT,
    gst_paid_by TEXT,
    agent TEXT,
    consignor_name TEXT,
    consignor_address TEXT,
    consignor_city TEXT,
    consignor_contact TEXT,
    consignor_pan TEXT,
    consignor_gst TEXT,
    consignee_name TEXT,
    consignee_address TEXT,
    consignee_city TEXT,
    consignee_contact TEXT,
    consignee_pan TEXT,
    consignee_gst TEXT,
    billing_to_name TEXT,
    billing_to_address TEXT,
    billing_to_city TEXT,
    billing_to_contact TEXT,
    billing_to_pan TEXT,
    billing_to_gst TEXT,
    items JSONB,
    weight_mt NUMERIC,
    actual_weight_mt NUMERIC,
    height NUMERIC,
    extra_height NUMERIC,
    freight NUMERIC,
    rate NUMERIC,
    rate_on TEXT,
    employee TEXT,
    truck_driver_no TEXT,
    remark TEXT,
    template_design TEXT DEFAULT 'standard',
    custom_logo_url TEXT,
    created_by TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const LR_DETAILS_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS lr_details_created_at_idx ON lr_details (created_at DESC)";

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));
    let pool = config.create_pool().await?;
    info!("✅ PostgreSQL conectado exitosamente");
    Ok(pool)
}

/// Crear la tabla `lr_details` si no existe
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(LR_DETAILS_SCHEMA).execute(pool).await?;
    sqlx::query(LR_DETAILS_CREATED_AT_INDEX).execute(pool).await?;
    info!("📋 Schema lr_details verificado");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
