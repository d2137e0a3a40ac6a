//! Mensajes para compartir un LR
//!
//! El canal de mensajería no envía nada: devuelve un enlace `wa.me` con el
//! texto ya codificado. El cliente es quien lo abre.

use crate::models::{format_display_date, LrRecord};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::normalize_phone;

pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Prefijo de los PDFs publicados para compartir
pub const SHARED_PDF_PREFIX: &str = "lr-documents";

/// Resumen de texto plano del LR
pub fn whatsapp_message(record: &LrRecord, pdf_url: Option<&str>) -> String {
    let lr = &record.details;
    let mut message = format!(
        "LR Details - {}\nFrom: {}\nTo: {}\nTruck: {}\nDate: {}",
        lr.lr_no,
        lr.from_place,
        lr.to_place,
        lr.truck_no,
        format_display_date(lr.date)
    );
    if let Some(url) = pdf_url {
        message.push_str(&format!("\nPDF: {}", url));
    }
    message
}

/// Dígitos del teléfono destino (con o sin `+`, espacios, guiones)
pub fn whatsapp_phone(phone: &str) -> AppResult<String> {
    normalize_phone(phone).map_err(|_| {
        validation_error(
            "phone",
            "phone",
            "Phone number must contain 10 to 15 digits",
        )
    })
}

/// Enlace de WhatsApp con el mensaje ya codificado
pub fn whatsapp_link(phone: &str, message: &str) -> AppResult<String> {
    let digits = whatsapp_phone(phone)?;

    Ok(format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        digits,
        urlencoding::encode(message)
    ))
}

/// Ruta de almacenamiento del PDF compartido
pub fn shared_pdf_path(record: &LrRecord, timestamp_ms: i64) -> String {
    format!(
        "{}/{}_{}",
        SHARED_PDF_PREFIX,
        timestamp_ms,
        record.pdf_file_name()
    )
}
