use serde::{Deserialize, Serialize};
use validator::Validate;

// Request para compartir por WhatsApp
#[derive(Debug, Deserialize, Validate)]
pub struct WhatsAppShareRequest {
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct WhatsAppShareResponse {
    pub link: String,
    pub message: String,
    pub pdf_url: Option<String>,
}

// Request para compartir por email
#[derive(Debug, Deserialize, Validate)]
pub struct EmailShareRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct EmailShareResponse {
    pub email: String,
    pub subject: String,
    pub file_name: String,
    pub provider_id: Option<String>,
}
