//! Envío del LR por email
//!
//! Cliente para una API JSON compatible con Resend. El PDF viaja como
//! adjunto en base64. Un fallo del proveedor se reporta una sola vez, sin
//! reintentos.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::BrandingConfig;
use crate::models::{format_display_date, LrRecord};
use crate::services::print::PrintArtifact;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    /// Contenido en base64
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LrEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachment: EmailAttachment,
}

#[derive(Debug, Clone, Default)]
pub struct EmailReceipt {
    pub provider_id: Option<String>,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &LrEmail) -> AppResult<EmailReceipt>;
}

pub fn email_subject(lr_no: &str) -> String {
    format!("LR Document - {}", lr_no)
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn email_html(record: &LrRecord, branding: &BrandingConfig) -> String {
    let lr = &record.details;
    let lr_no = escape_html(&lr.lr_no);
    format!(
        r#"<h2>LR Document - {lr_no}</h2>
<p>Dear Customer,</p>
<p>Please find attached the LR document with the following details:</p>
<ul>
  <li><strong>LR No:</strong> {lr_no}</li>
  <li><strong>From:</strong> {from}</li>
  <li><strong>To:</strong> {to}</li>
  <li><strong>Truck No:</strong> {truck}</li>
  <li><strong>Date:</strong> {date}</li>
</ul>
<p>Best regards,<br>{signature}</p>
<p style="font-size: 12px; color: #666;">{address}<br>{contact}</p>"#,
        lr_no = lr_no,
        from = escape_html(&lr.from_place),
        to = escape_html(&lr.to_place),
        truck = escape_html(&lr.truck_no),
        date = format_display_date(lr.date),
        signature = escape_html(&branding.email_signature),
        address = escape_html(&branding.email_address_line),
        contact = escape_html(&branding.email_contact_line).replace(" | ", "<br>"),
    )
}

/// Componer el email de un LR con su PDF adjunto
pub fn build_lr_email(
    to: &str,
    record: &LrRecord,
    artifact: &PrintArtifact,
    branding: &BrandingConfig,
) -> LrEmail {
    LrEmail {
        to: to.trim().to_string(),
        subject: email_subject(&record.details.lr_no),
        html: email_html(record, branding),
        attachment: EmailAttachment {
            filename: artifact.file_name.clone(),
            content: BASE64.encode(&artifact.bytes),
        },
    }
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    attachments: [&'a EmailAttachment; 1],
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
    message: Option<String>,
}

pub struct ResendEmailClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl ResendEmailClient {
    pub fn new(client: reqwest::Client, api_url: String, api_key: String, from: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailClient {
    async fn send(&self, email: &LrEmail) -> AppResult<EmailReceipt> {
        info!("📧 Enviando LR por email a {}", email.to);

        let request = ResendRequest {
            from: &self.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
            attachments: [&email.attachment],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to send email: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ResendErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Failed to send email".to_string());
            error!("❌ Proveedor de email respondió {}: {}", status, message);
            return Err(AppError::ExternalApi(message));
        }

        let body: ResendResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Invalid email provider response: {}", e)))?;

        info!("✅ Email enviado a {} (id: {:?})", email.to, body.id);
        Ok(EmailReceipt { provider_id: body.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_record;
    use chrono::Utc;

    fn record() -> LrRecord {
        sample_record("DEL/00001")
    }

    #[test]
    fn test_email_content() {
        let record = record();
        let artifact = PrintArtifact {
            record_id: record.id,
            lr_no: record.details.lr_no.clone(),
            file_name: record.pdf_file_name(),
            bytes: b"%PDF".to_vec(),
            total_pieces: 0,
            visible_text: Vec::new(),
            rendered_at: Utc::now(),
        };

        let email = build_lr_email(" ops@example.com ", &record, &artifact, &BrandingConfig::default());
        assert_eq!(email.to, "ops@example.com");
        assert_eq!(email.subject, "LR Document - DEL/00001");
        assert_eq!(email.attachment.filename, "LR_DEL-00001.pdf");
        assert_eq!(email.attachment.content, "JVBERg==");
        assert!(email.html.contains("<strong>Date:</strong> 28/07/2025"));
        assert!(email.html.contains("SSK Cargo Services Pvt Ltd"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let mut record = record();
        record.details.from_place = "<script>".to_string();
        let html = email_html(&record, &BrandingConfig::default());
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
