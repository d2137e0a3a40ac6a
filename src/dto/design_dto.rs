use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::TemplateDesign;

// Request del personalizador de diseño
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    pub template_design: TemplateDesign,
    #[validate(url(message = "Logo URL must be an absolute URL"))]
    pub custom_logo_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignResponse {
    pub id: Uuid,
    pub template_design: TemplateDesign,
    pub custom_logo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateDesign,
    pub name: &'static str,
    pub preview: &'static str,
}

impl From<TemplateDesign> for TemplateInfo {
    fn from(design: TemplateDesign) -> Self {
        Self {
            id: design,
            name: design.display_name(),
            preview: design.preview(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogoUploadResponse {
    pub url: String,
    pub path: String,
    pub content_type: String,
    pub size: usize,
}
