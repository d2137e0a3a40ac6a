//! Pipeline de impresión
//!
//! Registro → layout A4 → bitmap (fondo blanco) → ajuste a página → PDF.
//! Cada impresión se renderiza desde el estado actual del registro.

pub mod fit;
pub mod pdf_writer;
pub mod raster;
pub mod template;

use chrono::{DateTime, Utc};
use image::DynamicImage;
use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

use crate::config::BrandingConfig;
use crate::models::LrRecord;
use crate::utils::errors::AppError;

pub use fit::{fit_to_page, Placement};
pub use raster::RasterSettings;
pub use template::{layout_record, LrLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendered canvas is empty ({width}x{height} px)")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("rendered canvas is too large ({width}x{height} px)")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("invalid device scale {0}")]
    InvalidScale(f32),

    #[error("non-finite {0} dimension")]
    NonFiniteDimension(&'static str),

    #[error("pdf error: {0}")]
    Pdf(String),
}

impl From<RenderError> for AppError {
    fn from(error: RenderError) -> Self {
        AppError::Rendering(error.to_string())
    }
}

/// PDF renderizado de un registro
#[derive(Debug, Clone)]
pub struct PrintArtifact {
    pub record_id: Uuid,
    pub lr_no: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub total_pieces: u64,
    pub visible_text: Vec<String>,
    pub rendered_at: DateTime<Utc>,
}

pub struct PrintPipeline {
    branding: BrandingConfig,
    settings: RasterSettings,
}

impl PrintPipeline {
    pub fn new(branding: BrandingConfig, settings: RasterSettings) -> Self {
        Self { branding, settings }
    }

    pub fn layout(&self, record: &LrRecord) -> LrLayout {
        layout_record(record, &self.branding)
    }

    pub fn render(
        &self,
        record: &LrRecord,
        logo: Option<&DynamicImage>,
    ) -> Result<PrintArtifact, RenderError> {
        let layout = self.layout(record);
        self.render_layout(record, &layout, logo)
    }

    /// Renderizar un layout ya compuesto
    pub fn render_layout(
        &self,
        record: &LrRecord,
        layout: &LrLayout,
        logo: Option<&DynamicImage>,
    ) -> Result<PrintArtifact, RenderError> {
        let canvas = raster::rasterize(layout, logo, &self.settings)?;
        debug!(
            "🖼️ LR {} rasterizado a {}x{} px",
            record.details.lr_no,
            canvas.width(),
            canvas.height()
        );

        let placement = fit_to_page(canvas.width(), canvas.height(), PAGE_WIDTH_MM, PAGE_HEIGHT_MM)?;
        let title = format!("LR {}", record.details.lr_no);
        let bytes = pdf_writer::write_pdf(
            &title,
            canvas,
            layout,
            &placement,
            PAGE_WIDTH_MM,
            PAGE_HEIGHT_MM,
        )?;

        info!(
            "📄 PDF generado para LR {} ({} bytes)",
            record.details.lr_no,
            bytes.len()
        );

        Ok(PrintArtifact {
            record_id: record.id,
            lr_no: record.details.lr_no.clone(),
            file_name: record.pdf_file_name(),
            bytes,
            total_pieces: record.details.total_pieces(),
            visible_text: layout.visible_text(),
            rendered_at: Utc::now(),
        })
    }
}
