//! Personalizador de diseño: logos
//!
//! Validación de subidas (tamaño y contenido real de imagen) y descarga del
//! logo al imprimir.

use std::time::Duration;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use tracing::warn;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Tamaño máximo de un logo (2 MB)
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

pub const LOGO_PREFIX: &str = "logos";

/// Logo validado, listo para subir
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLogo {
    pub format: ImageFormat,
    pub content_type: &'static str,
    pub extension: &'static str,
}

fn describe(format: ImageFormat) -> Option<(&'static str, &'static str)> {
    match format {
        ImageFormat::Png => Some(("image/png", "png")),
        ImageFormat::Jpeg => Some(("image/jpeg", "jpg")),
        ImageFormat::Gif => Some(("image/gif", "gif")),
        ImageFormat::WebP => Some(("image/webp", "webp")),
        _ => None,
    }
}

/// Comprobar tamaño, content type declarado y firma real del archivo
pub fn validate_logo(declared_content_type: Option<&str>, data: &[u8]) -> AppResult<ValidatedLogo> {
    if data.is_empty() {
        return Err(AppError::BadRequest("Logo file is empty".to_string()));
    }
    if data.len() > MAX_LOGO_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "Logo must be 2MB or smaller ({} bytes received)",
            data.len()
        )));
    }

    let declared = declared_content_type.unwrap_or("").trim().to_ascii_lowercase();
    if !declared.starts_with("image/") {
        return Err(AppError::UnsupportedMediaType(
            "Logo must be uploaded with an image/* content type".to_string(),
        ));
    }

    let format = image::guess_format(data)
        .map_err(|_| AppError::UnsupportedMediaType("File is not a recognised image".to_string()))?;
    let (content_type, extension) = describe(format).ok_or_else(|| {
        AppError::UnsupportedMediaType("Logo must be a PNG, JPEG, GIF or WebP image".to_string())
    })?;

    Ok(ValidatedLogo {
        format,
        content_type,
        extension,
    })
}

/// Ruta de almacenamiento para un logo nuevo
pub fn logo_path(extension: &str) -> String {
    format!("{}/{}.{}", LOGO_PREFIX, Uuid::new_v4(), extension)
}

/// Descarga y decodificación del logo de un LR
#[async_trait]
pub trait LogoFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> AppResult<DynamicImage>;
}

pub struct HttpLogoFetcher {
    client: reqwest::Client,
}

impl HttpLogoFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogoFetcher for HttpLogoFetcher {
    async fn fetch(&self, url: &str) -> AppResult<DynamicImage> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("logo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "logo request returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ExternalApi(format!("logo download failed: {}", e)))?;
        if bytes.len() > MAX_LOGO_BYTES {
            return Err(AppError::PayloadTooLarge("logo exceeds 2MB".to_string()));
        }

        image::load_from_memory(&bytes)
            .map_err(|e| AppError::UnsupportedMediaType(format!("logo is not decodable: {}", e)))
    }
}

/// Logo para imprimir; cualquier fallo deja el LR sin logo
pub async fn load_logo_for_print(
    fetcher: &dyn LogoFetcher,
    logo_url: Option<&str>,
) -> Option<DynamicImage> {
    let url = logo_url?;
    match fetcher.fetch(url).await {
        Ok(logo) => Some(logo),
        Err(e) => {
            warn!("⚠️ No se pudo cargar el logo {}: {}. Se imprime sin logo", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    struct FailingFetcher;

    #[async_trait]
    impl LogoFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> AppResult<DynamicImage> {
            Err(AppError::ExternalApi("unreachable".to_string()))
        }
    }

    #[test]
    fn test_accepts_png() {
        let logo = validate_logo(Some("image/png"), &png_bytes()).unwrap();
        assert_eq!(logo.content_type, "image/png");
        assert_eq!(logo.extension, "png");
    }

    #[test]
    fn test_rejects_oversized() {
        let mut data = png_bytes();
        data.resize(MAX_LOGO_BYTES + 1, 0);
        assert!(matches!(
            validate_logo(Some("image/png"), &data),
            Err(AppError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(matches!(
            validate_logo(Some("application/pdf"), &png_bytes()),
            Err(AppError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            validate_logo(Some("image/png"), b"%PDF-1.7 not an image"),
            Err(AppError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_logo_path() {
        let path = logo_path("png");
        assert!(path.starts_with("logos/"));
        assert!(path.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_failed_logo_is_omitted() {
        assert!(load_logo_for_print(&FailingFetcher, Some("https://x/logo.png")).await.is_none());
        assert!(load_logo_for_print(&FailingFetcher, None).await.is_none());
    }
}
