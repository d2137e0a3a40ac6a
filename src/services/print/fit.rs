use super::RenderError;

/// Posición de la imagen en la página, en mm desde la esquina superior izquierda
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Placement {
    /// Factor mm de página por mm de lienzo
    pub fn scale_for(&self, canvas_width_mm: f32) -> f32 {
        self.width_mm / canvas_width_mm
    }
}

/// Escalar uniformemente una imagen `image_w`×`image_h` a la página:
/// primero a lo ancho; si la altura no cabe, a lo alto y centrada.
pub fn fit_to_page(
    image_w: u32,
    image_h: u32,
    page_w_mm: f32,
    page_h_mm: f32,
) -> Result<Placement, RenderError> {
    if image_w == 0 || image_h == 0 {
        return Err(RenderError::EmptyCanvas {
            width: image_w,
            height: image_h,
        });
    }

    let ratio = image_h as f32 / image_w as f32;
    let mut width = page_w_mm;
    let mut height = page_w_mm * ratio;

    if height > page_h_mm {
        height = page_h_mm;
        width = page_h_mm / ratio;
    }

    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(RenderError::NonFiniteDimension("page placement"));
    }

    Ok(Placement {
        x_mm: (page_w_mm - width) / 2.0,
        y_mm: 0.0,
        width_mm: width,
        height_mm: height,
    })
}
