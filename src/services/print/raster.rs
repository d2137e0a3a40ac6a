//! Rasterización del layout a un bitmap RGB
//!
//! El lienzo siempre parte de fondo blanco opaco. Se pintan rellenos,
//! marcos y el logo (ajustado sin deformar dentro de su región).

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

use super::template::{Element, LrLayout, Rect};
use super::RenderError;

/// Píxeles CSS por milímetro (96 dpi)
pub const CSS_PX_PER_MM: f32 = 96.0 / 25.4;

/// Lado máximo del lienzo en píxeles
pub const MAX_CANVAS_PX: u32 = 10_000;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone, Copy)]
pub struct RasterSettings {
    pub device_scale: f32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self { device_scale: 2.0 }
    }
}

impl RasterSettings {
    pub fn px_per_mm(&self) -> f32 {
        CSS_PX_PER_MM * self.device_scale
    }
}

/// Tamaño del lienzo en píxeles para unas dimensiones en mm
pub fn canvas_size(
    width_mm: f32,
    height_mm: f32,
    settings: &RasterSettings,
) -> Result<(u32, u32), RenderError> {
    if !settings.device_scale.is_finite() || settings.device_scale <= 0.0 {
        return Err(RenderError::InvalidScale(settings.device_scale));
    }

    let width = (width_mm * settings.px_per_mm()).round();
    let height = (height_mm * settings.px_per_mm()).round();

    if !width.is_finite() || !height.is_finite() {
        return Err(RenderError::NonFiniteDimension("canvas"));
    }
    if width < 1.0 || height < 1.0 {
        return Err(RenderError::EmptyCanvas {
            width: width.max(0.0) as u32,
            height: height.max(0.0) as u32,
        });
    }
    if width > MAX_CANVAS_PX as f32 || height > MAX_CANVAS_PX as f32 {
        return Err(RenderError::CanvasTooLarge {
            width: width as u32,
            height: height as u32,
        });
    }

    Ok((width as u32, height as u32))
}

struct PixelRect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PixelRect {
    fn from_mm(rect: &Rect, px_per_mm: f32, canvas: &RgbImage) -> Self {
        let clamp_x = |v: f32| (v * px_per_mm).round().clamp(0.0, canvas.width() as f32) as u32;
        let clamp_y = |v: f32| (v * px_per_mm).round().clamp(0.0, canvas.height() as f32) as u32;
        Self {
            x0: clamp_x(rect.x),
            y0: clamp_y(rect.y),
            x1: clamp_x(rect.x + rect.width),
            y1: clamp_y(rect.y + rect.height),
        }
    }

    fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

fn fill_rect(canvas: &mut RgbImage, rect: &Rect, color: Rgb<u8>, px_per_mm: f32) {
    let area = PixelRect::from_mm(rect, px_per_mm, canvas);
    for y in area.y0..area.y1 {
        for x in area.x0..area.x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

fn stroke_rect(canvas: &mut RgbImage, rect: &Rect, color: Rgb<u8>, stroke_mm: f32, px_per_mm: f32) {
    // Al menos un píxel de grosor
    let stroke = stroke_mm.max(1.0 / px_per_mm);
    let edges = [
        Rect::new(rect.x, rect.y, rect.width, stroke),
        Rect::new(rect.x, rect.y + rect.height - stroke, rect.width, stroke),
        Rect::new(rect.x, rect.y, stroke, rect.height),
        Rect::new(rect.x + rect.width - stroke, rect.y, stroke, rect.height),
    ];
    for edge in &edges {
        fill_rect(canvas, edge, color, px_per_mm);
    }
}

/// Pegar el logo ajustado (contain) y centrado en su región, mezclando alfa
fn draw_logo(canvas: &mut RgbImage, rect: &Rect, logo: &DynamicImage, px_per_mm: f32) {
    let area = PixelRect::from_mm(rect, px_per_mm, canvas);
    if area.width() == 0 || area.height() == 0 || logo.width() == 0 || logo.height() == 0 {
        return;
    }

    let scale = f32::min(
        area.width() as f32 / logo.width() as f32,
        area.height() as f32 / logo.height() as f32,
    );
    let target_w = ((logo.width() as f32 * scale).round() as u32).max(1);
    let target_h = ((logo.height() as f32 * scale).round() as u32).max(1);
    let resized = imageops::resize(&logo.to_rgba8(), target_w, target_h, FilterType::Triangle);

    let offset_x = area.x0 + (area.width() - target_w.min(area.width())) / 2;
    let offset_y = area.y0 + (area.height() - target_h.min(area.height())) / 2;

    for (x, y, pixel) in resized.enumerate_pixels() {
        let cx = offset_x + x;
        let cy = offset_y + y;
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let alpha = pixel[3] as f32 / 255.0;
        let base = canvas.get_pixel(cx, cy);
        let blended = Rgb([
            (pixel[0] as f32 * alpha + base[0] as f32 * (1.0 - alpha)).round() as u8,
            (pixel[1] as f32 * alpha + base[1] as f32 * (1.0 - alpha)).round() as u8,
            (pixel[2] as f32 * alpha + base[2] as f32 * (1.0 - alpha)).round() as u8,
        ]);
        canvas.put_pixel(cx, cy, blended);
    }
}

/// Pintar el layout. Sin logo, la región del logo queda en blanco.
pub fn rasterize(
    layout: &LrLayout,
    logo: Option<&DynamicImage>,
    settings: &RasterSettings,
) -> Result<RgbImage, RenderError> {
    let (width, height) = canvas_size(layout.width_mm, layout.height_mm, settings)?;
    let px_per_mm = settings.px_per_mm();
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);

    for element in &layout.elements {
        match element {
            Element::Fill { rect, color } => fill_rect(&mut canvas, rect, *color, px_per_mm),
            Element::Frame {
                rect,
                color,
                stroke_mm,
            } => stroke_rect(&mut canvas, rect, *color, *stroke_mm, px_per_mm),
            Element::Logo { rect } => {
                if let Some(logo) = logo {
                    draw_logo(&mut canvas, rect, logo, px_per_mm);
                }
            }
            // Los textos van como capa vectorial en el PDF
            Element::Text { .. } => {}
        }
    }

    Ok(canvas)
}
