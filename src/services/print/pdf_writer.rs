use image::{DynamicImage, RgbImage};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, Rgb as PdfRgb,
};

use super::fit::Placement;
use super::template::{Element, FontFamily, LrLayout};
use super::RenderError;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn pdf_error(e: printpdf::Error) -> RenderError {
    RenderError::Pdf(e.to_string())
}

/// Documento de una página: el bitmap ajustado y, encima, los textos del
/// layout con la misma transformación.
pub fn write_pdf(
    title: &str,
    canvas: RgbImage,
    layout: &LrLayout,
    placement: &Placement,
    page_w_mm: f32,
    page_h_mm: f32,
) -> Result<Vec<u8>, RenderError> {
    let (doc, page, layer) = PdfDocument::new(title, Mm(page_w_mm), Mm(page_h_mm), "LR");
    let layer = doc.get_page(page).get_layer(layer);

    let dpi = canvas.width() as f32 * 25.4 / placement.width_mm;
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(RenderError::NonFiniteDimension("image dpi"));
    }

    let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(canvas));
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(placement.x_mm)),
            // printpdf mide desde abajo
            translate_y: Some(Mm(page_h_mm - placement.y_mm - placement.height_mm)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    let fonts = match layout.style.font {
        FontFamily::Sans => Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
        },
        FontFamily::Serif => Fonts {
            regular: doc.add_builtin_font(BuiltinFont::TimesRoman).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::TimesBold).map_err(pdf_error)?,
        },
    };

    let scale = placement.scale_for(layout.width_mm);
    for element in &layout.elements {
        if let Element::Text {
            x,
            y,
            size_pt,
            bold,
            color,
            text,
        } = element
        {
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            layer.set_fill_color(Color::Rgb(PdfRgb::new(
                color[0] as f32 / 255.0,
                color[1] as f32 / 255.0,
                color[2] as f32 / 255.0,
                None,
            )));
            layer.use_text(
                text.as_str(),
                size_pt * scale,
                Mm(placement.x_mm + x * scale),
                Mm(page_h_mm - (placement.y_mm + y * scale)),
                font,
            );
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}
