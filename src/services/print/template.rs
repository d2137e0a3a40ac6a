//! Plantilla de impresión del LR
//!
//! Produce una lista de elementos posicionados en milímetros sobre un lienzo
//! A4 (origen arriba a la izquierda). El rasterizador pinta fondos, marcos y
//! logo; el escritor PDF coloca los textos encima con la misma transformación.

use image::Rgb;
use rust_decimal::Decimal;

use crate::config::BrandingConfig;
use crate::models::{format_display_date, LrRecord, LrType, Party, TemplateDesign};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Filas de items que caben en la tabla antes de resumir el resto
pub const MAX_ITEM_ROWS: usize = 8;

const MARGIN: f32 = 8.0;
const INNER_LEFT: f32 = 12.0;
const INNER_WIDTH: f32 = 186.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Sans,
    Serif,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Fill {
        rect: Rect,
        color: Rgb<u8>,
    },
    Frame {
        rect: Rect,
        color: Rgb<u8>,
        stroke_mm: f32,
    },
    /// `y` es la línea base medida desde arriba
    Text {
        x: f32,
        y: f32,
        size_pt: f32,
        bold: bool,
        color: Rgb<u8>,
        text: String,
    },
    Logo {
        rect: Rect,
    },
}

/// Estilo visual de cada plantilla
#[derive(Debug, Clone, PartialEq)]
pub struct DesignStyle {
    pub title_color: Rgb<u8>,
    pub accent_color: Rgb<u8>,
    pub text_color: Rgb<u8>,
    pub header_fill: Rgb<u8>,
    pub border_mm: f32,
    pub font: FontFamily,
}

impl DesignStyle {
    pub fn for_design(design: TemplateDesign) -> Self {
        match design {
            TemplateDesign::Standard => Self {
                title_color: Rgb([200, 30, 45]),
                accent_color: Rgb([30, 60, 150]),
                text_color: Rgb([20, 20, 20]),
                header_fill: Rgb([220, 230, 250]),
                border_mm: 0.6,
                font: FontFamily::Sans,
            },
            TemplateDesign::Modern => Self {
                title_color: Rgb([40, 40, 40]),
                accent_color: Rgb([110, 110, 110]),
                text_color: Rgb([30, 30, 30]),
                header_fill: Rgb([242, 242, 242]),
                border_mm: 0.3,
                font: FontFamily::Sans,
            },
            TemplateDesign::Classic => Self {
                title_color: Rgb([90, 50, 20]),
                accent_color: Rgb([60, 40, 20]),
                text_color: Rgb([10, 10, 10]),
                header_fill: Rgb([238, 228, 205]),
                border_mm: 1.0,
                font: FontFamily::Serif,
            },
        }
    }
}

/// Documento listo para rasterizar
#[derive(Debug, Clone)]
pub struct LrLayout {
    pub width_mm: f32,
    pub height_mm: f32,
    pub style: DesignStyle,
    pub elements: Vec<Element>,
}

impl LrLayout {
    /// Texto visible en el orden de pintado
    pub fn visible_text(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_logo(&self) -> bool {
        self.elements
            .iter()
            .any(|element| matches!(element, Element::Logo { .. }))
    }
}

struct Builder {
    style: DesignStyle,
    elements: Vec<Element>,
}

impl Builder {
    fn text(&mut self, x: f32, y: f32, size_pt: f32, bold: bool, text: impl Into<String>) {
        let color = self.style.text_color;
        self.colored_text(x, y, size_pt, bold, color, text);
    }

    fn colored_text(
        &mut self,
        x: f32,
        y: f32,
        size_pt: f32,
        bold: bool,
        color: Rgb<u8>,
        text: impl Into<String>,
    ) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }
        self.elements.push(Element::Text {
            x,
            y,
            size_pt,
            bold,
            color,
            text,
        });
    }

    fn frame(&mut self, rect: Rect) {
        self.elements.push(Element::Frame {
            rect,
            color: self.style.accent_color,
            stroke_mm: self.style.border_mm,
        });
    }

    fn fill(&mut self, rect: Rect, color: Rgb<u8>) {
        self.elements.push(Element::Fill { rect, color });
    }

    /// Caja con cabecera sombreada y líneas de contenido
    fn boxed(&mut self, rect: Rect, title: &str, lines: &[String]) {
        let header_fill = self.style.header_fill;
        self.fill(Rect::new(rect.x, rect.y, rect.width, 6.0), header_fill);
        self.frame(rect);
        let title_color = self.style.accent_color;
        self.colored_text(rect.x + 2.0, rect.y + 4.5, 8.0, true, title_color, title);
        for (idx, line) in lines.iter().enumerate() {
            self.text(rect.x + 2.0, rect.y + 11.0 + idx as f32 * 4.5, 8.0, false, line.clone());
        }
    }
}

fn text_or_blank(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn decimal_or_blank(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

fn party_lines(party: &Party) -> Vec<String> {
    vec![
        text_or_blank(&party.name).to_string(),
        text_or_blank(&party.address).to_string(),
        text_or_blank(&party.city).to_string(),
        format!("Contact: {}", text_or_blank(&party.contact)),
        format!("GST: {}   PAN: {}", text_or_blank(&party.gst), text_or_blank(&party.pan)),
    ]
}

/// Componer el LR completo para un registro
pub fn layout_record(record: &LrRecord, branding: &BrandingConfig) -> LrLayout {
    let lr = &record.details;
    let style = DesignStyle::for_design(lr.template_design);
    let mut b = Builder {
        style: style.clone(),
        elements: Vec::new(),
    };

    // Marco exterior
    b.frame(Rect::new(
        MARGIN,
        MARGIN,
        PAGE_WIDTH_MM - 2.0 * MARGIN,
        PAGE_HEIGHT_MM - 2.0 * MARGIN,
    ));

    // Cabecera
    b.text(INNER_LEFT, 14.0, 7.0, true, branding.jurisdiction.clone());
    b.text(85.0, 14.0, 7.0, false, branding.motto.clone());
    b.text(150.0, 14.0, 7.0, false, format!("Mob: {}", branding.phones.join(", ")));

    let title_x = if lr.custom_logo_url.is_some() {
        b.elements.push(Element::Logo {
            rect: Rect::new(INNER_LEFT, 18.0, 30.0, 22.0),
        });
        46.0
    } else {
        INNER_LEFT
    };

    let title_color = style.title_color;
    b.colored_text(title_x, 28.0, 22.0, true, title_color, branding.company_name.clone());
    b.text(title_x, 34.0, 9.0, false, branding.tagline.clone());
    b.text(title_x, 40.0, 8.0, false, branding.address.clone());
    b.text(title_x, 45.0, 8.0, false, branding.contact_line.clone());
    b.text(
        INNER_LEFT,
        52.0,
        8.0,
        true,
        format!("Branches: {}", branding.branches.join(" | ")),
    );
    let accent = style.accent_color;
    b.fill(Rect::new(MARGIN, 55.0, PAGE_WIDTH_MM - 2.0 * MARGIN, 0.8), accent);

    // Tres cajas: tipo de copia, vehículo, número de C NOTE
    let copy_label = match lr.lr_type {
        LrType::Original => "ORIGINAL COPY",
        LrType::Dummy => "DUMMY COPY",
    };
    b.boxed(
        Rect::new(INNER_LEFT, 59.0, 60.0, 22.0),
        "CONSIGNMENT NOTE",
        &[copy_label.to_string(), "AT OWNER'S RISK".to_string()],
    );
    b.boxed(
        Rect::new(75.0, 59.0, 60.0, 22.0),
        "VEHICLE NO.",
        &[lr.truck_no.clone(), format!("Lorry Type: {}", text_or_blank(&lr.lorry_type))],
    );
    b.boxed(
        Rect::new(138.0, 59.0, 60.0, 22.0),
        "C NOTE No.",
        &[lr.lr_no.clone(), format!("Date: {}", format_display_date(lr.date))],
    );

    // GST del operador
    b.text(
        INNER_LEFT,
        87.0,
        8.0,
        true,
        format!("GSTIN: {}    PAN No.: {}", branding.gst, branding.pan),
    );

    // Partes
    b.boxed(
        Rect::new(INNER_LEFT, 90.0, 91.0, 34.0),
        "CONSIGNOR",
        &party_lines(&lr.consignor),
    );
    b.boxed(
        Rect::new(107.0, 90.0, 91.0, 34.0),
        "CONSIGNEE",
        &party_lines(&lr.consignee),
    );

    // Ruta
    b.frame(Rect::new(INNER_LEFT, 127.0, INNER_WIDTH, 8.0));
    b.text(14.0, 132.5, 9.0, true, format!("DATE: {}", format_display_date(lr.date)));
    b.text(70.0, 132.5, 9.0, true, format!("FROM: {}", lr.from_place));
    b.text(135.0, 132.5, 9.0, true, format!("TO: {}", lr.to_place));

    // Datos comerciales, dos columnas
    let left = [
        format!("Invoice No.: {}", text_or_blank(&lr.invoice)),
        format!("Invoice Amount: {}", decimal_or_blank(lr.invoice_amount)),
        format!(
            "Invoice Date: {}",
            lr.invoice_date.map(format_display_date).unwrap_or_default()
        ),
        format!("P.O. No.: {}", text_or_blank(&lr.po_no)),
        format!(
            "P.O. Date: {}",
            lr.po_date.map(format_display_date).unwrap_or_default()
        ),
        format!("Billing Party: {}", text_or_blank(&lr.billing_party)),
    ];
    let right = [
        format!("E-Way Bill No.: {}", text_or_blank(&lr.eway_bill_no)),
        format!(
            "E-Way Bill Date: {}",
            lr.eway_bill_date.map(format_display_date).unwrap_or_default()
        ),
        format!(
            "E-Way Ex. Date: {}",
            lr.eway_ex_date.map(format_display_date).unwrap_or_default()
        ),
        format!("Method of Packing: {}", text_or_blank(&lr.method_of_packing)),
        format!("Charged Weight: {}", decimal_or_blank(lr.charged_weight)),
        format!("Delivery At: {}", text_or_blank(&lr.address_of_delivery)),
    ];
    b.frame(Rect::new(INNER_LEFT, 138.0, INNER_WIDTH, 30.0));
    for (idx, (l, r)) in left.iter().zip(right.iter()).enumerate() {
        let y = 143.0 + idx as f32 * 4.5;
        b.text(14.0, y, 8.0, false, l.clone());
        b.text(107.0, y, 8.0, false, r.clone());
    }

    // Tabla de items
    let table_top = 171.0;
    let header_fill = style.header_fill;
    b.fill(Rect::new(INNER_LEFT, table_top, INNER_WIDTH, 7.0), header_fill);
    b.frame(Rect::new(INNER_LEFT, table_top, INNER_WIDTH, 7.0 + 6.0 * (MAX_ITEM_ROWS as f32 + 1.0)));
    b.text(14.0, table_top + 5.0, 8.0, true, "S.No.");
    b.text(28.0, table_top + 5.0, 8.0, true, "DESCRIPTION (SAID TO CONTAIN)");
    b.text(140.0, table_top + 5.0, 8.0, true, "PCS");
    b.text(165.0, table_top + 5.0, 8.0, true, "WEIGHT");

    // Con desbordamiento la última fila queda para el resumen
    let overflow = lr.items.len() > MAX_ITEM_ROWS;
    let shown = if overflow { MAX_ITEM_ROWS - 1 } else { lr.items.len() };
    let row_y = |idx: usize| table_top + 11.5 + idx as f32 * 6.0;

    for (idx, item) in lr.items.iter().take(shown).enumerate() {
        let y = row_y(idx);
        b.text(14.0, y, 8.0, false, item.sequence_no.to_string());
        b.text(28.0, y, 8.0, false, item.description.clone());
        b.text(
            140.0,
            y,
            8.0,
            false,
            item.piece_count.map(|p| p.to_string()).unwrap_or_default(),
        );
        b.text(165.0, y, 8.0, false, decimal_or_blank(item.weight));
    }
    if overflow {
        b.text(
            28.0,
            row_y(shown),
            7.0,
            false,
            format!("... and {} more item(s)", lr.items.len() - shown),
        );
    }

    let total_y = table_top + 7.0 + 6.0 * MAX_ITEM_ROWS as f32;
    b.fill(Rect::new(INNER_LEFT, total_y, INNER_WIDTH, 6.0), header_fill);
    b.text(28.0, total_y + 4.5, 8.0, true, "TOTAL PIECES");
    b.text(140.0, total_y + 4.5, 8.0, true, lr.total_pieces().to_string());

    // Valores, GST PAYABLE BY y firma
    let values_top = total_y + 9.0;
    b.frame(Rect::new(INNER_LEFT, values_top, INNER_WIDTH, 24.0));
    b.text(14.0, values_top + 5.0, 8.0, false, format!("Weight MT: {}", decimal_or_blank(lr.weight_mt)));
    b.text(
        70.0,
        values_top + 5.0,
        8.0,
        false,
        format!("Actual Weight MT: {}", decimal_or_blank(lr.actual_weight_mt)),
    );
    b.text(135.0, values_top + 5.0, 8.0, false, format!("Freight: {}", decimal_or_blank(lr.freight)));
    b.text(
        14.0,
        values_top + 10.0,
        8.0,
        false,
        format!(
            "Rate: {} {}",
            decimal_or_blank(lr.rate),
            text_or_blank(&lr.rate_on)
        ),
    );
    b.text(
        70.0,
        values_top + 10.0,
        8.0,
        false,
        format!(
            "Height: {}  Extra: {}",
            decimal_or_blank(lr.height),
            decimal_or_blank(lr.extra_height)
        ),
    );
    b.text(135.0, values_top + 10.0, 8.0, false, format!("Agent: {}", text_or_blank(&lr.agent)));
    b.text(
        14.0,
        values_top + 15.0,
        8.0,
        true,
        format!("GST PAYABLE BY: {}", text_or_blank(&lr.gst_paid_by)),
    );
    b.text(
        70.0,
        values_top + 15.0,
        8.0,
        false,
        format!("Driver No.: {}", text_or_blank(&lr.truck_driver_no)),
    );
    b.text(
        14.0,
        values_top + 20.0,
        8.0,
        false,
        format!("Remark: {}", text_or_blank(&lr.remark)),
    );

    let billing_lines = party_lines(&lr.billing_to);
    b.text(
        INNER_LEFT,
        values_top + 30.0,
        8.0,
        false,
        format!("Billing To: {}", billing_lines[0]),
    );
    b.colored_text(
        140.0,
        values_top + 30.0,
        9.0,
        true,
        title_color,
        format!("For {}", branding.company_name),
    );
    b.text(150.0, PAGE_HEIGHT_MM - MARGIN - 4.0, 8.0, false, "Authorised Signatory");
    b.text(
        INNER_LEFT,
        PAGE_HEIGHT_MM - MARGIN - 4.0,
        7.0,
        false,
        format!("Employee: {}", text_or_blank(&lr.employee)),
    );

    LrLayout {
        width_mm: PAGE_WIDTH_MM,
        height_mm: PAGE_HEIGHT_MM,
        style,
        elements: b.elements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, LineItem};

    fn sample_record() -> LrRecord {
        let mut record = fixtures::sample_record("DEL/00001");
        record.details.gst_paid_by = Some("CONSIGNEE".to_string());
        record.details.consignor.name = Some("ACME STEELS".to_string());
        record.details.consignor.gst = Some("07AAAAA0000A1Z5".to_string());
        record
    }

    #[test]
    fn test_layout_contains_core_blocks() {
        let layout = layout_record(&sample_record(), &BrandingConfig::default());
        let text = layout.visible_text();

        for expected in [
            "SSK INDIA LOGISTICS",
            "DEL/00001",
            "HR46E4180",
            "FROM: BARHANA",
            "TO: KARNAL",
            "DATE: 28/07/2025",
            "STEEL COILS",
            "TOTAL PIECES",
            "GST PAYABLE BY: CONSIGNEE",
            "ACME STEELS",
        ] {
            assert!(text.iter().any(|t| t == expected), "missing '{}'", expected);
        }
        assert!(text.contains(&"10".to_string()));
        assert!(!layout.has_logo());
    }

    #[test]
    fn test_logo_region_only_with_logo() {
        let mut record = sample_record();
        record.details.custom_logo_url = Some("https://cdn.example.com/logo.png".to_string());
        let layout = layout_record(&record, &BrandingConfig::default());
        assert!(layout.has_logo());
    }

    #[test]
    fn test_designs_change_style_not_fields() {
        let mut record = sample_record();
        let standard = layout_record(&record, &BrandingConfig::default());
        record.details.template_design = TemplateDesign::Classic;
        let classic = layout_record(&record, &BrandingConfig::default());

        assert_ne!(standard.style, classic.style);
        assert_eq!(standard.visible_text(), classic.visible_text());
    }

    #[test]
    fn test_overflowing_items_are_summarised() {
        let mut record = sample_record();
        record.details.items = (1..=11)
            .map(|n| LineItem {
                description: format!("Item {}", n),
                piece_count: Some(1),
                ..LineItem::blank(n)
            })
            .collect();
        let layout = layout_record(&record, &BrandingConfig::default());
        let text = layout.visible_text();
        assert!(text.contains(&"... and 4 more item(s)".to_string()));
        assert!(text.contains(&"Item 7".to_string()));
        assert!(!text.contains(&"Item 8".to_string()));
        assert!(text.contains(&"11".to_string()));

        // La banda TOTAL PIECES empieza 4.5mm por encima de su línea base
        let y_of = |needle: &str| {
            layout.elements.iter().find_map(|e| match e {
                Element::Text { y, text, .. } if text == needle => Some(*y),
                _ => None,
            })
        };
        let summary_y = y_of("... and 4 more item(s)").unwrap();
        let total_y = y_of("TOTAL PIECES").unwrap();
        assert!(summary_y < total_y - 4.5, "{} vs {}", summary_y, total_y);
    }

    #[test]
    fn test_full_table_has_no_summary() {
        let mut record = sample_record();
        record.details.items = (1..=MAX_ITEM_ROWS as u32)
            .map(|n| LineItem {
                description: format!("Item {}", n),
                piece_count: Some(1),
                ..LineItem::blank(n)
            })
            .collect();
        let text = layout_record(&record, &BrandingConfig::default()).visible_text();
        assert!(text.contains(&format!("Item {}", MAX_ITEM_ROWS)));
        assert!(!text.iter().any(|t| t.starts_with("... and")));
    }
}
