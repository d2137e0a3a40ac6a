//! Modelo de Lorry Receipt (LR)
//!
//! Este módulo contiene el registro LR y sus tipos auxiliares.
//! Mapea al schema PostgreSQL de la tabla `lr_details`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::line_item::{total_pieces, LineItem};

/// Tipo de LR - se guarda como texto en la columna `lr_type`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LrType {
    Dummy,
    #[default]
    Original,
}

impl LrType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LrType::Dummy => "dummy",
            LrType::Original => "original",
        }
    }
}

impl fmt::Display for LrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LrType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dummy" => Ok(LrType::Dummy),
            "original" => Ok(LrType::Original),
            other => Err(format!("unknown LR type '{}'", other)),
        }
    }
}

/// Plantillas de diseño disponibles para la impresión
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateDesign {
    #[default]
    Standard,
    Modern,
    Classic,
}

impl TemplateDesign {
    pub const ALL: [TemplateDesign; 3] = [
        TemplateDesign::Standard,
        TemplateDesign::Modern,
        TemplateDesign::Classic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateDesign::Standard => "standard",
            TemplateDesign::Modern => "modern",
            TemplateDesign::Classic => "classic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateDesign::Standard => "Standard SSK Template",
            TemplateDesign::Modern => "Modern Template",
            TemplateDesign::Classic => "Classic Template",
        }
    }

    pub fn preview(&self) -> &'static str {
        match self {
            TemplateDesign::Standard => "Default red & blue design",
            TemplateDesign::Modern => "Clean minimalist design",
            TemplateDesign::Classic => "Traditional business style",
        }
    }
}

impl fmt::Display for TemplateDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateDesign {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TemplateDesign::ALL
            .into_iter()
            .find(|design| design.as_str() == value.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown template design '{}'", value))
    }
}

/// Datos de una parte (consignor, consignee o billing-to)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub contact: Option<String>,
    pub pan: Option<String>,
    pub gst: Option<String>,
}

/// Contenido completo de un LR, tal como lo produce el editor
///
/// El JSON usa los mismos nombres que `LrFormRequest`, de modo que un
/// registro leído se puede reenviar tal cual como formulario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LrDetails {
    pub lr_type: LrType,
    pub lr_no: String,
    pub truck_no: String,
    pub from_place: String,
    pub to_place: String,
    pub date: NaiveDate,

    pub invoice: Option<String>,
    pub invoice_amount: Option<Decimal>,
    pub invoice_date: Option<NaiveDate>,
    pub po_no: Option<String>,
    pub po_date: Option<NaiveDate>,
    pub eway_bill_no: Option<String>,
    pub eway_bill_date: Option<NaiveDate>,
    pub eway_ex_date: Option<NaiveDate>,
    pub method_of_packing: Option<String>,
    pub address_of_delivery: Option<String>,
    pub charged_weight: Option<Decimal>,
    pub lorry_type: Option<String>,
    pub billing_party: Option<String>,
    pub gst_paid_by: Option<String>,
    pub agent: Option<String>,

    pub consignor: Party,
    pub consignee: Party,
    pub billing_to: Party,

    pub items: Vec<LineItem>,

    #[serde(rename = "weightMT")]
    pub weight_mt: Option<Decimal>,
    #[serde(rename = "actualWeightMT")]
    pub actual_weight_mt: Option<Decimal>,
    pub height: Option<Decimal>,
    pub extra_height: Option<Decimal>,
    pub freight: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub rate_on: Option<String>,
    pub employee: Option<String>,
    pub truck_driver_no: Option<String>,
    pub remark: Option<String>,

    pub template_design: TemplateDesign,
    pub custom_logo_url: Option<String>,
    pub created_by: Option<String>,
}

impl LrDetails {
    /// Total de bultos de todas las líneas
    pub fn total_pieces(&self) -> u64 {
        total_pieces(&self.items)
    }
}

/// LR persistido: contenido + identidad y marcas de tiempo del store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LrRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: LrDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LrRecord {
    /// Nombre de archivo del PDF derivado del número de LR
    pub fn pdf_file_name(&self) -> String {
        pdf_file_name(&self.details.lr_no)
    }
}

/// `LR_<lrNo>.pdf`, sin separadores de ruta
pub fn pdf_file_name(lr_no: &str) -> String {
    let safe: String = lr_no
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    format!("LR_{}.pdf", safe)
}

/// Fecha en formato en-GB (dd/MM/yyyy) usada en mensajes e impresión
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lr_type_parsing() {
        assert_eq!("dummy".parse::<LrType>().unwrap(), LrType::Dummy);
        assert_eq!(" Original ".parse::<LrType>().unwrap(), LrType::Original);
        assert!("copy".parse::<LrType>().is_err());
        assert_eq!(LrType::default(), LrType::Original);
    }

    #[test]
    fn test_template_design_parsing() {
        for design in TemplateDesign::ALL {
            assert_eq!(design.as_str().parse::<TemplateDesign>().unwrap(), design);
        }
        assert!("fancy".parse::<TemplateDesign>().is_err());
        assert_eq!(
            serde_json::to_value(TemplateDesign::Modern).unwrap(),
            serde_json::json!("modern")
        );
    }

    #[test]
    fn test_record_json_uses_form_field_names() {
        let mut record = crate::models::fixtures::sample_record("DEL/00001");
        record.details.items = vec![LineItem {
            piece_count: Some(10),
            ..LineItem::blank(1)
        }];
        record.details.weight_mt = Some(Decimal::new(125, 1));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["lrNo"], "DEL/00001");
        assert_eq!(value["weightMT"], "12.5");
        assert_eq!(value["items"][0]["sequenceNo"], 1);
        assert_eq!(value["items"][0]["pieceCount"], 10);
        assert!(value["consignor"].is_object());
        assert!(value.get("billingTo").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("lr_no").is_none());

        let back: LrRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_line_item_reads_snake_case_rows() {
        let item: LineItem = serde_json::from_value(serde_json::json!({
            "sequence_no": 2,
            "description": "PIPES",
            "piece_count": 5,
            "weight": null
        }))
        .unwrap();
        assert_eq!(item.sequence_no, 2);
        assert_eq!(item.piece_count, Some(5));
    }

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(pdf_file_name("DEL/00001"), "LR_DEL-00001.pdf");
        assert_eq!(pdf_file_name("DEL 22551"), "LR_DEL_22551.pdf");
    }

    #[test]
    fn test_format_display_date() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 28).unwrap();
        assert_eq!(format_display_date(date), "28/07/2025");
    }
}
