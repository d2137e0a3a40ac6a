use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::LrRecord;

/// Acepta string, número o null y lo deja como texto crudo.
/// La conversión a tipo real ocurre en `lr_form_service`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

// Fila de items tal como la envía el editor, o tal como sale en un registro
// leído (`sequenceNo` se ignora: las filas se renumeran)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRowInput {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "pieceCount",
        alias = "piece_count",
        deserialize_with = "lenient_text"
    )]
    pub pcs: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub weight: Option<String>,
}

// Parte anidada, con la forma de `Party` en un registro leído
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartyInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub contact: Option<String>,
    pub pan: Option<String>,
    pub gst: Option<String>,
}

// Request del formulario de LR (crear y actualizar)
//
// Acepta los campos planos del editor (`consignorName`...) y también las
// partes anidadas de `LrRecord`. Si llegan ambos, gana el campo plano.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LrFormRequest {
    pub lr_type: Option<String>,
    pub lr_no: Option<String>,
    pub truck_no: Option<String>,
    pub from_place: Option<String>,
    pub to_place: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,

    pub invoice: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub invoice_amount: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub invoice_date: Option<String>,
    pub po_no: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub po_date: Option<String>,
    pub eway_bill_no: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub eway_bill_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub eway_ex_date: Option<String>,
    pub method_of_packing: Option<String>,
    pub address_of_delivery: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub charged_weight: Option<String>,
    pub lorry_type: Option<String>,
    pub billing_party: Option<String>,
    pub gst_paid_by: Option<String>,
    pub agent: Option<String>,

    pub consignor_name: Option<String>,
    pub consignor_address: Option<String>,
    pub consignor_city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub consignor_contact: Option<String>,
    pub consignor_pan: Option<String>,
    pub consignor_gst: Option<String>,

    pub consignee_name: Option<String>,
    pub consignee_address: Option<String>,
    pub consignee_city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub consignee_contact: Option<String>,
    pub consignee_pan: Option<String>,
    pub consignee_gst: Option<String>,

    pub billing_to_name: Option<String>,
    pub billing_to_address: Option<String>,
    pub billing_to_city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub billing_to_contact: Option<String>,
    pub billing_to_pan: Option<String>,
    pub billing_to_gst: Option<String>,

    pub consignor: Option<PartyInput>,
    pub consignee: Option<PartyInput>,
    pub billing_to: Option<PartyInput>,

    pub items: Vec<ItemRowInput>,

    #[serde(rename = "weightMT", alias = "weightMt", deserialize_with = "lenient_text")]
    pub weight_mt: Option<String>,
    #[serde(
        rename = "actualWeightMT",
        alias = "actualWeightMt",
        deserialize_with = "lenient_text"
    )]
    pub actual_weight_mt: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub height: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub extra_height: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub freight: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub rate: Option<String>,
    pub rate_on: Option<String>,
    pub employee: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub truck_driver_no: Option<String>,
    pub remark: Option<String>,

    pub template_design: Option<String>,
    pub custom_logo_url: Option<String>,
    pub created_by: Option<String>,
}

// Query del listado
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub per_page: Option<u32>,
}

// Response del listado
#[derive(Debug, Serialize)]
pub struct LrListResponse {
    pub records: Vec<LrRecord>,
    pub total: usize,
    pub matched: usize,
    pub shown: usize,
    pub per_page: u32,
}

// Query del borrado: sin `confirm=true` no se borra nada
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: Uuid,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextNumberResponse {
    pub lr_no: String,
    /// `true` si el store no respondió y se usó el primer número de la serie
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_accepts_numbers_and_strings() {
        let form: LrFormRequest = serde_json::from_value(json!({
            "lrNo": "DEL/00001",
            "weightMT": 12.5,
            "actualWeightMT": "11",
            "freight": "",
            "consignorContact": 9876543210u64,
            "items": [{ "description": "STEEL COILS", "pcs": 10, "weight": "100" }]
        }))
        .unwrap();

        assert_eq!(form.lr_no.as_deref(), Some("DEL/00001"));
        assert_eq!(form.weight_mt.as_deref(), Some("12.5"));
        assert_eq!(form.actual_weight_mt.as_deref(), Some("11"));
        assert_eq!(form.freight.as_deref(), Some(""));
        assert_eq!(form.consignor_contact.as_deref(), Some("9876543210"));
        assert_eq!(form.items[0].pcs.as_deref(), Some("10"));
        assert_eq!(form.items[0].weight.as_deref(), Some("100"));
        assert!(form.rate.is_none());
    }

    #[test]
    fn test_item_accepts_piece_count_alias() {
        let item: ItemRowInput =
            serde_json::from_value(json!({ "description": "PIPES", "pieceCount": null })).unwrap();
        assert!(item.pcs.is_none());

        let item: ItemRowInput = serde_json::from_value(json!({
            "sequenceNo": 4,
            "description": "PIPES",
            "pieceCount": 7,
            "weight": "12.50"
        }))
        .unwrap();
        assert_eq!(item.pcs.as_deref(), Some("7"));
        assert_eq!(item.weight.as_deref(), Some("12.50"));
    }

    #[test]
    fn test_form_accepts_nested_parties() {
        let form: LrFormRequest = serde_json::from_value(json!({
            "lrNo": "DEL/00001",
            "consignor": { "name": "ACME STEELS", "contact": 9876543210u64, "gst": null },
            "billingTo": { "city": "KARNAL" },
            "createdAt": "2025-07-28T10:00:00Z"
        }))
        .unwrap();

        let consignor = form.consignor.unwrap();
        assert_eq!(consignor.name.as_deref(), Some("ACME STEELS"));
        assert_eq!(consignor.contact.as_deref(), Some("9876543210"));
        assert!(consignor.gst.is_none());
        assert_eq!(form.billing_to.unwrap().city.as_deref(), Some("KARNAL"));
        assert!(form.consignee.is_none());
    }
}
