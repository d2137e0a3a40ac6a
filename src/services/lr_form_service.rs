//! Normalización del formulario de LR
//!
//! Convierte el payload crudo del editor (`LrFormRequest`) en un `LrDetails`
//! tipado. Todos los errores de campo se acumulan en un único
//! `ValidationErrors` para que el cliente pueda marcarlos a la vez.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use crate::dto::lr_dto::{ItemRowInput, LrFormRequest, PartyInput};
use crate::models::{ItemRows, LineItem, LrDetails, LrType, Party, TemplateDesign};
use crate::utils::errors::{field_error, AppError, AppResult};
use crate::utils::validation::{
    validate_count, validate_date, validate_decimal, validate_http_url, validate_non_negative,
};

/// `<prefix>/<seq con 5 dígitos>`
pub fn format_lr_number(prefix: &str, sequence: i64) -> String {
    format!("{}/{:05}", prefix, sequence)
}

/// Número siguiente a partir del total de registros del store
pub fn next_lr_number(prefix: &str, current_count: i64) -> String {
    format_lr_number(prefix, current_count.max(0) + 1)
}

/// Primer número de la serie, usado cuando el store no responde
pub fn fallback_lr_number(prefix: &str) -> String {
    format_lr_number(prefix, 1)
}

/// Texto opcional: vacío o solo espacios → ausente
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn with_message(mut error: ValidationError, message: String) -> ValidationError {
    error.message = Some(message.into());
    error
}

struct FormErrors {
    errors: ValidationErrors,
}

impl FormErrors {
    fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }

    fn add(&mut self, field: &'static str, error: ValidationError) {
        self.errors.add(field, error);
    }

    fn required(&mut self, field: &'static str, label: &str, value: Option<String>) -> String {
        match clean(value) {
            Some(value) => value,
            None => {
                self.add(field, field_error("required", &format!("{} is required", label)));
                String::new()
            }
        }
    }

    fn required_date(
        &mut self,
        field: &'static str,
        label: &str,
        value: Option<String>,
    ) -> Option<NaiveDate> {
        match clean(value) {
            Some(value) => self.date(field, label, Some(value)),
            None => {
                self.add(field, field_error("required", &format!("{} is required", label)));
                None
            }
        }
    }

    fn date(&mut self, field: &'static str, label: &str, value: Option<String>) -> Option<NaiveDate> {
        let value = clean(value)?;
        match validate_date(&value) {
            Ok(date) => Some(date),
            Err(error) => {
                self.add(
                    field,
                    with_message(error, format!("{} must be a date (YYYY-MM-DD)", label)),
                );
                None
            }
        }
    }

    fn decimal(&mut self, field: &'static str, label: &str, value: Option<String>) -> Option<Decimal> {
        let value = clean(value)?;
        let parsed = validate_decimal(&value).and_then(|number| {
            validate_non_negative(number)?;
            Ok(number)
        });

        match parsed {
            Ok(number) => Some(number),
            Err(error) => {
                self.add(
                    field,
                    with_message(error, format!("{} must be a number >= 0", label)),
                );
                None
            }
        }
    }

    fn finish(self) -> AppResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Campo plano del editor primero, si no el de la parte anidada
fn merge_party(flat: PartyInput, nested: Option<PartyInput>) -> Party {
    let nested = nested.unwrap_or_default();
    Party {
        name: clean(flat.name).or_else(|| clean(nested.name)),
        address: clean(flat.address).or_else(|| clean(nested.address)),
        city: clean(flat.city).or_else(|| clean(nested.city)),
        contact: clean(flat.contact).or_else(|| clean(nested.contact)),
        pan: clean(flat.pan).or_else(|| clean(nested.pan)),
        gst: clean(flat.gst).or_else(|| clean(nested.gst)),
    }
}

fn normalize_items(inputs: Vec<ItemRowInput>, errors: &mut FormErrors) -> Vec<LineItem> {
    let items: Vec<LineItem> = inputs
        .into_iter()
        .enumerate()
        .map(|(idx, input)| {
            let row = idx + 1;
            let piece_count = clean(input.pcs).and_then(|pcs| match validate_count(&pcs) {
                Ok(count) => Some(count),
                Err(error) => {
                    errors.add(
                        "items",
                        with_message(error, format!("Item {}: PCS must be a whole number >= 0", row)),
                    );
                    None
                }
            });
            let weight = errors.decimal("items", &format!("Item {}: weight", row), input.weight);

            LineItem {
                sequence_no: row as u32,
                description: clean(input.description).unwrap_or_default(),
                piece_count,
                weight,
            }
        })
        .collect();

    // Al menos una fila, numerada 1..N
    ItemRows::from_items(items).into_items()
}

/// Convertir el formulario en un registro tipado
pub fn normalize_form(form: LrFormRequest) -> AppResult<LrDetails> {
    let mut errors = FormErrors::new();

    let lr_type = match clean(form.lr_type) {
        None => LrType::default(),
        Some(value) => value.parse().unwrap_or_else(|message: String| {
            errors.add("lrType", field_error("enum", &message));
            LrType::default()
        }),
    };

    let lr_no = errors.required("lrNo", "LR NO", form.lr_no);
    let truck_no = errors.required("truckNo", "TRUCK NO", form.truck_no);
    let from_place = errors.required("fromPlace", "FROM", form.from_place);
    let to_place = errors.required("toPlace", "TO", form.to_place);
    let date = errors.required_date("date", "DATE", form.date);

    let invoice_amount = errors.decimal("invoiceAmount", "INVOICE AMOUNT", form.invoice_amount);
    let invoice_date = errors.date("invoiceDate", "INVOICE DATE", form.invoice_date);
    let po_date = errors.date("poDate", "P.O. DATE", form.po_date);
    let eway_bill_date = errors.date("ewayBillDate", "E-WAY BILL DATE", form.eway_bill_date);
    let eway_ex_date = errors.date("ewayExDate", "E-WAY EX DATE", form.eway_ex_date);
    let charged_weight = errors.decimal("chargedWeight", "CHARGED WEIGHT", form.charged_weight);
    let weight_mt = errors.decimal("weightMT", "WEIGHT MT", form.weight_mt);
    let actual_weight_mt = errors.decimal("actualWeightMT", "ACTUAL WEIGHT MT", form.actual_weight_mt);
    let height = errors.decimal("height", "HEIGHT", form.height);
    let extra_height = errors.decimal("extraHeight", "EXTRA HEIGHT", form.extra_height);
    let freight = errors.decimal("freight", "FREIGHT", form.freight);
    let rate = errors.decimal("rate", "RATE", form.rate);

    let items = normalize_items(form.items, &mut errors);

    let template_design = match clean(form.template_design) {
        None => TemplateDesign::default(),
        Some(value) => value.parse().unwrap_or_else(|message: String| {
            errors.add("templateDesign", field_error("enum", &message));
            TemplateDesign::default()
        }),
    };

    let custom_logo_url = clean(form.custom_logo_url);
    if let Some(url) = &custom_logo_url {
        if let Err(error) = validate_http_url(url) {
            errors.add(
                "customLogoUrl",
                with_message(error, "Logo URL must be an absolute http(s) URL".to_string()),
            );
        }
    }

    errors.finish()?;
    let date = date.ok_or_else(|| AppError::Internal("date missing after validation".to_string()))?;

    Ok(LrDetails {
        lr_type,
        lr_no,
        truck_no,
        from_place,
        to_place,
        date,
        invoice: clean(form.invoice),
        invoice_amount,
        invoice_date,
        po_no: clean(form.po_no),
        po_date,
        eway_bill_no: clean(form.eway_bill_no),
        eway_bill_date,
        eway_ex_date,
        method_of_packing: clean(form.method_of_packing),
        address_of_delivery: clean(form.address_of_delivery),
        charged_weight,
        lorry_type: clean(form.lorry_type),
        billing_party: clean(form.billing_party),
        gst_paid_by: clean(form.gst_paid_by),
        agent: clean(form.agent),
        consignor: merge_party(
            PartyInput {
                name: form.consignor_name,
                address: form.consignor_address,
                city: form.consignor_city,
                contact: form.consignor_contact,
                pan: form.consignor_pan,
                gst: form.consignor_gst,
            },
            form.consignor,
        ),
        consignee: merge_party(
            PartyInput {
                name: form.consignee_name,
                address: form.consignee_address,
                city: form.consignee_city,
                contact: form.consignee_contact,
                pan: form.consignee_pan,
                gst: form.consignee_gst,
            },
            form.consignee,
        ),
        billing_to: merge_party(
            PartyInput {
                name: form.billing_to_name,
                address: form.billing_to_address,
                city: form.billing_to_city,
                contact: form.billing_to_contact,
                pan: form.billing_to_pan,
                gst: form.billing_to_gst,
            },
            form.billing_to,
        ),
        items,
        weight_mt,
        actual_weight_mt,
        height,
        extra_height,
        freight,
        rate,
        rate_on: clean(form.rate_on),
        employee: clean(form.employee),
        truck_driver_no: clean(form.truck_driver_no),
        remark: clean(form.remark),
        template_design,
        custom_logo_url,
        created_by: clean(form.created_by),
    })
}

/// Normalizar el formulario de una actualización
///
/// Plantilla y logo no se tocan desde aquí: solo cambian con
/// `PATCH /api/lr/:id/design`, así que se descartan antes de validar.
pub fn normalize_update_form(mut form: LrFormRequest) -> AppResult<LrDetails> {
    form.template_design = None;
    form.custom_logo_url = None;
    normalize_form(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> LrFormRequest {
        LrFormRequest {
            lr_no: Some("DEL/00001".to_string()),
            truck_no: Some("HR46E4180".to_string()),
            from_place: Some("BARHANA".to_string()),
            to_place: Some("KARNAL".to_string()),
            date: Some("2025-07-28".to_string()),
            items: vec![ItemRowInput {
                description: Some("STEEL COILS".to_string()),
                pcs: Some("10".to_string()),
                weight: Some("100".to_string()),
            }],
            ..Default::default()
        }
    }

    fn error_fields(error: AppError) -> Vec<String> {
        match error {
            AppError::Validation(errors) => {
                let mut fields: Vec<String> =
                    errors.field_errors().keys().map(|k| k.to_string()).collect();
                fields.sort();
                fields
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_lr_number_format() {
        assert_eq!(format_lr_number("DEL", 1), "DEL/00001");
        assert_eq!(next_lr_number("DEL", 41), "DEL/00042");
        assert_eq!(next_lr_number("DEL", 123455), "DEL/123456");
        assert_eq!(fallback_lr_number("DEL"), "DEL/00001");
    }

    #[test]
    fn test_valid_form_maps_required_fields() {
        let details = normalize_form(valid_form()).unwrap();
        assert_eq!(details.lr_no, "DEL/00001");
        assert_eq!(details.truck_no, "HR46E4180");
        assert_eq!(details.from_place, "BARHANA");
        assert_eq!(details.to_place, "KARNAL");
        assert_eq!(details.date, NaiveDate::from_ymd_opt(2025, 7, 28).unwrap());
        assert_eq!(details.lr_type, LrType::Original);
        assert_eq!(details.template_design, TemplateDesign::Standard);
        assert_eq!(details.total_pieces(), 10);
        assert_eq!(details.items[0].weight, Some(Decimal::from(100)));
    }

    #[test]
    fn test_missing_required_fields_are_collected() {
        let form = LrFormRequest {
            truck_no: Some("   ".to_string()),
            ..Default::default()
        };
        let fields = error_fields(normalize_form(form).unwrap_err());
        assert_eq!(fields, vec!["date", "fromPlace", "lrNo", "toPlace", "truckNo"]);
    }

    #[test]
    fn test_empty_numeric_is_absent_not_zero() {
        let mut form = valid_form();
        form.freight = Some("".to_string());
        form.weight_mt = Some("  ".to_string());
        form.rate = Some("12.75".to_string());

        let details = normalize_form(form).unwrap();
        assert_eq!(details.freight, None);
        assert_eq!(details.weight_mt, None);
        assert_eq!(details.rate, Some(Decimal::new(1275, 2)));
    }

    #[test]
    fn test_malformed_numbers_are_rejected() {
        let mut form = valid_form();
        form.freight = Some("12abc".to_string());
        form.height = Some("-3".to_string());
        form.items[0].pcs = Some("ten".to_string());

        let fields = error_fields(normalize_form(form).unwrap_err());
        assert_eq!(fields, vec!["freight", "height", "items"]);
    }

    #[test]
    fn test_dates_accept_ui_format() {
        let mut form = valid_form();
        form.date = Some("28-07-2025".to_string());
        form.invoice_date = Some("".to_string());
        form.po_date = Some("2025-07-01".to_string());

        let details = normalize_form(form).unwrap();
        assert_eq!(details.date, NaiveDate::from_ymd_opt(2025, 7, 28).unwrap());
        assert_eq!(details.invoice_date, None);
        assert_eq!(details.po_date, NaiveDate::from_ymd_opt(2025, 7, 1));
    }

    #[test]
    fn test_items_never_empty_and_renumbered() {
        let mut form = valid_form();
        form.items = Vec::new();
        let details = normalize_form(form).unwrap();
        assert_eq!(details.items, vec![LineItem::blank(1)]);

        let mut form = valid_form();
        form.items.push(ItemRowInput::default());
        form.items.push(ItemRowInput {
            description: Some("PIPES".to_string()),
            pcs: Some("5".to_string()),
            weight: None,
        });
        let details = normalize_form(form).unwrap();
        let sequence: Vec<u32> = details.items.iter().map(|i| i.sequence_no).collect();
        assert_eq!(sequence, vec![1, 2, 3]);
        assert_eq!(details.total_pieces(), 15);
    }

    #[test]
    fn test_optional_text_and_enums() {
        let mut form = valid_form();
        form.lr_type = Some("dummy".to_string());
        form.template_design = Some("classic".to_string());
        form.consignor_name = Some("  ACME STEELS ".to_string());
        form.remark = Some(" ".to_string());

        let details = normalize_form(form).unwrap();
        assert_eq!(details.lr_type, LrType::Dummy);
        assert_eq!(details.template_design, TemplateDesign::Classic);
        assert_eq!(details.consignor.name.as_deref(), Some("ACME STEELS"));
        assert_eq!(details.remark, None);

        let mut form = valid_form();
        form.lr_type = Some("copy".to_string());
        form.custom_logo_url = Some("logo.png".to_string());
        let fields = error_fields(normalize_form(form).unwrap_err());
        assert_eq!(fields, vec!["customLogoUrl", "lrType"]);
    }

    #[test]
    fn test_nested_parties_fill_missing_flat_fields() {
        let mut form = valid_form();
        form.consignor_name = Some("FLAT NAME".to_string());
        form.consignor = Some(PartyInput {
            name: Some("NESTED NAME".to_string()),
            city: Some("BARHANA".to_string()),
            ..Default::default()
        });
        form.billing_to = Some(PartyInput {
            gst: Some(" 06ABCDE1234F1Z5 ".to_string()),
            ..Default::default()
        });

        let details = normalize_form(form).unwrap();
        assert_eq!(details.consignor.name.as_deref(), Some("FLAT NAME"));
        assert_eq!(details.consignor.city.as_deref(), Some("BARHANA"));
        assert_eq!(details.billing_to.gst.as_deref(), Some("06ABCDE1234F1Z5"));
        assert_eq!(details.consignee, Party::default());
    }

    #[test]
    fn test_update_form_ignores_design_fields() {
        let mut form = valid_form();
        form.template_design = Some("fancy".to_string());
        form.custom_logo_url = Some("logo.png".to_string());

        let details = normalize_update_form(form).unwrap();
        assert_eq!(details.template_design, TemplateDesign::Standard);
        assert_eq!(details.custom_logo_url, None);
    }
}
