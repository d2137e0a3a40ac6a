use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{LineItem, LrDetails, LrRecord, LrType, Party, TemplateDesign};

/// LR mínimo válido: BARHANA → KARNAL, una línea de 10 bultos
pub fn sample_details(lr_no: &str) -> LrDetails {
    LrDetails {
        lr_type: LrType::Original,
        lr_no: lr_no.to_string(),
        truck_no: "HR46E4180".to_string(),
        from_place: "BARHANA".to_string(),
        to_place: "KARNAL".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 7, 28).unwrap(),
        invoice: None,
        invoice_amount: None,
        invoice_date: None,
        po_no: None,
        po_date: None,
        eway_bill_no: None,
        eway_bill_date: None,
        eway_ex_date: None,
        method_of_packing: None,
        address_of_delivery: None,
        charged_weight: None,
        lorry_type: None,
        billing_party: None,
        gst_paid_by: None,
        agent: None,
        consignor: Party::default(),
        consignee: Party::default(),
        billing_to: Party::default(),
        items: vec![LineItem {
            sequence_no: 1,
            description: "STEEL COILS".to_string(),
            piece_count: Some(10),
            weight: Some(Decimal::from(100)),
        }],
        weight_mt: None,
        actual_weight_mt: None,
        height: None,
        extra_height: None,
        freight: None,
        rate: None,
        rate_on: None,
        employee: None,
        truck_driver_no: None,
        remark: None,
        template_design: TemplateDesign::Standard,
        custom_logo_url: None,
        created_by: None,
    }
}

pub fn sample_record(lr_no: &str) -> LrRecord {
    LrRecord {
        id: Uuid::new_v4(),
        details: sample_details(lr_no),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
