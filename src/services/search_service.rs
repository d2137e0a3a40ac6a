//! Búsqueda del listado de LR
//!
//! El filtrado es en memoria sobre el conjunto ya leído del store: una
//! coincidencia de subcadena, sin distinguir mayúsculas, contra el valor
//! textual de cada campo del registro (incluidos los items anidados).

use serde_json::Value;

use crate::models::LrRecord;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_enum;

pub const PER_PAGE_OPTIONS: [u32; 4] = [10, 25, 50, 100];
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Resultado de una búsqueda paginada
#[derive(Debug)]
pub struct SearchPage {
    pub records: Vec<LrRecord>,
    pub total: usize,
    pub matched: usize,
}

pub fn resolve_per_page(per_page: Option<u32>) -> AppResult<u32> {
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
    validate_enum(per_page, &PER_PAGE_OPTIONS).map_err(|_| {
        validation_error(
            "per_page",
            "enum",
            "Entries per page must be one of 10, 25, 50 or 100",
        )
    })?;
    Ok(per_page)
}

fn collect_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(text) => out.push(text.to_lowercase()),
        Value::Number(number) => out.push(number.to_string()),
        Value::Bool(flag) => out.push(flag.to_string()),
        Value::Array(values) => values.iter().for_each(|v| collect_leaves(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_leaves(v, out)),
    }
}

/// Valores textuales de todos los campos del registro
pub fn searchable_values(record: &LrRecord) -> Vec<String> {
    let mut values = Vec::new();
    match serde_json::to_value(record) {
        Ok(json) => collect_leaves(&json, &mut values),
        Err(e) => log::warn!("⚠️ No se pudo serializar el LR {} para búsqueda: {}", record.id, e),
    }
    values
}

pub fn matches(record: &LrRecord, needle: &str) -> bool {
    searchable_values(record)
        .iter()
        .any(|value| value.contains(needle))
}

/// Filtrar y recortar al tamaño de página. Una búsqueda vacía no filtra.
pub fn search(records: Vec<LrRecord>, query: Option<&str>, per_page: u32) -> SearchPage {
    let total = records.len();
    let needle = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();

    let filtered: Vec<LrRecord> = if needle.is_empty() {
        records
    } else {
        records
            .into_iter()
            .filter(|record| matches(record, &needle))
            .collect()
    };

    let matched = filtered.len();
    let records = filtered.into_iter().take(per_page as usize).collect();

    SearchPage {
        records,
        total,
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_record;

    fn record(lr_no: &str, consignor: Option<&str>, item: &str) -> LrRecord {
        let mut record = sample_record(lr_no);
        record.details.consignor.name = consignor.map(str::to_string);
        record.details.items[0].description = item.to_string();
        record
    }

    #[test]
    fn test_resolve_per_page() {
        assert_eq!(resolve_per_page(None).unwrap(), 50);
        assert_eq!(resolve_per_page(Some(25)).unwrap(), 25);
        assert!(resolve_per_page(Some(30)).is_err());
    }

    #[test]
    fn test_search_matches_hidden_and_nested_fields() {
        let records = vec![
            record("DEL/00001", Some("Acme Steels"), "STEEL COILS"),
            record("DEL/00002", None, "PIPES"),
        ];

        let page = search(records.clone(), Some("  acme "), 50);
        assert_eq!(page.matched, 1);
        assert_eq!(page.records[0].details.lr_no, "DEL/00001");

        let page = search(records.clone(), Some("pipes"), 50);
        assert_eq!(page.records[0].details.lr_no, "DEL/00002");

        let page = search(records, Some("karnal"), 50);
        assert_eq!(page.matched, 2);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_empty_query_and_page_cap() {
        let records: Vec<LrRecord> = (1..=12)
            .map(|n| record(&format!("DEL/{:05}", n), None, "BOXES"))
            .collect();

        let page = search(records, Some(""), 10);
        assert_eq!(page.total, 12);
        assert_eq!(page.matched, 12);
        assert_eq!(page.records.len(), 10);
    }

    #[test]
    fn test_no_match() {
        let page = search(vec![record("DEL/00001", None, "BOXES")], Some("zzz"), 50);
        assert_eq!(page.matched, 0);
        assert!(page.records.is_empty());
    }
}
