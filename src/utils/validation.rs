//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos recibidos desde el formulario de LR.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use validator::ValidationError;

lazy_static! {
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{10,15}$").expect("valid phone regex");
}

/// Formatos de fecha aceptados por el formulario (ISO y dd-MM-yyyy de la UI)
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    // Acepta también timestamps ISO completos ("2025-07-28T00:00:00.000Z")
    let candidate = trimmed.split('T').next().unwrap_or(trimmed);

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
        .ok_or_else(|| {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}

/// Validar y convertir string a decimal
pub fn validate_decimal(value: &str) -> Result<Decimal, ValidationError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| {
            let mut error = ValidationError::new("number");
            error.add_param("value".into(), &value.to_string());
            error
        })
}

/// Validar y convertir string a entero no negativo
pub fn validate_count(value: &str) -> Result<u32, ValidationError> {
    value.trim().parse::<u32>().map_err(|_| {
        let mut error = ValidationError::new("count");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Normalizar un número de teléfono (sin espacios ni guiones) y validarlo
pub fn normalize_phone(value: &str) -> Result<String, ValidationError> {
    let clean_phone: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if !PHONE_REGEX.is_match(&clean_phone) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(clean_phone.trim_start_matches('+').to_string())
}

/// Validar una URL http(s) absoluta
pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let valid = (trimmed.starts_with("https://") || trimmed.starts_with("http://"))
        && trimmed.len() > "https://".len()
        && !trimmed.contains(char::is_whitespace);
    if !valid {
        let mut error = ValidationError::new("url");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Display + std::fmt::Debug + Serialize>(
    value: T,
    allowed_values: &[T],
) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value);
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}
