//! Middleware del sistema
//!
//! Configuración de CORS para el frontend del editor de LR.

pub mod cors;

pub use cors::*;
