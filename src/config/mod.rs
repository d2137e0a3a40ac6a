//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! y el membrete impreso en los LR.

pub mod branding;
pub mod database;
pub mod environment;

pub use branding::BrandingConfig;
pub use database::DatabaseConfig;
pub use environment::*;
