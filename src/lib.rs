//! Backend de gestión de Lorry Receipts (LR)
//!
//! Alta, edición, listado y borrado de LR, impresión a PDF, envío por
//! WhatsApp y email, y personalización del diseño impreso.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::{AppState, Backend};
