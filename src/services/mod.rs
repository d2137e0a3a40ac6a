//! Services module
//!
//! Este módulo contiene la lógica de negocio del LR: normalización del
//! formulario, búsqueda, impresión y los colaboradores externos
//! (almacenamiento de archivos y email).

pub mod design_service;
pub mod email_service;
pub mod lr_form_service;
pub mod print;
pub mod search_service;
pub mod share_service;
pub mod storage_service;

pub use design_service::{HttpLogoFetcher, LogoFetcher};
pub use email_service::{EmailSender, ResendEmailClient};
pub use print::{PrintArtifact, PrintPipeline, RenderError};
pub use storage_service::{AssetStorage, LocalStorage, MemoryStorage, SupabaseStorage};
