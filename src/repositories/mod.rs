//! Repositorios
//!
//! `LrStore` es la interfaz del store de registros LR. Hay dos
//! implementaciones: PostgreSQL (producción) y memoria (desarrollo/tests).

pub mod lr_repository;
pub mod memory_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{LrDetails, LrRecord, TemplateDesign};
use crate::utils::errors::AppResult;

pub use lr_repository::PgLrStore;
pub use memory_repository::InMemoryLrStore;

#[async_trait]
pub trait LrStore: Send + Sync {
    /// Todos los registros, más recientes primero (por `created_at`)
    async fn list_all(&self) -> AppResult<Vec<LrRecord>>;

    async fn count(&self) -> AppResult<i64>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LrRecord>>;

    /// Inserta un registro nuevo; id y timestamps los asigna el store
    async fn insert(&self, details: &LrDetails) -> AppResult<LrRecord>;

    /// Reemplaza los campos del formulario. El diseño (`template_design`,
    /// `custom_logo_url`) y `created_by` no se tocan.
    async fn update(&self, id: Uuid, details: &LrDetails) -> AppResult<Option<LrRecord>>;

    /// Parche mínimo del personalizador de diseño
    async fn update_design(
        &self,
        id: Uuid,
        design: TemplateDesign,
        logo_url: Option<&str>,
    ) -> AppResult<Option<LrRecord>>;

    /// `true` si el registro existía
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
