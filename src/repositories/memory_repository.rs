use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::LrStore;
use crate::models::{LrDetails, LrRecord, TemplateDesign};
use crate::utils::errors::{AppError, AppResult};

/// Store en memoria para desarrollo y tests
///
/// Los registros se guardan más recientes primero, igual que los
/// devuelve `PgLrStore::list_all`.
#[derive(Default)]
pub struct InMemoryLrStore {
    records: RwLock<Vec<LrRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryLrStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simular una caída del store: toda operación devuelve `AppError::Store`
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Store("in-memory store is unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LrStore for InMemoryLrStore {
    async fn list_all(&self) -> AppResult<Vec<LrRecord>> {
        self.check_available()?;
        Ok(self.records.read().await.clone())
    }

    async fn count(&self) -> AppResult<i64> {
        self.check_available()?;
        Ok(self.records.read().await.len() as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LrRecord>> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn insert(&self, details: &LrDetails) -> AppResult<LrRecord> {
        self.check_available()?;
        let now = Utc::now();
        let record = LrRecord {
            id: Uuid::new_v4(),
            details: details.clone(),
            created_at: now,
            updated_at: now,
        };

        self.records.write().await.insert(0, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, details: &LrDetails) -> AppResult<Option<LrRecord>> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };

        let template_design = record.details.template_design;
        let custom_logo_url = record.details.custom_logo_url.take();
        let created_by = record.details.created_by.take();

        record.details = LrDetails {
            template_design,
            custom_logo_url,
            created_by,
            ..details.clone()
        };
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn update_design(
        &self,
        id: Uuid,
        design: TemplateDesign,
        logo_url: Option<&str>,
    ) -> AppResult<Option<LrRecord>> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };

        record.details.template_design = design;
        record.details.custom_logo_url = logo_url.map(str::to_string);
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_details as details;

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = InMemoryLrStore::new();
        store.insert(&details("DEL/00001")).await.unwrap();
        store.insert(&details("DEL/00002")).await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records[0].details.lr_no, "DEL/00002");
        assert_eq!(records[1].details.lr_no, "DEL/00001");
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_keeps_design() {
        let store = InMemoryLrStore::new();
        let record = store.insert(&details("DEL/00001")).await.unwrap();
        store
            .update_design(record.id, TemplateDesign::Classic, Some("https://cdn/logo.png"))
            .await
            .unwrap();

        let mut edited = details("DEL/00001");
        edited.truck_no = "HR55ZZ0001".to_string();
        let updated = store.update(record.id, &edited).await.unwrap().unwrap();

        assert_eq!(updated.details.truck_no, "HR55ZZ0001");
        assert_eq!(updated.details.template_design, TemplateDesign::Classic);
        assert_eq!(
            updated.details.custom_logo_url.as_deref(),
            Some("https://cdn/logo.png")
        );
        assert_eq!(updated.created_at, record.created_at);
    }

    #[tokio::test]
    async fn test_delete_and_missing() {
        let store = InMemoryLrStore::new();
        let record = store.insert(&details("DEL/00001")).await.unwrap();

        assert!(store.delete(record.id).await.unwrap());
        assert!(!store.delete(record.id).await.unwrap());
        assert!(store.find_by_id(record.id).await.unwrap().is_none());
        assert!(store.update(record.id, &details("X")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = InMemoryLrStore::new();
        store.set_available(false);
        assert!(matches!(store.list_all().await, Err(AppError::Store(_))));
        store.set_available(true);
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
