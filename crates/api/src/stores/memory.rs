//! Process-local state store.
//!
//! Used when no Redis URL is configured (local development) and by handler
//! tests. Data is lost on restart.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::StateStore;
use crate::models::StateDocument;

#[derive(Default)]
pub struct MemoryStateStore {
    doc: Mutex<Option<StateDocument>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an existing document.
    #[cfg(test)]
    pub fn with_document(doc: StateDocument) -> Self {
        Self {
            doc: Mutex::new(Some(doc)),
        }
    }

    /// Copy of the current document, if one was saved.
    #[cfg(test)]
    pub fn snapshot(&self) -> Option<StateDocument> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<StateDocument>> {
        // Poisoning leaves the last saved document intact
        self.doc.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn load(&self) -> Result<StateDocument> {
        Ok(self.lock().clone().unwrap_or_default())
    }

    async fn save(&self, doc: &StateDocument) -> Result<()> {
        *self.lock() = Some(doc.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_default_before_first_save() {
        let store = MemoryStateStore::new();

        assert_eq!(store.load().await.unwrap(), StateDocument::default());
        assert!(store.snapshot().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_whole_document() {
        let store = MemoryStateStore::new();
        let mut doc = StateDocument::default();
        doc.used_sessions.insert("s1".into(), 1);
        store.save(&doc).await.unwrap();

        let mut other = StateDocument::default();
        other.visit_stats.total = 3;
        store.save(&other).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert!(loaded.used_sessions.is_empty());
        assert_eq!(loaded.visit_stats.total, 3);
    }
}
