//! State document storage for Redis.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;

use crate::models::StateDocument;

/// Store for the shared state document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Health check - verify the backend is reachable.
    async fn health_check(&self) -> Result<bool>;

    /// Load the document, or an empty one if nothing was saved yet.
    async fn load(&self) -> Result<StateDocument>;

    /// Overwrite the document.
    async fn save(&self, doc: &StateDocument) -> Result<()>;
}

/// Redis implementation of StateStore.
#[derive(Clone)]
pub struct RedisStateStore {
    client: redis::Client,
    key: String,
}

impl RedisStateStore {
    pub fn new(client: redis::Client, store: &str) -> Self {
        Self {
            client,
            key: Self::document_key(store),
        }
    }

    fn document_key(store: &str) -> String {
        format!("{}:leaderboard", store)
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn health_check(&self) -> Result<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(result == "PONG")
    }

    async fn load(&self) -> Result<StateDocument> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let json: Option<String> = conn.get(&self.key).await?;

        match json {
            Some(j) => serde_json::from_str(&j)
                .with_context(|| format!("corrupt state document at {}", self.key)),
            None => Ok(StateDocument::default()),
        }
    }

    async fn save(&self, doc: &StateDocument) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(doc)?;

        let _: () = conn.set(&self.key, &json).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_key_is_namespaced_by_store() {
        assert_eq!(
            RedisStateStore::document_key("droppy-dash"),
            "droppy-dash:leaderboard"
        );
    }
}
