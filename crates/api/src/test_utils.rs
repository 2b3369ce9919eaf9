//! Shared test utilities for API handler tests.
//!
//! Provides a test configuration and a `TestStateBuilder` for constructing
//! `AppState` instances backed by either an in-memory store or a mock.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::TestStateBuilder;
//!
//! let mut store = MockStateStore::new();
//! store.expect_load().returning(|| Err(anyhow::anyhow!("redis down")));
//!
//! let state = TestStateBuilder::new().with_state_store(store).build();
//! ```

use std::sync::Arc;

use crate::config::{Config, DEV_SECRET};
use crate::state::AppState;
use crate::stores::{MemoryStateStore, MockStateStore, StateStore, Stores};

pub const TEST_ADMIN_TOKEN: &str = "admin-token";
pub const TEST_STATS_TOKEN: &str = "stats-token";

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        env: "test".to_string(),
        sentry_dsn: None,
        redis_url: None,
        store: "droppy-test".to_string(),
        secret: DEV_SECRET.to_string(),
        week_tz: "America/Mexico_City".to_string(),
        session_ttl_ms: 15 * 60 * 1000,
        cooldown_seconds: 12,
        max_per_minute: 6,
        max_entries: 10_000,
        max_distance_per_sec: 70,
        max_score_per_sec: 180,
        max_collectibles_per_sec: 3,
        max_combo: 5,
        admin_token: Some(TEST_ADMIN_TOKEN.to_string()),
        visit_stats_token: Some(TEST_STATS_TOKEN.to_string()),
        fingerprint_salt: String::new(),
        trust_proxy_headers: true,
        catering_max_entries: 2000,
        catering_max_details: 600,
        catering_max_guests: 1000,
        visit_ttl_secs: 6 * 60 * 60,
        visit_max_age_secs: 7 * 24 * 60 * 60,
    }
}

/// Builder for constructing test `AppState`.
///
/// Uses a fresh `MemoryStateStore` unless a store is explicitly set.
pub struct TestStateBuilder {
    config: Config,
    state_store: Option<Arc<dyn StateStore>>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            config: test_config(),
            state_store: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_state_store(mut self, store: MockStateStore) -> Self {
        self.state_store = Some(Arc::new(store) as Arc<dyn StateStore>);
        self
    }

    /// Shares `store` with the test so it can inspect what was saved.
    pub fn with_memory_store(mut self, store: Arc<MemoryStateStore>) -> Self {
        self.state_store = Some(store as Arc<dyn StateStore>);
        self
    }

    pub fn build(self) -> AppState {
        let stores = Stores {
            state: self
                .state_store
                .unwrap_or_else(|| Arc::new(MemoryStateStore::new()) as Arc<dyn StateStore>),
        };

        AppState::new(self.config, stores).expect("test config is valid")
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
