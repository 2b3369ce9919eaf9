//! State storage.
//!
//! The whole site shares one JSON document (leaderboard entries, rate limit
//! records, redeemed sessions, visit counters, catering requests). Handlers
//! load it, mutate it and save it back; the last write wins.
//!
//! ## Backends
//!
//! - **state** - `StateStore` trait and the Redis implementation
//! - **memory** - process-local store for development and tests
//! - **rate_limit** - cooldown + sliding-window limiter over the document's
//!   `rate` map
//!
//! ## Redis Key Pattern
//!
//! ```text
//! {store}:leaderboard   → StateDocument JSON
//! ```
//!
//! ## Usage in Handlers
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let mut doc = state.stores.state.load().await?;
//!     // ... mutate ...
//!     state.stores.state.save(&doc).await?;
//! }
//! ```

mod memory;
mod rate_limit;
mod state;

pub use memory::MemoryStateStore;
pub use rate_limit::{RateLimitPolicy, RateLimitResult, RateLimiter};
pub use state::{RedisStateStore, StateStore};

#[cfg(test)]
pub use state::MockStateStore;

use std::sync::Arc;

/// Collection of all stores.
#[derive(Clone)]
pub struct Stores {
    pub state: Arc<dyn StateStore>,
}
