//! HTTP handlers, one module per endpoint group.
//!
//! Each module exposes `router()`; `app::build` nests them under their
//! paths.

pub mod admin;
pub mod catering;
pub mod health;
pub mod leaderboard;
pub mod score;
pub mod session;
pub mod visits;
