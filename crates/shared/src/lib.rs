//! Types shared between the Droppy Dash API server and its clients.

pub mod api;
pub mod rng;
