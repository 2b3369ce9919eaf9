pub mod admin;
pub mod catering;
pub mod leaderboard;
pub mod rng;
pub mod session;
pub mod visits;
