//! JoinWars Strategy Engine
//!
//! Platform-agnostic strategy search for the JoinWars resource game. Given a
//! starting currency, it enumerates purchases of two resources (Transparent
//! Mirrors and Subscribes), simulates the turns needed to afford each
//! combination, and keeps the best-scoring plan for every turn count.
//!
//! The crate is pure and synchronous; presentation lives in
//! `joinwars-planner`.

pub mod config;
pub mod constants;
pub mod growth;
pub mod model;
pub mod numbers;
pub mod planner;
pub mod ranking;
pub mod search;

// Re-export commonly used types
pub use config::{ConfigError, GameConstants, GrowthRule, TieBreak};
pub use growth::{GrowthOutcome, GrowthSimulator, Trajectory, trajectories};
pub use model::{CostBreakdown, cost_breakdown, resource_a_cost, resource_b_cost, score, total_cost};
pub use planner::{Plan, Planner};
pub use ranking::{rank, sort_unranked};
pub use search::{
    Rejection, SearchStats, Strategy, candidate_pairs, ensure_configured, evaluate, max_count,
    search, search_all, search_with_stats, within_ratio,
};
