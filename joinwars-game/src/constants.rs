//! Centralized default game constants for the JoinWars strategy search.
//!
//! These values mirror the shipped game rules. The bundled
//! `data/constants.json` is expected to agree with them; the defaults here
//! are the fallback when that asset cannot be parsed.

// Logging targets -----------------------------------------------------------
pub(crate) const LOG_TARGET_SEARCH: &str = "joinwars::search";
pub(crate) const LOG_TARGET_PLANNER: &str = "joinwars::planner";

// Resource A (Transparent Mirror) ------------------------------------------
pub const DEFAULT_RESOURCE_A_INITIAL_COST: u64 = 7;
pub const DEFAULT_RESOURCE_A_COST_STEP: u64 = 2;

// Resource B (Subscribe) ------------------------------------------------------
pub const DEFAULT_RESOURCE_B_UNIT_COST: u64 = 2;

// Entry and scoring -----------------------------------------------------------
pub const DEFAULT_BASE_ENTRY_COST: u64 = 36;
pub const DEFAULT_SCORE_MULTIPLIER: u64 = 6;
pub const DEFAULT_MAX_AFFORDABLE_COST: u64 = 1_560_031;
pub const DEFAULT_MIN_SCORE: u64 = 96;
pub const DEFAULT_MAX_SCORE: u64 = 486;

// Scenarios and budgets -------------------------------------------------------
pub const DEFAULT_STARTING_CURRENCY_OPTIONS: [u64; 4] = [10, 20, 30, 50];
pub const DEFAULT_MAX_TURNS: u32 = 20;
pub const DEFAULT_MAX_RATIO: u64 = 3;
