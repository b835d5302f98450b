//! Acquisition cost and victory score formulas.
//!
//! Every function is pure and uses checked arithmetic: `None` means the value
//! does not fit in a `u64`, which callers treat as "over every ceiling".
use crate::config::GameConstants;
use crate::numbers::{checked_product, checked_sum};

/// Cost of buying `count` units of resource A.
///
/// Unit prices follow an arithmetic progression starting at
/// `resource_a_initial_cost` and growing by `resource_a_cost_step`, so the
/// total is `count * (2 * initial + (count - 1) * step) / 2`. With integer
/// prices the numerator is always even; the division would truncate otherwise.
#[must_use]
pub fn resource_a_cost(constants: &GameConstants, count: u64) -> Option<u64> {
    if count == 0 {
        return Some(0);
    }
    let first_plus_last = constants
        .resource_a_initial_cost
        .checked_mul(2)?
        .checked_add((count - 1).checked_mul(constants.resource_a_cost_step)?)?;
    Some(count.checked_mul(first_plus_last)? / 2)
}

/// Cost of buying `count` units of resource B at a flat unit price.
#[must_use]
pub fn resource_b_cost(constants: &GameConstants, count: u64) -> Option<u64> {
    constants.resource_b_unit_cost.checked_mul(count)
}

/// Total acquisition cost, entry fee included.
#[must_use]
pub fn total_cost(constants: &GameConstants, a_count: u64, b_count: u64) -> Option<u64> {
    cost_breakdown(constants, a_count, b_count).map(|breakdown| breakdown.total)
}

/// Victory score: `score_multiplier * a_count * b_count`.
#[must_use]
pub fn score(constants: &GameConstants, a_count: u64, b_count: u64) -> Option<u64> {
    checked_product(&[constants.score_multiplier, a_count, b_count])
}

/// Itemised acquisition cost of one resource combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    pub resource_a: u64,
    pub resource_b: u64,
    pub entry: u64,
    pub total: u64,
}

#[must_use]
pub fn cost_breakdown(
    constants: &GameConstants,
    a_count: u64,
    b_count: u64,
) -> Option<CostBreakdown> {
    let resource_a = resource_a_cost(constants, a_count)?;
    let resource_b = resource_b_cost(constants, b_count)?;
    let entry = constants.base_entry_cost;
    let total = checked_sum(&[resource_a, resource_b, entry])?;
    Some(CostBreakdown {
        resource_a,
        resource_b,
        entry,
        total,
    })
}
