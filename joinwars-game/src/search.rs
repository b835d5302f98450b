//! Exhaustive strategy search over resource counts.
//!
//! Candidate pairs are generated lazily over `[1, max_count]²` and pushed
//! through the filters cheapest first: ratio, cost, score, then the growth
//! simulation.
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConstants};
use crate::constants::LOG_TARGET_SEARCH;
use crate::growth::{GrowthOutcome, GrowthSimulator};
use crate::model::{cost_breakdown, score};
use crate::numbers::floor_sqrt_of_quotient;

/// One feasible purchase plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Strategy {
    pub starting_currency: u64,
    pub turns_needed: u32,
    pub score: u64,
    pub total_cost: u64,
    pub currency_after_growth: u64,
    pub resource_a_count: u64,
    pub resource_b_count: u64,
    pub resource_a_cost: u64,
    pub resource_b_cost: u64,
}

/// Why a candidate pair was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    Ratio,
    Cost,
    Score,
    Turns,
}

/// Filter tallies for one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub candidates: u64,
    pub ratio_rejected: u64,
    pub cost_rejected: u64,
    pub score_rejected: u64,
    pub turn_rejected: u64,
    pub accepted: u64,
}

impl SearchStats {
    fn record(&mut self, result: Result<&Strategy, Rejection>) {
        self.candidates += 1;
        match result {
            Ok(_) => self.accepted += 1,
            Err(Rejection::Ratio) => self.ratio_rejected += 1,
            Err(Rejection::Cost) => self.cost_rejected += 1,
            Err(Rejection::Score) => self.score_rejected += 1,
            Err(Rejection::Turns) => self.turn_rejected += 1,
        }
    }

    #[must_use]
    pub const fn rejected(&self) -> u64 {
        self.candidates - self.accepted
    }

    pub fn merge(&mut self, other: &Self) {
        self.candidates += other.candidates;
        self.ratio_rejected += other.ratio_rejected;
        self.cost_rejected += other.cost_rejected;
        self.score_rejected += other.score_rejected;
        self.turn_rejected += other.turn_rejected;
        self.accepted += other.accepted;
    }
}

/// Upper bound for either resource count:
/// `floor(sqrt(max_affordable_cost / resource_a_initial_cost))`.
#[must_use]
pub const fn max_count(constants: &GameConstants) -> u64 {
    floor_sqrt_of_quotient(
        constants.max_affordable_cost,
        constants.resource_a_initial_cost,
    )
}

/// Every `(a_count, b_count)` in `[1, max_count]²`, row-major.
pub fn candidate_pairs(max_count: u64) -> impl Iterator<Item = (u64, u64)> {
    (1..=max_count).flat_map(move |a| (1..=max_count).map(move |b| (a, b)))
}

/// `1 / max_ratio <= a / b <= max_ratio`, in integer form.
#[must_use]
pub const fn within_ratio(a_count: u64, b_count: u64, max_ratio: u64) -> bool {
    a_count <= b_count.saturating_mul(max_ratio) && b_count <= a_count.saturating_mul(max_ratio)
}

/// Run one candidate through every filter.
///
/// # Errors
///
/// Returns the first filter the pair fails.
pub fn evaluate(
    constants: &GameConstants,
    simulator: &GrowthSimulator,
    starting_currency: u64,
    a_count: u64,
    b_count: u64,
) -> Result<Strategy, Rejection> {
    if !within_ratio(a_count, b_count, constants.max_ratio) {
        return Err(Rejection::Ratio);
    }

    let costs = cost_breakdown(constants, a_count, b_count)
        .filter(|costs| costs.total <= constants.max_affordable_cost)
        .ok_or(Rejection::Cost)?;

    let score = score(constants, a_count, b_count)
        .filter(|score| (constants.min_score..=constants.max_score).contains(score))
        .ok_or(Rejection::Score)?;

    let (turns_needed, currency_after_growth) =
        match simulator.simulate_turns_to_reach(costs.total, starting_currency) {
            GrowthOutcome::Reached { turns, currency } if turns <= constants.max_turns => {
                (turns, currency)
            }
            GrowthOutcome::Reached { .. } | GrowthOutcome::Exhausted { .. } => {
                return Err(Rejection::Turns);
            }
        };

    Ok(Strategy {
        starting_currency,
        turns_needed,
        score,
        total_cost: costs.total,
        currency_after_growth,
        resource_a_count: a_count,
        resource_b_count: b_count,
        resource_a_cost: costs.resource_a,
        resource_b_cost: costs.resource_b,
    })
}

/// Reject a starting currency that is not one of the configured options.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownStartingCurrency`].
pub fn ensure_configured(
    constants: &GameConstants,
    starting_currency: u64,
) -> Result<(), ConfigError> {
    if constants
        .starting_currency_options
        .contains(&starting_currency)
    {
        Ok(())
    } else {
        Err(ConfigError::UnknownStartingCurrency {
            value: starting_currency,
        })
    }
}

/// All feasible strategies for one starting currency, in enumeration order.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the constants fail validation or
/// `starting_currency` is not a configured option; nothing is evaluated.
pub fn search(
    constants: &GameConstants,
    starting_currency: u64,
) -> Result<Vec<Strategy>, ConfigError> {
    search_with_stats(constants, starting_currency).map(|(strategies, _)| strategies)
}

/// [`search`] plus the filter tallies.
///
/// # Errors
///
/// Same conditions as [`search`].
pub fn search_with_stats(
    constants: &GameConstants,
    starting_currency: u64,
) -> Result<(Vec<Strategy>, SearchStats), ConfigError> {
    constants.validate()?;
    ensure_configured(constants, starting_currency)?;
    Ok(run_search(constants, starting_currency))
}

/// Search every configured starting currency, concatenated in option order.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the constants fail validation.
pub fn search_all(constants: &GameConstants) -> Result<(Vec<Strategy>, SearchStats), ConfigError> {
    constants.validate()?;
    Ok(run_search_all(constants))
}

/// Unchecked search; callers hold validated constants and a configured start.
pub(crate) fn run_search(
    constants: &GameConstants,
    starting_currency: u64,
) -> (Vec<Strategy>, SearchStats) {
    let simulator = GrowthSimulator::from_constants(constants);
    let mut stats = SearchStats::default();
    let strategies: Vec<Strategy> = candidate_pairs(max_count(constants))
        .map(|(a, b)| evaluate(constants, &simulator, starting_currency, a, b))
        .inspect(|result| stats.record(result.as_ref().map_err(|rejection| *rejection)))
        .filter_map(Result::ok)
        .inspect(|strategy| {
            log::trace!(
                target: LOG_TARGET_SEARCH,
                "accepted a={} b={} cost={} score={} turns={}",
                strategy.resource_a_count,
                strategy.resource_b_count,
                strategy.total_cost,
                strategy.score,
                strategy.turns_needed
            );
        })
        .collect();

    log::debug!(
        target: LOG_TARGET_SEARCH,
        "start={starting_currency} candidates={} accepted={} rejected(ratio={} cost={} score={} turns={})",
        stats.candidates,
        stats.accepted,
        stats.ratio_rejected,
        stats.cost_rejected,
        stats.score_rejected,
        stats.turn_rejected
    );

    (strategies, stats)
}

pub(crate) fn run_search_all(constants: &GameConstants) -> (Vec<Strategy>, SearchStats) {
    let mut totals = SearchStats::default();
    let mut strategies = Vec::new();
    for &start in &constants.starting_currency_options {
        let (found, stats) = run_search(constants, start);
        totals.merge(&stats);
        strategies.extend(found);
    }
    (strategies, totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrowthRule;

    fn open_window_constants() -> GameConstants {
        GameConstants {
            min_score: 0,
            max_score: 486,
            ..GameConstants::default()
        }
        .with_starting_currency_options(vec![10])
    }

    #[test]
    fn default_bound_is_472() {
        assert_eq!(max_count(&GameConstants::default()), 472);
    }

    #[test]
    fn candidate_pairs_cover_the_square() {
        let pairs: Vec<(u64, u64)> = candidate_pairs(2).collect();
        assert_eq!(pairs, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(candidate_pairs(0).count(), 0);
    }

    #[test]
    fn ratio_boundary_is_inclusive() {
        assert!(within_ratio(3, 1, 3));
        assert!(within_ratio(1, 3, 3));
        assert!(within_ratio(9, 3, 3));
        assert!(!within_ratio(10, 3, 3));
        assert!(!within_ratio(3, 10, 3));
        assert!(!within_ratio(4, 1, 3));
    }

    #[test]
    fn single_units_are_feasible_for_ten_coins() {
        let constants = open_window_constants();
        let sim = GrowthSimulator::from_constants(&constants);
        let strategy = evaluate(&constants, &sim, 10, 1, 1).unwrap();
        assert_eq!(strategy.total_cost, 45);
        assert_eq!(strategy.score, 6);
        assert_eq!(strategy.turns_needed, 2);
        assert_eq!(strategy.currency_after_growth, 70);
        assert_eq!(strategy.resource_a_cost, 7);
        assert_eq!(strategy.resource_b_cost, 2);

        let doubling = constants.clone().with_growth_rule(GrowthRule::Doubling);
        let sim = GrowthSimulator::from_constants(&doubling);
        let strategy = evaluate(&doubling, &sim, 10, 1, 1).unwrap();
        assert_eq!(strategy.turns_needed, 3);
        assert_eq!(strategy.currency_after_growth, 80);
    }

    #[test]
    fn score_boundary_is_inclusive() {
        let constants = open_window_constants();
        let sim = GrowthSimulator::from_constants(&constants);
        // 6 * 9 * 9 = 486 == max_score
        assert!(evaluate(&constants, &sim, 10, 9, 9).is_ok());

        let tight = GameConstants {
            max_score: 485,
            ..open_window_constants()
        };
        assert_eq!(
            evaluate(&tight, &sim, 10, 9, 9),
            Err(Rejection::Score)
        );
    }

    #[test]
    fn filters_apply_in_order() {
        let constants = open_window_constants();
        let sim = GrowthSimulator::from_constants(&constants);
        // Out of ratio and over every ceiling: ratio wins.
        assert_eq!(evaluate(&constants, &sim, 10, 472, 1), Err(Rejection::Ratio));
        // Balanced but over the score window.
        assert_eq!(evaluate(&constants, &sim, 10, 10, 10), Err(Rejection::Score));

        let poor = GameConstants {
            max_affordable_cost: 44,
            growth_cap: Some(1_000),
            ..open_window_constants()
        };
        assert_eq!(evaluate(&poor, &sim, 10, 1, 1), Err(Rejection::Cost));

        let impatient = open_window_constants().with_max_turns(1);
        let sim = GrowthSimulator::from_constants(&impatient);
        assert_eq!(evaluate(&impatient, &sim, 10, 1, 1), Err(Rejection::Turns));
    }

    #[test]
    fn stats_account_for_every_candidate() {
        let constants = open_window_constants();
        let (strategies, stats) = search_with_stats(&constants, 10).unwrap();
        assert_eq!(stats.candidates, 472 * 472);
        assert_eq!(stats.accepted, strategies.len() as u64);
        assert_eq!(
            stats.rejected(),
            stats.ratio_rejected + stats.cost_rejected + stats.score_rejected + stats.turn_rejected
        );
        assert!(strategies.iter().any(|s| s.resource_a_count == 1 && s.resource_b_count == 1));
    }

    #[test]
    fn search_all_concatenates_in_option_order() {
        let constants = GameConstants::default();
        let (strategies, stats) = search_all(&constants).unwrap();
        assert_eq!(stats.accepted, strategies.len() as u64);
        let firsts: Vec<u64> = strategies
            .iter()
            .map(|s| s.starting_currency)
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|w| w[0] != w[1])
            .map(|w| w[1])
            .collect();
        assert_eq!(firsts, vec![20, 30, 50]);
    }

    #[test]
    fn unconfigured_starting_currency_is_rejected() {
        let constants = open_window_constants();
        assert_eq!(
            search(&constants, 2_000_000),
            Err(ConfigError::UnknownStartingCurrency { value: 2_000_000 })
        );
        assert_eq!(
            search(&constants, 20),
            Err(ConfigError::UnknownStartingCurrency { value: 20 })
        );
    }

    #[test]
    fn invalid_constants_are_rejected_before_evaluating() {
        let inverted = GameConstants {
            min_score: 10,
            max_score: 5,
            ..GameConstants::default()
        };
        assert_eq!(
            search_all(&inverted),
            Err(ConfigError::ScoreWindow { min: 10, max: 5 })
        );
        assert_eq!(
            search_with_stats(&inverted, 10),
            Err(ConfigError::ScoreWindow { min: 10, max: 5 })
        );

        let low_cap = GameConstants {
            growth_cap: Some(5),
            ..open_window_constants()
        };
        assert_eq!(
            search(&low_cap, 10),
            Err(ConfigError::StartingAboveCap { value: 10, cap: 5 })
        );
    }
}
