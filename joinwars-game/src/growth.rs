//! Turn-by-turn currency growth.
//!
//! Currency starts at the starting amount and grows once per turn under the
//! configured [`GrowthRule`], clamped to the growth cap. Arithmetic saturates
//! before clamping, so currency never wraps and stays pinned once it reaches
//! the cap.
use serde::{Deserialize, Serialize};

use crate::config::{GameConstants, GrowthRule};

/// Result of growing towards a target cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthOutcome {
    /// The target was met after `turns` turns holding `currency`.
    Reached { turns: u32, currency: u64 },
    /// The turn budget ran out. `currency` is what was held on the last
    /// simulated turn and is below the target.
    Exhausted { currency: u64 },
}

impl GrowthOutcome {
    #[must_use]
    pub const fn turns(&self) -> Option<u32> {
        match self {
            Self::Reached { turns, .. } => Some(*turns),
            Self::Exhausted { .. } => None,
        }
    }

    #[must_use]
    pub const fn currency(&self) -> u64 {
        match self {
            Self::Reached { currency, .. } | Self::Exhausted { currency } => *currency,
        }
    }

    #[must_use]
    pub const fn is_reached(&self) -> bool {
        matches!(self, Self::Reached { .. })
    }
}

/// Per-turn currency sequence for one starting amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trajectory {
    pub starting_currency: u64,
    /// `currency[t]` is the currency held after `t` turns.
    pub currency: Vec<u64>,
}

/// Grows currency turn by turn under one rule, cap and turn budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthSimulator {
    rule: GrowthRule,
    cap: u64,
    max_turns: u32,
}

impl GrowthSimulator {
    #[must_use]
    pub const fn new(rule: GrowthRule, cap: u64, max_turns: u32) -> Self {
        Self {
            rule,
            cap,
            max_turns,
        }
    }

    #[must_use]
    pub fn from_constants(constants: &GameConstants) -> Self {
        Self::new(
            constants.growth_rule,
            constants.growth_cap(),
            constants.max_turns,
        )
    }

    /// Currency after one more turn.
    ///
    /// Never below `current`: an amount already above the cap is held, not cut.
    #[must_use]
    pub const fn next_currency(&self, current: u64, starting_currency: u64) -> u64 {
        let doubled = current.saturating_mul(2);
        let grown = match self.rule {
            GrowthRule::Reinvest => doubled.saturating_add(starting_currency),
            GrowthRule::Doubling => doubled,
        };
        let ceiling = if current > self.cap { current } else { self.cap };
        if grown < ceiling { grown } else { ceiling }
    }

    /// Endless sequence `currency_0, currency_1, ...` for a starting amount.
    #[must_use]
    pub const fn iter(&self, starting_currency: u64) -> GrowthIter {
        GrowthIter {
            simulator: *self,
            starting_currency,
            current: starting_currency,
        }
    }

    /// Smallest number of turns after which `target_cost` is affordable.
    ///
    /// Turn 0 (the starting amount) counts. The search stops at the first
    /// turn meeting the target or once `max_turns` turns have been simulated.
    #[must_use]
    pub fn simulate_turns_to_reach(&self, target_cost: u64, starting_currency: u64) -> GrowthOutcome {
        let mut currency = starting_currency;
        let mut turns: u32 = 0;
        loop {
            if currency >= target_cost {
                return GrowthOutcome::Reached { turns, currency };
            }
            if turns >= self.max_turns {
                return GrowthOutcome::Exhausted { currency };
            }
            let next = self.next_currency(currency, starting_currency);
            if next == currency {
                // Pinned at the cap (or stalled at zero); later turns cannot help.
                return GrowthOutcome::Exhausted { currency };
            }
            currency = next;
            turns += 1;
        }
    }

    /// Currency for turns `0..=horizon` with no target.
    #[must_use]
    pub fn trajectory(&self, starting_currency: u64, horizon: u32) -> Trajectory {
        let len = usize::try_from(horizon).map_or(usize::MAX, |h| h.saturating_add(1));
        Trajectory {
            starting_currency,
            currency: self.iter(starting_currency).take(len).collect(),
        }
    }
}

/// Iterator over the currency held on successive turns.
#[derive(Debug, Clone)]
pub struct GrowthIter {
    simulator: GrowthSimulator,
    starting_currency: u64,
    current: u64,
}

impl Iterator for GrowthIter {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.current;
        self.current = self
            .simulator
            .next_currency(self.current, self.starting_currency);
        Some(value)
    }
}

/// One trajectory per configured starting currency, in configuration order.
#[must_use]
pub fn trajectories(constants: &GameConstants, horizon: u32) -> Vec<Trajectory> {
    let simulator = GrowthSimulator::from_constants(constants);
    constants
        .starting_currency_options
        .iter()
        .map(|&start| simulator.trajectory(start, horizon))
        .collect()
}
