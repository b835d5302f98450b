//! Validated entry point tying the search, ranking and growth export together.
use crate::config::{ConfigError, GameConstants};
use crate::constants::LOG_TARGET_PLANNER;
use crate::growth::{Trajectory, trajectories};
use crate::ranking::{rank, sort_unranked};
use crate::search::{SearchStats, Strategy, ensure_configured, run_search, run_search_all};

/// A search session over one validated set of game constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planner {
    constants: GameConstants,
}

/// Ranked strategies plus the filter tallies behind them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub strategies: Vec<Strategy>,
    pub stats: SearchStats,
}

impl Planner {
    /// Validate `constants` and build a planner around them.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant; no search runs on invalid input.
    pub fn new(constants: GameConstants) -> Result<Self, ConfigError> {
        constants.validate()?;
        Ok(Self { constants })
    }

    /// Planner over the bundled default constants.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled constants fail validation.
    pub fn from_static() -> Result<Self, ConfigError> {
        Self::new(GameConstants::load_from_static())
    }

    #[must_use]
    pub const fn constants(&self) -> &GameConstants {
        &self.constants
    }

    /// Every feasible strategy for one configured starting currency,
    /// unordered.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownStartingCurrency`] when
    /// `starting_currency` is not one of the configured options.
    pub fn search(&self, starting_currency: u64) -> Result<Vec<Strategy>, ConfigError> {
        ensure_configured(&self.constants, starting_currency)?;
        Ok(run_search(&self.constants, starting_currency).0)
    }

    /// Every feasible strategy for every configured starting currency.
    #[must_use]
    pub fn search_all(&self) -> Plan {
        let (strategies, stats) = run_search_all(&self.constants);
        Plan { strategies, stats }
    }

    /// [`Self::search_all`] sorted by starting currency, turns and score,
    /// without dropping dominated strategies.
    #[must_use]
    pub fn unranked(&self) -> Plan {
        let mut plan = self.search_all();
        sort_unranked(&mut plan.strategies);
        plan
    }

    /// Best strategy per `(starting_currency, turns_needed)`, sorted.
    #[must_use]
    pub fn plan(&self) -> Plan {
        let Plan { strategies, stats } = self.search_all();
        let ranked = rank(strategies, self.constants.tie_break);
        log::info!(
            target: LOG_TARGET_PLANNER,
            "planned {} buckets from {} feasible strategies ({} rule, {} ties)",
            ranked.len(),
            stats.accepted,
            self.constants.growth_rule,
            self.constants.tie_break
        );
        Plan {
            strategies: ranked,
            stats,
        }
    }

    /// Currency per turn for every configured starting currency.
    #[must_use]
    pub fn trajectories(&self, horizon: u32) -> Vec<Trajectory> {
        trajectories(&self.constants, horizon)
    }
}
