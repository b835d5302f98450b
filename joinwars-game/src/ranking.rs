//! Keep the best strategy per `(starting_currency, turns_needed)` bucket.
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::config::TieBreak;
use crate::search::Strategy;

/// Bucket key; ordering of the key is the ordering of the ranked output.
pub type BucketKey = (u64, u32);

#[must_use]
pub const fn bucket_key(strategy: &Strategy) -> BucketKey {
    (strategy.starting_currency, strategy.turns_needed)
}

/// Whether `candidate` should replace `incumbent` in its bucket.
#[must_use]
pub const fn supersedes(candidate: &Strategy, incumbent: &Strategy, tie_break: TieBreak) -> bool {
    if candidate.score != incumbent.score {
        return candidate.score > incumbent.score;
    }
    match tie_break {
        TieBreak::FirstSeen => false,
        TieBreak::LowestCost => candidate.total_cost < incumbent.total_cost,
    }
}

/// One pass reduce into an ordered map, keeping the highest score per bucket.
///
/// The result is sorted ascending by `(starting_currency, turns_needed)`.
#[must_use]
pub fn rank<I>(strategies: I, tie_break: TieBreak) -> Vec<Strategy>
where
    I: IntoIterator<Item = Strategy>,
{
    let mut best: BTreeMap<BucketKey, Strategy> = BTreeMap::new();
    for strategy in strategies {
        match best.entry(bucket_key(&strategy)) {
            Entry::Vacant(slot) => {
                slot.insert(strategy);
            }
            Entry::Occupied(mut slot) => {
                if supersedes(&strategy, slot.get(), tie_break) {
                    slot.insert(strategy);
                }
            }
        }
    }
    best.into_values().collect()
}

/// Sort unranked output by starting currency, turns, then score.
pub fn sort_unranked(strategies: &mut [Strategy]) {
    strategies.sort_by_key(|s| (s.starting_currency, s.turns_needed, s.score));
}
