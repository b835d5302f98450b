use std::collections::HashMap;

use joinwars_game::{
    GameConstants, GrowthRule, GrowthSimulator, TieBreak, rank, resource_a_cost, score, search,
};
use proptest::prelude::*;

fn arb_rule() -> impl Strategy<Value = GrowthRule> {
    prop_oneof![Just(GrowthRule::Reinvest), Just(GrowthRule::Doubling)]
}

// Small ceilings keep the enumeration square tiny so each case stays fast.
fn arb_constants() -> impl Strategy<Value = GameConstants> {
    (
        1u64..20,
        0u64..5,
        0u64..5,
        0u64..50,
        1u64..8,
        200u64..3_000,
        0u64..100,
        0u64..400,
        1u32..12,
        arb_rule(),
    )
        .prop_map(
            |(initial, step, unit, entry, mult, max_cost, min_score, span, turns, rule)| {
                GameConstants {
                    resource_a_initial_cost: initial,
                    resource_a_cost_step: step,
                    resource_b_unit_cost: unit,
                    base_entry_cost: entry,
                    score_multiplier: mult,
                    max_affordable_cost: max_cost,
                    min_score,
                    max_score: min_score + span,
                    ..GameConstants::default()
                }
                .with_starting_currency_options(vec![10])
                .with_max_turns(turns)
                .with_growth_rule(rule)
            },
        )
}

proptest! {
    #[test]
    fn prop_resource_a_cost_matches_summation(
        initial in 0u64..1_000,
        step in 0u64..1_000,
        count in 0u64..300,
    ) {
        let constants = GameConstants {
            resource_a_initial_cost: initial,
            resource_a_cost_step: step,
            ..GameConstants::default()
        };
        let summed: u64 = (0..count).map(|k| initial + k * step).sum();
        prop_assert_eq!(resource_a_cost(&constants, count), Some(summed));
    }

    #[test]
    fn prop_score_is_commutative(a in 0u64..100_000, b in 0u64..100_000, mult in 1u64..100) {
        let constants = GameConstants { score_multiplier: mult, ..GameConstants::default() };
        prop_assert_eq!(score(&constants, a, b), score(&constants, b, a));
    }

    #[test]
    fn prop_growth_is_monotone_and_capped(
        start in 1u64..10_000,
        cap in 1u64..5_000_000,
        rule in arb_rule(),
        horizon in 0u32..80,
    ) {
        let sim = GrowthSimulator::new(rule, cap, 20);
        let trajectory = sim.trajectory(start, horizon);
        prop_assert_eq!(trajectory.currency.len(), horizon as usize + 1);
        prop_assert!(trajectory.currency.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(trajectory.currency.iter().all(|&c| c <= cap.max(start)));
    }

    #[test]
    fn prop_reached_turn_is_the_first_affordable_turn(
        start in 1u64..500,
        target in 1u64..200_000,
        rule in arb_rule(),
        max_turns in 1u32..30,
    ) {
        let sim = GrowthSimulator::new(rule, 1_560_031, max_turns);
        let trajectory = sim.trajectory(start, max_turns);
        let first = trajectory.currency.iter().position(|&c| c >= target);
        let outcome = sim.simulate_turns_to_reach(target, start);
        match first {
            Some(turn) => {
                prop_assert_eq!(outcome.turns(), Some(turn as u32));
                prop_assert_eq!(outcome.currency(), trajectory.currency[turn]);
            }
            None => {
                prop_assert!(!outcome.is_reached());
                prop_assert!(outcome.currency() < target);
            }
        }
    }

    #[test]
    fn prop_search_is_idempotent(constants in arb_constants()) {
        let first = search(&constants, 10).unwrap();
        prop_assert_eq!(first, search(&constants, 10).unwrap());
    }

    #[test]
    fn prop_ranking_keeps_one_max_per_bucket(constants in arb_constants()) {
        let raw = search(&constants, 10).unwrap();
        let mut best: HashMap<(u64, u32), u64> = HashMap::new();
        for s in &raw {
            let entry = best.entry((s.starting_currency, s.turns_needed)).or_default();
            *entry = (*entry).max(s.score);
        }
        let ranked = rank(raw, TieBreak::FirstSeen);
        prop_assert_eq!(ranked.len(), best.len());
        for s in &ranked {
            prop_assert_eq!(best[&(s.starting_currency, s.turns_needed)], s.score);
        }
        prop_assert!(ranked
            .windows(2)
            .all(|w| (w[0].starting_currency, w[0].turns_needed)
                < (w[1].starting_currency, w[1].turns_needed)));
    }
}
