//! Property-based tests for the press solver
//!
//! Uses proptest to generate small machines and compare against brute force

use minpress::config::SolverConfig;
use minpress::indicators::min_toggle_presses;
use minpress::solver::{min_presses, solve_machine};
use proptest::prelude::*;

/// Smallest `Σ x` over every `x` with entries up to the largest target
fn brute_force(targets: &[u64], actions: &[Vec<usize>]) -> Option<u64> {
    let cap = targets.iter().copied().max().unwrap_or(0);
    let mut counts = vec![0u64; actions.len()];
    let mut best: Option<u64> = None;

    loop {
        let reaches = targets.iter().enumerate().all(|(counter, &target)| {
            actions
                .iter()
                .zip(&counts)
                .filter(|(members, _)| members.contains(&counter))
                .map(|(_, &count)| count)
                .sum::<u64>()
                == target
        });
        if reaches {
            let presses = counts.iter().sum();
            best = Some(best.map_or(presses, |b: u64| b.min(presses)));
        }

        // odometer increment
        let mut digit = 0;
        loop {
            if digit == counts.len() {
                return best;
            }
            if counts[digit] < cap {
                counts[digit] += 1;
                break;
            }
            counts[digit] = 0;
            digit += 1;
        }
    }
}

fn brute_force_toggles(pattern: &[bool], actions: &[Vec<usize>]) -> Option<u64> {
    (0u32..(1 << actions.len()))
        .filter(|subset| {
            pattern.iter().enumerate().all(|(light, &on)| {
                let flips = actions
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| subset & (1 << i) != 0)
                    .map(|(_, members)| members.iter().filter(|&&m| m == light).count())
                    .sum::<usize>();
                (flips % 2 == 1) == on
            })
        })
        .map(|subset| u64::from(subset.count_ones()))
        .min()
}

fn any_machine() -> impl Strategy<Value = (Vec<u64>, Vec<Vec<usize>>)> {
    (1usize..=3).prop_flat_map(|counters| {
        let action = prop::collection::vec(any::<bool>(), counters).prop_map(|mask| {
            mask.iter()
                .enumerate()
                .filter(|(_, hit)| **hit)
                .map(|(counter, _)| counter)
                .collect::<Vec<_>>()
        });
        (
            prop::collection::vec(0u64..=4, counters),
            prop::collection::vec(action, 1..=4),
        )
    })
}

fn any_light_machine() -> impl Strategy<Value = (Vec<bool>, Vec<Vec<usize>>)> {
    (1usize..=5).prop_flat_map(|lights| {
        let action = prop::collection::vec(0..lights, 0..=lights);
        (
            prop::collection::vec(any::<bool>(), lights),
            prop::collection::vec(action, 0..=5),
        )
    })
}

proptest! {
    #[test]
    fn test_matches_brute_force((targets, actions) in any_machine()) {
        let expected = brute_force(&targets, &actions);
        match min_presses(&targets, &actions) {
            Ok(presses) => prop_assert_eq!(Some(presses), expected),
            Err(err) => {
                prop_assert!(err.is_infeasible(), "unexpected error {:?}", err);
                prop_assert_eq!(expected, None);
            }
        }
    }

    #[test]
    fn test_counts_reach_targets((targets, actions) in any_machine()) {
        if let Ok(solution) = solve_machine(&targets, &actions, &SolverConfig::default()) {
            prop_assert_eq!(solution.counts.iter().sum::<u64>(), solution.presses);
            for (counter, &target) in targets.iter().enumerate() {
                let reached: u64 = actions
                    .iter()
                    .zip(&solution.counts)
                    .filter(|(members, _)| members.contains(&counter))
                    .map(|(_, &count)| count)
                    .sum();
                prop_assert_eq!(reached, target);
            }
        }
    }

    #[test]
    fn test_repeated_runs_agree((targets, actions) in any_machine()) {
        let config = SolverConfig::default();
        let first = solve_machine(&targets, &actions, &config);
        let second = solve_machine(&targets, &actions, &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_action_order_does_not_matter((targets, actions) in any_machine()) {
        let mut reversed = actions.clone();
        reversed.reverse();
        prop_assert_eq!(
            min_presses(&targets, &actions).ok(),
            min_presses(&targets, &reversed).ok()
        );
    }

    #[test]
    fn test_toggles_match_brute_force((pattern, actions) in any_light_machine()) {
        let expected = brute_force_toggles(&pattern, &actions);
        prop_assert_eq!(min_toggle_presses(&pattern, &actions).ok(), expected);
    }
}
