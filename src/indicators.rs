//! Indicator lights variant
//!
//! Every press toggles its lights, so only the parity of each action's press
//! count matters. Breadth-first search over light states (bitmasks) yields
//! the fewest presses to reach the pattern from all-off.

use crate::solver::SolveError;
use std::collections::{HashMap, VecDeque};

/// Largest pattern the bitmask search supports
pub const MAX_INDICATORS: usize = 64;

/// Fewest toggle presses turning all-off lights into `pattern`
///
/// A counter listed twice in one action toggles twice, so it cancels.
pub fn min_toggle_presses(pattern: &[bool], actions: &[Vec<usize>]) -> Result<u64, SolveError> {
    if pattern.len() > MAX_INDICATORS {
        return Err(SolveError::TooManyIndicators {
            indicators: pattern.len(),
            max: MAX_INDICATORS,
        });
    }

    let goal = to_mask(pattern);
    let mut masks = Vec::with_capacity(actions.len());
    for (action, members) in actions.iter().enumerate() {
        let mut mask = 0u64;
        for &light in members {
            if light >= pattern.len() {
                return Err(SolveError::CounterOutOfRange {
                    action,
                    counter: light,
                    counters: pattern.len(),
                });
            }
            mask ^= 1u64 << light;
        }
        masks.push(mask);
    }

    let mut distance: HashMap<u64, u64> = HashMap::from([(0, 0)]);
    let mut queue = VecDeque::from([0u64]);

    while let Some(state) = queue.pop_front() {
        let presses = distance[&state];
        if state == goal {
            tracing::trace!(
                target: "minpress::indicators",
                presses,
                states = distance.len(),
                "pattern_reached"
            );
            return Ok(presses);
        }
        for &mask in &masks {
            let next = state ^ mask;
            if !distance.contains_key(&next) {
                distance.insert(next, presses + 1);
                queue.push_back(next);
            }
        }
    }

    Err(SolveError::UnreachablePattern)
}

fn to_mask(pattern: &[bool]) -> u64 {
    pattern
        .iter()
        .enumerate()
        .filter(|(_, on)| **on)
        .fold(0u64, |mask, (i, _)| mask | (1u64 << i))
}
