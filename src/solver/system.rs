//! Linear system construction
//!
//! Turns a target vector and a list of actions into the incidence matrix `A`
//! (one row per counter, one column per action) and the target vector `b`.

use super::error::SolveError;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

/// The system `A·x = b` for one machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSystem {
    /// `incidence[counter][action]`
    incidence: Vec<Vec<bool>>,
    targets: Vec<u64>,
    actions: usize,
}

impl LinearSystem {
    /// Build the system from targets and action definitions
    ///
    /// Repeated counter indices inside one action collapse to a single
    /// increment per press.
    pub fn build(targets: &[u64], actions: &[Vec<usize>]) -> Result<Self, SolveError> {
        let counters = targets.len();
        let mut incidence = vec![vec![false; actions.len()]; counters];

        for (action, members) in actions.iter().enumerate() {
            for &counter in members {
                if counter >= counters {
                    return Err(SolveError::CounterOutOfRange {
                        action,
                        counter,
                        counters,
                    });
                }
                incidence[counter][action] = true;
            }
        }

        Ok(LinearSystem {
            incidence,
            targets: targets.to_vec(),
            actions: actions.len(),
        })
    }

    /// Number of counters (rows)
    pub fn counters(&self) -> usize {
        self.targets.len()
    }

    /// Number of actions (columns)
    pub fn actions(&self) -> usize {
        self.actions
    }

    pub fn targets(&self) -> &[u64] {
        &self.targets
    }

    /// Does `action` increment `counter`?
    pub fn affects(&self, counter: usize, action: usize) -> bool {
        self.incidence[counter][action]
    }

    /// True when no action touches any counter (this includes having no actions)
    pub fn has_no_effective_action(&self) -> bool {
        self.incidence.iter().all(|row| row.iter().all(|&hit| !hit))
    }

    /// The augmented matrix `[A | b]` over exact rationals
    pub fn augmented(&self) -> Vec<Vec<BigRational>> {
        self.incidence
            .iter()
            .zip(&self.targets)
            .map(|(row, &target)| {
                row.iter()
                    .map(|&hit| {
                        if hit {
                            BigRational::from_integer(BigInt::from(1))
                        } else {
                            BigRational::zero()
                        }
                    })
                    .chain(std::iter::once(BigRational::from_integer(BigInt::from(target))))
                    .collect()
            })
            .collect()
    }

    /// Exact check of `A·x = b`
    pub fn is_satisfied_by(&self, counts: &[u64]) -> bool {
        counts.len() == self.actions() && self.first_violated_row(counts).is_none()
    }

    /// First counter whose reached value differs from its target
    pub fn first_violated_row(&self, counts: &[u64]) -> Option<usize> {
        self.incidence
            .iter()
            .zip(&self.targets)
            .position(|(row, &target)| {
                let reached: u128 = row
                    .iter()
                    .zip(counts)
                    .filter(|(hit, _)| **hit)
                    .map(|(_, &count)| u128::from(count))
                    .sum();
                reached != u128::from(target)
            })
    }
}
