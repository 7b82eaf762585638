//! Candidate materialization
//!
//! Turns a parameter point into a concrete press vector and validates it
//! exactly against the original system.

use super::affine::Parameterization;
use super::error::SolveError;
use super::system::LinearSystem;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

/// Materializes and validates candidates for one parameterized system
#[derive(Debug, Clone, Copy)]
pub struct SolutionEvaluator<'a> {
    system: &'a LinearSystem,
    params: &'a Parameterization,
}

impl<'a> SolutionEvaluator<'a> {
    pub fn new(system: &'a LinearSystem, params: &'a Parameterization) -> Self {
        SolutionEvaluator { system, params }
    }

    pub fn system(&self) -> &'a LinearSystem {
        self.system
    }

    pub fn params(&self) -> &'a Parameterization {
        self.params
    }

    /// Objective value `Σ_j x_j` at `point`
    pub fn objective_at(&self, point: &[i64]) -> BigRational {
        self.params.objective().evaluate(point)
    }

    /// The press vector at `point`, if every count is a non-negative integer
    /// and the vector satisfies `A·x = b`
    pub fn materialize(&self, point: &[i64]) -> Option<Vec<u64>> {
        let mut counts = Vec::with_capacity(self.params.variables().len());
        for expr in self.params.variables() {
            let value = expr.evaluate(point);
            if !value.is_integer() || value.is_negative() {
                return None;
            }
            counts.push(value.to_integer().to_u64()?);
        }

        self.system.is_satisfied_by(&counts).then_some(counts)
    }
}

/// `Σ counts`, or `PressOverflow` when it does not fit in `u64`
pub fn total_presses(counts: &[u64]) -> Result<u64, SolveError> {
    counts
        .iter()
        .try_fold(0u64, |total, &count| total.checked_add(count))
        .ok_or(SolveError::PressOverflow { max: u64::MAX })
}
