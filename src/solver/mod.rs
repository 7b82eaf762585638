//! # Press Solver
//!
//! Computes the fewest presses that drive every counter from zero to its
//! target, where each action adds one to a fixed subset of counters:
//!
//! ```text
//! minimize Σ x   subject to   A·x = b,  x ≥ 0 integer
//! ```
//!
//! ## Pipeline
//!
//! 1. [`system`]: build the 0/1 incidence matrix `A` and targets `b`
//! 2. [`elimination`]: exact rational RREF of `[A | b]`, pivot/free split
//! 3. [`affine`]: every `x_j` as an affine function of the free parameters
//! 4. [`search`]: plateau walk or best-first search over integer parameters,
//!    validating candidates through [`evaluate`]
//!
//! Systems without free columns are answered directly from the reduced rows.
//!
//! ## Example
//!
//! ```
//! use minpress::solver::min_presses;
//!
//! // Two actions: {0} and {1}; targets (3, 4)
//! let presses = min_presses(&[3, 4], &[vec![0], vec![1]]).unwrap();
//! assert_eq!(presses, 7);
//! ```

pub mod affine;
pub mod elimination;
pub mod error;
pub mod evaluate;
pub mod observer;
pub mod search;
pub mod system;

pub use affine::{parameterize, AffineExpr, Parameterization};
pub use elimination::{reduce, ReducedSystem};
pub use error::SolveError;
pub use evaluate::{total_presses, SolutionEvaluator};
pub use observer::{NoopObserver, SearchObserver, TracingObserver};
pub use search::{find_optimum, ParameterWindow, SearchOutcome, Strategy};
pub use system::LinearSystem;

use crate::config::SolverConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result type for solver operations
pub type Result<T> = std::result::Result<T, SolveError>;

/// Which path produced a solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SolveStrategy {
    /// No action touches any counter
    Trivial,
    /// No free columns
    Unique,
    /// One cost-relevant free parameter
    Plateau,
    /// General best-first search
    BestFirst,
}

impl From<&Strategy> for SolveStrategy {
    fn from(strategy: &Strategy) -> Self {
        match strategy {
            Strategy::Plateau { .. } => SolveStrategy::Plateau,
            Strategy::BestFirst => SolveStrategy::BestFirst,
        }
    }
}

/// An optimal press vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Solution {
    /// Total presses, `Σ counts`
    pub presses: u64,
    /// Presses per action
    pub counts: Vec<u64>,
    pub strategy: SolveStrategy,
}

/// Fewest total presses with the default configuration
pub fn min_presses(targets: &[u64], actions: &[Vec<usize>]) -> Result<u64> {
    solve_machine(targets, actions, &SolverConfig::default()).map(|s| s.presses)
}

/// Solve one machine, reporting progress through `tracing`
pub fn solve_machine(
    targets: &[u64],
    actions: &[Vec<usize>],
    config: &SolverConfig,
) -> Result<Solution> {
    let observer = TracingObserver::new(config.progress_interval);
    solve_machine_with_observer(targets, actions, config, observer)
}

/// Solve one machine with a caller-supplied observer
pub fn solve_machine_with_observer<O: SearchObserver>(
    targets: &[u64],
    actions: &[Vec<usize>],
    config: &SolverConfig,
    observer: O,
) -> Result<Solution> {
    let system = LinearSystem::build(targets, actions)?;
    tracing::trace!(
        target: "minpress::solver",
        counters = system.counters(),
        actions = system.actions(),
        "system_built"
    );

    if system.has_no_effective_action() {
        return if targets.iter().all(|&t| t == 0) {
            Ok(Solution {
                presses: 0,
                counts: vec![0; system.actions()],
                strategy: SolveStrategy::Trivial,
            })
        } else {
            let row = targets.iter().position(|&t| t != 0).unwrap_or_default();
            Err(SolveError::InconsistentSystem { row })
        };
    }

    let reduced = reduce(&system)?;
    tracing::trace!(
        target: "minpress::solver",
        rank = reduced.rank(),
        free = reduced.free_columns().len(),
        "system_reduced"
    );

    if reduced.free_columns().is_empty() {
        let counts = reduced.unique_solution()?;
        if let Some(row) = system.first_violated_row(&counts) {
            return Err(SolveError::InconsistentSystem { row });
        }
        tracing::debug!(target: "minpress::solver", counts = ?counts, "unique_solution");
        return Ok(Solution {
            presses: total_presses(&counts)?,
            counts,
            strategy: SolveStrategy::Unique,
        });
    }

    let params = parameterize(&reduced)?;
    let window = config.window.bound(system.targets());
    let evaluator = SolutionEvaluator::new(&system, &params);
    let (strategy, outcome) = find_optimum(evaluator, window, config.max_expansions, observer)?;

    Ok(Solution {
        presses: outcome.presses,
        counts: outcome.counts,
        strategy: SolveStrategy::from(&strategy),
    })
}
