//! Error types for the press solver

use num_rational::BigRational;
use thiserror::Error;

/// Terminal outcomes of solving one machine
///
/// [`SolveError::is_infeasible`] separates "this machine has no answer" from
/// bad input and exhausted budgets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A reduced row reads `0 = c` with `c != 0`
    #[error("Inconsistent system: reduced row {row} has no coefficients but a non-zero target")]
    InconsistentSystem { row: usize },

    /// The system has exactly one solution and it is not a non-negative integer vector
    #[error("Unique solution is not a non-negative integer: x[{column}] = {value}")]
    NonIntegerOrNegativeUniqueSolution { column: usize, value: BigRational },

    /// No feasible integer point inside `[-window, window]`
    #[error("No feasible integer point inside the search window [-{window}, {window}]")]
    SearchWindowExhausted { window: u64 },

    /// Back-substitution produced an expression that does not satisfy its row
    #[error("Internal parameterization error: expression for x[{column}] is not affine in the free parameters")]
    InternalParameterizationError { column: usize },

    /// An action names a counter that does not exist
    #[error("Action {action} references counter {counter}, but only {counters} counters exist")]
    CounterOutOfRange {
        action: usize,
        counter: usize,
        counters: usize,
    },

    /// The configured work budget ran out before the search finished
    #[error("Search budget exceeded after {expansions} expansions")]
    SearchBudgetExceeded { expansions: u64 },

    /// The indicator pattern cannot be produced by any press sequence
    #[error("Indicator pattern is unreachable")]
    UnreachablePattern,

    /// Total presses do not fit in `u64`
    #[error("Total presses exceed {max}")]
    PressOverflow { max: u64 },

    /// Indicator mode needs a `[...]` pattern
    #[error("Machine has no [...] indicator pattern")]
    MissingIndicatorPattern,

    /// Too many indicators for the bitmask search
    #[error("Indicator pattern has {indicators} lights, at most {max} are supported")]
    TooManyIndicators { indicators: usize, max: usize },
}

impl SolveError {
    /// True when the machine has no answer, as opposed to bad input or a budget stop
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            SolveError::InconsistentSystem { .. }
                | SolveError::NonIntegerOrNegativeUniqueSolution { .. }
                | SolveError::SearchWindowExhausted { .. }
                | SolveError::InternalParameterizationError { .. }
                | SolveError::UnreachablePattern
        )
    }
}
