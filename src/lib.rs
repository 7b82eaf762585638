// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # minpress: Minimum Total Presses
//!
//! A machine has counters that start at zero and actions that each add one
//! to a fixed subset of counters. minpress finds the fewest total presses
//! that bring every counter exactly to its target, or reports that no
//! non-negative integer press vector exists.
//!
//! ## Quick Start
//!
//! ```rust
//! use minpress::{parse_machines, solve_counters, NoopObserver, SolverConfig};
//!
//! let input = "\
//! [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
//! [#.#] (0) (1,2) {2,3,3}
//! ";
//! let machines = parse_machines(input)?;
//! let report = solve_counters(&machines, &SolverConfig::default(), NoopObserver)?;
//! assert_eq!(report.machines[0].presses, 10);
//! assert_eq!(report.total, 15);
//! # Ok::<(), minpress::Error>(())
//! ```
//!
//! ## Input Format
//!
//! One machine per line:
//!
//! ```text
//! [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
//!  │      │                               │
//!  │      └ actions: counters each press  └ counter targets
//!  │        increments
//!  └ indicator pattern (optional; used by the indicators mode)
//! ```
//!
//! ## Architecture
//!
//! ```text
//! input ──► machine::parse_machines ──► Vec<Machine>
//!                                           │
//!              ┌────────────────────────────┴───────────────┐
//!              │ counters                       indicators  │
//!              ▼                                            ▼
//!   solver::solve_machine                 indicators::min_toggle_presses
//!     LinearSystem ─► reduce (RREF)                  (BFS over bitmasks)
//!       ─► parameterize ─► find_optimum
//!              │                                            │
//!              └──────────────► batch::BatchReport ◄────────┘
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod machine;
pub mod solver;

// Re-exports
pub use batch::{solve_batch, solve_counters, solve_indicators, BatchReport, MachineReport, Mode};
pub use config::{LoggingConfig, Settings, SolverConfig, WindowPolicy, CONFIG_FILE};
pub use error::{Error, Result};
pub use indicators::{min_toggle_presses, MAX_INDICATORS};
pub use logging::init_tracing;
pub use machine::{parse_machines, Machine};
pub use solver::{
    min_presses, solve_machine, solve_machine_with_observer, NoopObserver, SearchObserver,
    Solution, SolveError, SolveStrategy, TracingObserver,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
