//! Batch driver
//!
//! Solves every machine of an input in order and sums the answers. The
//! first machine that cannot be solved aborts the whole batch.

use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::indicators::min_toggle_presses;
use crate::machine::Machine;
use crate::solver::{solve_machine_with_observer, SearchObserver, SolveError, SolveStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which question is asked of every machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Reach the `{...}` counter targets with additive presses
    #[default]
    Counters,
    /// Reach the `[...]` light pattern with toggling presses
    Indicators,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "counters" | "joltage" => Ok(Mode::Counters),
            "indicators" | "lights" => Ok(Mode::Indicators),
            other => Err(format!(
                "Unknown mode '{}' (expected counters or indicators)",
                other
            )
            .into()),
        }
    }
}

/// Answer for one machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MachineReport {
    /// 1-based position in the input
    pub machine: usize,
    pub presses: u64,
    /// Presses per action (counter mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<u64>>,
    /// Solver path taken (counter mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<SolveStrategy>,
}

/// Answers for a whole input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BatchReport {
    pub mode: Mode,
    pub total: u64,
    pub machines: Vec<MachineReport>,
}

impl BatchReport {
    /// Human-readable summary
    pub fn to_report(&self) -> String {
        let mut out = String::new();
        for report in &self.machines {
            out.push_str(&format!(
                "machine {:>4}: {} presses\n",
                report.machine, report.presses
            ));
        }
        out.push_str(&format!("total: {}\n", self.total));
        out
    }
}

/// Run `mode` over every machine
pub fn solve_batch<O: SearchObserver>(
    machines: &[Machine],
    mode: Mode,
    config: &SolverConfig,
    observer: O,
) -> Result<BatchReport> {
    match mode {
        Mode::Counters => solve_counters(machines, config, observer),
        Mode::Indicators => solve_indicators(machines),
    }
}

/// Fewest additive presses for every machine
pub fn solve_counters<O: SearchObserver>(
    machines: &[Machine],
    config: &SolverConfig,
    mut observer: O,
) -> Result<BatchReport> {
    let mut reports = Vec::with_capacity(machines.len());

    for (index, machine) in machines.iter().enumerate() {
        let number = index + 1;
        tracing::debug!(
            target: "minpress::batch",
            machine = number,
            counters = machine.counters(),
            actions = machine.actions.len(),
            "machine_started"
        );

        let solution =
            solve_machine_with_observer(&machine.targets, &machine.actions, config, &mut observer)
                .map_err(|source| Error::Machine {
                    machine: number,
                    source,
                })?;

        tracing::info!(
            target: "minpress::batch",
            machine = number,
            presses = solution.presses,
            strategy = ?solution.strategy,
            "machine_solved"
        );

        reports.push(MachineReport {
            machine: number,
            presses: solution.presses,
            counts: Some(solution.counts),
            strategy: Some(solution.strategy),
        });
    }

    finish(Mode::Counters, reports)
}

/// Fewest toggle presses for every machine
pub fn solve_indicators(machines: &[Machine]) -> Result<BatchReport> {
    let mut reports = Vec::with_capacity(machines.len());

    for (index, machine) in machines.iter().enumerate() {
        let number = index + 1;
        let machine_error = |source| Error::Machine {
            machine: number,
            source,
        };
        if machine.indicators.is_empty() {
            return Err(machine_error(SolveError::MissingIndicatorPattern));
        }
        let presses =
            min_toggle_presses(&machine.indicators, &machine.actions).map_err(machine_error)?;
        reports.push(MachineReport {
            machine: number,
            presses,
            counts: None,
            strategy: None,
        });
    }

    finish(Mode::Indicators, reports)
}

fn finish(mode: Mode, machines: Vec<MachineReport>) -> Result<BatchReport> {
    let mut total = 0u64;
    for report in &machines {
        total = total
            .checked_add(report.presses)
            .ok_or(Error::TotalOverflow {
                machine: report.machine,
            })?;
    }
    Ok(BatchReport {
        mode,
        total,
        machines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::parse_machines;
    use crate::solver::NoopObserver;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("counters".parse::<Mode>().unwrap(), Mode::Counters);
        assert_eq!("Lights".parse::<Mode>().unwrap(), Mode::Indicators);
        assert!("bogus".parse::<Mode>().is_err());
    }

    #[test]
    fn test_first_failure_aborts_batch() {
        let machines = parse_machines("(0) {2}\n() {1}\n(0) {3}\n").unwrap();
        let err =
            solve_counters(&machines, &SolverConfig::default(), NoopObserver).unwrap_err();
        match err {
            Error::Machine { machine, source } => {
                assert_eq!(machine, 2);
                assert_eq!(source, SolveError::InconsistentSystem { row: 0 });
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_indicators_require_a_pattern() {
        let machines = parse_machines("[#] (0) {1}\n(0) {1}\n").unwrap();
        let err = solve_indicators(&machines).unwrap_err();
        match &err {
            Error::Machine { machine, source } => {
                assert_eq!(*machine, 2);
                assert_eq!(*source, SolveError::MissingIndicatorPattern);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("indicator pattern"));
    }

    #[test]
    fn test_total_overflow_names_machine() {
        let machines = parse_machines(&format!("(0) {{{}}}\n(0) {{1}}\n", u64::MAX)).unwrap();
        let err = solve_counters(&machines, &SolverConfig::default(), NoopObserver).unwrap_err();
        assert!(matches!(err, Error::TotalOverflow { machine: 2 }));
    }

    #[test]
    fn test_report_text() {
        let machines = parse_machines("(0) {2}\n(0) (0) {3}\n").unwrap();
        let report = solve_counters(&machines, &SolverConfig::default(), NoopObserver).unwrap();
        assert_eq!(report.total, 5);
        let text = report.to_report();
        assert!(text.contains("machine    1: 2 presses"));
        assert!(text.ends_with("total: 5\n"));
    }
}
