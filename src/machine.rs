//! Machine description parser
//!
//! One machine per line:
//!
//! ```text
//! [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
//! ```
//!
//! - `[...]` indicator pattern, `#` = on (optional)
//! - `(...)` one action per group, listing the counters it increments
//! - `{...}` counter targets (required)

use crate::error::{Error, Result};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

static INDICATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("indicator pattern is valid"));
static ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("action pattern is valid"));
static TARGETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]*)\}").expect("target pattern is valid"));

/// One machine: its indicator pattern, actions and counter targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Machine {
    /// Desired indicator lights, empty when the line has no `[...]` block
    #[serde(default)]
    pub indicators: Vec<bool>,
    /// Counter indices touched by each action
    pub actions: Vec<Vec<usize>>,
    /// Target value per counter
    pub targets: Vec<u64>,
}

impl Machine {
    /// Parse a single line; `line_no` is only used in error messages
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let parse_err = |message: String| Error::Parse {
            line: line_no,
            message,
        };

        let indicators = match INDICATORS.captures(line) {
            Some(caps) => caps[1]
                .trim()
                .chars()
                .map(|c| match c {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    other => Err(parse_err(format!("Invalid indicator character '{}'", other))),
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let actions = ACTION
            .captures_iter(line)
            .map(|caps| parse_list::<usize>(&caps[1]).map_err(&parse_err))
            .collect::<Result<Vec<_>>>()?;

        let targets = TARGETS
            .captures(line)
            .ok_or_else(|| parse_err("Missing {...} target block".to_string()))
            .and_then(|caps| parse_list::<u64>(&caps[1]).map_err(&parse_err))?;

        if !indicators.is_empty() && indicators.len() != targets.len() {
            return Err(parse_err(format!(
                "Indicator pattern has {} lights but {} targets are given",
                indicators.len(),
                targets.len()
            )));
        }

        Ok(Machine {
            indicators,
            actions,
            targets,
        })
    }

    pub fn counters(&self) -> usize {
        self.targets.len()
    }
}

impl FromStr for Machine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Machine::parse_line(s, 1)
    }
}

/// Parse every non-blank line of `input`
pub fn parse_machines(input: &str) -> Result<Vec<Machine>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| Machine::parse_line(line, index + 1))
        .collect()
}

fn parse_list<T: FromStr>(inner: &str) -> std::result::Result<Vec<T>, String> {
    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<T>()
                .map_err(|_| format!("Invalid number '{}'", item))
        })
        .collect()
}
