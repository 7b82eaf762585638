//! Feasibility search over the free parameters
//!
//! Finds the integer parameter point with the smallest objective whose press
//! vector is a non-negative integer solution of `A·x = b`. The parameter
//! space is cut to the window `[-L, L]` per parameter and further narrowed
//! by every constraint `x_j ≥ 0` that involves a single parameter.
//!
//! Two strategies, chosen once from the objective's coefficients:
//!
//! - **Plateau**: exactly one parameter moves the objective (and there are
//!   at least two). Walk that parameter in improving order; the first value
//!   that admits any feasible completion of the cost-free parameters wins.
//! - **Best-first**: a min-heap of points keyed by `(objective, Σ|t_i|)`,
//!   seeded at the window corner that minimizes the objective. Moving away
//!   from that corner never lowers the objective, so the first feasible
//!   point popped is the optimum within the window.

use super::affine::{AffineExpr, Parameterization};
use super::error::SolveError;
use super::evaluate::{total_presses, SolutionEvaluator};
use super::observer::SearchObserver;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

/// Keeps `center ± distance` arithmetic far from `i64` overflow
const MAX_WINDOW: i64 = i64::MAX / 4;

/// Search strategy, fixed once per machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Only `cost_parameter` affects the objective; `slack` parameters only affect feasibility
    Plateau {
        cost_parameter: usize,
        slack: Vec<usize>,
    },
    /// Zero or several parameters affect the objective
    BestFirst,
}

impl Strategy {
    /// Choose from the objective's parameter coefficients
    pub fn select(objective: &AffineExpr) -> Self {
        let parameters = objective.parameters();
        match objective.dependencies().as_slice() {
            [cost] if parameters >= 2 => Strategy::Plateau {
                cost_parameter: *cost,
                slack: (0..parameters).filter(|i| i != cost).collect(),
            },
            _ => Strategy::BestFirst,
        }
    }
}

/// A feasible optimum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub point: Vec<i64>,
    pub counts: Vec<u64>,
    pub presses: u64,
}

/// Inclusive integer bounds for every parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterWindow {
    bounds: Vec<(i64, i64)>,
    limit: i64,
}

impl ParameterWindow {
    /// `[-window, window]` per parameter, narrowed by single-parameter constraints
    ///
    /// Returns `None` when some parameter has no admissible value at all.
    pub fn new(params: &Parameterization, window: u64) -> Option<Self> {
        let limit = i64::try_from(window).map_or(MAX_WINDOW, |w| w.min(MAX_WINDOW));
        let mut bounds = vec![(-limit, limit); params.parameters()];

        for expr in params.variables() {
            match expr.dependencies().as_slice() {
                [] if expr.constant().is_negative() || !expr.constant().is_integer() => {
                    return None
                }
                [index] => {
                    let (lo, hi) = &mut bounds[*index];
                    narrow(lo, hi, expr.constant(), expr.coefficient(*index), limit);
                }
                _ => {}
            }
        }

        bounds
            .iter()
            .all(|(lo, hi)| lo <= hi)
            .then_some(ParameterWindow { bounds, limit })
    }

    pub fn bounds(&self, parameter: usize) -> (i64, i64) {
        self.bounds[parameter]
    }

    pub fn contains(&self, parameter: usize, value: i64) -> bool {
        let (lo, hi) = self.bounds[parameter];
        (lo..=hi).contains(&value)
    }
}

/// Tighten `[lo, hi]` with `constant + coefficient·v ≥ 0`
fn narrow(
    lo: &mut i64,
    hi: &mut i64,
    constant: &BigRational,
    coefficient: &BigRational,
    limit: i64,
) {
    if coefficient.is_zero() {
        if constant.is_negative() {
            *lo = limit + 1;
            *hi = -limit - 1;
        }
        return;
    }

    let bound = -constant / coefficient;
    if coefficient.is_positive() {
        *lo = (*lo).max(clamp_to_window(&bound.ceil().to_integer(), limit));
    } else {
        *hi = (*hi).min(clamp_to_window(&bound.floor().to_integer(), limit));
    }
}

fn clamp_to_window(value: &BigInt, limit: i64) -> i64 {
    match value.to_i64() {
        Some(v) => v.clamp(-limit - 1, limit + 1),
        None if value.is_negative() => -limit - 1,
        None => limit + 1,
    }
}

/// `[lo, hi]` ordered by distance from `center` (clamped into the range), `+d` before `-d`
///
/// Requires `lo <= hi`.
pub fn outward(center: i64, lo: i64, hi: i64) -> impl Iterator<Item = i64> {
    let center = center.clamp(lo, hi);
    let reach = (hi - center).max(center - lo);
    std::iter::once(center)
        .chain((1..=reach).flat_map(move |d| [center + d, center - d]))
        .filter(move |v| (lo..=hi).contains(v))
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    objective: BigRational,
    size: u64,
    point: Vec<i64>,
}

struct FeasibilitySearch<'a, O> {
    evaluator: SolutionEvaluator<'a>,
    window: ParameterWindow,
    reported_window: u64,
    budget: Option<u64>,
    steps: u64,
    observer: O,
}

/// Find the optimal parameter point for an already parameterized system
pub fn find_optimum<O: SearchObserver>(
    evaluator: SolutionEvaluator<'_>,
    window: u64,
    budget: Option<u64>,
    mut observer: O,
) -> Result<(Strategy, SearchOutcome), SolveError> {
    let strategy = Strategy::select(evaluator.params().objective());
    observer.strategy_selected(&strategy, window);

    let bounds = ParameterWindow::new(evaluator.params(), window)
        .ok_or(SolveError::SearchWindowExhausted { window })?;

    let mut search = FeasibilitySearch {
        evaluator,
        window: bounds,
        reported_window: window,
        budget,
        steps: 0,
        observer,
    };

    let outcome = match &strategy {
        Strategy::Plateau {
            cost_parameter,
            slack,
        } => search.plateau(*cost_parameter, slack)?,
        Strategy::BestFirst => search.best_first()?,
    };

    tracing::debug!(
        target: "minpress::search",
        presses = outcome.presses,
        steps = search.steps,
        point = ?outcome.point,
        "optimum_found"
    );

    Ok((strategy, outcome))
}

impl<O: SearchObserver> FeasibilitySearch<'_, O> {
    fn exhausted(&self) -> SolveError {
        SolveError::SearchWindowExhausted {
            window: self.reported_window,
        }
    }

    fn tick(&mut self) -> Result<(), SolveError> {
        self.steps += 1;
        match self.budget {
            Some(budget) if self.steps > budget => {
                Err(SolveError::SearchBudgetExceeded { expansions: budget })
            }
            _ => Ok(()),
        }
    }

    fn outcome(&self, point: &[i64]) -> Result<Option<SearchOutcome>, SolveError> {
        let Some(counts) = self.evaluator.materialize(point) else {
            return Ok(None);
        };
        Ok(Some(SearchOutcome {
            point: point.to_vec(),
            presses: total_presses(&counts)?,
            counts,
        }))
    }

    fn plateau(&mut self, cost: usize, slack: &[usize]) -> Result<SearchOutcome, SolveError> {
        let (lo, hi) = self.window.bounds(cost);
        let ascending = self
            .evaluator
            .params()
            .objective()
            .coefficient(cost)
            .is_positive();

        let mut point = vec![0; self.window.bounds.len()];
        for step in 0..=(hi - lo) {
            let value = if ascending { lo + step } else { hi - step };
            point[cost] = value;
            if let Some(outcome) = self.complete(&mut point, slack, value)? {
                return Ok(outcome);
            }
        }

        Err(self.exhausted())
    }

    /// Any feasible assignment of the `slack` parameters, others held fixed
    fn complete(
        &mut self,
        point: &mut [i64],
        slack: &[usize],
        cost_value: i64,
    ) -> Result<Option<SearchOutcome>, SolveError> {
        match slack {
            [] => self.probe(point, cost_value),
            [only] => {
                let (lo, hi) = self.window.bounds(*only);
                for value in outward(0, lo, hi) {
                    point[*only] = value;
                    if let Some(outcome) = self.probe(point, cost_value)? {
                        return Ok(Some(outcome));
                    }
                }
                Ok(None)
            }
            [first, last] => {
                let (lo, hi) = self.window.bounds(*first);
                for value in outward(0, lo, hi) {
                    point[*first] = value;
                    let Some((last_lo, last_hi)) = self.slack_interval(point, *last) else {
                        continue;
                    };
                    for last_value in outward(0, last_lo, last_hi) {
                        point[*last] = last_value;
                        if let Some(outcome) = self.probe(point, cost_value)? {
                            return Ok(Some(outcome));
                        }
                    }
                }
                Ok(None)
            }
            [first, rest @ ..] => {
                let (lo, hi) = self.window.bounds(*first);
                for value in outward(0, lo, hi) {
                    point[*first] = value;
                    if let Some(outcome) = self.complete(point, rest, cost_value)? {
                        return Ok(Some(outcome));
                    }
                }
                Ok(None)
            }
        }
    }

    /// Admissible values of `parameter` given every other coordinate of `point`
    fn slack_interval(&self, point: &[i64], parameter: usize) -> Option<(i64, i64)> {
        let (mut lo, mut hi) = self.window.bounds(parameter);
        for expr in self.evaluator.params().variables() {
            let rest = expr.evaluate_without(point, parameter);
            narrow(
                &mut lo,
                &mut hi,
                &rest,
                expr.coefficient(parameter),
                self.window.limit,
            );
            if lo > hi {
                return None;
            }
        }
        Some((lo, hi))
    }

    fn probe(
        &mut self,
        point: &[i64],
        cost_value: i64,
    ) -> Result<Option<SearchOutcome>, SolveError> {
        self.tick()?;
        self.observer.plateau_probe(self.steps, cost_value);
        self.outcome(point)
    }

    fn candidate(&self, point: Vec<i64>) -> Reverse<Candidate> {
        Reverse(Candidate {
            objective: self.evaluator.objective_at(&point),
            size: point
                .iter()
                .fold(0u64, |size, v| size.saturating_add(v.unsigned_abs())),
            point,
        })
    }

    /// The window point with the smallest objective, nearest the origin among ties
    fn cheapest_corner(&self) -> Vec<i64> {
        let objective = self.evaluator.params().objective();
        (0..self.window.bounds.len())
            .map(|i| {
                let (lo, hi) = self.window.bounds(i);
                let coefficient = objective.coefficient(i);
                if coefficient.is_positive() {
                    lo
                } else if coefficient.is_negative() {
                    hi
                } else {
                    0i64.clamp(lo, hi)
                }
            })
            .collect()
    }

    fn best_first(&mut self) -> Result<SearchOutcome, SolveError> {
        let start = self.cheapest_corner();
        let mut seen: HashSet<Vec<i64>> = HashSet::new();
        let mut queue = BinaryHeap::new();
        seen.insert(start.clone());
        queue.push(self.candidate(start));

        while let Some(Reverse(Candidate { point, .. })) = queue.pop() {
            self.tick()?;
            self.observer.point_expanded(self.steps, &point);

            if let Some(outcome) = self.outcome(&point)? {
                return Ok(outcome);
            }

            for parameter in 0..point.len() {
                for delta in [-1, 1] {
                    let value = point[parameter] + delta;
                    if !self.window.contains(parameter, value) {
                        continue;
                    }
                    let mut next = point.clone();
                    next[parameter] = value;
                    if seen.insert(next.clone()) {
                        queue.push(self.candidate(next));
                    }
                }
            }
        }

        Err(self.exhausted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowPolicy;
    use crate::solver::affine::parameterize;
    use crate::solver::elimination::reduce;
    use crate::solver::observer::NoopObserver;
    use crate::solver::system::LinearSystem;

    fn run(
        targets: &[u64],
        actions: &[Vec<usize>],
        budget: Option<u64>,
    ) -> Result<(Strategy, SearchOutcome), SolveError> {
        let system = LinearSystem::build(targets, actions).unwrap();
        let params = parameterize(&reduce(&system).unwrap()).unwrap();
        let evaluator = SolutionEvaluator::new(&system, &params);
        let window = WindowPolicy::TargetSum.bound(targets);
        find_optimum(evaluator, window, budget, NoopObserver)
    }

    #[test]
    fn test_outward_order() {
        assert_eq!(outward(0, -2, 2).collect::<Vec<_>>(), vec![0, 1, -1, 2, -2]);
        assert_eq!(outward(0, 3, 5).collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(outward(0, -5, -3).collect::<Vec<_>>(), vec![-3, -4, -5]);
        assert_eq!(outward(0, -1, 3).collect::<Vec<_>>(), vec![0, 1, -1, 2, 3]);
        assert_eq!(outward(0, 4, 4).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_window_narrowed_by_single_parameter_constraints() {
        // x = (5 - t, 5 - t, t)
        let system = LinearSystem::build(&[5, 5], &[vec![0], vec![1], vec![0, 1]]).unwrap();
        let params = parameterize(&reduce(&system).unwrap()).unwrap();
        let window = ParameterWindow::new(&params, 10).unwrap();
        assert_eq!(window.bounds(0), (0, 5));
        assert!(window.contains(0, 5));
        assert!(!window.contains(0, 6));
    }

    #[test]
    fn test_best_first_prefers_cheapest_point() {
        // The origin (5, 5, 0) is feasible but costs 10
        let (strategy, outcome) = run(&[5, 5], &[vec![0], vec![1], vec![0, 1]], None).unwrap();
        assert_eq!(strategy, Strategy::BestFirst);
        assert_eq!(outcome.presses, 5);
        assert_eq!(outcome.counts, vec![0, 0, 5]);
    }

    #[test]
    fn test_plateau_with_one_slack_parameter() {
        let actions = vec![vec![0], vec![1], vec![0], vec![0, 1]];
        let (strategy, outcome) = run(&[3, 5], &actions, None).unwrap();
        assert_eq!(
            strategy,
            Strategy::Plateau {
                cost_parameter: 1,
                slack: vec![0]
            }
        );
        assert_eq!(outcome.presses, 5);
        assert_eq!(outcome.counts[3], 3);
    }

    #[test]
    fn test_plateau_with_two_slack_parameters() {
        let actions = vec![vec![0], vec![1], vec![0], vec![0, 1], vec![1]];
        let (strategy, outcome) = run(&[3, 5], &actions, None).unwrap();
        assert_eq!(
            strategy,
            Strategy::Plateau {
                cost_parameter: 1,
                slack: vec![0, 2]
            }
        );
        assert_eq!(outcome.presses, 5);
    }

    #[test]
    fn test_plateau_recurses_over_three_slack_parameters() {
        // x0 = 5 - t0 - t1 - t2, objective = 5 + t3
        let actions = vec![vec![0], vec![0], vec![0], vec![0], vec![]];
        let (strategy, outcome) = run(&[5], &actions, None).unwrap();
        assert_eq!(
            strategy,
            Strategy::Plateau {
                cost_parameter: 3,
                slack: vec![0, 1, 2]
            }
        );
        assert_eq!(outcome.presses, 5);
        assert_eq!(outcome.counts, vec![5, 0, 0, 0, 0]);
        assert_eq!(outcome.point, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_budget_is_enforced() {
        let targets = [3, 5, 4, 7];
        let actions = vec![
            vec![3],
            vec![1, 3],
            vec![2],
            vec![2, 3],
            vec![0, 2],
            vec![0, 1],
        ];
        assert_eq!(
            run(&targets, &actions, Some(10)).unwrap_err(),
            SolveError::SearchBudgetExceeded { expansions: 10 }
        );
        assert_eq!(run(&targets, &actions, None).unwrap().1.presses, 10);
    }

    #[test]
    fn test_strategy_selection() {
        let mut objective = AffineExpr::zero(3);
        objective.add_scaled(
            &AffineExpr::parameter(2, 3),
            &BigRational::from_integer(BigInt::from(-1)),
        );
        assert_eq!(
            Strategy::select(&objective),
            Strategy::Plateau {
                cost_parameter: 2,
                slack: vec![0, 1]
            }
        );

        // A single parameter is never a plateau
        let mut single = AffineExpr::zero(1);
        single.add_scaled(
            &AffineExpr::parameter(0, 1),
            &BigRational::from_integer(BigInt::from(1)),
        );
        assert_eq!(Strategy::select(&single), Strategy::BestFirst);
        assert_eq!(Strategy::select(&AffineExpr::zero(2)), Strategy::BestFirst);
    }
}
