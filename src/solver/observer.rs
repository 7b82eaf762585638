//! Search progress hooks
//!
//! Observers see the search but cannot steer it. All hooks default to no-ops.

use super::search::Strategy;

/// Receives progress notifications from the feasibility search
pub trait SearchObserver {
    /// Called once, after the strategy is chosen and the window computed
    fn strategy_selected(&mut self, _strategy: &Strategy, _window: u64) {}

    /// Called for every point popped by the best-first search
    fn point_expanded(&mut self, _expansions: u64, _point: &[i64]) {}

    /// Called for every completion probe of the plateau search
    fn plateau_probe(&mut self, _probes: u64, _cost_value: i64) {}
}

/// Ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Emits a `tracing` progress event every `interval` steps
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    interval: u64,
}

impl TracingObserver {
    pub fn new(interval: u64) -> Self {
        TracingObserver {
            interval: interval.max(1),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        TracingObserver::new(200_000)
    }
}

impl SearchObserver for TracingObserver {
    fn strategy_selected(&mut self, strategy: &Strategy, window: u64) {
        tracing::debug!(target: "minpress::search", strategy = ?strategy, window, "strategy_selected");
    }

    fn point_expanded(&mut self, expansions: u64, point: &[i64]) {
        if expansions % self.interval == 0 {
            tracing::debug!(target: "minpress::search", expansions, point = ?point, "search_progress");
        }
    }

    fn plateau_probe(&mut self, probes: u64, cost_value: i64) {
        if probes % self.interval == 0 {
            tracing::debug!(target: "minpress::search", probes, cost_value, "plateau_progress");
        }
    }
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn strategy_selected(&mut self, strategy: &Strategy, window: u64) {
        (**self).strategy_selected(strategy, window);
    }

    fn point_expanded(&mut self, expansions: u64, point: &[i64]) {
        (**self).point_expanded(expansions, point);
    }

    fn plateau_probe(&mut self, probes: u64, cost_value: i64) {
        (**self).plateau_probe(probes, cost_value);
    }
}
