use serde::{Deserialize, Serialize};
use std::time::Duration;
use thousands::Separable;

/// Statistics collected while exploring the decision tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total nodes visited.
    pub nodes_explored: u64,
    /// Total leaves reached or subtrees closed.
    pub backtracks: u64,
    /// Pruned because the upper bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Branches skipped because the item did not fit in the bin.
    pub prunings_infeasible: u64,
    /// Assignments that became the incumbent.
    pub solutions_found: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    pub time_total: Duration,
}

impl SearchStats {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth as u64);
    }

    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Folds the counters of another (sub)search into these.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.backtracks = self.backtracks.saturating_add(other.backtracks);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.prunings_infeasible = self
            .prunings_infeasible
            .saturating_add(other.prunings_infeasible);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored.separate_with_commas())?;
        writeln!(f, "  Backtracks:            {}", self.backtracks.separate_with_commas())?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound.separate_with_commas())?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible.separate_with_commas())?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        write!(f, "  Total time:            {:.2?}", self.time_total)
    }
}
