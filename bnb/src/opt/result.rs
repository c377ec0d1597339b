use crate::opt::stats::SearchStats;
use mkp_rs::entities::Solution;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// The whole tree was explored (or pruned): the solution is optimal.
    OptimalityProven,
    /// A cutoff triggered before the tree was exhausted.
    Aborted(String),
}

impl Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "optimality proven"),
            TerminationReason::Aborted(reason) => write!(f, "aborted: {reason}"),
        }
    }
}

/// Result of the optimizer after termination.
#[derive(Debug, Clone)]
pub struct BnbOutcome {
    pub solution: Solution,
    pub termination: TerminationReason,
    pub statistics: SearchStats,
}

impl BnbOutcome {
    pub fn optimal(solution: Solution, statistics: SearchStats) -> Self {
        debug_assert!(solution.optimal);
        Self {
            solution,
            termination: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// Outcome of a search that was cut off, `solution` is the best one found so far.
    pub fn aborted<R>(solution: Solution, reason: R, statistics: SearchStats) -> Self
    where
        R: Into<String>,
    {
        debug_assert!(!solution.optimal);
        Self {
            solution,
            termination: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self.termination, TerminationReason::OptimalityProven)
    }
}
