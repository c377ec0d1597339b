use crate::entities::{Assignment, BinLoad, Capacity, MKProblem};
use crate::util::assertions::solution_matches_assignment;

/// Outcome of a single solve: a complete [`Assignment`] with its derived aggregates.
/// Owned by the caller, it keeps no reference to the problem it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub assignment: Assignment,
    /// One load per bin (empty bins included), indexed by bin
    pub bin_loads: Vec<BinLoad>,
    pub total_rating: f64,
    pub capacity: Capacity,
    /// `false` if the search was cut off before optimality was proven
    pub optimal: bool,
}

impl Solution {
    pub fn new(problem: &MKProblem, assignment: Assignment, optimal: bool) -> Self {
        let bin_loads = problem.loads(&assignment);
        let total_rating = bin_loads.iter().map(|l| l.rating).sum();

        let solution = Solution {
            assignment,
            bin_loads,
            total_rating,
            capacity: problem.capacity(),
            optimal,
        };

        debug_assert!(solution_matches_assignment(problem, &solution));

        solution
    }

    pub fn num_bins(&self) -> usize {
        self.bin_loads.len()
    }

    pub fn bins_used(&self) -> usize {
        self.bin_loads.iter().filter(|l| !l.is_empty()).count()
    }

    pub fn items_used(&self) -> usize {
        self.assignment.n_assigned()
    }
}
