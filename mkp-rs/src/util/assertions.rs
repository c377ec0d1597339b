use crate::entities::{Item, MKProblem, Solution};
use crate::util::FPA;
use log::error;

//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks

pub fn catalog_item_ids_correct(items: &[Item]) -> bool {
    items.iter().enumerate().all(|(i, item)| item.id == i)
}

pub fn solution_matches_assignment(problem: &MKProblem, sol: &Solution) -> bool {
    let Solution {
        assignment,
        bin_loads,
        total_rating,
        capacity,
        optimal: _,
    } = sol;

    if *capacity != problem.capacity() || bin_loads.len() != problem.num_bins() {
        error!("solution does not match the dimensions of the problem");
        return false;
    }
    if !problem.is_feasible(assignment) {
        error!("solution violates a capacity constraint");
        return false;
    }
    if FPA(*total_rating) != FPA(problem.objective(assignment)) {
        error!(
            "total rating {} does not match the objective {}",
            total_rating,
            problem.objective(assignment)
        );
        return false;
    }

    let n_in_bins = bin_loads.iter().map(|l| l.n_items).sum::<usize>();
    n_in_bins == assignment.n_assigned()
}
