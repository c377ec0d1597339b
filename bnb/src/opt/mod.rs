/// The optimizer: sequential and parallel drivers around the search
pub mod bnb_optimizer;

/// Admissible upper bound on the rating still achievable by the undecided items
pub mod bound;

/// Node and time cutoffs shared by all search threads
pub mod cutoff;

pub mod decision;

/// Best known assignment, local or shared between threads
pub mod incumbent;

pub mod result;

/// Depth-first exploration of the decision tree
pub mod search;

pub mod stats;
