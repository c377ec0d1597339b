//! Incumbent management for the branch-and-bound search.
//!
//! The incumbent is the best complete assignment found so far. Assignments are ranked by
//! rating first and, among equal ratings, by lexicographic (branch) order, so that every
//! exploration order converges on the same answer: the first optimal assignment in
//! branch order.
//!
//! Implementations of [`IncumbentStore`]
//! - [`LocalIncumbent`]: owned by a single search, no synchronization.
//! - [`SharedIncumbentAdapter`]: wraps a [`SharedIncumbent`] shared by all threads of a
//!   parallel search and caches a snapshot of it to keep lock traffic low.

use mkp_rs::entities::Placement;
use mkp_rs::util::FPA;
use std::cmp::Ordering;
use std::sync::{Mutex, PoisonError};

/// Number of pruning queries served from the cached snapshot before it is refreshed.
const REFRESH_INTERVAL: u32 = 64;

/// A complete assignment together with its rating.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    pub rating: f64,
    pub assignment: Vec<Placement>,
}

impl Incumbent {
    /// Whether the assignment `(rating, assignment)` should replace this incumbent.
    pub fn is_improved_by(&self, rating: f64, assignment: &[Placement]) -> bool {
        match FPA(rating).partial_cmp(&FPA(self.rating)) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => assignment < self.assignment.as_slice(),
            _ => false,
        }
    }

    /// Whether no completion of `path` with a rating of at most `bound` can improve on this incumbent.
    ///
    /// Completions that come before the incumbent in branch order win ties, so they
    /// are only discarded when their bound is strictly worse.
    pub fn dominates(&self, bound: f64, path: &[Placement]) -> bool {
        let prefix = &self.assignment[..path.len().min(self.assignment.len())];
        match path > prefix {
            true => FPA(bound) <= FPA(self.rating),
            false => FPA(bound) < FPA(self.rating),
        }
    }
}

/// Interface through which the search reads and updates the best known assignment.
pub trait IncumbentStore {
    /// Whether the subtree below `path`, bounded by `bound`, can be discarded.
    fn prunes(&mut self, bound: f64, path: &[Placement]) -> bool;
    /// Offers a complete assignment. Returns `true` if it became the incumbent.
    fn offer(&mut self, rating: f64, assignment: &[Placement]) -> bool;
}

/// Incumbent of a single-threaded search.
#[derive(Debug, Clone, Default)]
pub struct LocalIncumbent {
    best: Option<Incumbent>,
}

impl LocalIncumbent {
    pub fn best(&self) -> Option<&Incumbent> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<Incumbent> {
        self.best
    }
}

impl IncumbentStore for LocalIncumbent {
    fn prunes(&mut self, bound: f64, path: &[Placement]) -> bool {
        self.best.as_ref().is_some_and(|b| b.dominates(bound, path))
    }

    fn offer(&mut self, rating: f64, assignment: &[Placement]) -> bool {
        install(&mut self.best, rating, assignment)
    }
}

/// Incumbent shared by all threads of a parallel search.
/// Reading and conditionally replacing it happens atomically under one lock.
#[derive(Debug, Default)]
pub struct SharedIncumbent {
    best: Mutex<Option<Incumbent>>,
}

impl SharedIncumbent {
    pub fn snapshot(&self) -> Option<Incumbent> {
        self.best
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn try_install(&self, rating: f64, assignment: &[Placement]) -> bool {
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        install(&mut best, rating, assignment)
    }

    pub fn into_inner(self) -> Option<Incumbent> {
        self.best
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Per-thread view on a [`SharedIncumbent`].
///
/// Pruning decisions are taken against a cached snapshot. A stale snapshot is never better
/// than the shared incumbent, so it can only prune less, never wrongly.
#[derive(Debug)]
pub struct SharedIncumbentAdapter<'a> {
    shared: &'a SharedIncumbent,
    cached: Option<Incumbent>,
    queries: u32,
}

impl<'a> SharedIncumbentAdapter<'a> {
    pub fn new(shared: &'a SharedIncumbent) -> Self {
        Self {
            shared,
            cached: shared.snapshot(),
            queries: 0,
        }
    }

    fn refresh(&mut self) {
        self.cached = self.shared.snapshot();
        self.queries = 0;
    }
}

impl IncumbentStore for SharedIncumbentAdapter<'_> {
    fn prunes(&mut self, bound: f64, path: &[Placement]) -> bool {
        self.queries += 1;
        if self.queries >= REFRESH_INTERVAL {
            self.refresh();
        }
        self.cached.as_ref().is_some_and(|b| b.dominates(bound, path))
    }

    fn offer(&mut self, rating: f64, assignment: &[Placement]) -> bool {
        let installed = self.shared.try_install(rating, assignment);
        self.refresh();
        installed
    }
}

fn install(best: &mut Option<Incumbent>, rating: f64, assignment: &[Placement]) -> bool {
    let improves = best
        .as_ref()
        .is_none_or(|b| b.is_improved_by(rating, assignment));
    if improves {
        *best = Some(Incumbent {
            rating,
            assignment: assignment.to_vec(),
        });
    }
    improves
}
