use crate::config::BnbConfig;
use crate::opt::bound::BoundEstimator;
use crate::opt::cutoff::Cutoff;
use crate::opt::decision::Decision;
use crate::opt::incumbent::IncumbentStore;
use crate::opt::stats::SearchStats;
use itertools::Itertools;
use log::{debug, trace};
use mkp_rs::entities::{BinLoad, MKProblem, Placement};
use thousands::Separable;

/// A decision as applied to the state, with everything needed to revert it exactly.
#[derive(Debug, Clone, Copy)]
struct TrailEntry {
    decision: Decision,
    prev_load: BinLoad,
    prev_rating: f64,
}

/// Partial assignment of the items `0..depth` and the bin loads it induces.
///
/// Decisions are applied and reverted in LIFO order. Reverting restores the previous
/// loads and rating from the trail instead of subtracting, so no rounding error builds up.
#[derive(Debug, Clone)]
pub struct SearchState<'a> {
    problem: MKProblem<'a>,
    loads: Vec<BinLoad>,
    path: Vec<Placement>,
    rating: f64,
    trail: Vec<TrailEntry>,
}

impl<'a> SearchState<'a> {
    pub fn new(problem: MKProblem<'a>) -> Self {
        Self {
            problem,
            loads: vec![BinLoad::default(); problem.num_bins()],
            path: Vec::with_capacity(problem.n_items()),
            rating: 0.0,
            trail: Vec::with_capacity(problem.n_items()),
        }
    }

    /// Number of decided items. The next item to decide has this id.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_complete(&self) -> bool {
        self.depth() == self.problem.n_items()
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn loads(&self) -> &[BinLoad] {
        &self.loads
    }

    pub fn path(&self) -> &[Placement] {
        &self.path
    }

    pub fn decisions(&self) -> Vec<Decision> {
        self.trail.iter().map(|t| t.decision).collect()
    }

    pub fn apply(&mut self, decision: Decision) {
        debug_assert_eq!(decision.item(), self.depth());
        let entry = TrailEntry {
            decision,
            prev_load: match decision {
                Decision::Assigned { bin, .. } => self.loads[bin],
                Decision::Unassigned { .. } => BinLoad::default(),
            },
            prev_rating: self.rating,
        };
        if let Decision::Assigned { item, bin } = decision {
            let item = self.problem.catalog().item(item);
            self.loads[bin].add(item);
            self.rating += item.rating;
        }
        self.path.push(decision.placement());
        self.trail.push(entry);
    }

    /// Reverts the most recent decision.
    pub fn undo(&mut self) {
        if let Some(entry) = self.trail.pop() {
            if let Decision::Assigned { bin, .. } = entry.decision {
                self.loads[bin] = entry.prev_load;
            }
            self.rating = entry.prev_rating;
            self.path.pop();
        }
    }

    /// Next branch for the undecided item at the current depth, starting from position `cursor`.
    ///
    /// Branch positions `0..m` are the bins in increasing order, position `m` leaves the item
    /// unassigned. Returns the decision and the cursor of the branch after it.
    /// Bins are skipped when the item does not fit, when an earlier bin has exactly the same
    /// usage (the mirrored subtree is explored from that bin), or when the item's rating is
    /// negative (placing it can only lower the objective).
    pub fn next_branch(&self, cursor: usize, stats: &mut SearchStats) -> Option<(Decision, usize)> {
        let item_id = self.depth();
        let item = self.problem.catalog().item(item_id);
        let m = self.problem.num_bins();

        if item.rating >= 0.0 {
            for bin in cursor..m {
                let load = &self.loads[bin];
                if self.loads[..bin].iter().any(|l| l.same_usage(load)) {
                    continue;
                }
                if !self.problem.fits(load, item) {
                    stats.on_pruning_infeasible();
                    continue;
                }
                return Some((Decision::Assigned { item: item_id, bin }, bin + 1));
            }
        }
        match cursor <= m {
            true => Some((Decision::Unassigned { item: item_id }, m + 1)),
            false => None,
        }
    }
}

/// Splits the decision tree into subtrees, listed by the decisions leading to their roots.
///
/// The frontier is deepened one level at a time, in branch order, until it holds at least
/// `target` nodes or reaches `max_depth`. Concatenating the subtrees below the returned
/// prefixes reproduces the full tree. If the cutoff triggers, the current frontier is returned.
pub fn enumerate_prefixes(
    problem: MKProblem,
    max_depth: usize,
    target: usize,
    cutoff: &Cutoff,
    stats: &mut SearchStats,
) -> Vec<Vec<Decision>> {
    let max_depth = max_depth.min(problem.n_items());
    let mut frontier: Vec<Vec<Decision>> = vec![vec![]];

    for _ in 0..max_depth {
        if frontier.len() >= target {
            break;
        }
        let mut deeper = Vec::with_capacity(frontier.len() * (problem.num_bins() + 1));
        for prefix in &frontier {
            stats.on_node_explored();
            if cutoff.tick() {
                return frontier;
            }
            let mut state = SearchState::new(problem);
            prefix.iter().for_each(|d| state.apply(*d));

            let mut cursor = 0;
            while let Some((decision, next)) = state.next_branch(cursor, stats) {
                cursor = next;
                state.apply(decision);
                deeper.push(state.decisions());
                state.undo();
            }
        }
        frontier = deeper;
    }
    frontier
}

enum Visit {
    /// Branch on the next item
    Expand,
    /// Leaf reached or subtree pruned
    Closed,
    /// A cutoff triggered
    Stop,
}

/// Depth-first exploration of one subtree of the decision tree.
pub struct SearchSession<'a, S: IncumbentStore> {
    state: SearchState<'a>,
    bound: &'a BoundEstimator,
    cutoff: &'a Cutoff,
    store: S,
    stats: SearchStats,
    progress_interval: u64,
}

impl<'a, S: IncumbentStore> SearchSession<'a, S> {
    pub fn new(
        problem: MKProblem<'a>,
        bound: &'a BoundEstimator,
        cutoff: &'a Cutoff,
        store: S,
        config: &BnbConfig,
    ) -> Self {
        Self {
            state: SearchState::new(problem),
            bound,
            cutoff,
            store,
            stats: SearchStats::default(),
            progress_interval: config.progress_interval,
        }
    }

    /// Moves the root of the session down to the node reached by `prefix`.
    pub fn descend(&mut self, prefix: &[Decision]) {
        trace!("[BNB] descending into subtree [{}]", prefix.iter().join(", "));
        for decision in prefix {
            self.state.apply(*decision);
        }
    }

    /// Explores the subtree below the current node, until it is exhausted or a cutoff triggers.
    pub fn explore(&mut self) {
        let root = self.state.depth();
        // branch cursor of every open node, the node at position i decides item `root + i`
        let mut cursors: Vec<usize> = vec![];

        match self.visit() {
            Visit::Expand => cursors.push(0),
            Visit::Closed | Visit::Stop => return,
        }

        while let Some(&cursor) = cursors.last() {
            match self.state.next_branch(cursor, &mut self.stats) {
                Some((decision, next)) => {
                    let top = cursors.len() - 1;
                    cursors[top] = next;
                    self.state.apply(decision);
                    match self.visit() {
                        Visit::Expand => cursors.push(0),
                        Visit::Closed => {
                            self.state.undo();
                            self.stats.on_backtrack();
                        }
                        Visit::Stop => return,
                    }
                }
                None => {
                    cursors.pop();
                    if !cursors.is_empty() {
                        self.state.undo();
                    }
                    self.stats.on_backtrack();
                }
            }
        }
        debug_assert_eq!(self.state.depth(), root);
    }

    fn visit(&mut self) -> Visit {
        self.stats.on_node_explored();
        self.stats.on_depth_update(self.state.depth());

        if self.cutoff.tick() {
            return Visit::Stop;
        }
        if self.progress_interval > 0 && self.stats.nodes_explored % self.progress_interval == 0 {
            debug!(
                "[BNB] {} nodes explored, {} pruned by bound, current depth {}",
                self.stats.nodes_explored.separate_with_commas(),
                self.stats.prunings_bound.separate_with_commas(),
                self.state.depth()
            );
        }

        if self.state.is_complete() {
            if self.store.offer(self.state.rating(), self.state.path()) {
                self.stats.on_solution_found();
                trace!("[BNB] new incumbent with rating {:.3}", self.state.rating());
            }
            return Visit::Closed;
        }

        let problem = &self.state.problem;
        let bound = self.state.rating()
            + self.bound.estimate(
                problem.catalog(),
                problem.capacity(),
                self.state.loads(),
                self.state.depth(),
            );
        if self.store.prunes(bound, self.state.path()) {
            self.stats.on_pruning_bound();
            return Visit::Closed;
        }
        Visit::Expand
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn finish(self) -> (S, SearchStats) {
        (self.store, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opt::incumbent::LocalIncumbent;
    use mkp_rs::entities::Catalog;
    use std::time::Instant;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(None);
        catalog
            .add_item("a", 4.0, 1.0, 3.0)
            .unwrap()
            .add_item("b", 4.0, 1.0, 3.0)
            .unwrap()
            .add_item("c", 6.0, 1.0, -2.0)
            .unwrap();
        catalog
    }

    #[test]
    fn undo_restores_exact_state() {
        let catalog = catalog();
        let problem = MKProblem::new(&catalog, 2, 10.0, 10.0).unwrap();
        let mut state = SearchState::new(problem);

        state.apply(Decision::Assigned { item: 0, bin: 1 });
        let snapshot = (state.loads().to_vec(), state.rating());
        state.apply(Decision::Assigned { item: 1, bin: 1 });
        state.apply(Decision::Unassigned { item: 2 });
        assert_eq!(state.path(), &[Placement::Bin(1), Placement::Bin(1), Placement::Unassigned]);

        state.undo();
        state.undo();
        assert_eq!((state.loads().to_vec(), state.rating()), snapshot);
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn empty_bins_are_interchangeable() {
        let catalog = catalog();
        let problem = MKProblem::new(&catalog, 3, 10.0, 10.0).unwrap();
        let state = SearchState::new(problem);
        let mut stats = SearchStats::default();

        let first = state.next_branch(0, &mut stats);
        assert_eq!(first, Some((Decision::Assigned { item: 0, bin: 0 }, 1)));
        // bins 1 and 2 mirror bin 0
        let second = state.next_branch(1, &mut stats);
        assert_eq!(second, Some((Decision::Unassigned { item: 0 }, 4)));
        assert_eq!(state.next_branch(4, &mut stats), None);
    }

    #[test]
    fn negative_items_are_only_left_out() {
        let catalog = catalog();
        let problem = MKProblem::new(&catalog, 2, 10.0, 10.0).unwrap();
        let mut state = SearchState::new(problem);
        state.apply(Decision::Assigned { item: 0, bin: 0 });
        state.apply(Decision::Unassigned { item: 1 });

        let mut stats = SearchStats::default();
        let branch = state.next_branch(0, &mut stats);
        assert_eq!(branch, Some((Decision::Unassigned { item: 2 }, 3)));
    }

    #[test]
    fn prefixes_cover_the_tree_in_branch_order() {
        let catalog = catalog();
        let problem = MKProblem::new(&catalog, 2, 5.0, 10.0).unwrap();
        let cutoff = Cutoff::new(&BnbConfig::default(), Instant::now());
        let prefixes = enumerate_prefixes(problem, 2, usize::MAX, &cutoff, &mut SearchStats::default());

        let placements: Vec<Vec<Placement>> = prefixes
            .iter()
            .map(|p| p.iter().map(|d| d.placement()).collect())
            .collect();
        assert_eq!(
            placements,
            vec![
                vec![Placement::Bin(0), Placement::Bin(1)],
                vec![Placement::Bin(0), Placement::Unassigned],
                vec![Placement::Unassigned, Placement::Bin(0)],
                vec![Placement::Unassigned, Placement::Unassigned],
            ]
        );
    }

    fn unit_catalog(n_items: usize) -> Catalog {
        let mut catalog = Catalog::new(None);
        for i in 0..n_items {
            catalog.add_item(format!("unit_{i}"), 1.0, 1.0, 1.0).unwrap();
        }
        catalog
    }

    #[test]
    fn split_stops_once_enough_subtrees_exist() {
        let catalog = unit_catalog(14);
        let problem = MKProblem::new(&catalog, 3, 100.0, 100.0).unwrap();
        let cutoff = Cutoff::new(&BnbConfig::default(), Instant::now());
        let target = 16;

        let prefixes = enumerate_prefixes(problem, 14, target, &cutoff, &mut SearchStats::default());
        assert!(prefixes.len() >= target);
        assert!(prefixes.len() <= target * (problem.num_bins() + 1));
        assert!(prefixes.len() < 100);

        // all prefixes share the same depth and come in branch order
        let depth = prefixes[0].len();
        assert!(prefixes.iter().all(|p| p.len() == depth));
        let placements = prefixes
            .iter()
            .map(|p| p.iter().map(|d| d.placement()).collect_vec())
            .collect_vec();
        assert!(placements.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn split_honours_the_node_limit() {
        let catalog = unit_catalog(14);
        let problem = MKProblem::new(&catalog, 3, 100.0, 100.0).unwrap();
        let config = BnbConfig {
            node_limit: Some(0),
            ..BnbConfig::default()
        };
        let cutoff = Cutoff::new(&config, Instant::now());

        let prefixes = enumerate_prefixes(problem, 14, usize::MAX, &cutoff, &mut SearchStats::default());
        assert_eq!(prefixes, vec![Vec::<Decision>::new()]);
        assert!(cutoff.reason().is_some());
    }

    #[test]
    fn session_finds_the_first_optimum() {
        let catalog = catalog();
        let problem = MKProblem::new(&catalog, 2, 5.0, 10.0).unwrap();
        let bound = BoundEstimator::new(&catalog);
        let cutoff = Cutoff::new(&BnbConfig::default(), Instant::now());

        let mut session = SearchSession::new(
            problem,
            &bound,
            &cutoff,
            LocalIncumbent::default(),
            &BnbConfig::default(),
        );
        session.explore();
        assert!(session.stats().nodes_explored > 0);

        let (store, _) = session.finish();
        let best = store.into_best().unwrap();
        assert_eq!(best.rating, 6.0);
        assert_eq!(
            best.assignment,
            vec![Placement::Bin(0), Placement::Bin(1), Placement::Unassigned]
        );
    }
}
