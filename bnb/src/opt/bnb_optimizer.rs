use std::time::Instant;

use log::{debug, info, warn};
use mkp_rs::entities::{Assignment, MKProblem, Solution};
use rayon::ThreadPoolBuildError;
use rayon::prelude::*;
use thousands::Separable;

use crate::config::BnbConfig;
use crate::opt::bound::BoundEstimator;
use crate::opt::cutoff::Cutoff;
use crate::opt::incumbent::{Incumbent, LocalIncumbent, SharedIncumbent, SharedIncumbentAdapter};
use crate::opt::result::BnbOutcome;
use crate::opt::search::{SearchSession, enumerate_prefixes};
use crate::opt::stats::SearchStats;

/// Number of subtrees the parallel search aims for, per worker thread.
pub const SUBTREES_PER_THREAD: usize = 4;

/// Exact branch-and-bound optimizer for the multiple knapsack problem.
pub struct BnbOptimizer<'a> {
    pub problem: MKProblem<'a>,
    pub config: BnbConfig,
}

impl<'a> BnbOptimizer<'a> {
    pub fn new(problem: MKProblem<'a>, config: BnbConfig) -> Self {
        Self { problem, config }
    }

    pub fn solve(&self) -> BnbOutcome {
        let start = Instant::now();
        let capacity = self.problem.capacity();
        info!(
            "[BNB] solving {} items over {} bins (max weight: {}, max price: {})",
            self.problem.n_items(),
            self.problem.num_bins(),
            capacity.weight,
            capacity.price
        );

        let bound = BoundEstimator::new(self.problem.catalog());
        let cutoff = Cutoff::new(&self.config, start);

        let (best, mut stats) = match self.config.n_threads > 1 {
            false => self.solve_sequential(&bound, &cutoff),
            true => match self.solve_parallel(&bound, &cutoff) {
                Ok(res) => res,
                Err(e) => {
                    warn!("[BNB] could not build thread pool ({e}), falling back to sequential search");
                    self.solve_sequential(&bound, &cutoff)
                }
            },
        };
        stats.set_total_time(start.elapsed());

        let assignment = match best {
            Some(inc) => Assignment::from(inc.assignment),
            None => Assignment::unassigned(self.problem.n_items()),
        };

        let outcome = match cutoff.reason() {
            None => {
                let solution = Solution::new(&self.problem, assignment, true);
                BnbOutcome::optimal(solution, stats)
            }
            Some(reason) => {
                warn!("[BNB] search aborted ({reason}), returning the best assignment found so far");
                let solution = Solution::new(&self.problem, assignment, false);
                BnbOutcome::aborted(solution, reason, stats)
            }
        };

        info!(
            "[BNB] search finished in {:.3}ms ({} nodes, {}), total rating: {:.3}",
            outcome.statistics.time_total.as_secs_f64() * 1000.0,
            outcome.statistics.nodes_explored.separate_with_commas(),
            outcome.termination,
            outcome.solution.total_rating
        );
        debug!("[BNB] {}", outcome.statistics);

        outcome
    }

    fn solve_sequential(
        &self,
        bound: &BoundEstimator,
        cutoff: &Cutoff,
    ) -> (Option<Incumbent>, SearchStats) {
        let mut session =
            SearchSession::new(self.problem, bound, cutoff, LocalIncumbent::default(), &self.config);
        session.explore();
        let (store, stats) = session.finish();
        (store.into_best(), stats)
    }

    /// Splits the tree into about [`SUBTREES_PER_THREAD`] subtrees per thread (never deeper than
    /// `split_depth`) and explores them on a dedicated thread pool.
    /// All subtrees share one incumbent, so the result does not depend on scheduling.
    fn solve_parallel(
        &self,
        bound: &BoundEstimator,
        cutoff: &Cutoff,
    ) -> Result<(Option<Incumbent>, SearchStats), ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.n_threads)
            .thread_name(|i| format!("bnb-{i}"))
            .build()?;

        let mut stats = SearchStats::default();
        let prefixes = enumerate_prefixes(
            self.problem,
            self.config.split_depth,
            self.config.n_threads.saturating_mul(SUBTREES_PER_THREAD),
            cutoff,
            &mut stats,
        );
        debug!(
            "[BNB] split into {} subtrees at depth {}, exploring on {} threads",
            prefixes.len(),
            prefixes.first().map_or(0, Vec::len),
            self.config.n_threads
        );

        let shared = SharedIncumbent::default();
        let subtree_stats: Vec<SearchStats> = pool.install(|| {
            prefixes
                .par_iter()
                .map(|prefix| {
                    let store = SharedIncumbentAdapter::new(&shared);
                    let mut session =
                        SearchSession::new(self.problem, bound, cutoff, store, &self.config);
                    session.descend(prefix);
                    session.explore();
                    session.finish().1
                })
                .collect()
        });

        subtree_stats.iter().for_each(|s| stats.merge(s));
        Ok((shared.into_inner(), stats))
    }
}
