//! Exact branch-and-bound optimizer for the multiple knapsack problem defined in [`mkp_rs`].

use std::sync::LazyLock;
use std::time::Instant;

use mkp_rs::entities::{Catalog, MKProblem, Solution};
use mkp_rs::error::MKPError;

use crate::config::BnbConfig;

pub mod config;
pub mod io;
pub mod opt;

#[doc(inline)]
pub use opt::bnb_optimizer::BnbOptimizer;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Solves the problem to proven optimality with the default [`BnbConfig`].
///
/// Among all optimal assignments, the one that comes first in branch order
/// (bins in increasing index order, leaving an item out last) is returned.
pub fn solve(
    catalog: &Catalog,
    num_bins: usize,
    max_weight: f64,
    max_price: f64,
) -> Result<Solution, MKPError> {
    let problem = MKProblem::new(catalog, num_bins, max_weight, max_price)?;
    let outcome = BnbOptimizer::new(problem, BnbConfig::default()).solve();
    Ok(outcome.solution)
}
