use serde::{Deserialize, Serialize};

/// Configuration for the branch-and-bound optimizer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BnbConfig {
    /// Maximum number of nodes to explore. If undefined, the search runs until optimality is proven
    pub node_limit: Option<u64>,
    /// Wall-clock budget in seconds. If undefined, the search runs until optimality is proven
    pub time_limit_s: Option<f64>,
    /// Number of worker threads. Values above 1 enable the parallel search
    pub n_threads: usize,
    /// Maximum depth at which the tree is split into independent subtrees for the parallel search.
    /// The split stops earlier once every thread has a few subtrees to work on
    pub split_depth: usize,
    /// Interval (in explored nodes) between progress messages, 0 disables them
    pub progress_interval: u64,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            node_limit: None,
            time_limit_s: None,
            n_threads: 1,
            split_depth: 4,
            progress_interval: 1_000_000,
        }
    }
}
