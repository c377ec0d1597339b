use crate::config::BnbConfig;
use crate::opt::result::TerminationReason;
use crate::opt::stats::SearchStats;
use mkp_rs::io::ext_repr::ExtSolution;
use serde::{Deserialize, Serialize};

/// Everything written to the solution JSON of one solve.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SolveOutput {
    /// Name of the dataset the catalog was taken from
    pub dataset: String,
    #[serde(flatten)]
    pub solution: ExtSolution,
    pub termination: TerminationReason,
    pub statistics: SearchStats,
    pub config: BnbConfig,
}
