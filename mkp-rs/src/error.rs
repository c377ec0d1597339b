use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors raised while building a problem, before any search is started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MKPError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl MKPError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        MKPError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while computing a single evaluation metric.
/// The other metrics and all totals remain valid when one of these occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EvalError {
    #[error("division by zero while computing {0}")]
    DivisionByZero(Metric),
}

/// The utilization metrics reported by [`Evaluation`](crate::eval::Evaluation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    WeightUtilization,
    PriceUtilization,
    ItemUtilization,
    BinUtilization,
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Metric::WeightUtilization => "weight utilization",
            Metric::PriceUtilization => "price utilization",
            Metric::ItemUtilization => "item utilization",
            Metric::BinUtilization => "bin utilization",
        };
        f.write_str(label)
    }
}
