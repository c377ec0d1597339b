use serde::{Deserialize, Serialize};

/// External representation of an [`Item`](crate::entities::Item).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtItem {
    /// Unique identifier of the item within its group
    #[serde(alias = "item")]
    pub name: String,
    pub weight: f64,
    pub price: f64,
    pub rating: f64,
    /// Value of the categorical field used to split the dataset (e.g. a city).
    /// Items without a group only belong to the ungrouped catalog.
    #[serde(alias = "city", skip_serializing_if = "Option::is_none", default)]
    pub group: Option<String>,
}

/// External representation of a full dataset, possibly spanning multiple groups.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ExtDataset {
    /// Name of the dataset
    #[serde(default)]
    pub name: String,
    pub items: Vec<ExtItem>,
}

/// External representation of a [`Solution`](crate::entities::Solution).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group: Option<String>,
    pub num_bins: usize,
    pub max_weight: f64,
    pub max_price: f64,
    /// Whether the search proved the solution optimal
    pub optimal: bool,
    /// Non-empty bins, in bin order
    pub bins: Vec<ExtBin>,
    /// Names of the items left out of every bin, in catalog order
    pub unassigned: Vec<String>,
    pub evaluation: ExtEvaluation,
}

/// External representation of a single (non-empty) bin.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtBin {
    /// 1-based bin number
    pub bin: usize,
    pub items: Vec<ExtPlacedItem>,
    pub total_weight: f64,
    pub total_price: f64,
    pub total_rating: f64,
}

/// An item placed in a bin.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedItem {
    pub item: String,
    pub weight: f64,
    pub price: f64,
    pub rating: f64,
}

/// External representation of an [`Evaluation`](crate::eval::Evaluation).
/// Utilization metrics that could not be computed (zero denominator) are `null`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtEvaluation {
    pub total_rating: f64,
    pub total_weight: f64,
    pub total_price: f64,
    pub items_used: usize,
    pub bins_used: usize,
    pub weight_utilization: Option<f64>,
    pub price_utilization: Option<f64>,
    pub item_utilization: Option<f64>,
    pub bin_utilization: Option<f64>,
}
