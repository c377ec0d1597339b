use crate::entities::{Catalog, Solution};
use crate::eval::Evaluation;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An item as it appears in a bin of the report.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReportItem {
    pub item: String,
    pub weight: f64,
    pub price: f64,
    pub rating: f64,
}

/// Contents and totals of one non-empty bin.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BinReport {
    /// 1-based bin number
    pub bin: usize,
    pub items: Vec<ReportItem>,
    pub total_weight: f64,
    pub total_price: f64,
    pub total_rating: f64,
}

/// One line of the flattened export view.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportRow {
    pub bin: usize,
    pub item: String,
    pub weight: f64,
    pub price: f64,
    pub rating: f64,
}

/// Structured view of a [`Solution`]: the non-empty bins in bin order and the global evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub bins: Vec<BinReport>,
    pub evaluation: Evaluation,
}

impl Report {
    pub fn new(catalog: &Catalog, solution: &Solution) -> Self {
        let bins = (0..solution.num_bins())
            .filter_map(|k| {
                let items = solution
                    .assignment
                    .items_in_bin(k)
                    .map(|id| catalog.item(id))
                    .map(|item| ReportItem {
                        item: item.name.clone(),
                        weight: item.weight,
                        price: item.price,
                        rating: item.rating,
                    })
                    .collect_vec();

                match items.is_empty() {
                    true => None,
                    false => Some(BinReport {
                        bin: k + 1,
                        total_weight: items.iter().map(|i| i.weight).sum(),
                        total_price: items.iter().map(|i| i.price).sum(),
                        total_rating: items.iter().map(|i| i.rating).sum(),
                        items,
                    }),
                }
            })
            .collect_vec();

        let evaluation = Evaluation::new(
            &bins,
            solution.num_bins(),
            solution.capacity,
            catalog.len(),
        );

        Report { bins, evaluation }
    }

    /// Flattens the report into one `(bin, item, weight, price, rating)` row per placed item.
    pub fn rows(&self) -> Vec<ExportRow> {
        self.bins
            .iter()
            .flat_map(|b| {
                b.items.iter().map(|i| ExportRow {
                    bin: b.bin,
                    item: i.item.clone(),
                    weight: i.weight,
                    price: i.price,
                    rating: i.rating,
                })
            })
            .collect()
    }
}
