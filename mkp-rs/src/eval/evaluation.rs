use crate::entities::Capacity;
use crate::error::{EvalError, Metric};
use crate::eval::BinReport;

/// Aggregate metrics of a solution.
///
/// Each utilization metric is computed independently: a zero denominator only
/// invalidates that metric, the totals and the other metrics stay available.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub total_rating: f64,
    pub total_weight: f64,
    pub total_price: f64,
    pub items_used: usize,
    pub bins_used: usize,
    /// `total_weight / (num_bins * max_weight) * 100`
    pub weight_utilization: Result<f64, EvalError>,
    /// `total_price / (num_bins * max_price) * 100`
    pub price_utilization: Result<f64, EvalError>,
    /// `items_used / total_items * 100`
    pub item_utilization: Result<f64, EvalError>,
    /// `bins_used / num_bins * 100`
    pub bin_utilization: Result<f64, EvalError>,
}

impl Evaluation {
    pub fn new(bins: &[BinReport], num_bins: usize, capacity: Capacity, total_items: usize) -> Self {
        let total_rating = bins.iter().map(|b| b.total_rating).sum();
        let total_weight = bins.iter().map(|b| b.total_weight).sum();
        let total_price = bins.iter().map(|b| b.total_price).sum();
        let items_used = bins.iter().map(|b| b.items.len()).sum();
        let bins_used = bins.len();

        Evaluation {
            total_rating,
            total_weight,
            total_price,
            items_used,
            bins_used,
            weight_utilization: percentage(
                Metric::WeightUtilization,
                total_weight,
                num_bins as f64 * capacity.weight,
            ),
            price_utilization: percentage(
                Metric::PriceUtilization,
                total_price,
                num_bins as f64 * capacity.price,
            ),
            item_utilization: percentage(
                Metric::ItemUtilization,
                items_used as f64,
                total_items as f64,
            ),
            bin_utilization: percentage(Metric::BinUtilization, bins_used as f64, num_bins as f64),
        }
    }

    /// All four utilization metrics, labeled, in reporting order.
    pub fn utilizations(&self) -> [(Metric, Result<f64, EvalError>); 4] {
        [
            (Metric::WeightUtilization, self.weight_utilization),
            (Metric::PriceUtilization, self.price_utilization),
            (Metric::ItemUtilization, self.item_utilization),
            (Metric::BinUtilization, self.bin_utilization),
        ]
    }
}

fn percentage(metric: Metric, numerator: f64, denominator: f64) -> Result<f64, EvalError> {
    if denominator == 0.0 {
        return Err(EvalError::DivisionByZero(metric));
    }
    Ok(numerator / denominator * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ReportItem;
    use float_cmp::approx_eq;

    fn bin(bin: usize, weight: f64, price: f64, rating: f64) -> BinReport {
        BinReport {
            bin,
            items: vec![ReportItem {
                item: format!("item_{bin}"),
                weight,
                price,
                rating,
            }],
            total_weight: weight,
            total_price: price,
            total_rating: rating,
        }
    }

    #[test]
    fn utilizations_follow_their_formulas() {
        let bins = [bin(1, 10.0, 5.0, 3.0), bin(3, 5.0, 5.0, 2.0)];
        let eval = Evaluation::new(&bins, 4, Capacity::new(10.0, 10.0), 8);

        assert_eq!(eval.items_used, 2);
        assert_eq!(eval.bins_used, 2);
        assert!(approx_eq!(f64, eval.total_rating, 5.0));
        assert!(approx_eq!(f64, eval.weight_utilization.unwrap(), 37.5));
        assert!(approx_eq!(f64, eval.price_utilization.unwrap(), 25.0));
        assert!(approx_eq!(f64, eval.item_utilization.unwrap(), 25.0));
        assert!(approx_eq!(f64, eval.bin_utilization.unwrap(), 50.0));
    }

    #[test]
    fn zero_budget_only_invalidates_its_metric() {
        let eval = Evaluation::new(&[], 2, Capacity::new(0.0, 10.0), 3);

        assert_eq!(
            eval.weight_utilization,
            Err(EvalError::DivisionByZero(Metric::WeightUtilization))
        );
        assert_eq!(eval.price_utilization, Ok(0.0));
        assert_eq!(eval.item_utilization, Ok(0.0));
        assert_eq!(eval.bin_utilization, Ok(0.0));
        assert_eq!(eval.total_weight, 0.0);
    }

    #[test]
    fn empty_catalog_has_no_item_utilization() {
        let eval = Evaluation::new(&[], 1, Capacity::new(1.0, 1.0), 0);
        assert_eq!(
            eval.item_utilization,
            Err(EvalError::DivisionByZero(Metric::ItemUtilization))
        );
    }
}
