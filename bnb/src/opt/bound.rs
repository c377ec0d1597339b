use itertools::Itertools;
use mkp_rs::entities::{BinLoad, CAPACITY_TOLERANCE, Capacity, Catalog, Item};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Upper bound on the rating that the not yet decided items can still add.
///
/// The remaining capacity of all bins is pooled into a single weight budget and a single
/// price budget. Each budget on its own gives a fractional knapsack relaxation, filled in
/// order of rating per unit of that resource. The bound is the tighter of the two.
/// Only items with a positive rating that still fit in some bin in each dimension take part.
#[derive(Debug, Clone)]
pub struct BoundEstimator {
    /// Positively rated item ids by descending rating/weight, ties by lower id
    by_weight_ratio: Vec<usize>,
    /// Positively rated item ids by descending rating/price, ties by lower id
    by_price_ratio: Vec<usize>,
}

impl BoundEstimator {
    pub fn new(catalog: &Catalog) -> Self {
        let ratio_order = |resource: fn(&Item) -> f64| {
            catalog
                .items()
                .iter()
                .filter(|i| i.rating > 0.0)
                .sorted_by_key(|i| Reverse(OrderedFloat(i.rating / resource(*i))))
                .map(|i| i.id)
                .collect_vec()
        };

        Self {
            by_weight_ratio: ratio_order(|i| i.weight),
            by_price_ratio: ratio_order(|i| i.price),
        }
    }

    /// Bound on the rating achievable by items `first_undecided..` given the current `loads`.
    pub fn estimate(
        &self,
        catalog: &Catalog,
        capacity: Capacity,
        loads: &[BinLoad],
        first_undecided: usize,
    ) -> f64 {
        let slack_w = CAPACITY_TOLERANCE * capacity.weight.abs().max(1.0);
        let slack_p = CAPACITY_TOLERANCE * capacity.price.abs().max(1.0);

        let (mut pool_w, mut pool_p, mut max_w, mut max_p) = (0.0, 0.0, 0.0_f64, 0.0_f64);
        for load in loads {
            let (w, p) = capacity.remaining(load);
            pool_w += w + slack_w;
            pool_p += p + slack_p;
            max_w = max_w.max(w + slack_w);
            max_p = max_p.max(p + slack_p);
        }

        let eligible = |item: &Item| {
            item.id >= first_undecided && item.weight <= max_w && item.price <= max_p
        };

        let bound_w = fractional_fill(catalog, &self.by_weight_ratio, pool_w, |i| i.weight, eligible);
        let bound_p = fractional_fill(catalog, &self.by_price_ratio, pool_p, |i| i.price, eligible);

        bound_w.min(bound_p)
    }
}

/// Greedy fractional knapsack over `order`, taking the last item that does not fit only partially.
fn fractional_fill(
    catalog: &Catalog,
    order: &[usize],
    mut budget: f64,
    resource: impl Fn(&Item) -> f64,
    eligible: impl Fn(&Item) -> bool,
) -> f64 {
    let mut bound = 0.0;
    for item in order.iter().map(|&id| catalog.item(id)).filter(|i| eligible(*i)) {
        let usage = resource(item);
        if usage <= budget {
            budget -= usage;
            bound += item.rating;
        } else {
            bound += item.rating * budget / usage;
            break;
        }
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn catalog(items: &[(f64, f64, f64)]) -> Catalog {
        let mut catalog = Catalog::new(None);
        for (i, (w, p, r)) in items.iter().enumerate() {
            catalog.add_item(format!("item_{i}"), *w, *p, *r).unwrap();
        }
        catalog
    }

    #[test]
    fn ratio_order_breaks_ties_by_index() {
        let catalog = catalog(&[(2.0, 1.0, 2.0), (1.0, 1.0, 3.0), (4.0, 1.0, 4.0), (1.0, 1.0, -1.0)]);
        let estimator = BoundEstimator::new(&catalog);
        assert_eq!(estimator.by_weight_ratio, vec![1, 0, 2]);
        assert_eq!(estimator.by_price_ratio, vec![2, 1, 0]);
    }

    #[test]
    fn bound_is_the_tighter_relaxation() {
        // plenty of weight, price budget is binding
        let catalog = catalog(&[(1.0, 10.0, 5.0), (1.0, 10.0, 5.0), (1.0, 10.0, 5.0)]);
        let estimator = BoundEstimator::new(&catalog);
        let capacity = Capacity::new(100.0, 15.0);
        let loads = [BinLoad::default()];

        let bound = estimator.estimate(&catalog, capacity, &loads, 0);
        assert!(approx_eq!(f64, bound, 7.5, epsilon = 1e-6));
    }

    #[test]
    fn decided_and_oversized_items_are_ignored() {
        let catalog = catalog(&[(1.0, 1.0, 10.0), (50.0, 1.0, 100.0), (2.0, 2.0, 3.0)]);
        let estimator = BoundEstimator::new(&catalog);
        let capacity = Capacity::new(10.0, 10.0);
        let loads = [BinLoad::default(), BinLoad::default()];

        let bound = estimator.estimate(&catalog, capacity, &loads, 1);
        assert!(approx_eq!(f64, bound, 3.0, epsilon = 1e-6));
    }

    #[test]
    fn bound_never_undercuts_an_exact_fit() {
        let catalog = catalog(&[(0.1, 0.0, 1.0), (0.2, 0.0, 1.0)]);
        let estimator = BoundEstimator::new(&catalog);
        let bound = estimator.estimate(&catalog, Capacity::new(0.3, 0.0), &[BinLoad::default()], 0);
        assert!(bound >= 2.0);
    }
}
