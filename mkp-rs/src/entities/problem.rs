use crate::entities::{Assignment, BinLoad, Capacity, Catalog, Item, Placement};
use crate::error::MKPError;

/// The multiple knapsack problem for one catalog.
///
/// Binary decision `x[i][k]` places item `i` in bin `k`. The objective maximizes
/// `Σ rating[i]·x[i][k]` subject to:
/// * every item is placed in at most one bin,
/// * the summed weight of every bin stays within `capacity.weight`,
/// * the summed price of every bin stays within `capacity.price`.
#[derive(Debug, Clone, Copy)]
pub struct MKProblem<'a> {
    catalog: &'a Catalog,
    num_bins: usize,
    capacity: Capacity,
}

impl<'a> MKProblem<'a> {
    pub fn new(
        catalog: &'a Catalog,
        num_bins: usize,
        max_weight: f64,
        max_price: f64,
    ) -> Result<Self, MKPError> {
        if num_bins == 0 {
            return Err(MKPError::invalid("num_bins", "at least one bin is required"));
        }
        if !max_weight.is_finite() || max_weight < 0.0 {
            return Err(MKPError::invalid(
                "max_weight",
                format!("must be a finite non-negative number, got {max_weight}"),
            ));
        }
        if !max_price.is_finite() || max_price < 0.0 {
            return Err(MKPError::invalid(
                "max_price",
                format!("must be a finite non-negative number, got {max_price}"),
            ));
        }
        Ok(Self {
            catalog,
            num_bins,
            capacity: Capacity::new(max_weight, max_price),
        })
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn n_items(&self) -> usize {
        self.catalog.len()
    }

    /// Whether `item` can be added to a bin currently holding `load`.
    pub fn fits(&self, load: &BinLoad, item: &Item) -> bool {
        self.capacity.admits(load, Some(item))
    }

    /// Per-bin loads resulting from `assignment`.
    pub fn loads(&self, assignment: &Assignment) -> Vec<BinLoad> {
        let mut loads = vec![BinLoad::default(); self.num_bins];
        for (id, placement) in assignment.placements().iter().enumerate() {
            if let Placement::Bin(k) = placement {
                loads[*k].add(self.catalog.item(id));
            }
        }
        loads
    }

    pub fn objective(&self, assignment: &Assignment) -> f64 {
        assignment
            .placements()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.bin().is_some())
            .map(|(id, _)| self.catalog.item(id).rating)
            .sum()
    }

    /// Checks both capacity constraints for every bin, and that the assignment
    /// covers exactly the items of the catalog with valid bin indices.
    pub fn is_feasible(&self, assignment: &Assignment) -> bool {
        if assignment.n_items() != self.n_items() {
            return false;
        }
        let bins_valid = assignment
            .placements()
            .iter()
            .all(|p| p.bin().is_none_or(|k| k < self.num_bins));

        bins_valid
            && self
                .loads(assignment)
                .iter()
                .all(|load| self.capacity.admits(load, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(None);
        catalog
            .add_item("a", 6.0, 2.0, 5.0)
            .unwrap()
            .add_item("b", 5.0, 3.0, 4.0)
            .unwrap();
        catalog
    }

    #[test_case(0, 10.0, 10.0; "no bins")]
    #[test_case(1, -1.0, 10.0; "negative weight budget")]
    #[test_case(1, 10.0, -0.5; "negative price budget")]
    #[test_case(1, f64::NAN, 10.0; "nan weight budget")]
    fn invalid_parameters_are_rejected(num_bins: usize, max_weight: f64, max_price: f64) {
        let catalog = catalog();
        let res = MKProblem::new(&catalog, num_bins, max_weight, max_price);
        assert!(matches!(res, Err(MKPError::InvalidParameter { .. })));
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = Catalog::new(None);
        let problem = MKProblem::new(&catalog, 2, 1.0, 1.0).unwrap();
        assert_eq!(problem.n_items(), 0);
        assert!(problem.is_feasible(&Assignment::unassigned(0)));
    }

    #[test]
    fn feasibility_checks_every_bin() {
        let catalog = catalog();
        let problem = MKProblem::new(&catalog, 2, 10.0, 10.0).unwrap();

        let split = Assignment::from(vec![Placement::Bin(0), Placement::Bin(1)]);
        assert!(problem.is_feasible(&split));
        assert_eq!(problem.objective(&split), 9.0);

        let stacked = Assignment::from(vec![Placement::Bin(1), Placement::Bin(1)]);
        assert!(!problem.is_feasible(&stacked));

        let out_of_range = Assignment::from(vec![Placement::Bin(2), Placement::Unassigned]);
        assert!(!problem.is_feasible(&out_of_range));
    }
}
