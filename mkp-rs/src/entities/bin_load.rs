use crate::entities::Item;
use serde::{Deserialize, Serialize};

/// Relative slack allowed when comparing a summed load against a budget.
/// Keeps exact fits (e.g. `0.1 + 0.2` into `0.3`) from being rejected by rounding.
pub const CAPACITY_TOLERANCE: f64 = 1e-9;

/// Budgets shared by every bin of a problem.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Capacity {
    pub weight: f64,
    pub price: f64,
}

impl Capacity {
    pub fn new(weight: f64, price: f64) -> Self {
        Self { weight, price }
    }

    /// Whether `load` (plus `item`, if any) stays within both budgets.
    pub fn admits(&self, load: &BinLoad, item: Option<&Item>) -> bool {
        let (w, p) = match item {
            Some(item) => (load.weight + item.weight, load.price + item.price),
            None => (load.weight, load.price),
        };
        within(w, self.weight) && within(p, self.price)
    }

    /// Budget left over in each dimension once `load` is in the bin (never negative).
    pub fn remaining(&self, load: &BinLoad) -> (f64, f64) {
        (
            (self.weight - load.weight).max(0.0),
            (self.price - load.price).max(0.0),
        )
    }
}

pub fn within(value: f64, budget: f64) -> bool {
    value <= budget + CAPACITY_TOLERANCE * budget.abs().max(1.0)
}

/// Accumulated contents of a single bin.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct BinLoad {
    pub weight: f64,
    pub price: f64,
    pub rating: f64,
    pub n_items: usize,
}

impl BinLoad {
    pub fn add(&mut self, item: &Item) {
        self.weight += item.weight;
        self.price += item.price;
        self.rating += item.rating;
        self.n_items += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.n_items == 0
    }

    /// Two loads with bitwise identical usage leave the same room for any future item.
    pub fn same_usage(&self, other: &BinLoad) -> bool {
        self.weight.to_bits() == other.weight.to_bits()
            && self.price.to_bits() == other.price.to_bits()
    }
}
