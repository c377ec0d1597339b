use serde::{Deserialize, Serialize};

/// Where a single item ended up.
///
/// The derived ordering matches the branching order of the search:
/// bins in increasing index order, then `Unassigned`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Placement {
    /// Assigned to the bin with this (0-based) index
    Bin(usize),
    Unassigned,
}

impl Placement {
    pub fn bin(&self) -> Option<usize> {
        match self {
            Placement::Bin(k) => Some(*k),
            Placement::Unassigned => None,
        }
    }
}

/// Mapping of every item of a catalog to a [`Placement`], indexed by item id.
/// Assignments compare lexicographically, item by item.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Assignment(Vec<Placement>);

impl Assignment {
    /// Assignment of `n_items` items where nothing is placed.
    pub fn unassigned(n_items: usize) -> Self {
        Assignment(vec![Placement::Unassigned; n_items])
    }

    pub fn placement(&self, item_id: usize) -> Placement {
        self.0[item_id]
    }

    pub fn placements(&self) -> &[Placement] {
        &self.0
    }

    pub fn n_items(&self) -> usize {
        self.0.len()
    }

    pub fn n_assigned(&self) -> usize {
        self.0.iter().filter(|p| p.bin().is_some()).count()
    }

    /// Ids of the items assigned to bin `bin`, in catalog order.
    pub fn items_in_bin(&self, bin: usize) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(move |(_, p)| **p == Placement::Bin(bin))
            .map(|(id, _)| id)
    }
}

impl From<Vec<Placement>> for Assignment {
    fn from(placements: Vec<Placement>) -> Self {
        Assignment(placements)
    }
}
