use mkp_rs::entities::Placement;

/// A single branching decision: what happens to one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Assigned { item: usize, bin: usize },
    Unassigned { item: usize },
}

impl Decision {
    pub fn item(&self) -> usize {
        match self {
            Decision::Assigned { item, .. } | Decision::Unassigned { item } => *item,
        }
    }

    pub fn placement(&self) -> Placement {
        match self {
            Decision::Assigned { bin, .. } => Placement::Bin(*bin),
            Decision::Unassigned { .. } => Placement::Unassigned,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Assigned { item, bin } => write!(f, "item {item} -> bin {bin}"),
            Decision::Unassigned { item } => write!(f, "item {item} -> unassigned"),
        }
    }
}
