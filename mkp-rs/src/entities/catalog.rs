use crate::entities::Item;
use crate::error::MKPError;
use crate::util::assertions::catalog_item_ids_correct;
use std::collections::HashSet;

/// Immutable, ordered table of the items of one group (e.g. one city).
/// The order only serves to index items deterministically.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Value of the categorical field this catalog was filtered on, if any
    pub group: Option<String>,
    items: Vec<Item>,
    names: HashSet<String>,
}

impl Catalog {
    pub fn new(group: Option<String>) -> Self {
        Self {
            group,
            items: vec![],
            names: HashSet::new(),
        }
    }

    /// Appends an item, assigning it the next free id.
    /// Fails if a field is malformed or the name is already present.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        weight: f64,
        price: f64,
        rating: f64,
    ) -> Result<&mut Self, MKPError> {
        let item = Item::new(self.items.len(), name, weight, price, rating)?;
        if !self.names.insert(item.name.clone()) {
            return Err(MKPError::invalid(
                "item name",
                format!("'{}' appears more than once in the catalog", item.name),
            ));
        }
        self.items.push(item);

        debug_assert!(catalog_item_ids_correct(&self.items));
        Ok(self)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: usize) -> &Item {
        &self.items[id]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let mut catalog = Catalog::new(Some("Leuven".into()));
        catalog
            .add_item("a", 1.0, 1.0, 1.0)
            .unwrap()
            .add_item("b", 2.0, 2.0, 2.0)
            .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.item(1).name, "b");
        assert_eq!(catalog.item(1).id, 1);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut catalog = Catalog::new(None);
        catalog.add_item("a", 1.0, 1.0, 1.0).unwrap();
        assert!(catalog.add_item("a", 3.0, 1.0, 1.0).is_err());
        assert_eq!(catalog.len(), 1);
    }
}
