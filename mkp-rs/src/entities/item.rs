use crate::error::MKPError;

/// Item that can be assigned to at most one bin.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// Position of the item within its [`Catalog`](crate::entities::Catalog)
    pub id: usize,
    /// Identifier of the item as defined in the dataset
    pub name: String,
    pub weight: f64,
    pub price: f64,
    /// Value to maximize, may be negative
    pub rating: f64,
}

impl Item {
    pub fn new(
        id: usize,
        name: impl Into<String>,
        weight: f64,
        price: f64,
        rating: f64,
    ) -> Result<Item, MKPError> {
        let name = name.into();
        if !weight.is_finite() || weight < 0.0 {
            return Err(MKPError::invalid(
                format!("weight of item '{name}'"),
                format!("must be a finite non-negative number, got {weight}"),
            ));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(MKPError::invalid(
                format!("price of item '{name}'"),
                format!("must be a finite non-negative number, got {price}"),
            ));
        }
        if !rating.is_finite() {
            return Err(MKPError::invalid(
                format!("rating of item '{name}'"),
                format!("must be a finite number, got {rating}"),
            ));
        }
        Ok(Item {
            id,
            name,
            weight,
            price,
            rating,
        })
    }
}
