mod assignment;
mod bin_load;
mod catalog;
mod item;
mod problem;
mod solution;

#[doc(inline)]
pub use assignment::Assignment;
#[doc(inline)]
pub use assignment::Placement;
#[doc(inline)]
pub use bin_load::BinLoad;
#[doc(inline)]
pub use bin_load::CAPACITY_TOLERANCE;
#[doc(inline)]
pub use bin_load::Capacity;
#[doc(inline)]
pub use bin_load::within;
#[doc(inline)]
pub use catalog::Catalog;
#[doc(inline)]
pub use item::Item;
#[doc(inline)]
pub use problem::MKProblem;
#[doc(inline)]
pub use solution::Solution;
