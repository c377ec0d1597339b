//! The core `mkp-rs` library: entities, evaluation and I/O for the multiple knapsack problem
//! with a weight and a price budget per bin.

/// Entities to model the multiple knapsack problem
pub mod entities;

/// Error types shared by the library and its consumers
pub mod error;

/// Post-solution reporting: per-bin breakdowns and utilization metrics
pub mod eval;

/// Reading datasets into and exporting solutions out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
