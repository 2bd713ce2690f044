//! Solution representation and initial construction.

mod construction;
mod types;

pub use construction::random_solution;
pub use types::{Solution, Violation};
