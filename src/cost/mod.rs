//! Cost model: pluggable distance metrics and round-trip route costing.

mod metric;
mod model;

pub use metric::{DistanceMatrix, Euclidean, Manhattan, Metric};
pub use model::CostModel;
pub(crate) use model::total_cost;
