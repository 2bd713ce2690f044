//! Pairwise distance metrics.

use crate::error::{Result, VrpError};
use crate::problem::{CityId, Instance};

/// A symmetric, non-negative distance between two cities.
///
/// The search loop never calls a metric directly: [`CostModel`](super::CostModel)
/// evaluates it once per city pair and serves lookups from its table, so
/// any metric (planar, great-circle, precomputed) plugs in unchanged.
///
/// # Examples
///
/// ```
/// use tabu_vrp::cost::Metric;
/// use tabu_vrp::problem::{CityId, Instance};
/// use tabu_vrp::Result;
///
/// /// Chebyshev (L∞) distance.
/// struct Chebyshev;
///
/// impl Metric for Chebyshev {
///     fn distance(&self, instance: &Instance, from: CityId, to: CityId) -> Result<f64> {
///         let a = instance.city(from)?.position;
///         let b = instance.city(to)?.position;
///         Ok((a.x - b.x).abs().max((a.y - b.y).abs()))
///     }
/// }
/// ```
pub trait Metric: Send + Sync {
    /// Distance from `from` to `to`.
    fn distance(&self, instance: &Instance, from: CityId, to: CityId) -> Result<f64>;
}

/// Straight-line distance over city positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, instance: &Instance, from: CityId, to: CityId) -> Result<f64> {
        let a = instance.city(from)?.position;
        let b = instance.city(to)?.position;
        Ok((a.x - b.x).hypot(a.y - b.y))
    }
}

/// Rectilinear (L1) distance over city positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Metric for Manhattan {
    fn distance(&self, instance: &Instance, from: CityId, to: CityId) -> Result<f64> {
        let a = instance.city(from)?.position;
        let b = instance.city(to)?.position;
        Ok((a.x - b.x).abs() + (a.y - b.y).abs())
    }
}

/// Precomputed distances indexed by [`CityId`], stored row-major.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from `size * size` row-major values.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(VrpError::Configuration(format!(
                "distance matrix needs {} values for {size} cities, got {}",
                size * size,
                data.len()
            )));
        }
        Ok(Self { size, data })
    }

    /// Builds a matrix from nested rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|r| r.len() != size) {
            return Err(VrpError::Configuration(format!(
                "distance matrix row has {} values, expected {size}",
                row.len()
            )));
        }
        Ok(Self {
            size,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the distance between two indices.
    pub fn get(&self, from: usize, to: usize) -> Result<f64> {
        if from >= self.size || to >= self.size {
            return Err(VrpError::InvalidCity {
                id: from.max(to),
                len: self.size,
            });
        }
        Ok(self.data[from * self.size + to])
    }
}

impl Metric for DistanceMatrix {
    fn distance(&self, _instance: &Instance, from: CityId, to: CityId) -> Result<f64> {
        self.get(from.index(), to.index())
    }
}
