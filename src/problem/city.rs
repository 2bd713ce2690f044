//! City and position types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a city: its index in the owning [`Instance`](super::Instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CityId(usize);

impl CityId {
    /// Wraps a raw index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Planar position of a city.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A location to serve (client) or to start from (depot).
///
/// The depot is the single city with zero demand.
///
/// # Examples
///
/// ```
/// use tabu_vrp::problem::City;
///
/// let depot = City::depot("Krakow", 0.0, 0.0);
/// let client = City::new("Tarnow", 70.0, 10.0, 4.0);
/// assert!(depot.is_depot());
/// assert!(!client.is_depot());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct City {
    /// Human-readable name, unique within an instance.
    pub name: String,
    /// Demand to deliver. Zero marks the depot.
    pub demand: f64,
    /// Location used by planar metrics.
    pub position: Position,
}

impl City {
    /// Creates a client at `(x, y)`.
    pub fn new(name: impl Into<String>, x: f64, y: f64, demand: f64) -> Self {
        Self {
            name: name.into(),
            demand,
            position: Position::new(x, y),
        }
    }

    /// Creates the depot at `(x, y)`.
    pub fn depot(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(name, x, y, 0.0)
    }

    /// Creates a city from a precomputed distance to the depot.
    ///
    /// The city is placed on the x-axis, so planar metrics reduce to
    /// `|d_a - d_b|` between two such cities.
    pub fn with_depot_distance(name: impl Into<String>, distance: f64, demand: f64) -> Self {
        Self::new(name, distance, 0.0, demand)
    }

    /// Returns `true` for the zero-demand depot.
    pub fn is_depot(&self) -> bool {
        self.demand == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_id_roundtrip() {
        let id = CityId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.to_string(), "#7");
    }

    #[test]
    fn test_depot_distance_on_axis() {
        let c = City::with_depot_distance("Kielce", 30.0, 1.0);
        assert_eq!(c.position, Position::new(30.0, 0.0));
        assert!(!c.is_depot());
    }
}
