//! Fleet and search configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VrpError};

/// Which moves make up the neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NeighborhoodKind {
    /// Move one client to another route.
    #[default]
    Relocate,
    /// Exchange two clients served by different routes.
    Swap,
    /// All relocations, then all swaps.
    Mixed,
}

/// Where a relocated client is inserted in its target route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InsertionPolicy {
    /// End of the target route.
    #[default]
    Append,
    /// Position with the lowest added distance; earliest position on ties.
    Cheapest,
}

/// Immutable parameters of one Tabu Search run.
///
/// # Examples
///
/// ```
/// use tabu_vrp::tabu::FleetConfig;
///
/// let config = FleetConfig::default()
///     .with_vehicles(2)
///     .with_capacity(25.0)
///     .with_tabu_tenure(2)
///     .with_iterations(20)
///     .with_seed(7);
/// assert_eq!(config.vehicles, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FleetConfig {
    /// Number of vehicles (routes).
    pub vehicles: usize,
    /// Capacity of every vehicle.
    pub capacity: f64,
    /// Iterations a move's inverse stays forbidden after it is applied.
    pub tabu_tenure: usize,
    /// Number of search iterations.
    pub iterations: usize,
    /// Seed of the random source used for the initial assignment.
    pub seed: u64,
    /// Whether a tabu move that beats the best cost may still be selected.
    pub aspiration: bool,
    /// Move types to generate.
    pub neighborhood: NeighborhoodKind,
    /// Insertion position for relocations.
    pub insertion: InsertionPolicy,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            vehicles: 5,
            capacity: 1000.0,
            tabu_tenure: 10,
            iterations: 200,
            seed: 42,
            aspiration: true,
            neighborhood: NeighborhoodKind::default(),
            insertion: InsertionPolicy::default(),
        }
    }
}

impl FleetConfig {
    /// Sets the number of vehicles.
    pub fn with_vehicles(mut self, n: usize) -> Self {
        self.vehicles = n;
        self
    }

    /// Sets the per-vehicle capacity.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_neighborhood(mut self, kind: NeighborhoodKind) -> Self {
        self.neighborhood = kind;
        self
    }

    pub fn with_insertion(mut self, policy: InsertionPolicy) -> Self {
        self.insertion = policy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.vehicles == 0 {
            return Err(VrpError::Configuration("vehicles must be positive".into()));
        }
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(VrpError::Configuration(format!(
                "capacity must be positive and finite, got {}",
                self.capacity
            )));
        }
        if self.iterations == 0 {
            return Err(VrpError::Configuration("iterations must be positive".into()));
        }
        Ok(())
    }
}
