//! Solution representation and feasibility checks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::problem::{CityId, Instance};

/// A broken solution invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Route load above vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load carried by the route.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// A client served by no route.
    MissingClient { client: CityId },
    /// A client served more than once.
    DuplicateClient { client: CityId },
    /// The depot listed as a stop.
    DepotInRoute { route_index: usize },
    /// An id outside the instance.
    UnknownCity { route_index: usize, id: CityId },
}

/// One ordered route per vehicle.
///
/// Routes hold client ids only; the depot is implicit at both ends.
/// A route may be empty (unused vehicle).
///
/// # Examples
///
/// ```
/// use tabu_vrp::problem::CityId;
/// use tabu_vrp::solution::Solution;
///
/// let sol = Solution::from_routes(vec![vec![CityId::new(2), CityId::new(1)], vec![]]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 2);
/// assert!(sol.route(1).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    routes: Vec<Vec<CityId>>,
}

impl Solution {
    /// Creates `vehicles` empty routes.
    pub fn empty(vehicles: usize) -> Self {
        Self {
            routes: vec![Vec::new(); vehicles],
        }
    }

    pub fn from_routes(routes: Vec<Vec<CityId>>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Vec<CityId>] {
        &self.routes
    }

    /// Route of vehicle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_routes()`.
    pub fn route(&self, index: usize) -> &[CityId] {
        &self.routes[index]
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of client visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    pub fn into_routes(self) -> Vec<Vec<CityId>> {
        self.routes
    }

    pub(crate) fn routes_mut(&mut self) -> &mut [Vec<CityId>] {
        &mut self.routes
    }

    /// Total demand carried by each route.
    ///
    /// Unknown ids contribute nothing; see [`Solution::violations`].
    pub fn loads(&self, instance: &Instance) -> Vec<f64> {
        self.routes
            .iter()
            .map(|route| {
                route
                    .iter()
                    .filter_map(|&c| instance.demand(c).ok())
                    .fold(0.0, |load, demand| load + demand)
            })
            .collect()
    }

    /// Lists every violated invariant: partition of the clients over the
    /// routes, depot absence and per-route capacity.
    pub fn violations(&self, instance: &Instance, capacity: f64) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut seen = vec![0usize; instance.len()];

        for (route_index, route) in self.routes.iter().enumerate() {
            let mut load = 0.0;
            for &id in route {
                match instance.demand(id) {
                    Ok(demand) => {
                        load += demand;
                        seen[id.index()] += 1;
                    }
                    Err(_) => violations.push(Violation::UnknownCity { route_index, id }),
                }
                if id == instance.depot() {
                    violations.push(Violation::DepotInRoute { route_index });
                }
            }
            if load > capacity {
                violations.push(Violation::CapacityExceeded {
                    route_index,
                    load,
                    capacity,
                });
            }
        }

        for &client in instance.clients() {
            match seen[client.index()] {
                0 => violations.push(Violation::MissingClient { client }),
                1 => {}
                _ => violations.push(Violation::DuplicateClient { client }),
            }
        }

        violations
    }

    /// Returns `true` when [`Solution::violations`] is empty.
    pub fn is_feasible(&self, instance: &Instance, capacity: f64) -> bool {
        self.violations(instance, capacity).is_empty()
    }
}
