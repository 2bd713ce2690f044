//! Random feasible initial solution.

use rand::Rng;
use tracing::{debug, instrument};

use super::types::Solution;
use crate::error::{Result, VrpError};
use crate::problem::Instance;

/// Builds a feasible solution by random assignment.
///
/// Clients are kept in ascending id order. Each step draws one unassigned
/// client uniformly at random and hands it to a uniformly random vehicle
/// among those that still have room for its demand. Clients are appended
/// to their route in assignment order.
///
/// All randomness comes from `rng`, so an identically seeded generator
/// yields an identical solution.
///
/// # Errors
///
/// [`VrpError::Infeasible`] when total demand exceeds total fleet capacity,
/// when a single client outweighs a vehicle, or when the random packing
/// leaves a client with no vehicle able to take it.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tabu_vrp::problem::{City, Instance};
/// use tabu_vrp::solution::random_solution;
///
/// let instance = Instance::new(vec![
///     City::depot("depot", 0.0, 0.0),
///     City::new("a", 1.0, 0.0, 10.0),
///     City::new("b", 2.0, 0.0, 10.0),
/// ])
/// .unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let sol = random_solution(&instance, 2, 10.0, &mut rng).unwrap();
/// assert_eq!(sol.route(0).len(), 1);
/// assert_eq!(sol.route(1).len(), 1);
/// ```
#[instrument(skip(instance, rng), fields(clients = instance.num_clients()))]
pub fn random_solution<R: Rng>(
    instance: &Instance,
    vehicles: usize,
    capacity: f64,
    rng: &mut R,
) -> Result<Solution> {
    let fleet_capacity = vehicles as f64 * capacity;
    let total_demand = instance.total_demand();
    if total_demand > fleet_capacity {
        return Err(VrpError::Infeasible(format!(
            "total demand {total_demand} exceeds fleet capacity {fleet_capacity}"
        )));
    }
    for &client in instance.clients() {
        let city = instance.city(client)?;
        if city.demand > capacity {
            return Err(VrpError::Infeasible(format!(
                "client '{}' demand {} exceeds vehicle capacity {capacity}",
                city.name, city.demand
            )));
        }
    }

    let mut solution = Solution::empty(vehicles);
    let mut loads = vec![0.0; vehicles];
    let mut unassigned = instance.clients().to_vec();
    let mut open = Vec::with_capacity(vehicles);

    while !unassigned.is_empty() {
        let client = unassigned.remove(rng.random_range(0..unassigned.len()));
        let demand = instance.demand(client)?;

        open.clear();
        open.extend((0..vehicles).filter(|&v| loads[v] + demand <= capacity));
        if open.is_empty() {
            return Err(VrpError::Infeasible(format!(
                "no vehicle has room for client '{}' (demand {demand})",
                instance.city(client)?.name
            )));
        }

        let vehicle = open[rng.random_range(0..open.len())];
        solution.routes_mut()[vehicle].push(client);
        loads[vehicle] += demand;
    }

    debug!(?loads, "initial assignment built");
    Ok(solution)
}
