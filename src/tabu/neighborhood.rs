//! Capacity-feasible neighborhood generation.
//!
//! # Order
//!
//! Candidates come out in a fixed order: relocations by source route,
//! source position, then target route (all ascending), followed by swaps
//! by first route, first position, second route, second position. The
//! search loop breaks cost ties by this order.
//!
//! # Cost
//!
//! A candidate's cost is the exact total after the move: the two touched
//! routes are recosted and summed with the untouched ones in route order,
//! the same way the search loop totals the current solution. A move back
//! to an already seen solution therefore reproduces its cost bit for bit.

use std::iter;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::{InsertionPolicy, NeighborhoodKind};
use super::types::{Candidate, Move};
use crate::cost::{total_cost, CostModel};
use crate::problem::CityId;
use crate::solution::Solution;

/// Read-only view of the current solution the neighborhood is built from.
pub(crate) struct Snapshot<'s> {
    pub solution: &'s Solution,
    pub loads: &'s [f64],
    pub route_costs: &'s [f64],
}

impl Snapshot<'_> {
    /// Total cost with routes `a` and `b` recosted.
    fn total_with(&self, a: (usize, f64), b: (usize, f64)) -> f64 {
        total_cost(self.route_costs.iter().enumerate().map(|(route, &cost)| {
            if route == a.0 {
                a.1
            } else if route == b.0 {
                b.1
            } else {
                cost
            }
        }))
    }
}

/// Generates every capacity-feasible move of the configured kind.
pub(crate) struct Neighborhood<'a> {
    cost: &'a CostModel,
    demands: &'a [f64],
    capacity: f64,
    kind: NeighborhoodKind,
    insertion: InsertionPolicy,
}

impl<'a> Neighborhood<'a> {
    pub fn new(
        cost: &'a CostModel,
        demands: &'a [f64],
        capacity: f64,
        kind: NeighborhoodKind,
        insertion: InsertionPolicy,
    ) -> Self {
        Self {
            cost,
            demands,
            capacity,
            kind,
            insertion,
        }
    }

    /// All candidates reachable from `snapshot` in one move.
    pub fn generate(&self, snapshot: &Snapshot<'_>) -> Vec<Candidate> {
        let num_routes = snapshot.solution.num_routes();
        let mut candidates = Vec::new();

        if matches!(
            self.kind,
            NeighborhoodKind::Relocate | NeighborhoodKind::Mixed
        ) {
            for batch in self.per_route(num_routes, |r| self.relocations_from(snapshot, r)) {
                candidates.extend(batch);
            }
        }
        if matches!(self.kind, NeighborhoodKind::Swap | NeighborhoodKind::Mixed) {
            for batch in self.per_route(num_routes, |r| self.swaps_from(snapshot, r)) {
                candidates.extend(batch);
            }
        }

        candidates
    }

    /// Evaluates `f` for every route index, keeping route order.
    #[cfg(feature = "parallel")]
    fn per_route<F>(&self, num_routes: usize, f: F) -> Vec<Vec<Candidate>>
    where
        F: Fn(usize) -> Vec<Candidate> + Sync + Send,
    {
        (0..num_routes).into_par_iter().map(f).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn per_route<F>(&self, num_routes: usize, f: F) -> Vec<Vec<Candidate>>
    where
        F: Fn(usize) -> Vec<Candidate>,
    {
        (0..num_routes).map(f).collect()
    }

    fn relocations_from(&self, snapshot: &Snapshot<'_>, from_route: usize) -> Vec<Candidate> {
        let routes = snapshot.solution.routes();
        let source = &routes[from_route];
        let mut out = Vec::new();

        for (from_pos, &client) in source.iter().enumerate() {
            let demand = self.demands[client.index()];
            let source_cost = self.cost.path_cost(without(source, from_pos));

            for (to_route, target) in routes.iter().enumerate() {
                if to_route == from_route || snapshot.loads[to_route] + demand > self.capacity {
                    continue;
                }
                let to_pos = match self.insertion {
                    InsertionPolicy::Append => target.len(),
                    InsertionPolicy::Cheapest => cheapest_insertion(self.cost, target, client),
                };
                let target_cost = self.cost.path_cost(inserted(target, to_pos, client));
                out.push(Candidate {
                    mv: Move::Relocate {
                        client,
                        from_route,
                        from_pos,
                        to_route,
                        to_pos,
                    },
                    cost: snapshot.total_with((from_route, source_cost), (to_route, target_cost)),
                });
            }
        }

        out
    }

    fn swaps_from(&self, snapshot: &Snapshot<'_>, first_route: usize) -> Vec<Candidate> {
        let routes = snapshot.solution.routes();
        let first_seq = &routes[first_route];
        let mut out = Vec::new();

        for (first_pos, &first) in first_seq.iter().enumerate() {
            let first_demand = self.demands[first.index()];

            for (second_route, second_seq) in routes.iter().enumerate().skip(first_route + 1) {
                for (second_pos, &second) in second_seq.iter().enumerate() {
                    let second_demand = self.demands[second.index()];
                    let first_load = snapshot.loads[first_route] - first_demand + second_demand;
                    let second_load = snapshot.loads[second_route] - second_demand + first_demand;
                    if first_load > self.capacity || second_load > self.capacity {
                        continue;
                    }

                    let first_cost = self.cost.path_cost(replaced(first_seq, first_pos, second));
                    let second_cost = self.cost.path_cost(replaced(second_seq, second_pos, first));
                    out.push(Candidate {
                        mv: Move::Swap {
                            first,
                            first_route,
                            first_pos,
                            second,
                            second_route,
                            second_pos,
                        },
                        cost: snapshot
                            .total_with((first_route, first_cost), (second_route, second_cost)),
                    });
                }
            }
        }

        out
    }
}

/// `route` with the stop at `pos` removed.
fn without(route: &[CityId], pos: usize) -> impl Iterator<Item = CityId> + '_ {
    route[..pos].iter().chain(&route[pos + 1..]).copied()
}

/// `route` with `client` inserted before index `pos`.
fn inserted(route: &[CityId], pos: usize, client: CityId) -> impl Iterator<Item = CityId> + '_ {
    route[..pos]
        .iter()
        .copied()
        .chain(iter::once(client))
        .chain(route[pos..].iter().copied())
}

/// `route` with the stop at `pos` replaced by `client`.
fn replaced(route: &[CityId], pos: usize, client: CityId) -> impl Iterator<Item = CityId> + '_ {
    route
        .iter()
        .enumerate()
        .map(move |(i, &stop)| if i == pos { client } else { stop })
}

/// Cost change of inserting `client` before index `pos` (`pos == len` appends).
fn insertion_delta(cost: &CostModel, route: &[CityId], pos: usize, client: CityId) -> f64 {
    let depot = cost.depot();
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = route.get(pos).copied().unwrap_or(depot);
    cost.get(prev, client) + cost.get(client, next) - cost.get(prev, next)
}

/// Lowest-delta insertion position; the earliest wins ties.
fn cheapest_insertion(cost: &CostModel, route: &[CityId], client: CityId) -> usize {
    let mut best = (0, insertion_delta(cost, route, 0, client));
    for pos in 1..=route.len() {
        let delta = insertion_delta(cost, route, pos, client);
        if delta < best.1 {
            best = (pos, delta);
        }
    }
    best.0
}
