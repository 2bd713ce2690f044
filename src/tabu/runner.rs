//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Build a random feasible assignment from the seeded generator
//! 2. At each iteration:
//!    a. Generate the capacity-feasible neighborhood of the current solution
//!    b. Select the cheapest non-tabu candidate, or a tabu candidate that
//!    beats the best cost (aspiration); if every candidate is tabu, take
//!    the cheapest one anyway
//!    c. Apply it unconditionally and forbid its inverse for `tenure`
//!    iterations
//!    d. Replace the best solution on strict improvement
//! 3. Stop after exactly `iterations` iterations
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Gendreau, M., Hertz, A. & Laporte, G. (1994). "A Tabu Search Heuristic for the
//! Vehicle Routing Problem", *Management Science* 40(10), 1276-1290.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use super::config::FleetConfig;
use super::memory::TabuMemory;
use super::neighborhood::{Neighborhood, Snapshot};
use super::types::{Candidate, Move, Selection};
use crate::cost::{total_cost, CostModel, Metric};
use crate::error::Result;
use crate::problem::{City, Instance};
use crate::solution::{random_solution, Solution};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best solution found.
    pub best: Solution,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Total iterations executed (always the configured budget).
    pub iterations: usize,
    /// Number of iterations completed when the best solution was found
    /// (0 means the initial solution was never beaten).
    pub best_iteration: usize,
    /// Best cost after each iteration.
    pub cost_history: Vec<f64>,
    /// Tabu moves admitted by the aspiration criterion.
    pub aspiration_moves: usize,
    /// Moves taken because every candidate was tabu.
    pub forced_moves: usize,
    /// Iterations with an empty neighborhood.
    pub stalled_iterations: usize,
}

/// What one iteration did, handed to the observer of
/// [`TabuSearch::run_with_observer`].
#[derive(Debug)]
pub struct IterationReport<'a> {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Applied move, `None` when the neighborhood was empty.
    pub applied: Option<Move>,
    pub selection: Selection,
    /// Current solution after the move.
    pub current: &'a Solution,
    pub current_cost: f64,
    pub best_cost: f64,
}

/// Phase of the search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Initializing,
    Iterating,
    Terminated,
}

/// Tabu Search over a validated VRP instance.
///
/// # Examples
///
/// ```
/// use tabu_vrp::cost::Euclidean;
/// use tabu_vrp::problem::City;
/// use tabu_vrp::tabu::{FleetConfig, TabuSearch};
///
/// let cities = vec![
///     City::depot("depot", 0.0, 0.0),
///     City::new("a", 1.0, 0.0, 10.0),
///     City::new("b", 2.0, 0.0, 10.0),
///     City::new("c", 0.0, 1.0, 10.0),
///     City::new("d", 0.0, 2.0, 10.0),
/// ];
/// let config = FleetConfig::default()
///     .with_vehicles(2)
///     .with_capacity(25.0)
///     .with_tabu_tenure(2)
///     .with_iterations(20)
///     .with_seed(1);
///
/// let search = TabuSearch::new(cities, config, &Euclidean).unwrap();
/// let result = search.run().unwrap();
/// assert_eq!(result.best.num_served(), 4);
/// assert_eq!(result.iterations, 20);
/// ```
#[derive(Debug, Clone)]
pub struct TabuSearch {
    instance: Instance,
    cost: CostModel,
    config: FleetConfig,
}

impl TabuSearch {
    /// Validates the configuration and cities and tabulates `metric`.
    ///
    /// No search work happens here; [`TabuSearch::run`] does it.
    pub fn new<M: Metric + ?Sized>(
        cities: Vec<City>,
        config: FleetConfig,
        metric: &M,
    ) -> Result<Self> {
        config.validate()?;
        let instance = Instance::new(cities)?;
        Self::with_instance(instance, config, metric)
    }

    /// Same as [`TabuSearch::new`] for an already validated instance.
    pub fn with_instance<M: Metric + ?Sized>(
        instance: Instance,
        config: FleetConfig,
        metric: &M,
    ) -> Result<Self> {
        config.validate()?;
        let cost = CostModel::new(&instance, metric)?;
        Ok(Self {
            instance,
            cost,
            config,
        })
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Runs the search and returns the best solution found.
    ///
    /// # Errors
    ///
    /// [`VrpError::Infeasible`](crate::VrpError::Infeasible) when no initial
    /// assignment fits the fleet.
    pub fn run(&self) -> Result<TabuResult> {
        self.run_with_observer(|_| {})
    }

    /// Runs the search, calling `observer` after every iteration.
    pub fn run_with_observer<F>(&self, mut observer: F) -> Result<TabuResult>
    where
        F: FnMut(&IterationReport<'_>),
    {
        let demands: Vec<f64> = self.instance.cities().iter().map(|c| c.demand).collect();
        let mut search = SearchLoop::new(self, &demands);

        search.initialize()?;
        while search.phase == SearchPhase::Iterating {
            let (applied, selection) = search.step();
            observer(&IterationReport {
                iteration: search.iteration - 1,
                applied,
                selection,
                current: &search.current,
                current_cost: search.current_cost,
                best_cost: search.best_cost,
            });
        }

        Ok(search.finish())
    }
}

/// Loop-local state of one run.
struct SearchLoop<'a> {
    owner: &'a TabuSearch,
    neighborhood: Neighborhood<'a>,
    phase: SearchPhase,
    iteration: usize,

    current: Solution,
    current_cost: f64,
    loads: Vec<f64>,
    route_costs: Vec<f64>,
    memory: TabuMemory,

    best: Solution,
    best_cost: f64,
    best_iteration: usize,

    cost_history: Vec<f64>,
    aspiration_moves: usize,
    forced_moves: usize,
    stalled_iterations: usize,
}

impl<'a> SearchLoop<'a> {
    fn new(owner: &'a TabuSearch, demands: &'a [f64]) -> Self {
        let config = &owner.config;
        Self {
            owner,
            neighborhood: Neighborhood::new(
                &owner.cost,
                demands,
                config.capacity,
                config.neighborhood,
                config.insertion,
            ),
            phase: SearchPhase::Initializing,
            iteration: 0,
            current: Solution::default(),
            current_cost: 0.0,
            loads: Vec::new(),
            route_costs: Vec::new(),
            memory: TabuMemory::new(),
            best: Solution::default(),
            best_cost: 0.0,
            best_iteration: 0,
            cost_history: Vec::with_capacity(config.iterations),
            aspiration_moves: 0,
            forced_moves: 0,
            stalled_iterations: 0,
        }
    }

    fn initialize(&mut self) -> Result<()> {
        debug_assert_eq!(self.phase, SearchPhase::Initializing);
        let owner = self.owner;
        let config = &owner.config;
        let instance = &owner.instance;

        let mut rng = StdRng::seed_from_u64(config.seed);
        self.current = random_solution(instance, config.vehicles, config.capacity, &mut rng)?;
        self.loads = self.current.loads(instance);
        self.route_costs = self
            .current
            .routes()
            .iter()
            .map(|route| owner.cost.route_cost(route))
            .collect::<Result<_>>()?;
        self.current_cost = total_cost(self.route_costs.iter().copied());

        self.best = self.current.clone();
        self.best_cost = self.current_cost;

        info!(
            clients = instance.num_clients(),
            vehicles = config.vehicles,
            capacity = config.capacity,
            tenure = config.tabu_tenure,
            iterations = config.iterations,
            seed = config.seed,
            initial_cost = self.current_cost,
            "tabu search started"
        );

        self.phase = SearchPhase::Iterating;
        Ok(())
    }

    /// Runs one iteration and returns the applied move and how it was chosen.
    fn step(&mut self) -> (Option<Move>, Selection) {
        debug_assert_eq!(self.phase, SearchPhase::Iterating);
        let owner = self.owner;
        let config = &owner.config;

        self.memory.prune(self.iteration);
        let candidates = self.neighborhood.generate(&Snapshot {
            solution: &self.current,
            loads: &self.loads,
            route_costs: &self.route_costs,
        });

        let choice = select(
            &candidates,
            &self.memory,
            self.iteration,
            self.best_cost,
            config.aspiration,
        );

        let outcome = match choice {
            Some((index, selection)) => {
                let mv = candidates[index].mv;
                self.apply(mv);
                debug_assert_eq!(self.current_cost.to_bits(), candidates[index].cost.to_bits());

                let key = mv.key();
                self.memory.record(key.reverse(), self.iteration, config.tabu_tenure);
                if key.reverse() != key {
                    self.memory.record(key, self.iteration, config.tabu_tenure);
                }

                match selection {
                    Selection::Aspiration => self.aspiration_moves += 1,
                    Selection::Forced => {
                        self.forced_moves += 1;
                        debug!(
                            iteration = self.iteration,
                            candidates = candidates.len(),
                            "all candidates tabu, forcing cheapest"
                        );
                    }
                    _ => {}
                }
                trace!(iteration = self.iteration, ?mv, ?selection, cost = self.current_cost);

                if self.current_cost < self.best_cost {
                    self.best = self.current.clone();
                    self.best_cost = self.current_cost;
                    self.best_iteration = self.iteration + 1;
                    debug!(
                        iteration = self.iteration,
                        best_cost = self.best_cost,
                        "new best solution"
                    );
                }

                (Some(mv), selection)
            }
            None => {
                self.stalled_iterations += 1;
                debug!(iteration = self.iteration, "empty neighborhood, iteration stalled");
                (None, Selection::Stalled)
            }
        };

        self.cost_history.push(self.best_cost);
        self.iteration += 1;
        if self.iteration >= config.iterations {
            self.phase = SearchPhase::Terminated;
        }

        outcome
    }

    /// Applies `mv` and refreshes the cached load and cost of the two
    /// routes it touches.
    fn apply(&mut self, mv: Move) {
        let owner = self.owner;
        mv.apply(&mut self.current);

        let (a, b) = mv.routes();
        for route in [a, b] {
            let stops = self.current.route(route);
            self.loads[route] = stops
                .iter()
                .fold(0.0, |load, c| load + owner.instance.cities()[c.index()].demand);
            self.route_costs[route] = owner.cost.route_cost_unchecked(stops);
        }
        self.current_cost = total_cost(self.route_costs.iter().copied());
    }

    fn finish(self) -> TabuResult {
        debug_assert_eq!(self.phase, SearchPhase::Terminated);
        info!(
            best_cost = self.best_cost,
            best_iteration = self.best_iteration,
            aspiration_moves = self.aspiration_moves,
            forced_moves = self.forced_moves,
            stalled = self.stalled_iterations,
            "tabu search finished"
        );

        TabuResult {
            best: self.best,
            best_cost: self.best_cost,
            iterations: self.iteration,
            best_iteration: self.best_iteration,
            cost_history: self.cost_history,
            aspiration_moves: self.aspiration_moves,
            forced_moves: self.forced_moves,
            stalled_iterations: self.stalled_iterations,
        }
    }
}

/// Picks the candidate to apply.
///
/// The cheapest admissible candidate wins, where admissible means not tabu,
/// or tabu but strictly cheaper than `best_cost` with `aspiration` enabled.
/// With no admissible candidate the cheapest tabu one is forced. Ties go to
/// the earliest candidate. Returns `None` only for an empty neighborhood.
fn select(
    candidates: &[Candidate],
    memory: &TabuMemory,
    iteration: usize,
    best_cost: f64,
    aspiration: bool,
) -> Option<(usize, Selection)> {
    let mut admissible: Option<(usize, Selection)> = None;
    let mut admissible_cost = f64::INFINITY;
    let mut fallback: Option<usize> = None;
    let mut fallback_cost = f64::INFINITY;

    for (index, candidate) in candidates.iter().enumerate() {
        let selection = if !memory.is_tabu(&candidate.key(), iteration) {
            Selection::Admissible
        } else if aspiration && candidate.cost < best_cost {
            Selection::Aspiration
        } else {
            if fallback.is_none() || candidate.cost < fallback_cost {
                fallback = Some(index);
                fallback_cost = candidate.cost;
            }
            continue;
        };

        if admissible.is_none() || candidate.cost < admissible_cost {
            admissible = Some((index, selection));
            admissible_cost = candidate.cost;
        }
    }

    admissible.or(fallback.map(|index| (index, Selection::Forced)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::Euclidean;
    use crate::error::VrpError;
    use crate::problem::CityId;
    use crate::tabu::{InsertionPolicy, MoveKey, NeighborhoodKind};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn four_clients() -> Vec<City> {
        vec![
            City::depot("depot", 0.0, 0.0),
            City::new("a", 10.0, 0.0, 10.0),
            City::new("b", 12.0, 1.0, 10.0),
            City::new("c", -10.0, 0.0, 10.0),
            City::new("d", -11.0, 2.0, 10.0),
        ]
    }

    fn four_client_config() -> FleetConfig {
        FleetConfig::default()
            .with_vehicles(2)
            .with_capacity(25.0)
            .with_tabu_tenure(2)
            .with_iterations(20)
            .with_seed(2024)
    }

    fn grid(n: usize) -> Vec<City> {
        let mut cities = vec![City::depot("depot", 0.0, 0.0)];
        for i in 0..n {
            let x = ((i * 7) % 11) as f64 - 5.0;
            let y = ((i * 3) % 13) as f64 - 6.0;
            cities.push(City::new(format!("c{i}"), x, y, (i % 4 + 1) as f64));
        }
        cities
    }

    fn relocate(client: usize, from: usize, to: usize, cost: f64) -> Candidate {
        Candidate {
            mv: Move::Relocate {
                client: CityId::new(client),
                from_route: from,
                from_pos: 0,
                to_route: to,
                to_pos: 0,
            },
            cost,
        }
    }

    fn assert_invariants(search: &TabuSearch, solution: &Solution) {
        let violations = solution.violations(search.instance(), search.config().capacity);
        assert!(violations.is_empty(), "violations: {violations:?}");
        assert_eq!(solution.num_routes(), search.config().vehicles);
    }

    // ---- Selection policy ----

    #[test]
    fn test_select_cheapest_non_tabu() {
        let memory = TabuMemory::new();
        let candidates = [relocate(1, 0, 1, 9.0), relocate(2, 0, 1, 7.0)];
        assert_eq!(
            select(&candidates, &memory, 0, 5.0, true),
            Some((1, Selection::Admissible))
        );
    }

    #[test]
    fn test_select_ties_go_to_first() {
        let memory = TabuMemory::new();
        let candidates = [
            relocate(1, 0, 1, 7.0),
            relocate(2, 0, 1, 7.0),
            relocate(3, 0, 1, 7.0),
        ];
        assert_eq!(
            select(&candidates, &memory, 0, 5.0, true),
            Some((0, Selection::Admissible))
        );
    }

    #[test]
    fn test_select_skips_tabu() {
        let mut memory = TabuMemory::new();
        memory.record(relocate(2, 0, 1, 0.0).key(), 0, 3);
        let candidates = [relocate(1, 0, 1, 9.0), relocate(2, 0, 1, 7.0)];
        assert_eq!(
            select(&candidates, &memory, 1, 5.0, true),
            Some((0, Selection::Admissible))
        );
    }

    #[test]
    fn test_select_aspiration_overrides_tabu() {
        let mut memory = TabuMemory::new();
        memory.record(relocate(2, 0, 1, 0.0).key(), 0, 3);
        let candidates = [relocate(1, 0, 1, 9.0), relocate(2, 0, 1, 4.0)];
        assert_eq!(
            select(&candidates, &memory, 1, 5.0, true),
            Some((1, Selection::Aspiration))
        );
        assert_eq!(
            select(&candidates, &memory, 1, 5.0, false),
            Some((0, Selection::Admissible))
        );
    }

    #[test]
    fn test_select_aspiration_needs_strict_improvement() {
        let mut memory = TabuMemory::new();
        memory.record(relocate(2, 0, 1, 0.0).key(), 0, 3);
        let candidates = [relocate(1, 0, 1, 9.0), relocate(2, 0, 1, 5.0)];
        assert_eq!(
            select(&candidates, &memory, 1, 5.0, true),
            Some((0, Selection::Admissible))
        );
    }

    #[test]
    fn test_select_forced_when_all_tabu() {
        let mut memory = TabuMemory::new();
        memory.record(relocate(1, 0, 1, 0.0).key(), 0, 3);
        memory.record(relocate(2, 0, 1, 0.0).key(), 0, 3);
        let candidates = [relocate(1, 0, 1, 9.0), relocate(2, 0, 1, 8.0)];
        assert_eq!(
            select(&candidates, &memory, 1, 5.0, true),
            Some((1, Selection::Forced))
        );
    }

    #[test]
    fn test_select_empty() {
        assert_eq!(select(&[], &TabuMemory::new(), 0, 0.0, true), None);
    }

    // ---- Search loop ----

    #[test]
    fn test_end_to_end_deterministic() {
        let run = || {
            TabuSearch::new(four_clients(), four_client_config(), &Euclidean)
                .unwrap()
                .run()
                .unwrap()
        };
        let first = run();
        let second = run();

        assert_eq!(first.best, second.best);
        assert_eq!(first.best_cost.to_bits(), second.best_cost.to_bits());
        assert_eq!(first.cost_history, second.cost_history);

        let search = TabuSearch::new(four_clients(), four_client_config(), &Euclidean).unwrap();
        assert_invariants(&search, &first.best);
        for load in first.best.loads(search.instance()) {
            assert!(load <= 25.0);
        }
        let recomputed = search.cost_model().solution_cost(&first.best).unwrap();
        assert_eq!(recomputed.to_bits(), first.best_cost.to_bits());
    }

    #[test]
    fn test_swap_finds_clustered_split() {
        // East pair and west pair: the optimum serves each pair with one vehicle.
        let config = four_client_config()
            .with_neighborhood(NeighborhoodKind::Mixed)
            .with_iterations(50);
        let search = TabuSearch::new(four_clients(), config, &Euclidean).unwrap();
        let result = search.run().unwrap();

        let east = [CityId::new(1), CityId::new(2)];
        for route in result.best.routes() {
            let in_east = route.iter().filter(|c| east.contains(c)).count();
            assert!(in_east == 0 || in_east == route.len(), "mixed route {route:?}");
        }
    }

    #[test]
    fn test_infeasible_never_returns_solution() {
        let cities = vec![
            City::depot("depot", 0.0, 0.0),
            City::new("heavy", 1.0, 0.0, 10.0),
        ];
        let config = FleetConfig::default().with_vehicles(1).with_capacity(5.0);
        let search = TabuSearch::new(cities, config, &Euclidean).unwrap();
        let mut observed = 0;
        let result = search.run_with_observer(|_| observed += 1);
        assert!(matches!(result, Err(VrpError::Infeasible(_))));
        assert_eq!(observed, 0);
    }

    #[test]
    fn test_configuration_rejected_before_search() {
        let result = TabuSearch::new(four_clients(), FleetConfig::default().with_vehicles(0), &Euclidean);
        assert!(matches!(result, Err(VrpError::Configuration(_))));
    }

    #[test]
    fn test_more_vehicles_than_clients() {
        let config = FleetConfig::default()
            .with_vehicles(8)
            .with_capacity(100.0)
            .with_iterations(30);
        let search = TabuSearch::new(four_clients(), config, &Euclidean).unwrap();
        let result = search
            .run_with_observer(|report| assert_eq!(report.current.num_served(), 4))
            .unwrap();

        assert_invariants(&search, &result.best);
        let empty: Vec<_> = result.best.routes().iter().filter(|r| r.is_empty()).collect();
        assert!(empty.len() >= 4);
        for route in empty {
            assert_eq!(search.cost_model().route_cost(route).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_single_vehicle_stalls_every_iteration() {
        let config = FleetConfig::default()
            .with_vehicles(1)
            .with_capacity(100.0)
            .with_iterations(5);
        let search = TabuSearch::new(four_clients(), config, &Euclidean).unwrap();
        let result = search.run().unwrap();
        assert_eq!(result.iterations, 5);
        assert_eq!(result.stalled_iterations, 5);
        assert_eq!(result.best_iteration, 0);
        assert_eq!(result.cost_history.len(), 5);
    }

    #[test]
    fn test_invariants_hold_every_iteration() {
        for kind in [
            NeighborhoodKind::Relocate,
            NeighborhoodKind::Swap,
            NeighborhoodKind::Mixed,
        ] {
            let config = FleetConfig::default()
                .with_vehicles(4)
                .with_capacity(12.0)
                .with_tabu_tenure(5)
                .with_iterations(60)
                .with_neighborhood(kind)
                .with_insertion(InsertionPolicy::Cheapest);
            let search = TabuSearch::new(grid(15), config, &Euclidean).unwrap();
            let mut best_seen = f64::INFINITY;
            search
                .run_with_observer(|report| {
                    assert_invariants(&search, report.current);
                    let exact = search.cost_model().solution_cost(report.current).unwrap();
                    assert_eq!(exact.to_bits(), report.current_cost.to_bits());
                    assert!(report.best_cost <= best_seen);
                    assert!(report.best_cost <= report.current_cost);
                    best_seen = report.best_cost;
                })
                .unwrap();
        }
    }

    #[test]
    fn test_inverse_not_selected_within_tenure() {
        let tenure = 4;
        let config = FleetConfig::default()
            .with_vehicles(3)
            .with_capacity(20.0)
            .with_tabu_tenure(tenure)
            .with_iterations(80);
        let search = TabuSearch::new(grid(12), config, &Euclidean).unwrap();

        let mut recorded: HashMap<MoveKey, usize> = HashMap::new();
        search
            .run_with_observer(|report| {
                let Some(mv) = report.applied else { return };
                let key = mv.key();
                if report.selection == Selection::Admissible {
                    if let Some(&t) = recorded.get(&key) {
                        assert!(
                            report.iteration > t + tenure,
                            "{key:?} recorded at {t} reselected at {}",
                            report.iteration
                        );
                    }
                }
                recorded.insert(key.reverse(), report.iteration);
                recorded.insert(key, report.iteration);
            })
            .unwrap();
    }

    #[test]
    fn test_aspiration_strictly_improves_best() {
        for kind in [
            NeighborhoodKind::Relocate,
            NeighborhoodKind::Swap,
            NeighborhoodKind::Mixed,
        ] {
            for seed in 0..40 {
                let config = FleetConfig::default()
                    .with_vehicles(3)
                    .with_capacity(10.0)
                    .with_tabu_tenure(3)
                    .with_iterations(40)
                    .with_neighborhood(kind)
                    .with_seed(seed);
                let search = TabuSearch::new(grid(9), config, &Euclidean).unwrap();

                let mut rng = StdRng::seed_from_u64(seed);
                let initial =
                    random_solution(search.instance(), 3, 10.0, &mut rng).unwrap();
                let mut previous_best = search.cost_model().solution_cost(&initial).unwrap();

                search
                    .run_with_observer(|report| {
                        let exact = search.cost_model().solution_cost(report.current).unwrap();
                        assert_eq!(exact.to_bits(), report.current_cost.to_bits());
                        if report.selection == Selection::Aspiration {
                            assert!(
                                report.current_cost < previous_best,
                                "{kind:?} seed {seed} iteration {}: {} does not beat {}",
                                report.iteration,
                                report.current_cost,
                                previous_best
                            );
                        }
                        previous_best = report.best_cost;
                    })
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let config = FleetConfig::default()
            .with_vehicles(3)
            .with_capacity(15.0)
            .with_iterations(100)
            .with_seed(7);
        let result = TabuSearch::new(grid(10), config, &Euclidean)
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(result.cost_history.len(), 100);
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
        assert_eq!(result.cost_history.last().copied(), Some(result.best_cost));
        assert!(result.best_iteration <= result.iterations);
    }

    #[test]
    fn test_search_improves_on_initial_solution() {
        let config = FleetConfig::default()
            .with_vehicles(4)
            .with_capacity(20.0)
            .with_iterations(150)
            .with_neighborhood(NeighborhoodKind::Mixed)
            .with_insertion(InsertionPolicy::Cheapest)
            .with_seed(11);
        let search = TabuSearch::new(grid(20), config.clone(), &Euclidean).unwrap();

        let mut rng = StdRng::seed_from_u64(config.seed);
        let initial =
            random_solution(search.instance(), config.vehicles, config.capacity, &mut rng).unwrap();
        let initial_cost = search.cost_model().solution_cost(&initial).unwrap();

        let result = search.run().unwrap();
        assert!(result.best_cost < initial_cost);
    }

    #[test]
    fn test_legacy_depot_distances() {
        let cities = vec![
            City::with_depot_distance("Krakow", 0.0, 0.0),
            City::with_depot_distance("Kielce", 30.0, 1.0),
            City::with_depot_distance("Gliwice", 40.0, 1.0),
            City::with_depot_distance("Tarnow", 70.0, 1.0),
            City::with_depot_distance("Gdansk", 200.0, 1.0),
        ];
        let config = FleetConfig::default()
            .with_vehicles(2)
            .with_capacity(1000.0)
            .with_iterations(100)
            .with_neighborhood(NeighborhoodKind::Mixed)
            .with_insertion(InsertionPolicy::Cheapest);
        let result = TabuSearch::new(cities, config, &Euclidean)
            .unwrap()
            .run()
            .unwrap();
        // On a line a route visiting its stops outward then back costs twice
        // its farthest stop, so one vehicle serving everything is optimal.
        assert!((result.best_cost - 400.0).abs() < 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_partition_capacity_and_determinism(
            points in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0, 1u32..10), 1..12),
            vehicles in 1usize..5,
            tenure in 0usize..6,
            seed in any::<u64>(),
        ) {
            let mut cities = vec![City::depot("depot", 0.0, 0.0)];
            for (i, &(x, y, demand)) in points.iter().enumerate() {
                cities.push(City::new(format!("c{i}"), x, y, f64::from(demand)));
            }
            let total: f64 = points.iter().map(|p| f64::from(p.2)).sum();
            let config = FleetConfig::default()
                .with_vehicles(vehicles)
                .with_capacity(total)
                .with_tabu_tenure(tenure)
                .with_iterations(25)
                .with_neighborhood(NeighborhoodKind::Mixed)
                .with_seed(seed);

            let search = TabuSearch::new(cities, config, &Euclidean).unwrap();
            let mut previous_best = f64::INFINITY;
            let first = search.run_with_observer(|report| {
                assert!(report.current.violations(search.instance(), total).is_empty());
                assert!(report.best_cost <= previous_best);
                previous_best = report.best_cost;
            }).unwrap();
            let second = search.run().unwrap();

            prop_assert!(first.best.violations(search.instance(), total).is_empty());
            prop_assert_eq!(&first.best, &second.best);
            prop_assert_eq!(first.best_cost.to_bits(), second.best_cost.to_bits());
        }
    }
}
