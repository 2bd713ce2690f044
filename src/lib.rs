//! Capacitated single-depot vehicle routing solved with Tabu Search.
//!
//! Given a depot, a set of clients with demand and a fleet of identical
//! capacity-limited vehicles, assigns clients to vehicles and orders each
//! route to approximately minimize total round-trip distance.
//!
//! - **Problem** ([`problem`]): cities, the zero-demand depot and the
//!   validated [`Instance`](problem::Instance).
//! - **Cost model** ([`cost`]): a pluggable [`Metric`](cost::Metric)
//!   (Euclidean, Manhattan, precomputed matrix) tabulated once, plus
//!   depot-to-depot route costing.
//! - **Solution** ([`solution`]): one ordered route per vehicle, feasibility
//!   checks and seeded random construction.
//! - **Tabu Search** ([`tabu`]): relocation (and optional swap) moves,
//!   expiry-indexed tabu memory, aspiration and the deterministic search
//!   loop.
//!
//! # Determinism
//!
//! The seed only drives the initial assignment. Neighborhood order and
//! tie-breaking are fixed, so identical cities, configuration and seed give
//! bit-identical results, with or without the `parallel` feature.
//!
//! # Example
//!
//! ```
//! use tabu_vrp::cost::Euclidean;
//! use tabu_vrp::problem::City;
//! use tabu_vrp::tabu::{FleetConfig, TabuSearch};
//!
//! let cities = vec![
//!     City::depot("depot", 0.0, 0.0),
//!     City::new("north", 0.0, 5.0, 3.0),
//!     City::new("south", 0.0, -5.0, 3.0),
//!     City::new("east", 5.0, 0.0, 3.0),
//! ];
//! let config = FleetConfig::default()
//!     .with_vehicles(2)
//!     .with_capacity(6.0)
//!     .with_iterations(50);
//!
//! let result = TabuSearch::new(cities, config, &Euclidean)?.run()?;
//! assert_eq!(result.best.num_served(), 3);
//! # Ok::<(), tabu_vrp::VrpError>(())
//! ```

pub mod cost;
mod error;
pub mod problem;
pub mod solution;
pub mod tabu;

pub use error::{Result, VrpError};
