//! Tabu Search over vehicle routes.
//!
//! Each iteration scores every capacity-feasible relocation (and, when
//! configured, swap) of the current routes and applies the cheapest one the
//! tabu memory allows, even when it makes the solution worse. Undoing a move
//! stays forbidden for `tabu_tenure` iterations unless it would beat the best
//! cost found so far.
//!
//! See Gendreau, Hertz & Laporte (1994), "A Tabu Search Heuristic for the
//! Vehicle Routing Problem", *Management Science* 40(10).

mod config;
mod memory;
mod neighborhood;
mod runner;
mod types;

pub use config::{FleetConfig, InsertionPolicy, NeighborhoodKind};
pub use memory::TabuMemory;
pub use runner::{IterationReport, SearchPhase, TabuResult, TabuSearch};
pub use types::{Candidate, Move, MoveKey, Selection};
