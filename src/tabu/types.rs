//! Moves, tabu keys and evaluated candidates.

use crate::problem::CityId;
use crate::solution::Solution;

/// Identity of a move in the tabu memory.
///
/// Relocation keys are directional, so the inverse of moving a client
/// from route 0 to route 1 is a distinct key. Swap keys are an unordered
/// client pair (stored with `first < second`) and are their own inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Relocate {
        client: CityId,
        from: usize,
        to: usize,
    },
    Swap {
        first: CityId,
        second: CityId,
    },
}

impl MoveKey {
    /// Canonical key for exchanging `a` and `b`.
    pub fn swap(a: CityId, b: CityId) -> Self {
        if a <= b {
            MoveKey::Swap {
                first: a,
                second: b,
            }
        } else {
            MoveKey::Swap {
                first: b,
                second: a,
            }
        }
    }

    /// Key of the move that undoes this one.
    pub fn reverse(self) -> Self {
        match self {
            MoveKey::Relocate { client, from, to } => MoveKey::Relocate {
                client,
                from: to,
                to: from,
            },
            swap @ MoveKey::Swap { .. } => swap,
        }
    }
}

/// A single-step transformation of a [`Solution`].
///
/// Positions refer to the solution the move was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Take `client` out of `from_route` at `from_pos` and insert it into
    /// `to_route` at `to_pos` (an index into the target route before
    /// insertion).
    Relocate {
        client: CityId,
        from_route: usize,
        from_pos: usize,
        to_route: usize,
        to_pos: usize,
    },
    /// Exchange `first` (in `first_route` at `first_pos`) with `second`
    /// (in `second_route` at `second_pos`).
    Swap {
        first: CityId,
        first_route: usize,
        first_pos: usize,
        second: CityId,
        second_route: usize,
        second_pos: usize,
    },
}

impl Move {
    /// Tabu identity of this move.
    pub fn key(&self) -> MoveKey {
        match *self {
            Move::Relocate {
                client,
                from_route,
                to_route,
                ..
            } => MoveKey::Relocate {
                client,
                from: from_route,
                to: to_route,
            },
            Move::Swap { first, second, .. } => MoveKey::swap(first, second),
        }
    }

    /// The two routes this move touches.
    pub fn routes(&self) -> (usize, usize) {
        match *self {
            Move::Relocate {
                from_route,
                to_route,
                ..
            } => (from_route, to_route),
            Move::Swap {
                first_route,
                second_route,
                ..
            } => (first_route, second_route),
        }
    }

    /// Applies the move to the solution it was generated from.
    pub(crate) fn apply(&self, solution: &mut Solution) {
        let routes = solution.routes_mut();
        match *self {
            Move::Relocate {
                client,
                from_route,
                from_pos,
                to_route,
                to_pos,
            } => {
                let removed = routes[from_route].remove(from_pos);
                debug_assert_eq!(removed, client);
                routes[to_route].insert(to_pos, removed);
            }
            Move::Swap {
                first,
                first_route,
                first_pos,
                second,
                second_route,
                second_pos,
            } => {
                debug_assert_eq!(routes[first_route][first_pos], first);
                debug_assert_eq!(routes[second_route][second_pos], second);
                routes[first_route][first_pos] = second;
                routes[second_route][second_pos] = first;
            }
        }
    }
}

/// A generated move with the total cost of the solution it leads to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub mv: Move,
    pub cost: f64,
}

impl Candidate {
    pub fn key(&self) -> MoveKey {
        self.mv.key()
    }
}

/// How the move of an iteration was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Best non-tabu candidate.
    Admissible,
    /// Tabu candidate admitted because it beats the best cost.
    Aspiration,
    /// Every candidate was tabu; the cheapest one was taken anyway.
    Forced,
    /// Empty neighborhood; the iteration applied nothing.
    Stalled,
}
