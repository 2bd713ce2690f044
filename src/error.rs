//! Error taxonomy shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while building or solving a routing problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VrpError {
    /// The fleet cannot carry the demand: total demand exceeds total
    /// capacity, one client outweighs a vehicle, or random construction
    /// ran out of room.
    #[error("infeasible problem: {0}")]
    Infeasible(String),

    /// A city identifier outside the configured city set.
    #[error("invalid city id {id} (instance has {len} cities)")]
    InvalidCity {
        /// The offending identifier.
        id: usize,
        /// Number of cities in the instance.
        len: usize,
    },

    /// Rejected parameters or city data, reported before any search work.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VrpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = VrpError::InvalidCity { id: 9, len: 3 };
        assert_eq!(err.to_string(), "invalid city id 9 (instance has 3 cities)");

        let err = VrpError::Infeasible("total demand 30 exceeds fleet capacity 20".into());
        assert!(err.to_string().starts_with("infeasible problem"));

        let err = VrpError::Configuration("vehicles must be positive".into());
        assert!(err.to_string().contains("vehicles must be positive"));
    }
}
