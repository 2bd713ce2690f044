//! Validated, immutable city set.

use std::collections::HashSet;

use super::city::{City, CityId};
use crate::error::{Result, VrpError};

/// The cities of one routing problem, with the depot identified.
///
/// # Examples
///
/// ```
/// use tabu_vrp::problem::{City, Instance};
///
/// let instance = Instance::new(vec![
///     City::depot("depot", 0.0, 0.0),
///     City::new("a", 1.0, 0.0, 5.0),
///     City::new("b", 0.0, 1.0, 3.0),
/// ])
/// .unwrap();
/// assert_eq!(instance.depot().index(), 0);
/// assert_eq!(instance.num_clients(), 2);
/// assert!((instance.total_demand() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    cities: Vec<City>,
    depot: CityId,
    clients: Vec<CityId>,
}

impl Instance {
    /// Validates `cities` and locates the depot.
    ///
    /// Fails with [`VrpError::Configuration`] if the set is empty, has no
    /// or several zero-demand cities, repeats a name, or carries a
    /// negative or non-finite demand or coordinate.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(VrpError::Configuration("city set is empty".into()));
        }

        let mut names = HashSet::with_capacity(cities.len());
        let mut depot: Option<usize> = None;

        for (index, city) in cities.iter().enumerate() {
            if !names.insert(city.name.as_str()) {
                return Err(VrpError::Configuration(format!(
                    "duplicate city name '{}'",
                    city.name
                )));
            }
            if !city.demand.is_finite() || city.demand < 0.0 {
                return Err(VrpError::Configuration(format!(
                    "city '{}' has invalid demand {}",
                    city.name, city.demand
                )));
            }
            if !city.position.x.is_finite() || !city.position.y.is_finite() {
                return Err(VrpError::Configuration(format!(
                    "city '{}' has a non-finite position",
                    city.name
                )));
            }
            if city.is_depot() {
                if let Some(first) = depot {
                    return Err(VrpError::Configuration(format!(
                        "several zero-demand cities: '{}' and '{}'",
                        cities[first].name, city.name
                    )));
                }
                depot = Some(index);
            }
        }

        let depot = depot
            .map(CityId::new)
            .ok_or_else(|| VrpError::Configuration("no zero-demand depot city".into()))?;
        let clients = (0..cities.len())
            .map(CityId::new)
            .filter(|&id| id != depot)
            .collect();

        Ok(Self {
            cities,
            depot,
            clients,
        })
    }

    /// The depot.
    pub fn depot(&self) -> CityId {
        self.depot
    }

    /// Non-depot cities in ascending id order.
    pub fn clients(&self) -> &[CityId] {
        &self.clients
    }

    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    /// Number of cities, depot included.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`: an instance holds at least its depot.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Looks up a city by id.
    pub fn city(&self, id: CityId) -> Result<&City> {
        self.cities.get(id.index()).ok_or(VrpError::InvalidCity {
            id: id.index(),
            len: self.cities.len(),
        })
    }

    /// Demand of a city.
    pub fn demand(&self, id: CityId) -> Result<f64> {
        self.city(id).map(|c| c.demand)
    }

    /// Sum of all client demands.
    pub fn total_demand(&self) -> f64 {
        self.cities.iter().map(|c| c.demand).sum()
    }

    /// Finds a city by name.
    pub fn find(&self, name: &str) -> Option<CityId> {
        self.cities
            .iter()
            .position(|c| c.name == name)
            .map(CityId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<City> {
        vec![
            City::new("a", 1.0, 0.0, 4.0),
            City::depot("depot", 0.0, 0.0),
            City::new("b", 2.0, 0.0, 6.0),
        ]
    }

    #[test]
    fn test_depot_need_not_be_first() {
        let instance = Instance::new(cities()).unwrap();
        assert_eq!(instance.depot(), CityId::new(1));
        assert_eq!(instance.clients(), &[CityId::new(0), CityId::new(2)]);
        assert_eq!(instance.find("b"), Some(CityId::new(2)));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            Instance::new(vec![]),
            Err(VrpError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_missing_depot() {
        let result = Instance::new(vec![City::new("a", 0.0, 0.0, 1.0)]);
        assert!(matches!(result, Err(VrpError::Configuration(_))));
    }

    #[test]
    fn test_rejects_two_depots() {
        let result = Instance::new(vec![
            City::depot("d1", 0.0, 0.0),
            City::depot("d2", 1.0, 0.0),
        ]);
        let Err(VrpError::Configuration(message)) = result else {
            panic!("expected a configuration error");
        };
        assert!(message.contains("'d1'") && message.contains("'d2'"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Instance::new(vec![
            City::depot("d", 0.0, 0.0),
            City::new("x", 1.0, 0.0, 1.0),
            City::new("x", 2.0, 0.0, 1.0),
        ]);
        assert!(matches!(result, Err(VrpError::Configuration(_))));
    }

    #[test]
    fn test_rejects_negative_demand() {
        let result = Instance::new(vec![
            City::depot("d", 0.0, 0.0),
            City::new("x", 1.0, 0.0, -1.0),
        ]);
        assert!(matches!(result, Err(VrpError::Configuration(_))));
    }

    #[test]
    fn test_unknown_city_lookup() {
        let instance = Instance::new(cities()).unwrap();
        assert_eq!(
            instance.demand(CityId::new(3)),
            Err(VrpError::InvalidCity { id: 3, len: 3 })
        );
    }
}
