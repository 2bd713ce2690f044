//! Route and solution cost aggregation.

use super::metric::Metric;
use crate::error::{Result, VrpError};
use crate::problem::{CityId, Instance};
use crate::solution::Solution;

/// Relative tolerance when checking a metric for symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Dense distance table plus round-trip route costing.
///
/// Every route implicitly starts and ends at the depot.
///
/// # Examples
///
/// ```
/// use tabu_vrp::cost::{CostModel, Euclidean};
/// use tabu_vrp::problem::{City, CityId, Instance};
///
/// let instance = Instance::new(vec![
///     City::depot("depot", 0.0, 0.0),
///     City::new("a", 3.0, 4.0, 1.0),
/// ])
/// .unwrap();
/// let model = CostModel::new(&instance, &Euclidean).unwrap();
///
/// // depot -> a -> depot
/// let cost = model.route_cost(&[CityId::new(1)]).unwrap();
/// assert!((cost - 10.0).abs() < 1e-12);
/// assert_eq!(model.route_cost(&[]).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CostModel {
    depot: CityId,
    size: usize,
    table: Vec<f64>,
}

impl CostModel {
    /// Evaluates `metric` over every city pair of `instance`.
    ///
    /// The diagonal is fixed at zero. Fails with
    /// [`VrpError::Configuration`] when the metric yields a negative,
    /// non-finite or asymmetric distance.
    pub fn new<M: Metric + ?Sized>(instance: &Instance, metric: &M) -> Result<Self> {
        let size = instance.len();
        let mut table = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let (a, b) = (CityId::new(i), CityId::new(j));
                let forward = metric.distance(instance, a, b)?;
                let backward = metric.distance(instance, b, a)?;

                if !forward.is_finite() || forward < 0.0 {
                    return Err(VrpError::Configuration(format!(
                        "metric returned invalid distance {forward} between '{}' and '{}'",
                        instance.cities()[i].name,
                        instance.cities()[j].name
                    )));
                }
                let scale = forward.abs().max(backward.abs()).max(1.0);
                if (forward - backward).abs() > SYMMETRY_TOLERANCE * scale {
                    return Err(VrpError::Configuration(format!(
                        "metric is asymmetric between '{}' and '{}': {forward} vs {backward}",
                        instance.cities()[i].name,
                        instance.cities()[j].name
                    )));
                }

                table[i * size + j] = forward;
                table[j * size + i] = forward;
            }
        }

        Ok(Self {
            depot: instance.depot(),
            size,
            table,
        })
    }

    pub fn depot(&self) -> CityId {
        self.depot
    }

    /// Distance between two cities.
    pub fn distance(&self, from: CityId, to: CityId) -> Result<f64> {
        self.check(from)?;
        self.check(to)?;
        Ok(self.get(from, to))
    }

    /// Round-trip cost of a route: depot, clients in order, depot.
    pub fn route_cost(&self, route: &[CityId]) -> Result<f64> {
        for &id in route {
            self.check(id)?;
        }
        Ok(self.route_cost_unchecked(route))
    }

    /// Sum of all route costs.
    pub fn solution_cost(&self, solution: &Solution) -> Result<f64> {
        let mut costs = Vec::with_capacity(solution.num_routes());
        for route in solution.routes() {
            costs.push(self.route_cost(route)?);
        }
        Ok(total_cost(costs))
    }

    /// Table lookup for ids already validated against this model.
    #[inline]
    pub(crate) fn get(&self, from: CityId, to: CityId) -> f64 {
        self.table[from.index() * self.size + to.index()]
    }

    pub(crate) fn route_cost_unchecked(&self, route: &[CityId]) -> f64 {
        self.path_cost(route.iter().copied())
    }

    /// Round-trip cost of the stops yielded by `stops`, without allocating
    /// the route. Agrees bit for bit with [`CostModel::route_cost`].
    pub(crate) fn path_cost<I>(&self, stops: I) -> f64
    where
        I: IntoIterator<Item = CityId>,
    {
        let mut stops = stops.into_iter();
        let Some(first) = stops.next() else {
            return 0.0;
        };
        let mut inner = 0.0;
        let mut last = first;
        for stop in stops {
            inner += self.get(last, stop);
            last = stop;
        }
        self.get(self.depot, first) + inner + self.get(last, self.depot)
    }

    fn check(&self, id: CityId) -> Result<()> {
        if id.index() < self.size {
            Ok(())
        } else {
            Err(VrpError::InvalidCity {
                id: id.index(),
                len: self.size,
            })
        }
    }
}

/// Adds route costs left to right starting from `+0.0`.
///
/// Every total in the crate goes through here so that equal route costs
/// always give the same bits.
pub(crate) fn total_cost<I>(costs: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    costs.into_iter().fold(0.0, |acc, cost| acc + cost)
}
