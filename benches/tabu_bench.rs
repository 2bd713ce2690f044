//! Criterion benchmarks for the Tabu Search engine.
//!
//! Uses synthetic clustered instances to measure neighborhood generation
//! and selection cost as clients and vehicles grow.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabu_vrp::cost::Euclidean;
use tabu_vrp::problem::City;
use tabu_vrp::tabu::{FleetConfig, InsertionPolicy, NeighborhoodKind, TabuSearch};

// ===========================================================================
// Random instance: clients in [-100, 100]^2 with demand 1..=10
// ===========================================================================

fn random_cities(clients: usize, seed: u64) -> Vec<City> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cities = vec![City::depot("depot", 0.0, 0.0)];
    for i in 0..clients {
        cities.push(City::new(
            format!("c{i}"),
            rng.random_range(-100.0..100.0),
            rng.random_range(-100.0..100.0),
            f64::from(rng.random_range(1..=10u32)),
        ));
    }
    cities
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_relocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabu_relocate");
    group.sample_size(10);

    for (clients, vehicles) in [(20usize, 4usize), (50, 8), (100, 12)] {
        let config = FleetConfig::default()
            .with_vehicles(vehicles)
            .with_capacity(clients as f64 * 11.0 / vehicles as f64)
            .with_tabu_tenure(7)
            .with_iterations(100)
            .with_seed(42);
        let search = TabuSearch::new(random_cities(clients, 42), config, &Euclidean).unwrap();
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_v{}", clients, vehicles), clients),
            &search,
            |b, s| {
                b.iter(|| {
                    let result = s.run().unwrap();
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_mixed_cheapest(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabu_mixed_cheapest");
    group.sample_size(10);

    for &clients in &[20usize, 50] {
        let config = FleetConfig::default()
            .with_vehicles(5)
            .with_capacity(clients as f64 * 11.0 / 5.0)
            .with_iterations(50)
            .with_neighborhood(NeighborhoodKind::Mixed)
            .with_insertion(InsertionPolicy::Cheapest)
            .with_seed(42);
        let search = TabuSearch::new(random_cities(clients, 7), config, &Euclidean).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(clients), &search, |b, s| {
            b.iter(|| black_box(s.run().unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_relocate, bench_mixed_cheapest);
criterion_main!(benches);
