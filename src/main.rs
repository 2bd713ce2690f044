use std::{fs::File, io::BufReader, path::PathBuf};

use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, CellAlignment, Table};
use tabu_vrp::cost::Euclidean;
use tabu_vrp::problem::City;
use tabu_vrp::tabu::{FleetConfig, InsertionPolicy, NeighborhoodKind, TabuSearch};
use tracing::info;

/// Solve a capacitated vehicle routing problem with Tabu Search.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// JSON array of cities (`name`, `demand`, `position {x, y}`); the
    /// zero-demand city is the depot. Without it, a built-in set of Polish
    /// cities given by distance from Krakow is solved.
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(short, long, default_value_t = 5)]
    vehicles: usize,

    #[arg(short, long, default_value_t = 1000.0)]
    capacity: f64,

    /// Iterations a reversed move stays forbidden
    #[arg(short, long, default_value_t = 10)]
    tenure: usize,

    #[arg(short = 'n', long, default_value_t = 200)]
    iterations: usize,

    #[arg(short, long, default_value_t = 123)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Moves::Relocate)]
    neighborhood: Moves,

    #[arg(long, value_enum, default_value_t = Insertion::Append)]
    insertion: Insertion,

    /// Disable the aspiration criterion
    #[arg(long)]
    no_aspiration: bool,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Moves {
    Relocate,
    Swap,
    Mixed,
}

#[derive(Clone, Copy, ValueEnum)]
enum Insertion {
    Append,
    Cheapest,
}

impl From<Moves> for NeighborhoodKind {
    fn from(moves: Moves) -> Self {
        match moves {
            Moves::Relocate => NeighborhoodKind::Relocate,
            Moves::Swap => NeighborhoodKind::Swap,
            Moves::Mixed => NeighborhoodKind::Mixed,
        }
    }
}

impl From<Insertion> for InsertionPolicy {
    fn from(insertion: Insertion) -> Self {
        match insertion {
            Insertion::Append => InsertionPolicy::Append,
            Insertion::Cheapest => InsertionPolicy::Cheapest,
        }
    }
}

/// Distances from Krakow in kilometres; every client demands one unit.
const DEMO_CITIES: &[(&str, f64)] = &[
    ("Krakow", 0.0),
    ("Bialystok", 500.0),
    ("Bielsko-Biala", 50.0),
    ("Chrzanow", 400.0),
    ("Gdansk", 200.0),
    ("Gdynia", 100.0),
    ("Gliwice", 40.0),
    ("Gromnik", 200.0),
    ("Katowice", 300.0),
    ("Kielce", 30.0),
    ("Krosno", 60.0),
    ("Krynica", 50.0),
    ("Lublin", 60.0),
    ("Lodz", 160.0),
    ("Malbork", 100.0),
    ("NowyTarg", 120.0),
    ("Olsztyn", 300.0),
    ("Poznan", 100.0),
    ("Pulawy", 200.0),
    ("Radom", 100.0),
    ("Rzeszow", 60.0),
    ("Sandomierz", 200.0),
    ("Szczecin", 150.0),
    ("Szczucin", 60.0),
    ("SzklarskaPoreba", 50.0),
    ("Tarnow", 70.0),
    ("Warszawa", 200.0),
    ("Wieliczka", 90.0),
    ("Wroclaw", 40.0),
    ("Zakopane", 200.0),
    ("Zamosc", 300.0),
];

fn demo_cities() -> Vec<City> {
    DEMO_CITIES
        .iter()
        .enumerate()
        .map(|(i, &(name, distance))| {
            let demand = if i == 0 { 0.0 } else { 1.0 };
            City::with_depot_distance(name, distance, demand)
        })
        .collect()
}

fn load_cities(input: Option<PathBuf>) -> anyhow::Result<Vec<City>> {
    match input {
        Some(path) => {
            let f = File::open(&path)?;
            Ok(serde_json::from_reader(BufReader::new(f))?)
        }
        None => Ok(demo_cities()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let cities = load_cities(cli.input)?;
    let config = FleetConfig::default()
        .with_vehicles(cli.vehicles)
        .with_capacity(cli.capacity)
        .with_tabu_tenure(cli.tenure)
        .with_iterations(cli.iterations)
        .with_seed(cli.seed)
        .with_aspiration(!cli.no_aspiration)
        .with_neighborhood(cli.neighborhood.into())
        .with_insertion(cli.insertion.into());

    let search = TabuSearch::new(cities, config, &Euclidean)?;
    let result = search.run()?;

    let instance = search.instance();
    let model = search.cost_model();
    let loads = result.best.loads(instance);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Car", "Load", "Distance", "Route"]);
    for (vehicle, route) in result.best.routes().iter().enumerate() {
        let names: Vec<&str> = route
            .iter()
            .map(|&id| instance.city(id).map(|c| c.name.as_str()))
            .collect::<Result<_, _>>()?;
        table.add_row(vec![
            (vehicle + 1).to_string(),
            format!("{:.1}", loads[vehicle]),
            format!("{:.2}", model.route_cost(route)?),
            names.join(" -> "),
        ]);
    }
    for column in 0..3 {
        if let Some(column) = table.column_mut(column) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{table}");
    println!("Total distance: {:.2}", result.best_cost);

    info!(
        "Finished: routes = {}, cost = {:.2}, best found at iteration {} of {}",
        result.best.routes().iter().filter(|r| !r.is_empty()).count(),
        result.best_cost,
        result.best_iteration,
        result.iterations,
    );

    Ok(())
}
