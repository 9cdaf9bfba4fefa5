use rand::Rng;
use serde_derive::*;

pub mod allocation;
pub mod config;
pub mod params;
pub mod placement;
pub mod plot;
pub mod writer;

pub use allocation::AllocationStats;
pub use config::GeneratorConfig;
pub use placement::Bounds;

/// Grid coordinate pair, `[x, y]`.
pub type Point = [i32; 2];

pub fn distance(a: Point, b: Point) -> f64 {
    let diff = [a[0] - b[0], a[1] - b[1]].map(|x| x as f64);
    f64::sqrt(diff[0].powi(2) + diff[1].powi(2))
}

/// A complete generated problem instance, ready to be written out.
///
/// `capacity` and `cost` are the final per-type values, including any
/// expansions performed while placing cities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub n_locations: usize,
    pub n_cities: usize,
    pub n_types: usize,
    pub demand: Vec<i64>,
    pub city_positions: Vec<Point>,
    pub facility_positions: Vec<Point>,
    pub coverage_radius: Vec<i64>,
    pub capacity: Vec<i64>,
    pub cost: Vec<i64>,
    pub min_separation: f64,
}

/// Runs the whole pipeline: parameter sampling, facility placement, city
/// allocation. The caller owns the random source, so a seeded rng gives a
/// reproducible instance.
pub fn generate(config: &GeneratorConfig, rng: &mut impl Rng) -> (Instance, AllocationStats) {
    let mut params = params::sample_params(config, rng);
    let mut bounds = Bounds::new(config.bounds[0], config.bounds[1]);
    let facility_positions = placement::place_separated(config.n_locations, &mut bounds, config, rng);
    let mut facilities = allocation::initial_facilities(&facility_positions, &params);
    let (city_positions, stats) =
        allocation::place_cities(config, &mut params, &mut facilities, &bounds, rng);

    let instance = Instance {
        n_locations: config.n_locations,
        n_cities: config.n_cities,
        n_types: config.n_types,
        demand: params.demand,
        city_positions,
        facility_positions,
        coverage_radius: params.coverage_radius,
        capacity: params.capacity,
        cost: params.cost,
        min_separation: config.min_separation,
    };
    (instance, stats)
}
