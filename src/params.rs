use log::debug;
use rand::Rng;

use crate::config::GeneratorConfig;

/// One accepted parameter draw. Capacity and cost are per facility type and
/// may still grow during allocation; demand and radii are final.
#[derive(Debug, Clone)]
pub struct ProblemParams {
    pub demand: Vec<i64>,
    pub capacity: Vec<i64>,
    pub cost: Vec<i64>,
    pub coverage_radius: Vec<i64>,
}

impl ProblemParams {
    /// Type with the largest coverage radius; its radius defines the primary
    /// and secondary bands for every facility.
    pub fn dominant_type(&self) -> usize {
        argmax(&self.coverage_radius)
    }

    /// Type with the largest capacity; every placed facility starts from its
    /// capacity, and expansions are booked against it.
    pub fn max_capacity_type(&self) -> usize {
        argmax(&self.capacity)
    }

    pub fn is_feasible(&self, n_locations: usize, demand_scale: f64) -> bool {
        let max_cap = self.capacity.iter().copied().max().unwrap_or(0);
        let total_scaled: f64 = self.demand.iter().map(|&d| d as f64 * demand_scale).sum();
        (max_cap * n_locations as i64) as f64 > total_scaled
    }
}

fn argmax(values: &[i64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Draws demand, capacity, cost and coverage radius vectors, redrawing the
/// whole set until the feasibility gate passes: the largest single-type
/// capacity across all locations must exceed the scaled total demand.
pub fn sample_params(config: &GeneratorConfig, rng: &mut impl Rng) -> ProblemParams {
    loop {
        let params = draw_once(config, rng);
        if params.is_feasible(config.n_locations, config.demand_scale) {
            return params;
        }
        debug!("parameter draw infeasible, redrawing");
    }
}

fn draw_once(config: &GeneratorConfig, rng: &mut impl Rng) -> ProblemParams {
    let demand = (0..config.n_cities)
        .map(|_| rng.random_range(config.demand_range[0]..config.demand_range[1]))
        .collect();
    let capacity: Vec<i64> = (0..config.n_types)
        .map(|_| rng.random_range(config.capacity_range[0]..config.capacity_range[1]))
        .collect();
    let cost = capacity
        .iter()
        .map(|&cap| cap / 2 + rng.random_range(0..2))
        .collect();
    let coverage_radius = (0..config.n_types)
        .map(|_| rng.random_range(config.radius_range[0]..config.radius_range[1]))
        .collect();
    ProblemParams {
        demand,
        capacity,
        cost,
        coverage_radius,
    }
}
