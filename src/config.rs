use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde_derive::*;

/// All generator tunables. Defaults reproduce the reference constants, so an
/// empty config file (or none at all) generates the standard instance.
///
/// Integer ranges are half-open: `[lo, hi)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub n_locations: usize,
    pub n_cities: usize,
    pub n_types: usize,
    /// Minimum Euclidean distance between any two facilities.
    pub min_separation: f64,
    /// Initial sampling bounds `[max_x, max_y]`; placement may enlarge them.
    pub bounds: [i32; 2],
    /// Added to both bounds when a point cannot be placed within the budget.
    pub bounds_increment: i32,
    pub demand_range: [i64; 2],
    pub capacity_range: [i64; 2],
    pub radius_range: [i64; 2],
    /// Demand inflation factor used by the feasibility gate.
    pub demand_scale: f64,
    /// Fraction of a city's demand consumed by its secondary assignment.
    pub secondary_fraction: f64,
    /// Failed attempts tolerated before bounds growth / capacity expansion.
    pub attempt_budget: u32,
    /// Fixed rng seed; omit for OS entropy.
    pub seed: Option<u64>,
    pub output: PathBuf,
    /// Optional PNG rendering of the generated instance.
    pub plot: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            n_locations: 100,
            n_cities: 170,
            n_types: 10,
            min_separation: 1.1,
            bounds: [100, 100],
            bounds_increment: 10,
            demand_range: [0, 10],
            capacity_range: [5, 20],
            radius_range: [2, 10],
            demand_scale: 1.3,
            secondary_fraction: 0.3,
            attempt_budget: 1000,
            seed: None,
            output: PathBuf::from("output.txt"),
            plot: None,
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        let config: GeneratorConfig = serde_json::from_reader(file)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.n_locations == 0 || self.n_cities == 0 || self.n_types == 0 {
            bail!("n_locations, n_cities and n_types must all be nonzero");
        }
        if self.bounds[0] <= 0 || self.bounds[1] <= 0 {
            bail!("initial bounds must be positive, got {:?}", self.bounds);
        }
        if self.bounds_increment <= 0 {
            bail!("bounds_increment must be positive");
        }
        for (name, range) in [
            ("demand_range", self.demand_range),
            ("capacity_range", self.capacity_range),
            ("radius_range", self.radius_range),
        ] {
            if range[0] >= range[1] {
                bail!("{name} is empty: [{}, {})", range[0], range[1]);
            }
        }
        if self.demand_range[0] < 0 || self.capacity_range[0] < 0 || self.radius_range[0] <= 0 {
            bail!("demand and capacity must be non-negative, radii positive");
        }
        if self.min_separation < 0.0 {
            bail!("min_separation must be non-negative");
        }
        if !(0.0..=1.0).contains(&self.secondary_fraction) {
            bail!(
                "secondary_fraction must lie in [0, 1], got {}",
                self.secondary_fraction
            );
        }
        if self.demand_scale < 1.0 {
            bail!("demand_scale must be at least 1, got {}", self.demand_scale);
        }
        Ok(())
    }
}
