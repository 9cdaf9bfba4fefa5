use log::{debug, warn};
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::{distance, Point};

/// Sampling window for positions. Starts at the configured size and only ever
/// grows; city placement samples from whatever the facility stage left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(max_x: i32, max_y: i32) -> Self {
        Bounds { max_x, max_y }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Point {
        [rng.random_range(0..self.max_x), rng.random_range(0..self.max_y)]
    }

    pub fn grow(&mut self, increment: i32) {
        self.max_x += increment;
        self.max_y += increment;
    }
}

/// Places `n` points so that every pair is strictly further apart than
/// `min_separation`.
///
/// The first point is placed unconditionally. Each later point is rejection
/// sampled against all earlier ones; once a single point has burned through
/// the attempt budget the bounds are enlarged permanently and its counter
/// resets, so placement always terminates.
pub fn place_separated(
    n: usize,
    bounds: &mut Bounds,
    config: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Vec<Point> {
    let mut positions: Vec<Point> = Vec::with_capacity(n);
    if n == 0 {
        return positions;
    }
    positions.push(bounds.sample(rng));

    for i in 1..n {
        let mut attempts = 0u32;
        loop {
            let candidate = bounds.sample(rng);
            if positions
                .iter()
                .all(|&placed| distance(placed, candidate) > config.min_separation)
            {
                positions.push(candidate);
                break;
            }
            attempts += 1;
            if attempts > config.attempt_budget {
                bounds.grow(config.bounds_increment);
                attempts = 0;
                warn!(
                    "point {i}: no separated position found, bounds enlarged to {}x{}",
                    bounds.max_x, bounds.max_y
                );
            }
        }
        debug!("placed facility {i} of {n}");
    }
    positions
}
