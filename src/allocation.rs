use log::debug;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::params::ProblemParams;
use crate::placement::Bounds;
use crate::{distance, Point};

/// A placed facility and what is left of its serving capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub position: Point,
    pub remaining: i64,
}

/// Every facility starts from the max-capacity type's template.
pub fn initial_facilities(positions: &[Point], params: &ProblemParams) -> Vec<Facility> {
    let template = params.capacity[params.max_capacity_type()];
    positions
        .iter()
        .map(|&position| Facility {
            position,
            remaining: template,
        })
        .collect()
}

/// Capacity consumed by a secondary assignment for demand `demand`. The same
/// amount is used for the availability check and for expansion, so remaining
/// capacity never goes negative.
pub fn secondary_amount(demand: i64, fraction: f64) -> i64 {
    (demand as f64 * fraction).ceil() as i64
}

/// Book-keeping for the conservation invariant: the final per-type capacity
/// must equal the initial draw plus `added_capacity`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationStats {
    pub expansions: u32,
    pub added_capacity: i64,
}

struct Reservation {
    facility: usize,
    amount: i64,
}

/// Places every city and charges its demand against the facilities.
///
/// A city's candidate position must find a facility inside the dominant-type
/// radius willing to take its full demand (primary) and one inside three
/// times that radius willing to take the secondary amount; a close-enough
/// facility may take both. Reservations of a failed pass are rolled back
/// before the position is resampled. One attempt counter per city increments
/// per facility examined and survives resampling; once it passes the budget,
/// a facility that cannot pay triggers a permanent capacity expansion
/// instead, so allocation always makes progress.
pub fn place_cities(
    config: &GeneratorConfig,
    params: &mut ProblemParams,
    facilities: &mut [Facility],
    bounds: &Bounds,
    rng: &mut impl Rng,
) -> (Vec<Point>, AllocationStats) {
    let template = params.max_capacity_type();
    let primary_radius = params.coverage_radius[params.dominant_type()] as f64;
    let secondary_radius = primary_radius * 3.0;
    let mut stats = AllocationStats::default();
    let mut positions = Vec::with_capacity(config.n_cities);

    for city in 0..config.n_cities {
        let demand = params.demand[city];
        let secondary = secondary_amount(demand, config.secondary_fraction);
        let mut attempts = 0u32;

        let position = loop {
            let candidate = bounds.sample(rng);
            let mut held: Vec<Reservation> = Vec::new();
            let mut primary_ok = false;
            let mut secondary_ok = false;

            for idx in 0..facilities.len() {
                attempts += 1;
                let dist = distance(facilities[idx].position, candidate);

                if !primary_ok && dist < primary_radius {
                    if facilities[idx].remaining >= demand {
                        facilities[idx].remaining -= demand;
                        held.push(Reservation {
                            facility: idx,
                            amount: demand,
                        });
                        primary_ok = true;
                    } else if attempts > config.attempt_budget {
                        expand(params, facilities, template, idx, demand, &mut stats);
                    }
                }
                if !secondary_ok && dist < secondary_radius {
                    if facilities[idx].remaining >= secondary {
                        facilities[idx].remaining -= secondary;
                        held.push(Reservation {
                            facility: idx,
                            amount: secondary,
                        });
                        secondary_ok = true;
                    } else if attempts > config.attempt_budget {
                        expand(params, facilities, template, idx, secondary, &mut stats);
                    }
                }
                if primary_ok && secondary_ok {
                    break;
                }
            }

            if primary_ok && secondary_ok {
                break candidate;
            }
            for reservation in held {
                facilities[reservation.facility].remaining += reservation.amount;
            }
        };

        debug!("placed city {city} of {}", config.n_cities);
        positions.push(position);
    }
    (positions, stats)
}

/// Refunds the facility that could not pay, books `amount` against the
/// max-capacity type's capacity and cost, and tops up every facility.
fn expand(
    params: &mut ProblemParams,
    facilities: &mut [Facility],
    template: usize,
    triggered_by: usize,
    amount: i64,
    stats: &mut AllocationStats,
) {
    facilities[triggered_by].remaining += amount;
    params.capacity[template] += amount;
    params.cost[template] += amount;
    for facility in facilities.iter_mut() {
        facility.remaining += amount;
    }
    stats.expansions += 1;
    stats.added_capacity += amount;
    debug!("expanded capacity by {amount} after facility {triggered_by} ran dry");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::sample_params;
    use crate::placement::place_separated;
    use crate::GeneratorConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn one_city_params() -> ProblemParams {
        ProblemParams {
            demand: vec![3],
            capacity: vec![10],
            cost: vec![5],
            coverage_radius: vec![4],
        }
    }

    // Bounds of 5x5 around a facility at [2, 2]: every candidate lands
    // inside the primary band, so the first pass must succeed.
    #[test]
    fn single_facility_serves_both_bands_without_expansion() {
        let config = GeneratorConfig {
            n_locations: 1,
            n_cities: 1,
            n_types: 1,
            bounds: [5, 5],
            ..GeneratorConfig::default()
        };
        let mut params = one_city_params();
        let mut facilities = vec![Facility {
            position: [2, 2],
            remaining: 10,
        }];
        let bounds = Bounds::new(5, 5);
        let mut rng = StdRng::seed_from_u64(11);

        let (positions, stats) =
            place_cities(&config, &mut params, &mut facilities, &bounds, &mut rng);

        assert_eq!(stats, AllocationStats::default());
        assert_eq!(params.capacity, vec![10]);
        assert_eq!(params.cost, vec![5]);
        // demand 3 primary + ceil(0.9) secondary
        assert_eq!(facilities[0].remaining, 6);
        assert!(distance(positions[0], [2, 2]) < 4.0);
    }

    #[test]
    fn starved_facility_triggers_exactly_one_expansion() {
        let config = GeneratorConfig {
            n_locations: 1,
            n_cities: 1,
            n_types: 1,
            bounds: [5, 5],
            attempt_budget: 5,
            ..GeneratorConfig::default()
        };
        let mut params = one_city_params();
        let mut facilities = vec![Facility {
            position: [2, 2],
            remaining: 1,
        }];
        let bounds = Bounds::new(5, 5);
        let mut rng = StdRng::seed_from_u64(12);

        let (_, stats) = place_cities(&config, &mut params, &mut facilities, &bounds, &mut rng);

        assert_eq!(stats.expansions, 1);
        assert_eq!(stats.added_capacity, 3);
        assert_eq!(params.capacity, vec![13]);
        assert_eq!(params.cost, vec![8]);
        // 1 + refund 3 + top-up 3, minus the committed 3 + 1
        assert_eq!(facilities[0].remaining, 3);
    }

    #[test]
    fn expansion_tops_up_facilities_outside_the_bands_too() {
        let config = GeneratorConfig {
            n_locations: 2,
            n_cities: 1,
            n_types: 1,
            bounds: [5, 5],
            attempt_budget: 5,
            ..GeneratorConfig::default()
        };
        let mut params = one_city_params();
        let mut facilities = vec![
            Facility {
                position: [2, 2],
                remaining: 1,
            },
            Facility {
                position: [500, 500],
                remaining: 1,
            },
        ];
        let bounds = Bounds::new(5, 5);
        let mut rng = StdRng::seed_from_u64(13);

        let (_, stats) = place_cities(&config, &mut params, &mut facilities, &bounds, &mut rng);

        assert_eq!(stats.expansions, 1);
        // the distant facility sees the top-up but no refund and no charge
        assert_eq!(facilities[1].remaining, 1 + stats.added_capacity);
    }

    #[test]
    fn secondary_amount_matches_the_reference_expansion_size() {
        for demand in 1..10 {
            assert_eq!(secondary_amount(demand, 0.3), demand * 3 / 10 + 1);
        }
        assert_eq!(secondary_amount(0, 0.3), 0);
    }

    #[test]
    fn full_allocation_conserves_capacity_and_stays_non_negative() {
        let config = GeneratorConfig {
            n_locations: 10,
            n_cities: 25,
            n_types: 3,
            bounds: [30, 30],
            ..GeneratorConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(14);
        let mut params = sample_params(&config, &mut rng);
        let initial_capacity: i64 = params.capacity.iter().sum();

        let mut bounds = Bounds::new(config.bounds[0], config.bounds[1]);
        let facility_positions =
            place_separated(config.n_locations, &mut bounds, &config, &mut rng);
        let mut facilities = initial_facilities(&facility_positions, &params);

        let (positions, stats) =
            place_cities(&config, &mut params, &mut facilities, &bounds, &mut rng);

        assert_eq!(positions.len(), config.n_cities);
        for facility in &facilities {
            assert!(facility.remaining >= 0);
        }
        let final_capacity: i64 = params.capacity.iter().sum();
        assert_eq!(final_capacity, initial_capacity + stats.added_capacity);

        // every city sits inside some facility's primary band
        let primary_radius = params.coverage_radius[params.dominant_type()] as f64;
        for &city in &positions {
            assert!(facilities
                .iter()
                .any(|f| distance(f.position, city) < primary_radius));
        }
    }
}
