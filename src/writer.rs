use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;

use crate::{Instance, Point};

/// Emits the flat declaration format the downstream solver reads. One
/// declaration per line, semicolon-terminated except for `d_city`, which the
/// reader expects bare.
pub fn write_instance(out: &mut impl Write, instance: &Instance) -> io::Result<()> {
    writeln!(out, "nLocations = {};", instance.n_locations)?;
    writeln!(out, "nCities = {};", instance.n_cities)?;
    writeln!(out, "nTypes = {};", instance.n_types)?;
    writeln!(out, "p = {};", int_list(&instance.demand))?;
    writeln!(out, "posCities = {};", pair_list(&instance.city_positions))?;
    writeln!(out, "posLocations = {};", pair_list(&instance.facility_positions))?;
    writeln!(out, "d_city = {}", int_list(&instance.coverage_radius))?;
    writeln!(out, "cap = {};", int_list(&instance.capacity))?;
    writeln!(out, "cost = {};", int_list(&instance.cost))?;
    writeln!(out, "d_center = {};", instance.min_separation)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the instance. Any I/O failure is
/// fatal for the run and carries the path.
pub fn write_file(path: &Path, instance: &Instance) -> Result<(), anyhow::Error> {
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_instance(&mut file, instance)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn int_list(values: &[i64]) -> String {
    let mut out = String::from("[");
    for value in values {
        let _ = write!(out, " {value}");
    }
    out.push_str(" ]");
    out
}

fn pair_list(points: &[Point]) -> String {
    let mut out = String::from("[");
    for point in points {
        let _ = write!(out, " [{} {}]", point[0], point[1]);
    }
    out.push_str(" ]");
    out
}
