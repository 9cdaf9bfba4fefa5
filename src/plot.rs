use std::path::Path;

use plotters::coord::types::RangedCoordf32;
use plotters::prelude::*;

use crate::Instance;

const SIZE: u32 = 1024;

/// Renders the instance to a PNG: facilities as filled black dots with their
/// dominant coverage ring, cities as red dots.
pub fn render_instance(path: &Path, instance: &Instance) -> Result<(), anyhow::Error> {
    draw(path, instance).map_err(|e| anyhow::anyhow!("rendering {}: {e}", path.display()))
}

fn draw(path: &Path, instance: &Instance) -> Result<(), Box<dyn std::error::Error>> {
    let extent = instance
        .facility_positions
        .iter()
        .chain(&instance.city_positions)
        .flat_map(|p| p.iter().copied())
        .max()
        .unwrap_or(0) as f32
        + 10.0;

    let root = BitMapBackend::new(path, (SIZE, SIZE)).into_drawing_area();
    root.fill(&RGBColor(240, 200, 200))?;
    let root = root.apply_coord_spec(Cartesian2d::<RangedCoordf32, RangedCoordf32>::new(
        0f32..extent,
        0f32..extent,
        (0..SIZE as i32, 0..SIZE as i32),
    ));

    let dominant_radius = instance.coverage_radius.iter().copied().max().unwrap_or(0);
    let ring = (dominant_radius as f32 * SIZE as f32 / extent) as i32;
    for &pos in &instance.facility_positions {
        let center = (pos[0] as f32, pos[1] as f32);
        root.draw(&Circle::new(center, ring, ShapeStyle::from(&BLACK)))?;
        root.draw(&Circle::new(center, 4, ShapeStyle::from(&BLACK).filled()))?;
    }
    for &pos in &instance.city_positions {
        let center = (pos[0] as f32, pos[1] as f32);
        root.draw(&Circle::new(center, 2, ShapeStyle::from(&RED).filled()))?;
    }
    root.present()?;
    Ok(())
}
