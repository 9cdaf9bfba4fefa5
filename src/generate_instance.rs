use std::env;
use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use facility_gen::{generate, plot, writer, GeneratorConfig};

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(path) => GeneratorConfig::load(Path::new(&path))?,
        None => GeneratorConfig::default(),
    };
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (instance, stats) = generate(&config, &mut rng);
    writer::write_file(&config.output, &instance)?;
    info!(
        "wrote {} ({} facilities, {} cities, {} capacity expansions)",
        config.output.display(),
        instance.n_locations,
        instance.n_cities,
        stats.expansions
    );

    if let Some(plot_path) = &config.plot {
        plot::render_instance(plot_path, &instance)?;
        info!("rendered {}", plot_path.display());
    }
    Ok(())
}
