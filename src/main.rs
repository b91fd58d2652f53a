use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::path::Path;

use tsp_colony::{
    io::{
        input,
        output::{self, ProgressEntry},
    },
    logging,
    settings::Settings,
    utilities::{math::round_to, metrics::gap_percent, stopwatch::Stopwatch},
    nearest_neighbour_tour, run_ant_colony, Result,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = Settings::load("Config")?;
    logging::init_logger(settings.log_level()?, settings.log_timestamps)?;

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let run_folder = output::run_folder(Path::new(&settings.results_folder));

    let coords = match &settings.input {
        Some(path) => {
            info!("Loading coordinates from {}", path);
            input::load(Path::new(path))?
        }
        None => {
            let coords = input::generate(&settings.generate, &mut rng)?;

            // Keep the generated instance so the run can be repeated
            let instance_path = run_folder.join("instance.dat");
            input::save(&coords, &instance_path)?;
            info!(
                "Generated {} points in {} clusters, saved to {}",
                coords.len(),
                settings.generate.num_clusters,
                instance_path.display()
            );

            coords
        }
    };

    info!("Solving for {} points", coords.len());

    let mut nn_length = None;

    if settings.nearest_neighbour {
        let mut watch = Stopwatch::new();
        watch.start();

        let record = nearest_neighbour_tour(&coords, settings.nn_start, &mut rng)?;
        let elapsed = watch.stop();

        info!(
            "Nearest neighbour length {} in {} ms",
            round_to(record.length, 2),
            elapsed.as_millis()
        );

        output::write_tour(&run_folder, "nearest_neighbour", &record)?;
        output::write_running_time(&run_folder, "nearest_neighbour", elapsed)?;

        nn_length = Some(record.length);
    }

    if settings.ant_colony {
        let params = settings.colony;
        let log_every = (params.num_iterations / 10).max(1);

        let mut progress = Vec::with_capacity(params.num_iterations);

        let mut watch = Stopwatch::new();
        watch.start();

        let best = run_ant_colony(&coords, &params, &mut rng, |report| {
            if (report.iteration + 1) % log_every == 0 {
                info!(
                    "Iteration {}/{}: best length {}",
                    report.iteration + 1,
                    params.num_iterations,
                    round_to(report.best_length, 2)
                );
            }

            progress.push(ProgressEntry::from(report));
        })?;

        let elapsed = watch.stop();

        output::write_progress(&run_folder, "ant_colony", &progress)?;
        output::write_running_time(&run_folder, "ant_colony", elapsed)?;

        match best {
            Some(record) => {
                info!(
                    "Ant colony length {} in {} ms",
                    round_to(record.length, 2),
                    elapsed.as_millis()
                );

                if let Some(nn_length) = nn_length {
                    info!(
                        "Ant colony vs nearest neighbour: {}%",
                        round_to(gap_percent(record.length, nn_length), 2)
                    );
                }

                output::write_tour(&run_folder, "ant_colony", &record)?;
            }
            None => warn!("Ant colony found no solution"),
        }
    }

    info!("Results written to {}", run_folder.display());

    Ok(())
}
