use std::env;

use parachute_simulation::*;
use tracing::{error, info, Level};

fn init_logging() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to init logging. {}", e);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let constants = match env::args().nth(1) {
        Some(path) => PhysicalConstants::load(path)?,
        None => PhysicalConstants::default(),
    };
    let simulator = FallSimulator::new(constants.clone())?;
    let regimes = simulator.regimes().clone();

    let mut telemetry = Telemetry::new();
    telemetry.record_regimes(&regimes);

    let jumps = [
        JumpFactory::staged(1000.0, 800.0, 400.0, &regimes),
        JumpFactory::staged(800.0, 600.0, 500.0, &regimes),
    ];
    for jump in &jumps {
        match jump.run(&simulator) {
            Ok(trajectory) => {
                telemetry.record_flight(&FlightSummary::from_trajectory(&jump.name, &trajectory))
            }
            Err(e) => error!("Jump '{}' failed: {}", jump.name, e),
        }
    }

    info!("Searching for the minimum safe opening altitude");
    let safe = find_safe_opening_altitude(
        &simulator,
        1000.0,
        SAFE_LANDING_VELOCITY,
        OPENING_SEARCH_STEP,
    )?;
    telemetry.record_safe_opening(safe.as_ref());
    if let Some(safe) = &safe {
        let name = format!("Optimal Jump (Open at {}m)", safe.opening_altitude);
        telemetry.record_flight(&FlightSummary::from_trajectory(&name, &safe.trajectory));
    }

    let medium = JumpFactory::single_canopy(1000.0, 1000.0, &regimes);
    let runs = density_sweep(&constants, &medium, &[1.225, 0.5, 2.0])?;
    telemetry.record_density_runs(&runs);

    telemetry.display_data();

    Ok(())
}
