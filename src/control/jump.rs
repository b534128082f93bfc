use tracing::{debug, info};

use crate::config::PhysicalConstants;
use crate::constants::DEFAULT_MAX_TIME;
use crate::descent_system::drag_regime::{Canopy, DragRegimes};
use crate::descent_system::fall_simulator::{FallSimulator, Trajectory};
use crate::descent_system::trigger::Trigger;
use crate::errors::{Result, SimulationError};

#[derive(Clone, Debug)]
pub struct JumpScenario {
    pub name: String,
    pub initial_altitude: f64,
    pub triggers: Vec<Trigger>,
    pub max_time: f64,
}

impl JumpScenario {
    pub fn new(name: String, initial_altitude: f64, triggers: Vec<Trigger>) -> Self {
        JumpScenario {
            name,
            initial_altitude,
            triggers,
            max_time: DEFAULT_MAX_TIME,
        }
    }

    pub fn with_max_time(mut self, max_time: f64) -> Self {
        self.max_time = max_time;
        self
    }

    pub fn run(&self, simulator: &FallSimulator) -> Result<Trajectory> {
        info!("Running jump '{}'", self.name);
        simulator.simulate(self.initial_altitude, &self.triggers, self.max_time)
    }
}

pub struct JumpFactory;

impl JumpFactory {
    pub fn free_fall(initial_altitude: f64) -> JumpScenario {
        JumpScenario::new(
            format!("Free fall from {}m", initial_altitude),
            initial_altitude,
            Vec::new(),
        )
    }

    /// Small canopy at `small_altitude`, then large canopy at `large_altitude`.
    pub fn staged(
        initial_altitude: f64,
        small_altitude: f64,
        large_altitude: f64,
        regimes: &DragRegimes,
    ) -> JumpScenario {
        JumpScenario::new(
            format!(
                "{}m -> {}m(S) -> {}m(L)",
                initial_altitude, small_altitude, large_altitude
            ),
            initial_altitude,
            vec![
                Trigger::deploy(small_altitude, Canopy::SmallCanopy, regimes),
                Trigger::deploy(large_altitude, Canopy::LargeCanopy, regimes),
            ],
        )
    }

    pub fn single_canopy(
        initial_altitude: f64,
        opening_altitude: f64,
        regimes: &DragRegimes,
    ) -> JumpScenario {
        JumpScenario::new(
            format!("{}m -> {}m(L)", initial_altitude, opening_altitude),
            initial_altitude,
            vec![Trigger::deploy(
                opening_altitude,
                Canopy::LargeCanopy,
                regimes,
            )],
        )
    }
}

#[derive(Debug, Clone)]
pub struct SafeOpening {
    pub opening_altitude: f64,
    pub landing_velocity: f64,
    pub trajectory: Trajectory,
}

/// Scans large-canopy opening altitudes `0, step, 2·step, …` below
/// `initial_altitude` and returns the first one that lands at or under
/// `safe_velocity`.
pub fn find_safe_opening_altitude(
    simulator: &FallSimulator,
    initial_altitude: f64,
    safe_velocity: f64,
    step: f64,
) -> Result<Option<SafeOpening>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SimulationError::InvalidInput(format!(
            "search step must be positive, got {}",
            step
        )));
    }

    let mut index = 0u32;
    loop {
        let opening_altitude = f64::from(index) * step;
        if opening_altitude >= initial_altitude {
            info!("No safe opening altitude below {}m", initial_altitude);
            return Ok(None);
        }

        let scenario =
            JumpFactory::single_canopy(initial_altitude, opening_altitude, simulator.regimes());
        let trajectory = simulator.simulate(initial_altitude, &scenario.triggers, scenario.max_time)?;
        let landing_velocity = trajectory.landing_velocity();
        debug!(
            "Opening at {}m lands at {:.2} m/s",
            opening_altitude, landing_velocity
        );

        if landing_velocity <= safe_velocity {
            info!(
                "Minimum safe opening altitude: {}m ({:.2} m/s)",
                opening_altitude, landing_velocity
            );
            return Ok(Some(SafeOpening {
                opening_altitude,
                landing_velocity,
                trajectory,
            }));
        }

        index += 1;
    }
}

#[derive(Debug, Clone)]
pub struct DensityRun {
    pub air_density: f64,
    pub trajectory: Trajectory,
}

/// Runs the same jump once per density, in input order.
pub fn density_sweep(
    constants: &PhysicalConstants,
    scenario: &JumpScenario,
    densities: &[f64],
) -> Result<Vec<DensityRun>> {
    densities
        .iter()
        .map(|&air_density| -> Result<DensityRun> {
            let simulator = FallSimulator::new(constants.clone())?.with_air_density(air_density)?;
            let trajectory = scenario.run(&simulator)?;
            Ok(DensityRun {
                air_density,
                trajectory,
            })
        })
        .collect()
}
