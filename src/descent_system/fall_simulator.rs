use tracing::{debug, info, warn};

use crate::config::PhysicalConstants;
use crate::errors::{Result, SimulationError};

use super::coefficients::CoefficientResolver;
use super::drag_regime::{Canopy, DragRegimes};
use super::trigger::Trigger;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub altitude: f64,
    /// Positive downward.
    pub velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeChange {
    pub time: f64,
    pub altitude: f64,
    pub regime: Canopy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Landed,
    TimedOut,
}

/// Samples of one run, starting with `(0, h0, 0)`. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
    regime_changes: Vec<RegimeChange>,
    outcome: Outcome,
}

impl Trajectory {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn final_sample(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    pub fn landing_velocity(&self) -> f64 {
        self.final_sample().velocity
    }

    pub fn duration(&self) -> f64 {
        self.final_sample().time
    }

    pub fn max_velocity(&self) -> f64 {
        self.samples
            .iter()
            .map(|sample| sample.velocity)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Regime entered at each switch, including the one active at t = 0.
    pub fn regime_changes(&self) -> &[RegimeChange] {
        &self.regime_changes
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.time)
    }

    pub fn altitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.altitude)
    }

    pub fn velocities(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.velocity)
    }
}

/// Fixed-step explicit Euler integrator for a vertical fall.
#[derive(Debug, Clone)]
pub struct FallSimulator {
    constants: PhysicalConstants,
    regimes: DragRegimes,
    air_density: f64,
}

impl FallSimulator {
    pub fn new(constants: PhysicalConstants) -> Result<Self> {
        constants.validate()?;
        let regimes = DragRegimes::new(&constants);
        let air_density = constants.air_density;

        Ok(FallSimulator {
            constants,
            regimes,
            air_density,
        })
    }

    /// Same simulator flying through air of `air_density`. Canopy areas stay
    /// sized at the reference density.
    pub fn with_air_density(mut self, air_density: f64) -> Result<Self> {
        if !air_density.is_finite() || air_density <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "air density must be positive, got {}",
                air_density
            )));
        }
        self.air_density = air_density;
        Ok(self)
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn regimes(&self) -> &DragRegimes {
        &self.regimes
    }

    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    pub fn resolver(&self) -> CoefficientResolver<'_> {
        CoefficientResolver::new(&self.regimes, self.air_density)
    }

    /// Number of steps after which a run is cut off.
    pub fn max_steps(&self, max_time: f64) -> usize {
        // Tolerance keeps 300 / 0.01 at 30000 steps despite rounding.
        ((max_time / self.constants.time_step) - 1e-9).ceil().max(1.0) as usize
    }

    pub fn simulate(
        &self,
        initial_altitude: f64,
        triggers: &[Trigger],
        max_time: f64,
    ) -> Result<Trajectory> {
        if !initial_altitude.is_finite() || initial_altitude <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "initial altitude must be positive, got {}",
                initial_altitude
            )));
        }
        if !max_time.is_finite() || max_time <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "max time must be positive, got {}",
                max_time
            )));
        }
        for trigger in triggers {
            trigger.validate()?;
        }

        let resolver = self.resolver();
        let mass = self.constants.mass;
        let gravity = self.constants.gravity;
        let dt = self.constants.time_step;
        let max_steps = self.max_steps(max_time);

        let mut samples = Vec::with_capacity(max_steps.min(1 << 16) + 1);
        let mut regime_changes = Vec::new();
        samples.push(Sample {
            time: 0.0,
            altitude: initial_altitude,
            velocity: 0.0,
        });

        let mut altitude = initial_altitude;
        let mut velocity = 0.0;
        let mut time = 0.0;
        let mut step = 0usize;

        let outcome = loop {
            let coefficients = resolver.resolve(altitude, triggers);
            if regime_changes
                .last()
                .map_or(true, |change: &RegimeChange| change.regime != coefficients.regime)
            {
                debug!(
                    "t={:.2}s h={:.1}m: entering {} regime (k1={:.4}, k2={:.4})",
                    time,
                    altitude,
                    coefficients.regime.name(),
                    coefficients.linear,
                    coefficients.quadratic
                );
                regime_changes.push(RegimeChange {
                    time,
                    altitude,
                    regime: coefficients.regime,
                });
            }

            let acceleration = gravity - coefficients.drag_force(velocity) / mass;

            // Both updates read the start-of-step velocity.
            let next_velocity = velocity + acceleration * dt;
            let next_altitude = altitude - velocity * dt;

            step += 1;
            time = step as f64 * dt;

            samples.push(Sample {
                time,
                altitude: next_altitude,
                velocity: next_velocity,
            });

            altitude = next_altitude;
            velocity = next_velocity;

            if altitude <= 0.0 {
                break Outcome::Landed;
            }
            if step >= max_steps {
                break Outcome::TimedOut;
            }
        };

        match outcome {
            Outcome::Landed => info!(
                "Landed after {:.2}s at {:.2} m/s",
                time, velocity
            ),
            Outcome::TimedOut => warn!(
                "Still airborne at {:.1}m after {:.2}s",
                altitude, time
            ),
        }

        Ok(Trajectory {
            samples,
            regime_changes,
            outcome,
        })
    }
}
