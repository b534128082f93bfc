use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{
    AIR_DENSITY_SEA_LEVEL, AIR_VISCOSITY, BODY_DRAG_COEFFICIENT, BODY_RADIUS,
    BODY_TERMINAL_VELOCITY, CANOPY_DRAG_COEFFICIENT, GRAVITY, JUMPER_MASS,
    LARGE_CANOPY_TERMINAL_VELOCITY, SMALL_CANOPY_TERMINAL_VELOCITY, TIME_STEP,
};
use crate::errors::{Result, SimulationError};

/// Physical constants for a run. `air_density` doubles as the reference
/// density the canopy areas are sized at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    pub mass: f64,
    pub gravity: f64,
    pub air_density: f64,
    pub air_viscosity: f64,
    pub body_radius: f64,
    pub time_step: f64,
    pub body_drag_coefficient: f64,
    pub canopy_drag_coefficient: f64,
    pub body_terminal_velocity: f64,
    pub small_canopy_terminal_velocity: f64,
    pub large_canopy_terminal_velocity: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            mass: JUMPER_MASS,
            gravity: GRAVITY,
            air_density: AIR_DENSITY_SEA_LEVEL,
            air_viscosity: AIR_VISCOSITY,
            body_radius: BODY_RADIUS,
            time_step: TIME_STEP,
            body_drag_coefficient: BODY_DRAG_COEFFICIENT,
            canopy_drag_coefficient: CANOPY_DRAG_COEFFICIENT,
            body_terminal_velocity: BODY_TERMINAL_VELOCITY,
            small_canopy_terminal_velocity: SMALL_CANOPY_TERMINAL_VELOCITY,
            large_canopy_terminal_velocity: LARGE_CANOPY_TERMINAL_VELOCITY,
        }
    }
}

impl PhysicalConstants {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let constants: PhysicalConstants = serde_json::from_str(json)
            .map_err(|e| SimulationError::ConfigError(e.to_string()))?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SimulationError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let constants = Self::from_json_str(&contents)?;
        info!("Loaded physical constants from {}", path.display());
        Ok(constants)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("mass", self.mass),
            ("gravity", self.gravity),
            ("air_density", self.air_density),
            ("air_viscosity", self.air_viscosity),
            ("body_radius", self.body_radius),
            ("time_step", self.time_step),
            ("body_drag_coefficient", self.body_drag_coefficient),
            ("canopy_drag_coefficient", self.canopy_drag_coefficient),
            ("body_terminal_velocity", self.body_terminal_velocity),
            (
                "small_canopy_terminal_velocity",
                self.small_canopy_terminal_velocity,
            ),
            (
                "large_canopy_terminal_velocity",
                self.large_canopy_terminal_velocity,
            ),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InitializationError(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
