use crate::constants::AREA_MATCH_TOLERANCE;
use crate::errors::{Result, SimulationError};

use super::drag_regime::{Canopy, DragRegimes};

/// Switch drag shape once the altitude drops below `altitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trigger {
    pub altitude: f64,
    pub area: f64,
    pub drag_coefficient: f64,
    pub canopy: Canopy,
}

impl Trigger {
    /// Deploys one of the named shapes with its precomputed area and Cx.
    /// `Canopy::Custom` has no stored shape and falls back to the body's.
    pub fn deploy(altitude: f64, canopy: Canopy, regimes: &DragRegimes) -> Self {
        let regime = regimes.regime(canopy).unwrap_or(&regimes.body);
        Trigger {
            altitude,
            area: regime.area,
            drag_coefficient: regime.drag_coefficient,
            canopy,
        }
    }

    pub fn custom(altitude: f64, area: f64, drag_coefficient: f64) -> Self {
        Trigger {
            altitude,
            area,
            drag_coefficient,
            canopy: Canopy::Custom,
        }
    }

    /// Builds a trigger from an `(altitude, area, Cx)` entry. The area is
    /// matched against the canopy areas within `AREA_MATCH_TOLERANCE`, small
    /// canopy first. Unmatched areas become `Custom`.
    pub fn from_area(
        altitude: f64,
        area: f64,
        drag_coefficient: f64,
        regimes: &DragRegimes,
    ) -> Self {
        let canopy = if (area - regimes.small_canopy.area).abs() < AREA_MATCH_TOLERANCE {
            Canopy::SmallCanopy
        } else if (area - regimes.large_canopy.area).abs() < AREA_MATCH_TOLERANCE {
            Canopy::LargeCanopy
        } else {
            Canopy::Custom
        };

        Trigger {
            altitude,
            area,
            drag_coefficient,
            canopy,
        }
    }

    /// Quadratic coefficient `k2 = 0.5 · Cx · ρ · S` from the trigger's own shape.
    pub fn quadratic_coefficient(&self, air_density: f64) -> f64 {
        0.5 * self.drag_coefficient * air_density * self.area
    }

    pub fn validate(&self) -> Result<()> {
        if self.altitude.is_nan() {
            return Err(SimulationError::InvalidInput(
                "trigger altitude must be a number".to_string(),
            ));
        }
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "trigger at {} m has non-positive area {}",
                self.altitude, self.area
            )));
        }
        if !self.drag_coefficient.is_finite() || self.drag_coefficient <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "trigger at {} m has non-positive drag coefficient {}",
                self.altitude, self.drag_coefficient
            )));
        }
        Ok(())
    }
}
