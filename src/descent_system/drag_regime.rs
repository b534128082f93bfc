use std::f64::consts::PI;

use crate::config::PhysicalConstants;

/// Reference area (m²) at which drag balances weight at `target_velocity`:
/// `0.5 · Cx · ρ · S · v² = M · G`.
pub fn calculate_area(
    target_velocity: f64,
    drag_coefficient: f64,
    constants: &PhysicalConstants,
) -> f64 {
    let k = constants.mass * constants.gravity / target_velocity.powi(2);
    k / (0.5 * drag_coefficient * constants.air_density)
}

/// Stokes drag coefficient `6·π·μ·r`.
pub fn stokes_coefficient(radius: f64, viscosity: f64) -> f64 {
    6.0 * PI * viscosity * radius
}

/// Radius of the disc with area `area`.
pub fn equivalent_radius(area: f64) -> f64 {
    (area / PI).sqrt()
}

/// Which drag configuration is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Canopy {
    Body,
    SmallCanopy,
    LargeCanopy,
    /// An unrecognised shape: its own area and Cx, body linear drag.
    Custom,
}

impl Canopy {
    pub fn name(&self) -> &'static str {
        match self {
            Canopy::Body => "body",
            Canopy::SmallCanopy => "small canopy",
            Canopy::LargeCanopy => "large canopy",
            Canopy::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRegime {
    pub area: f64,
    pub linear_coefficient: f64,
    pub drag_coefficient: f64,
}

impl DragRegime {
    /// Quadratic coefficient `k2 = 0.5 · Cx · ρ · S` at `air_density`.
    pub fn quadratic_coefficient(&self, air_density: f64) -> f64 {
        0.5 * self.drag_coefficient * air_density * self.area
    }
}

/// The three named regimes, sized once at the reference density.
#[derive(Debug, Clone, PartialEq)]
pub struct DragRegimes {
    pub body: DragRegime,
    pub small_canopy: DragRegime,
    pub large_canopy: DragRegime,
}

impl DragRegimes {
    pub fn new(constants: &PhysicalConstants) -> Self {
        let canopy = |target_velocity: f64| {
            let area = calculate_area(
                target_velocity,
                constants.canopy_drag_coefficient,
                constants,
            );
            DragRegime {
                area,
                linear_coefficient: stokes_coefficient(
                    equivalent_radius(area),
                    constants.air_viscosity,
                ),
                drag_coefficient: constants.canopy_drag_coefficient,
            }
        };

        DragRegimes {
            body: DragRegime {
                area: calculate_area(
                    constants.body_terminal_velocity,
                    constants.body_drag_coefficient,
                    constants,
                ),
                linear_coefficient: stokes_coefficient(
                    constants.body_radius,
                    constants.air_viscosity,
                ),
                drag_coefficient: constants.body_drag_coefficient,
            },
            small_canopy: canopy(constants.small_canopy_terminal_velocity),
            large_canopy: canopy(constants.large_canopy_terminal_velocity),
        }
    }

    pub fn regime(&self, canopy: Canopy) -> Option<&DragRegime> {
        match canopy {
            Canopy::Body => Some(&self.body),
            Canopy::SmallCanopy => Some(&self.small_canopy),
            Canopy::LargeCanopy => Some(&self.large_canopy),
            Canopy::Custom => None,
        }
    }

    /// Linear coefficient for a canopy tag. Custom shapes get the body value.
    pub fn linear_coefficient(&self, canopy: Canopy) -> f64 {
        self.regime(canopy)
            .unwrap_or(&self.body)
            .linear_coefficient
    }
}

impl Default for DragRegimes {
    fn default() -> Self {
        DragRegimes::new(&PhysicalConstants::default())
    }
}
