use super::drag_regime::{Canopy, DragRegimes};
use super::trigger::Trigger;

/// Drag coefficients active at one altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCoefficients {
    pub regime: Canopy,
    /// k1, multiplies v
    pub linear: f64,
    /// k2, multiplies v²
    pub quadratic: f64,
}

impl DragCoefficients {
    /// Drag force (N) at `velocity`.
    pub fn drag_force(&self, velocity: f64) -> f64 {
        self.linear * velocity + self.quadratic * velocity.powi(2)
    }
}

#[derive(Debug, Clone)]
pub struct CoefficientResolver<'a> {
    regimes: &'a DragRegimes,
    air_density: f64,
}

impl<'a> CoefficientResolver<'a> {
    pub fn new(regimes: &'a DragRegimes, air_density: f64) -> Self {
        CoefficientResolver {
            regimes,
            air_density,
        }
    }

    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    /// Picks the lowest trigger threshold still strictly above `altitude`.
    /// With none left the jumper is in the body regime.
    pub fn resolve(&self, altitude: f64, triggers: &[Trigger]) -> DragCoefficients {
        match Self::active_trigger(altitude, triggers) {
            Some(trigger) => DragCoefficients {
                regime: trigger.canopy,
                linear: self.regimes.linear_coefficient(trigger.canopy),
                quadratic: trigger.quadratic_coefficient(self.air_density),
            },
            None => self.body(),
        }
    }

    pub fn body(&self) -> DragCoefficients {
        DragCoefficients {
            regime: Canopy::Body,
            linear: self.regimes.body.linear_coefficient,
            quadratic: self.regimes.body.quadratic_coefficient(self.air_density),
        }
    }

    fn active_trigger(altitude: f64, triggers: &[Trigger]) -> Option<&Trigger> {
        // min_by keeps the first of equal thresholds, same as a stable sort.
        triggers
            .iter()
            .filter(|trigger| altitude < trigger.altitude)
            .min_by(|a, b| a.altitude.total_cmp(&b.altitude))
    }
}

/// One-off resolution without keeping a resolver around.
pub fn resolve_coefficients(
    altitude: f64,
    triggers: &[Trigger],
    regimes: &DragRegimes,
    air_density: f64,
) -> DragCoefficients {
    CoefficientResolver::new(regimes, air_density).resolve(altitude, triggers)
}
