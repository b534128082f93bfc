pub mod config;
pub mod constants;
pub mod control;
pub mod descent_system;
pub mod errors;
pub mod telemetry_system;

pub use config::PhysicalConstants;
pub use constants::*;
pub use control::jump::{
    density_sweep, find_safe_opening_altitude, DensityRun, JumpFactory, JumpScenario, SafeOpening,
};
pub use errors::SimulationError;

// Re-export commonly used items from descent_system
pub use descent_system::coefficients::{resolve_coefficients, CoefficientResolver, DragCoefficients};
pub use descent_system::drag_regime::{calculate_area, Canopy, DragRegime, DragRegimes};
pub use descent_system::fall_simulator::{FallSimulator, Outcome, RegimeChange, Sample, Trajectory};
pub use descent_system::trigger::Trigger;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{FlightSummary, Telemetry};
