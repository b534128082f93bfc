pub mod coefficients;
pub mod drag_regime;
pub mod fall_simulator;
pub mod trigger;
