// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const AIR_VISCOSITY: f64 = 0.0182; // dynamic viscosity used for the Stokes term

// Jumper Constants
pub const JUMPER_MASS: f64 = 90.0; // kg
pub const BODY_RADIUS: f64 = 0.4; // m

// Aerodynamic Constants
pub const BODY_DRAG_COEFFICIENT: f64 = 1.0;
pub const CANOPY_DRAG_COEFFICIENT: f64 = 1.5;

// Target terminal velocities used to size each shape
pub const BODY_TERMINAL_VELOCITY: f64 = 50.0; // m/s
pub const SMALL_CANOPY_TERMINAL_VELOCITY: f64 = 35.0; // m/s
pub const LARGE_CANOPY_TERMINAL_VELOCITY: f64 = 8.0; // m/s

// Area match tolerance for (altitude, area, Cx) triggers
pub const AREA_MATCH_TOLERANCE: f64 = 0.01; // m²

// Simulation Parameters
pub const TIME_STEP: f64 = 0.01; // s
pub const DEFAULT_MAX_TIME: f64 = 300.0; // s

// Safe landing search
pub const SAFE_LANDING_VELOCITY: f64 = 10.0; // m/s
pub const OPENING_SEARCH_STEP: f64 = 10.0; // m
