use crate::control::jump::{DensityRun, SafeOpening};
use crate::descent_system::drag_regime::DragRegimes;
use crate::descent_system::fall_simulator::{Outcome, RegimeChange, Trajectory};

#[derive(Debug, Clone, PartialEq)]
pub struct FlightSummary {
    pub name: String,
    pub duration: f64,
    pub landing_velocity: f64,
    pub max_velocity: f64,
    pub final_altitude: f64,
    pub outcome: Outcome,
    pub regime_changes: Vec<RegimeChange>,
}

impl FlightSummary {
    pub fn from_trajectory(name: &str, trajectory: &Trajectory) -> Self {
        FlightSummary {
            name: name.to_string(),
            duration: trajectory.duration(),
            landing_velocity: trajectory.landing_velocity(),
            max_velocity: trajectory.max_velocity(),
            final_altitude: trajectory.final_sample().altitude,
            outcome: trajectory.outcome(),
            regime_changes: trajectory.regime_changes().to_vec(),
        }
    }
}

/// Collects report sections for printing.
pub struct Telemetry {
    pub log: Vec<String>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry { log: Vec::new() }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn record_regimes(&mut self, regimes: &DragRegimes) {
        self.log.push(format!(
            "Calculated Areas: Body={:.2}, Small={:.2}, Large={:.2}\n\
             Linear coefficients: k1_body={:.4}, k1_small={:.4}, k1_large={:.4}",
            regimes.body.area,
            regimes.small_canopy.area,
            regimes.large_canopy.area,
            regimes.body.linear_coefficient,
            regimes.small_canopy.linear_coefficient,
            regimes.large_canopy.linear_coefficient
        ));
    }

    pub fn record_flight(&mut self, summary: &FlightSummary) {
        let outcome = match summary.outcome {
            Outcome::Landed => "Landed".to_string(),
            Outcome::TimedOut => format!("Timed out at {:.1} m", summary.final_altitude),
        };

        let mut entry = format!(
            "--- {} ---\n\
             Outcome: {}\n\
             Flight time: {}\n\
             Landing speed: {:.2} m/s\n\
             Max speed: {:.2} m/s",
            summary.name,
            outcome,
            Self::format_time(summary.duration),
            summary.landing_velocity,
            summary.max_velocity
        );
        for change in &summary.regime_changes {
            entry.push_str(&format!(
                "\nRegime {} from {} at {:.1} m",
                change.regime.name(),
                Self::format_time(change.time),
                change.altitude
            ));
        }
        self.log.push(entry);
    }

    pub fn record_safe_opening(&mut self, safe: Option<&SafeOpening>) {
        let entry = match safe {
            Some(safe) => format!(
                "Opening at {}m gives landing speed {:.2} m/s (Safe)\n\
                 Minimum safe opening height: {} m",
                safe.opening_altitude, safe.landing_velocity, safe.opening_altitude
            ),
            None => "Could not find safe height".to_string(),
        };
        self.log.push(entry);
    }

    pub fn record_density_runs(&mut self, runs: &[DensityRun]) {
        let lines: Vec<String> = runs
            .iter()
            .map(|run| {
                format!(
                    "Rho={} kg/m^3: landing speed {:.2} m/s after {}",
                    run.air_density,
                    run.trajectory.landing_velocity(),
                    Self::format_time(run.trajectory.duration())
                )
            })
            .collect();
        self.log.push(lines.join("\n"));
    }

    pub fn display_data(&self) {
        for entry in &self.log {
            println!("{}\n", entry);
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
