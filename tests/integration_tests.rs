use approx::assert_relative_eq;
use parachute_simulation::{
    calculate_area, density_sweep, errors::SimulationError, resolve_coefficients, Canopy,
    FallSimulator, JumpFactory, Outcome, PhysicalConstants, Trigger, DEFAULT_MAX_TIME,
};
use rand::Rng;

// Helper function to create a simulator with the default constants
fn create_test_simulator() -> FallSimulator {
    FallSimulator::new(PhysicalConstants::default()).unwrap()
}

fn terminal_velocity(linear: f64, quadratic: f64, weight: f64) -> f64 {
    // Positive root of k2·v² + k1·v − M·G = 0
    (-linear + (linear * linear + 4.0 * quadratic * weight).sqrt()) / (2.0 * quadratic)
}

#[test]
fn test_reference_area() {
    let constants = PhysicalConstants::default();
    let area = calculate_area(50.0, 1.0, &constants);

    assert_relative_eq!(area, 2.0 * 90.0 * 9.81 / (2500.0 * 1.225), epsilon = 1e-12);
    assert_relative_eq!(area, 0.576, epsilon = 1e-3);
}

#[test]
fn test_time_is_monotonic_with_fixed_step() {
    let sim = create_test_simulator();
    let triggers = [
        Trigger::deploy(800.0, Canopy::SmallCanopy, sim.regimes()),
        Trigger::deploy(400.0, Canopy::LargeCanopy, sim.regimes()),
    ];
    let trajectory = sim.simulate(1000.0, &triggers, DEFAULT_MAX_TIME).unwrap();
    let times: Vec<f64> = trajectory.times().collect();

    assert_eq!(times[0], 0.0);
    for pair in times.windows(2) {
        assert!(pair[1] > pair[0]);
        assert_relative_eq!(pair[1] - pair[0], 0.01, epsilon = 1e-9);
    }
}

#[test]
fn test_runs_terminate_within_step_bound() {
    let sim = create_test_simulator();
    let mut rng = rand::thread_rng();

    for _ in 0..20 {
        let initial_altitude = rng.gen_range(1.0..3000.0);
        let max_time = rng.gen_range(0.05..60.0);
        let opening = rng.gen_range(0.0..initial_altitude);
        let triggers = [Trigger::deploy(opening, Canopy::LargeCanopy, sim.regimes())];

        let trajectory = sim.simulate(initial_altitude, &triggers, max_time).unwrap();
        let bound = (max_time / 0.01).ceil() as usize + 1;

        assert!(
            trajectory.len() <= bound,
            "{} samples for max_time {} exceeds {}",
            trajectory.len(),
            max_time,
            bound
        );
        match trajectory.outcome() {
            Outcome::Landed => assert!(trajectory.final_sample().altitude <= 0.0),
            Outcome::TimedOut => assert!(trajectory.final_sample().altitude > 0.0),
        }
    }
}

#[test]
fn test_single_trigger_regime_boundary() {
    let sim = create_test_simulator();
    let resolver = sim.resolver();
    let mut rng = rand::thread_rng();
    let threshold = 600.0;
    let triggers = [Trigger::deploy(threshold, Canopy::SmallCanopy, sim.regimes())];

    for _ in 0..200 {
        let above = rng.gen_range(threshold..5000.0);
        let below = rng.gen_range(-50.0..threshold);

        assert_eq!(resolver.resolve(above, &triggers).regime, Canopy::Body);
        assert_eq!(
            resolver.resolve(below, &triggers).regime,
            Canopy::SmallCanopy
        );
    }
    assert_eq!(resolver.resolve(threshold, &triggers).regime, Canopy::Body);
}

#[test]
fn test_tuple_and_tagged_triggers_fly_the_same() {
    let sim = create_test_simulator();
    let regimes = sim.regimes();
    let tagged = [
        Trigger::deploy(800.0, Canopy::SmallCanopy, regimes),
        Trigger::deploy(400.0, Canopy::LargeCanopy, regimes),
    ];
    let tuples = [
        Trigger::from_area(800.0, regimes.small_canopy.area, 1.5, regimes),
        Trigger::from_area(400.0, regimes.large_canopy.area, 1.5, regimes),
    ];

    let a = sim.simulate(1000.0, &tagged, DEFAULT_MAX_TIME).unwrap();
    let b = sim.simulate(1000.0, &tuples, DEFAULT_MAX_TIME).unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_free_fall_matches_reference_integration() {
    let sim = create_test_simulator();
    let body = resolve_coefficients(1000.0, &[], sim.regimes(), 1.225);
    let trajectory = sim.simulate(2000.0, &[], DEFAULT_MAX_TIME).unwrap();

    // Classic RK4 on dv/dt = G − (k1·v + k2·v²)/M at the same step.
    let accel = |v: f64| 9.81 - (body.linear * v + body.quadratic * v * v) / 90.0;
    let dt = 0.01;
    let mut reference = 0.0;
    for sample in trajectory.samples().iter().skip(1) {
        let a1 = accel(reference);
        let a2 = accel(reference + 0.5 * dt * a1);
        let a3 = accel(reference + 0.5 * dt * a2);
        let a4 = accel(reference + dt * a3);
        reference += dt / 6.0 * (a1 + 2.0 * a2 + 2.0 * a3 + a4);

        assert!(
            (sample.velocity - reference).abs() < 0.05,
            "t={}: euler {} vs reference {}",
            sample.time,
            sample.velocity,
            reference
        );
    }
}

#[test]
fn test_free_fall_reaches_body_terminal_velocity() {
    let sim = create_test_simulator();
    let body = sim.resolver().body();
    let trajectory = sim.simulate(20_000.0, &[], 200.0).unwrap();

    assert_eq!(trajectory.outcome(), Outcome::TimedOut);
    assert_relative_eq!(
        trajectory.landing_velocity(),
        terminal_velocity(body.linear, body.quadratic, 90.0 * 9.81),
        epsilon = 1e-6
    );
    // Linear drag keeps it just under the 50 m/s the body was sized for.
    assert!(trajectory.landing_velocity() < 50.0);
}

#[test]
fn test_large_canopy_slows_landing() {
    let sim = create_test_simulator();
    let with_canopy = sim
        .simulate(
            1000.0,
            &[Trigger::deploy(400.0, Canopy::LargeCanopy, sim.regimes())],
            DEFAULT_MAX_TIME,
        )
        .unwrap();
    let free_fall = sim.simulate(1000.0, &[], DEFAULT_MAX_TIME).unwrap();

    assert_eq!(with_canopy.outcome(), Outcome::Landed);
    assert_eq!(free_fall.outcome(), Outcome::Landed);
    assert!(with_canopy.landing_velocity() < free_fall.landing_velocity());
    assert!(with_canopy.duration() > free_fall.duration());
}

#[test]
fn test_denser_air_lands_slower() {
    let regimes = create_test_simulator().regimes().clone();
    let scenario = JumpFactory::single_canopy(1000.0, 1000.0, &regimes);
    let runs = density_sweep(&PhysicalConstants::default(), &scenario, &[0.5, 1.225, 2.0]).unwrap();

    let landing: Vec<f64> = runs
        .iter()
        .map(|run| run.trajectory.landing_velocity())
        .collect();
    assert!(landing[0] > landing[1]);
    assert!(landing[1] > landing[2]);
}

#[test]
fn test_density_override_does_not_resize_canopies() {
    let sim = create_test_simulator();
    let thin = create_test_simulator().with_air_density(0.5).unwrap();

    assert_eq!(sim.regimes(), thin.regimes());
    assert_relative_eq!(thin.air_density(), 0.5);
    assert_relative_eq!(sim.air_density(), 1.225);
}

#[test]
fn test_invalid_initial_altitude() {
    let sim = create_test_simulator();
    let result = sim.simulate(0.0, &[], DEFAULT_MAX_TIME);

    assert!(matches!(result, Err(SimulationError::InvalidInput(_))));
}

#[test]
fn test_staged_jump_report() {
    let sim = create_test_simulator();
    let scenario = JumpFactory::staged(1000.0, 800.0, 400.0, sim.regimes());
    let trajectory = scenario.run(&sim).unwrap();

    assert_eq!(trajectory.outcome(), Outcome::Landed);
    assert_eq!(trajectory.regime_changes().len(), 3);
    assert!(trajectory.landing_velocity() < 10.0);
}
