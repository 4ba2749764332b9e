//! Invariant checks over randomly generated fleets. Every plan the solver
//! emits must respect capacities, windows, and its own reported totals,
//! whatever the input looks like.

use std::collections::HashMap;

use jiff::{SignedDuration, Timestamp};
use lastmile_solver::{
    problem::{
        dispatch_problem::{DispatchProblem, DispatchProblemBuilder},
        distance_method::DistanceMethod,
        kmh::Kmh,
        store::StoreBuilder,
        time_window::TimeWindow,
        truck::TruckBuilder,
        warehouse::Warehouse,
    },
    solver::{fleet::FleetSolver, plan::DispatchPlan},
};
use rand::{rngs::SmallRng, Rng, SeedableRng};

const WAREHOUSE_ID: &str = "wh-1";

struct Fixture {
    problem: DispatchProblem,
    /// store id -> (x, y) in meters on the euclidean plane.
    positions: HashMap<String, (f64, f64)>,
    demands: HashMap<String, f64>,
    windows: HashMap<String, TimeWindow>,
    /// truck id -> (speed in m/s, capacity).
    trucks: HashMap<String, (f64, f64)>,
}

fn random_fixture(seed: u64) -> Fixture {
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut positions = HashMap::new();
    let mut demands = HashMap::new();
    let mut windows = HashMap::new();
    let mut stores = Vec::new();
    for index in 0..30 {
        let id = format!("s-{index:02}");
        let x = rng.random_range(-10_000.0..10_000.0f64);
        let y = rng.random_range(-10_000.0..10_000.0f64);
        let demand = rng.random_range(1.0..30.0f64);

        let window = if rng.random_bool(0.5) {
            let start = Timestamp::UNIX_EPOCH + SignedDuration::from_secs(rng.random_range(0..3600));
            let end = start + SignedDuration::from_secs(rng.random_range(1200..5400));
            TimeWindow::new(Some(start), Some(end))
        } else {
            TimeWindow::unconstrained()
        };

        positions.insert(id.clone(), (x, y));
        demands.insert(id.clone(), demand);
        windows.insert(id.clone(), window.clone());
        stores.push(
            StoreBuilder::default()
                .with_id(&id)
                .with_position(y, x)
                .with_demand(demand)
                .with_time_window(window)
                .build(),
        );
    }

    let mut trucks = HashMap::new();
    let mut fleet = Vec::new();
    for index in 0..4 {
        let id = format!("t-{index}");
        let capacity = rng.random_range(100.0..200.0f64);
        let speed_kmh = 36.0;

        trucks.insert(id.clone(), (speed_kmh / 3.6, capacity));
        fleet.push(
            TruckBuilder::default()
                .with_id(&id)
                .with_capacity(capacity)
                .with_speed(Kmh::new(speed_kmh))
                .with_warehouse_id(WAREHOUSE_ID)
                .build(),
        );
    }

    let problem = DispatchProblemBuilder::new(Warehouse::new(WAREHOUSE_ID, "Depot", 0.0, 0.0))
        .with_trucks(fleet)
        .with_stores(stores)
        .with_distance_method(DistanceMethod::Euclidean)
        .build();

    Fixture {
        problem,
        positions,
        demands,
        windows,
        trucks,
    }
}

fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn check_plan(fixture: &Fixture, plan: &DispatchPlan) {
    let mut served: Vec<&str> = Vec::new();

    for route in &plan.routes {
        let (speed, capacity) = fixture.trucks[&route.truck_id];

        let stops: Vec<_> = plan.stops_of(&route.id).collect();
        assert!(!stops.is_empty(), "empty route {} was emitted", route.id);

        let mut load = 0.0;
        let mut distance = 0.0;
        let mut clock = 0.0;
        let mut at = (0.0, 0.0);
        for (expected_sequence, stop) in stops.iter().enumerate() {
            assert_eq!(stop.sequence_number as usize, expected_sequence);
            served.push(&stop.store_id);

            load += fixture.demands[&stop.store_id];

            let next = fixture.positions[&stop.store_id];
            let leg = euclidean(at, next);
            distance += leg;
            clock += leg / speed;
            at = next;

            let arrival = Timestamp::UNIX_EPOCH + SignedDuration::from_secs_f64(clock);
            let window = &fixture.windows[&stop.store_id];
            let service = window.service_time(arrival);
            assert!(
                window.admits(service),
                "stop {} served at {service} outside its window",
                stop.store_id
            );
            clock = service.duration_since(Timestamp::UNIX_EPOCH).as_secs_f64();
        }

        assert!(
            load <= capacity + 1e-9,
            "route {} carries {load} over capacity {capacity}",
            route.id
        );
        assert!(
            (route.distance.value() - distance).abs() < 1e-6,
            "route {} reports {} but its stops measure {distance}",
            route.id,
            route.distance.value()
        );
        assert!(
            (route.estimated_time.as_secs_f64() - clock).abs() < 1e-6,
            "route {} reports {} but its walk takes {clock}s",
            route.id,
            route.estimated_time.as_secs_f64()
        );
    }

    let mut deduped = served.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), served.len(), "a store was served twice");

    for unserved in &plan.unserved {
        assert!(!served.contains(&unserved.as_str()));
    }
    assert_eq!(
        served.len() + plan.unserved.len(),
        fixture.problem.stores().len(),
        "every valid store must be either served or reported unserved"
    );
}

#[test]
fn random_fleets_always_yield_consistent_plans() {
    let solver = FleetSolver::with_defaults();
    for seed in 0..10 {
        let fixture = random_fixture(seed);
        let plan = solver.solve(&fixture.problem);
        check_plan(&fixture, &plan);
    }
}

#[test]
fn random_fleets_solve_deterministically() {
    let solver = FleetSolver::with_defaults();
    for seed in [3, 17] {
        let first = serde_json::to_string(&solver.solve(&random_fixture(seed).problem)).unwrap();
        let second = serde_json::to_string(&solver.solve(&random_fixture(seed).problem)).unwrap();
        assert_eq!(first, second, "seed {seed} produced diverging plans");
    }
}

#[test]
fn tight_duration_ceiling_shrinks_the_plan() {
    let fixture = random_fixture(42);
    let baseline = FleetSolver::with_defaults().solve(&fixture.problem);

    let mut rng = SmallRng::seed_from_u64(42);
    let mut stores = Vec::new();
    for index in 0..30 {
        let id = format!("s-{index:02}");
        // Burn the same random draws so the geometry matches the baseline.
        let x = rng.random_range(-10_000.0..10_000.0f64);
        let y = rng.random_range(-10_000.0..10_000.0f64);
        let demand = rng.random_range(1.0..30.0f64);
        let window = if rng.random_bool(0.5) {
            let start = Timestamp::UNIX_EPOCH + SignedDuration::from_secs(rng.random_range(0..3600));
            let end = start + SignedDuration::from_secs(rng.random_range(1200..5400));
            TimeWindow::new(Some(start), Some(end))
        } else {
            TimeWindow::unconstrained()
        };
        stores.push(
            StoreBuilder::default()
                .with_id(&id)
                .with_position(y, x)
                .with_demand(demand)
                .with_time_window(window)
                .build(),
        );
    }
    let mut fleet = Vec::new();
    for index in 0..4 {
        fleet.push(
            TruckBuilder::default()
                .with_id(format!("t-{index}"))
                .with_capacity(rng.random_range(100.0..200.0f64))
                .with_speed(Kmh::new(36.0))
                .with_warehouse_id(WAREHOUSE_ID)
                .build(),
        );
    }

    let capped = DispatchProblemBuilder::new(Warehouse::new(WAREHOUSE_ID, "Depot", 0.0, 0.0))
        .with_trucks(fleet)
        .with_stores(stores)
        .with_distance_method(DistanceMethod::Euclidean)
        .with_max_route_duration(SignedDuration::from_secs(600))
        .build();
    let plan = FleetSolver::with_defaults().solve(&capped);

    // Ten minutes at 10 m/s bounds each route; some demand has to drop.
    assert!(plan.unserved.len() >= baseline.unserved.len());
    for route in &plan.routes {
        assert!(route.estimated_time <= SignedDuration::from_secs(600));
    }
}
