use std::path::PathBuf;

use clap::Args;
use jiff::{SignedDuration, Timestamp};
use lastmile_solver::problem::{
    kmh::Kmh,
    snapshot::DispatchSnapshot,
    store::StoreBuilder,
    time_window::TimeWindow,
    truck::TruckBuilder,
    warehouse::Warehouse,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::info;

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of stores to scatter around the warehouse
    #[arg(short, long, default_value_t = 50)]
    stores: usize,

    /// Fleet size
    #[arg(short, long, default_value_t = 5)]
    trucks: usize,

    /// Seed; the same seed always yields the same snapshot
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Where to write the snapshot; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

const WAREHOUSE_LATITUDE: f64 = 50.8503;
const WAREHOUSE_LONGITUDE: f64 = 4.3517;

pub fn run(args: GenerateArgs) -> Result<(), anyhow::Error> {
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let departure_time: Timestamp = "2026-04-01T08:00:00Z".parse()?;

    let warehouse = Warehouse::new(
        "wh-1",
        "Generated depot",
        WAREHOUSE_LATITUDE,
        WAREHOUSE_LONGITUDE,
    );

    let stores = (0..args.stores)
        .map(|index| {
            // Roughly a 10 km radius at this latitude.
            let latitude = WAREHOUSE_LATITUDE + rng.random_range(-0.09..0.09);
            let longitude = WAREHOUSE_LONGITUDE + rng.random_range(-0.14..0.14);

            let window = if rng.random_bool(0.5) {
                let opens = departure_time
                    + SignedDuration::from_mins(rng.random_range(0..240));
                let closes = opens + SignedDuration::from_mins(rng.random_range(60..240));
                TimeWindow::new(Some(opens), Some(closes))
            } else {
                TimeWindow::unconstrained()
            };

            StoreBuilder::default()
                .with_id(format!("s-{index:03}"))
                .with_name(format!("Store {index:03}"))
                .with_position(latitude, longitude)
                .with_demand(rng.random_range(1.0..40.0f64).round())
                .with_time_window(window)
                .build()
        })
        .collect();

    let trucks = (0..args.trucks)
        .map(|index| {
            TruckBuilder::default()
                .with_id(format!("t-{index:02}"))
                .with_name(format!("Truck {index:02}"))
                .with_capacity(rng.random_range(150.0..400.0f64).round())
                .with_speed(Kmh::new(rng.random_range(30.0..60.0f64).round()))
                .with_warehouse_id("wh-1")
                .build()
        })
        .collect();

    let snapshot = DispatchSnapshot {
        warehouse,
        trucks,
        stores,
        departure_time: Some(departure_time),
        distance_method: Default::default(),
        max_route_duration: None,
    };

    info!(
        stores = args.stores,
        trucks = args.trucks,
        seed = args.seed,
        "snapshot generated"
    );

    let json = serde_json::to_string_pretty(&snapshot)?;
    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)?;
        }
        None => println!("{json}"),
    }

    Ok(())
}
