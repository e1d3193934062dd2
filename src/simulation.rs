use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::{
    config::Config,
    device::DevicePositionSource,
    entities::{Coordinates, PositionFix, RoutePath},
    error::{invalid_input_error, Error},
};

const CRUISE_SPEED_KMH: f64 = 40.0;
const CRUISE_SPEED_STD_DEV_KMH: f64 = 8.0;
const MIN_SPEED_KMH: f64 = 5.0;
// about two meters
const JITTER_DEGREES: f64 = 0.00002;

/// Drives a device along a route, for demos without real hardware.
#[derive(Debug)]
pub struct Simulation {
    device: Arc<DevicePositionSource>,
    tick: Duration,
    time_scale: f64,
    running: Mutex<Option<JoinHandle<()>>>,
}

impl Simulation {
    pub fn new(device: Arc<DevicePositionSource>, config: &Config) -> Self {
        Self {
            device,
            tick: config.simulation_tick,
            time_scale: config.simulation_time_scale,
            running: Mutex::new(None),
        }
    }

    /// Drives `route` in the background, cancelling the previous drive so
    /// only one simulated device reports at a time.
    pub fn start(self: &Arc<Self>, route: RoutePath) {
        let simulation = self.clone();
        let task = tokio::spawn(async move {
            if let Err(err) = simulation.drive(route).await {
                tracing::warn!("simulation failed: {}", err);
            }
        });

        let previous = self
            .running
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(task);

        if let Some(previous) = previous {
            tracing::info!("replacing running simulation");
            previous.abort();
        }
    }

    /// Reports fixes along `route` until the destination is reached or
    /// nobody is watching anymore. Returns the number of fixes reported.
    #[tracing::instrument(name = "Simulation::drive", skip_all, fields(waypoints = route.len()))]
    pub async fn drive(&self, route: RoutePath) -> Result<usize, Error> {
        let speed = Normal::new(CRUISE_SPEED_KMH, CRUISE_SPEED_STD_DEV_KMH)
            .map_err(|_| invalid_input_error())?;
        let jitter = Normal::new(0.0, JITTER_DEGREES).map_err(|_| invalid_input_error())?;
        let mut rng = StdRng::from_entropy();

        let step_millis = (self.tick.as_millis() as f64 * self.time_scale).max(1.0) as i64;
        let started_at = Utc::now().timestamp_millis();

        let waypoints = route.waypoints();
        let mut position = route.origin();
        let mut next = 1;
        let mut reported = 0;

        loop {
            let point = match next < waypoints.len() {
                true => Coordinates {
                    latitude: (position.latitude + jitter.sample(&mut rng)).clamp(-90.0, 90.0),
                    longitude: (position.longitude + jitter.sample(&mut rng))
                        .clamp(-180.0, 180.0),
                },
                false => position,
            };

            let timestamp_millis = started_at + reported as i64 * step_millis;
            self.device.report_fix(PositionFix::new(point, timestamp_millis));
            reported += 1;

            if next >= waypoints.len() {
                break;
            }

            tokio::time::sleep(self.tick).await;

            if self.device.watcher_count() == 0 {
                tracing::info!("nobody is watching, ending simulation");
                break;
            }

            let kmh = speed.sample(&mut rng).max(MIN_SPEED_KMH);
            let mut budget_km = kmh * step_millis as f64 / 3_600_000.0;

            while next < waypoints.len() && budget_km > 0.0 {
                let target = waypoints[next];
                let gap_km = position.distance_to(&target);

                if gap_km <= budget_km {
                    budget_km -= gap_km;
                    position = target;
                    next += 1;
                } else {
                    position = interpolate(position, target, budget_km / gap_km);
                    budget_km = 0.0;
                }
            }
        }

        tracing::info!("simulation reported {} fixes", reported);

        Ok(reported)
    }
}

fn interpolate(from: Coordinates, to: Coordinates, fraction: f64) -> Coordinates {
    Coordinates {
        latitude: from.latitude + (to.latitude - from.latitude) * fraction,
        longitude: from.longitude + (to.longitude - from.longitude) * fraction,
    }
}
