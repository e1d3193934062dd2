use std::sync::Arc;

use navitrack::config::Config;
use navitrack::device::DevicePositionSource;
use navitrack::engine::Engine;
use navitrack::external::{nominatim::Nominatim, osrm::Osrm, Geocoder};
use navitrack::server::{router, serve, Dashboard};
use navitrack::simulation::Simulation;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().unwrap();

    let device = Arc::new(DevicePositionSource::new(
        config.fix_timeout,
        config.fix_maximum_age,
    ));
    let dashboard = Arc::new(Dashboard::new());
    let geocoder = Geocoder::new(Nominatim::new(&config).unwrap());
    let routing = Osrm::new(&config).unwrap();

    let engine = Engine::new(
        &config,
        device.clone(),
        Arc::new(geocoder),
        Arc::new(routing),
        dashboard.clone(),
    );
    let simulation = Arc::new(Simulation::new(device.clone(), &config));

    serve(router(engine, device, dashboard, simulation), config.addr).await;
}
