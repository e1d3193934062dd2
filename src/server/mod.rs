mod dashboard;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::device::DevicePositionSource;
use crate::server::handlers::{location, navigation};
use crate::simulation::Simulation;

pub use dashboard::{Dashboard, Snapshot};

pub fn router<T: API + Sync + Send + 'static>(
    api: T,
    device: Arc<DevicePositionSource>,
    dashboard: Arc<Dashboard>,
    simulation: Arc<Simulation>,
) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/navigation", get(navigation::show))
        .route("/navigation/start", post(navigation::start))
        .route("/navigation/stop", post(navigation::stop))
        .route("/navigation/route", get(navigation::route))
        .route("/navigation/simulate", post(navigation::simulate))
        .route("/location", get(location::current))
        .route("/location/fixes", post(location::report_fix))
        .route("/location/errors", post(location::report_error))
        .route("/geocode", get(location::geocode))
        .layer(Extension(api))
        .layer(Extension(device))
        .layer(Extension(dashboard))
        .layer(Extension(simulation))
}

pub async fn serve(router: Router, addr: SocketAddr) {
    tracing::info!("listening on {}", addr);

    if let Err(err) = axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("server error: {}", err);
    }
}
