use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{DynAPI, NavigationStatus};
use crate::entities::{NavigationView, Notice, RoutePath};
use crate::error::Error;
use crate::server::Dashboard;
use crate::simulation::Simulation;

#[derive(Serialize, Deserialize)]
pub struct StartParams {
    start: String,
    destination: String,
}

#[derive(Serialize, Deserialize)]
pub struct Overview {
    navigation: NavigationStatus,
    notices: Vec<Notice>,
}

pub async fn show(
    Extension(api): Extension<DynAPI>,
    Extension(dashboard): Extension<Arc<Dashboard>>,
) -> Result<Json<Overview>, Error> {
    let navigation = api.navigation_status().await?;
    let notices = dashboard.snapshot().notices;

    Ok(Overview {
        navigation,
        notices,
    }
    .into())
}

pub async fn start(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<StartParams>,
) -> Result<Json<NavigationView>, Error> {
    let view = api
        .start_navigation(params.start, params.destination)
        .await?;

    Ok(view.into())
}

pub async fn stop(Extension(api): Extension<DynAPI>) -> Result<Json<NavigationView>, Error> {
    let view = api.stop_navigation().await?;

    Ok(view.into())
}

pub async fn route(Extension(api): Extension<DynAPI>) -> Result<Json<RoutePath>, Error> {
    let route = api.find_route().await?;

    Ok(route.into())
}

pub async fn simulate(
    Extension(api): Extension<DynAPI>,
    Extension(simulation): Extension<Arc<Simulation>>,
) -> Result<Json<RoutePath>, Error> {
    let route = api.find_route().await?;

    simulation.start(route.clone());

    Ok(route.into())
}
