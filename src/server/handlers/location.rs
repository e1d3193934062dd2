use axum::extract::{Extension, Json, Query};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::DynAPI;
use crate::device::DevicePositionSource;
use crate::entities::{Coordinates, PositionError, PositionFix};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct ReportFixParams {
    latitude: f64,
    longitude: f64,
    timestamp_millis: Option<i64>,
}

#[derive(Serialize, Deserialize)]
pub struct ReportErrorParams {
    reason: PositionError,
}

#[derive(Serialize, Deserialize)]
pub struct GeocodeParams {
    q: String,
}

#[derive(Serialize, Deserialize)]
pub struct Located {
    fix: PositionFix,
    /// Ready to drop into the start field.
    text: String,
}

pub async fn current(Extension(api): Extension<DynAPI>) -> Result<Json<Located>, Error> {
    let fix = api.locate().await?;

    Ok(Located {
        text: fix.point.to_string(),
        fix,
    }
    .into())
}

pub async fn report_fix(
    Extension(device): Extension<Arc<DevicePositionSource>>,
    Json(params): Json<ReportFixParams>,
) -> Result<Json<()>, Error> {
    let point = Coordinates::new(params.latitude, params.longitude)?;
    let timestamp_millis = params
        .timestamp_millis
        .unwrap_or_else(|| Utc::now().timestamp_millis());

    device.report_fix(PositionFix::new(point, timestamp_millis));

    Ok(().into())
}

pub async fn report_error(
    Extension(device): Extension<Arc<DevicePositionSource>>,
    Json(params): Json<ReportErrorParams>,
) -> Result<Json<()>, Error> {
    device.report_error(params.reason);

    Ok(().into())
}

pub async fn geocode(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<Coordinates>, Error> {
    let coordinates = api.geocode(params.q).await?;

    Ok(coordinates.into())
}
