use async_trait::async_trait;
use geo_types::LineString;
use serde::{Deserialize, Serialize};

use super::RouteProvider;
use crate::{
    config::Config,
    entities::{Coordinates, RoutePath},
    error::{route_not_found_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Route {
    geometry: Geometry,
    distance: f64,
    duration: f64,
}

/// GeoJSON line: `[longitude, latitude]` pairs.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    coordinates: Vec<(f64, f64)>,
}

/// Routing through an OSRM v1 server.
#[derive(Clone, Debug)]
pub struct Osrm {
    client: reqwest::Client,
    api_base: String,
}

impl Osrm {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            api_base: config.osrm_api_base.clone(),
        })
    }
}

#[async_trait]
impl RouteProvider for Osrm {
    #[tracing::instrument(skip(self))]
    async fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RoutePath, Error> {
        let url = format!(
            "https://{}/route/v1/driving/{},{};{},{}",
            self.api_base,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );

        let res = self
            .client
            .get(url)
            .query(&[("overview", "full")])
            .query(&[("geometries", "geojson")])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        // NoRoute and NoSegment come back as 400
        if (400..500).contains(&status_code) {
            return Err(route_not_found_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;

        route_from_response(data)
    }
}

fn route_from_response(data: Response) -> Result<RoutePath, Error> {
    if data.code != "Ok" {
        return Err(route_not_found_error());
    }

    let route = data
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| route_not_found_error())?;

    tracing::info!(
        "osrm route: {:.0} m, {:.0} s, {} points",
        route.distance,
        route.duration,
        route.geometry.coordinates.len()
    );

    let line = LineString::from(route.geometry.coordinates);

    RoutePath::try_from(line).map_err(|_| route_not_found_error())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_route_from_geojson() {
        let body = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-0.1246, 51.5007], [-0.1250, 51.5010], [-0.1278, 51.5074]]
                },
                "distance": 812.3,
                "duration": 95.1
            }]
        }"#;

        let route = route_from_response(serde_json::from_str(body).unwrap()).unwrap();

        assert_eq!(route.len(), 3);
        assert_eq!(route.destination(), Coordinates::new(51.5074, -0.1278).unwrap());
    }

    #[test]
    fn no_route_is_route_not_found() {
        let data: Response = serde_json::from_str(r#"{"code": "NoRoute", "routes": []}"#).unwrap();
        assert_eq!(route_from_response(data).unwrap_err(), route_not_found_error());

        let data: Response = serde_json::from_str(r#"{"code": "Ok"}"#).unwrap();
        assert_eq!(route_from_response(data).unwrap_err(), route_not_found_error());
    }

    #[test]
    fn empty_geometry_is_route_not_found() {
        let body = r#"{"code": "Ok", "routes": [{"geometry": {"coordinates": []}, "distance": 0, "duration": 0}]}"#;
        let data: Response = serde_json::from_str(body).unwrap();

        assert_eq!(route_from_response(data).unwrap_err(), route_not_found_error());
    }
}
