use geo_types::LineString;
use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::error::{invalid_input_error, Error};

/// Ordered travel path; the last waypoint is the destination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinates>", into = "Vec<Coordinates>")]
pub struct RoutePath {
    waypoints: Vec<Coordinates>,
}

impl RoutePath {
    pub fn new(waypoints: Vec<Coordinates>) -> Result<Self, Error> {
        if waypoints.is_empty() || waypoints.iter().any(|c| !c.is_valid()) {
            return Err(invalid_input_error());
        }

        Ok(Self { waypoints })
    }

    pub fn waypoints(&self) -> &[Coordinates] {
        &self.waypoints
    }

    pub fn origin(&self) -> Coordinates {
        self.waypoints[0]
    }

    pub fn destination(&self) -> Coordinates {
        self.waypoints[self.waypoints.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Length along the polyline in kilometers.
    pub fn length_km(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

impl TryFrom<Vec<Coordinates>> for RoutePath {
    type Error = Error;

    fn try_from(waypoints: Vec<Coordinates>) -> Result<Self, Self::Error> {
        Self::new(waypoints)
    }
}

impl From<RoutePath> for Vec<Coordinates> {
    fn from(route: RoutePath) -> Self {
        route.waypoints
    }
}

/// Line strings follow the GeoJSON axis order: x is longitude, y is latitude.
impl TryFrom<LineString<f64>> for RoutePath {
    type Error = Error;

    fn try_from(line: LineString<f64>) -> Result<Self, Self::Error> {
        let waypoints = line
            .coords()
            .map(|c| Coordinates::new(c.y, c.x))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(waypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_needs_a_waypoint() {
        assert!(RoutePath::new(vec![]).is_err());

        let route = RoutePath::new(vec![Coordinates::new(1.0, 2.0).unwrap()]).unwrap();
        assert_eq!(route.origin(), route.destination());
        assert_eq!(route.length_km(), 0.0);
    }

    #[test]
    fn line_string_axes_are_swapped() {
        let line = LineString::from(vec![(-0.1246, 51.5007), (-0.1246, 51.5008)]);
        let route = RoutePath::try_from(line).unwrap();

        assert_eq!(route.len(), 2);
        assert_eq!(route.destination(), Coordinates::new(51.5008, -0.1246).unwrap());
    }

    #[test]
    fn deserializing_an_empty_route_fails() {
        assert!(serde_json::from_str::<RoutePath>("[]").is_err());

        let route: RoutePath =
            serde_json::from_str(r#"[{"latitude": 1.0, "longitude": 2.0}]"#).unwrap();
        assert_eq!(route.len(), 1);
    }
}
