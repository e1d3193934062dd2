use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{invalid_input_error, Error};

/// Mean Earth radius used for every great-circle distance in the crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        let coordinates = Self {
            latitude,
            longitude,
        };

        if !coordinates.is_valid() {
            return Err(invalid_input_error());
        }

        Ok(coordinates)
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Parses a `"<lat>, <lng>"` literal such as `"51.5, -0.1"`.
    ///
    /// Only plain decimals are accepted: no exponent, no leading `+` and no
    /// whitespace before the comma. Pairs outside the valid ranges are
    /// rejected.
    pub fn parse_literal(text: &str) -> Option<Self> {
        let (latitude, longitude) = text.split_once(',')?;

        let latitude = decimal_literal(latitude)?;
        let longitude = decimal_literal(longitude.trim_start())?;

        Self::new(latitude, longitude).ok()
    }

    /// Great-circle distance in kilometers (haversine).
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

fn decimal_literal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude).unwrap()
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(Coordinates::new(90.5, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.1).is_err());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let pairs = [
            (point(51.5007, -0.1246), point(48.8584, 2.2945)),
            (point(-33.8568, 151.2153), point(40.6892, -74.0445)),
            (point(0.0, 179.9), point(0.0, -179.9)),
            (point(89.9, 0.0), point(-89.9, 0.0)),
        ];

        for (a, b) in pairs {
            assert_eq!(a.distance_to(&b), b.distance_to(&a));
            assert_eq!(a.distance_to(&a), 0.0);
        }
    }

    #[test]
    fn distance_matches_known_values() {
        let a = point(51.5007, -0.1246);
        let b = point(51.5008, -0.1246);
        assert!((a.distance_to(&b) - 0.0111).abs() < 0.0001);

        let london = point(51.5074, -0.1278);
        let paris = point(48.8566, 2.3522);
        let d = london.distance_to(&paris);
        assert!(d > 340.0 && d < 346.0, "got {} km", d);
    }

    #[test]
    fn parses_coordinate_literals() {
        assert_eq!(Coordinates::parse_literal("51.5, -0.1"), Some(point(51.5, -0.1)));
        assert_eq!(Coordinates::parse_literal("51.5,-0.1"), Some(point(51.5, -0.1)));
        assert_eq!(Coordinates::parse_literal("-12,  7."), Some(point(-12.0, 7.0)));
    }

    #[test]
    fn rejects_non_literals() {
        for text in [
            "10 Downing Street",
            "51.5 , -0.1",
            "51.5",
            "+51.5, 0.1",
            ".5, 0.1",
            "1e2, 3",
            "51.5, -0.1, 3",
            "95.0, 0.0",
        ] {
            assert_eq!(Coordinates::parse_literal(text), None, "{}", text);
        }
    }

    #[test]
    fn displays_with_six_decimals() {
        assert_eq!(point(51.5, -0.1).to_string(), "51.500000, -0.100000");
    }
}
