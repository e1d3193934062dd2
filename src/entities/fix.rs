use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub point: Coordinates,
    pub timestamp_millis: i64,
}

impl PositionFix {
    pub fn new(point: Coordinates, timestamp_millis: i64) -> Self {
        Self {
            point,
            timestamp_millis,
        }
    }
}

/// Why a position source could not produce a fix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionError {
    PermissionDenied,
    Unavailable,
    TimedOut,
}

impl PositionError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "location permission denied, enable location access",
            Self::Unavailable => "location information unavailable",
            Self::TimedOut => "location request timed out",
        }
    }
}
