use serde::{Deserialize, Serialize};

use crate::entities::{PositionFix, RoutePath};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Idle,
    Navigating,
}

/// State of one navigation run. The route is fixed at `begin` and the last
/// fix is dropped whenever the session ends.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationSession {
    active: bool,
    route: Option<RoutePath>,
    last_fix: Option<PositionFix>,
}

impl NavigationSession {
    pub fn status(&self) -> Status {
        match self.active {
            true => Status::Navigating,
            false => Status::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn route(&self) -> Option<&RoutePath> {
        self.route.as_ref()
    }

    pub fn last_fix(&self) -> Option<&PositionFix> {
        self.last_fix.as_ref()
    }

    pub(crate) fn begin(&mut self, route: RoutePath) {
        *self = Self {
            active: true,
            route: Some(route),
            last_fix: None,
        };
    }

    pub(crate) fn record(&mut self, fix: PositionFix) {
        if self.active {
            self.last_fix = Some(fix);
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Metrics derived from one fix. `None` means the input was insufficient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationUpdate {
    pub speed_kmh: Option<f64>,
    pub remaining_distance_km: Option<f64>,
    pub eta_minutes: Option<f64>,
    pub arrived: bool,
}
