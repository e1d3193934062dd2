//! Display strings handed to the presentation layer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::NavigationUpdate;

const PLACEHOLDER: &str = "--";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationView {
    pub tracking: bool,
    pub speed: String,
    pub distance_left: String,
    pub time_left: String,
    pub arrived: bool,
}

impl NavigationView {
    pub fn idle() -> Self {
        Self {
            tracking: false,
            speed: format_speed(None),
            distance_left: PLACEHOLDER.into(),
            time_left: PLACEHOLDER.into(),
            arrived: false,
        }
    }

    /// A freshly started session, before the first fix.
    pub fn tracking() -> Self {
        Self {
            tracking: true,
            ..Self::idle()
        }
    }

    /// `previous` supplies the speed readout when this update carries none,
    /// the way a display keeps showing the last measured value.
    pub fn from_update(update: &NavigationUpdate, previous: &NavigationView) -> Self {
        let speed = match update.speed_kmh {
            Some(_) => format_speed(update.speed_kmh),
            None => previous.speed.clone(),
        };

        Self {
            tracking: !update.arrived,
            speed,
            distance_left: update
                .remaining_distance_km
                .map(format_distance)
                .unwrap_or_else(|| PLACEHOLDER.into()),
            time_left: update
                .eta_minutes
                .map(format_eta)
                .unwrap_or_else(|| PLACEHOLDER.into()),
            arrived: update.arrived,
        }
    }
}

pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.2} km", km)
    }
}

pub fn format_eta(minutes: f64) -> String {
    if minutes < 1.0 {
        "< 1 min".into()
    } else {
        format!("{} min", minutes.round() as i64)
    }
}

pub fn format_speed(kmh: Option<f64>) -> String {
    match kmh {
        Some(kmh) => format!("{:.1} km/h", kmh),
        None => format!("{} km/h", PLACEHOLDER),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient message for the user; hidden once `expires_at` has passed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn info(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(NoticeKind::Info, message.into(), ttl)
    }

    pub fn error(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(NoticeKind::Error, message.into(), ttl)
    }

    fn new(kind: NoticeKind, message: String, ttl: Duration) -> Self {
        Self {
            kind,
            message,
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_switch_units_at_one_kilometer() {
        assert_eq!(format_distance(0.4), "400 m");
        assert_eq!(format_distance(0.0494), "49 m");
        assert_eq!(format_distance(0.9996), "1000 m");
        assert_eq!(format_distance(1.0), "1.00 km");
        assert_eq!(format_distance(2.5), "2.50 km");
    }

    #[test]
    fn eta_rounds_to_whole_minutes() {
        assert_eq!(format_eta(2.5 / 40.0 * 60.0), "4 min");
        assert_eq!(format_eta(0.4 / 40.0 * 60.0), "< 1 min");
        assert_eq!(format_eta(1.0), "1 min");
        assert_eq!(format_eta(12.49), "12 min");
    }

    #[test]
    fn view_from_update() {
        let update = NavigationUpdate {
            speed_kmh: Some(0.6672),
            remaining_distance_km: Some(0.4),
            eta_minutes: Some(0.6),
            arrived: false,
        };

        let view = NavigationView::from_update(&update, &NavigationView::tracking());

        assert!(view.tracking);
        assert_eq!(view.speed, "0.7 km/h");
        assert_eq!(view.distance_left, "400 m");
        assert_eq!(view.time_left, "< 1 min");
    }

    #[test]
    fn speed_readout_carries_over() {
        let previous = NavigationView {
            speed: "31.0 km/h".into(),
            ..NavigationView::tracking()
        };
        let update = NavigationUpdate {
            remaining_distance_km: Some(2.5),
            eta_minutes: Some(3.75),
            ..Default::default()
        };

        let view = NavigationView::from_update(&update, &previous);
        assert_eq!(view.speed, "31.0 km/h");
        assert_eq!(view.time_left, "4 min");
    }

    #[test]
    fn idle_view_shows_placeholders() {
        let view = NavigationView::idle();
        assert!(!view.tracking);
        assert_eq!(view.speed, "-- km/h");
        assert_eq!(view.distance_left, "--");
        assert_eq!(view.time_left, "--");
    }

    #[test]
    fn notices_expire() {
        let notice = Notice::info("hello", Duration::seconds(5));
        assert!(!notice.is_expired(Utc::now()));
        assert!(notice.is_expired(Utc::now() + Duration::seconds(6)));
    }
}
