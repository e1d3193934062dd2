//! Live navigation tracking.
//!
//! [`NavigationTracker`] turns a stream of [`PositionFix`]es into speed,
//! remaining distance and ETA, and ends the session on its own once the
//! device is within [`ARRIVAL_THRESHOLD_KM`] of the destination. It does no
//! I/O and never fails; callers on a multi-threaded host must serialize
//! calls into it.

use crate::entities::{NavigationSession, NavigationUpdate, PositionFix, RoutePath, Status};

/// Assumed average travel speed behind every ETA.
pub const ASSUMED_SPEED_KMH: f64 = 40.0;

/// Distance to the destination under which the trip counts as complete.
pub const ARRIVAL_THRESHOLD_KM: f64 = 0.05;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Default)]
pub struct NavigationTracker {
    session: NavigationSession,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    pub fn status(&self) -> Status {
        self.session.status()
    }

    /// Begins a new session, discarding whatever the previous one held.
    #[tracing::instrument(skip(self, route), fields(waypoints = route.len()))]
    pub fn start(&mut self, route: RoutePath) -> &NavigationSession {
        self.session.begin(route);
        &self.session
    }

    #[tracing::instrument(skip(self))]
    pub fn stop(&mut self) {
        self.session.clear();
    }

    pub fn on_fix(&mut self, fix: PositionFix) -> NavigationUpdate {
        if !self.session.is_active() {
            return NavigationUpdate::default();
        }

        let speed_kmh = self.session.last_fix().and_then(|last| {
            // an overflowing difference is as unusable as a negative one
            let elapsed_millis = fix.timestamp_millis.checked_sub(last.timestamp_millis)?;

            if elapsed_millis <= 0 {
                return None;
            }

            let hours = elapsed_millis as f64 / MILLIS_PER_HOUR;
            Some(last.point.distance_to(&fix.point) / hours)
        });

        let remaining_distance_km = self
            .session
            .route()
            .map(|route| fix.point.distance_to(&route.destination()));

        let eta_minutes = remaining_distance_km.map(|km| km / ASSUMED_SPEED_KMH * 60.0);

        let arrived = matches!(remaining_distance_km, Some(km) if km < ARRIVAL_THRESHOLD_KM);

        let update = NavigationUpdate {
            speed_kmh,
            remaining_distance_km,
            eta_minutes,
            arrived,
        };

        if arrived {
            tracing::info!("arrived at destination");
            self.stop();
        } else {
            self.session.record(fix);
        }

        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Coordinates;

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude).unwrap()
    }

    fn fix(latitude: f64, longitude: f64, timestamp_millis: i64) -> PositionFix {
        PositionFix::new(point(latitude, longitude), timestamp_millis)
    }

    fn route_to(latitude: f64, longitude: f64) -> RoutePath {
        RoutePath::new(vec![point(51.0, -0.1), point(latitude, longitude)]).unwrap()
    }

    #[test]
    fn idle_tracker_ignores_fixes() {
        let mut tracker = NavigationTracker::new();

        let update = tracker.on_fix(fix(51.5, -0.1, 0));

        assert_eq!(update, NavigationUpdate::default());
        assert_eq!(tracker.status(), Status::Idle);
        assert!(tracker.session().last_fix().is_none());
    }

    #[test]
    fn first_fix_has_no_speed() {
        let mut tracker = NavigationTracker::new();
        tracker.start(route_to(52.0, 0.0));

        let update = tracker.on_fix(fix(51.5, -0.1, 1_000));

        assert!(update.speed_kmh.is_none());
        assert!(update.remaining_distance_km.is_some());
        assert_eq!(tracker.session().last_fix(), Some(&fix(51.5, -0.1, 1_000)));
    }

    #[test]
    fn speed_between_consecutive_fixes() {
        let mut tracker = NavigationTracker::new();
        tracker.start(route_to(52.0, 0.0));

        tracker.on_fix(fix(51.5007, -0.1246, 0));
        let update = tracker.on_fix(fix(51.5008, -0.1246, 60_000));

        let speed = update.speed_kmh.unwrap();
        assert!((speed - 0.667).abs() < 0.001, "got {}", speed);
    }

    #[test]
    fn non_increasing_timestamps_omit_speed() {
        let mut tracker = NavigationTracker::new();
        tracker.start(route_to(52.0, 0.0));

        tracker.on_fix(fix(51.5007, -0.1246, 5_000));
        let same = tracker.on_fix(fix(51.5008, -0.1246, 5_000));
        let earlier = tracker.on_fix(fix(51.5009, -0.1246, 4_000));

        assert!(same.speed_kmh.is_none());
        assert!(earlier.speed_kmh.is_none());
        // the earlier fix is still accepted as the latest one
        assert_eq!(tracker.session().last_fix().unwrap().timestamp_millis, 4_000);
    }

    #[test]
    fn extreme_timestamps_omit_speed() {
        let mut tracker = NavigationTracker::new();
        tracker.start(route_to(0.0, 0.0));

        let first = tracker.on_fix(fix(1.0, 1.0, i64::MIN));
        let wrapped = tracker.on_fix(fix(1.0, 1.0001, 1_000));
        let latest = tracker.on_fix(fix(1.0, 1.0002, i64::MAX));
        let back = tracker.on_fix(fix(1.0, 1.0003, i64::MIN));

        assert!(first.speed_kmh.is_none());
        assert!(wrapped.speed_kmh.is_none());
        assert!(latest.speed_kmh.unwrap().is_finite());
        assert!(back.speed_kmh.is_none());
        assert_eq!(tracker.status(), Status::Navigating);

        let arrival = tracker.on_fix(fix(0.0, 0.0001, 2_000));
        assert!(arrival.arrived);
        assert_eq!(tracker.status(), Status::Idle);
    }

    #[test]
    fn eta_assumes_forty_kmh() {
        let mut tracker = NavigationTracker::new();
        tracker.start(route_to(0.0, 0.0));

        let update = tracker.on_fix(fix(0.0, 1.0, 0));

        let km = update.remaining_distance_km.unwrap();
        assert!((km - 111.195).abs() < 0.01);
        assert_eq!(update.eta_minutes, Some(km / 40.0 * 60.0));
        assert!(!update.arrived);
    }

    #[test]
    fn arrival_reports_final_metrics_and_goes_idle() {
        let mut tracker = NavigationTracker::new();
        tracker.start(route_to(0.0, 0.0));
        tracker.on_fix(fix(0.0, 0.001, 0));

        let update = tracker.on_fix(fix(0.0, 0.00044, 10_000));

        assert!(update.arrived);
        assert!(update.speed_kmh.is_some());
        assert!((update.remaining_distance_km.unwrap() - 0.049).abs() < 0.001);
        assert_eq!(tracker.status(), Status::Idle);
        assert!(tracker.session().route().is_none());
        assert!(tracker.session().last_fix().is_none());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut tracker = NavigationTracker::new();
        tracker.start(route_to(0.0, 0.0));
        tracker.on_fix(fix(1.0, 1.0, 0));

        tracker.stop();
        let once = tracker.session().clone();
        tracker.stop();

        assert_eq!(tracker.session(), &once);
        assert_eq!(tracker.status(), Status::Idle);

        let mut fresh = NavigationTracker::new();
        fresh.stop();
        assert_eq!(fresh.status(), Status::Idle);
    }

    #[test]
    fn restart_resets_last_fix() {
        let mut tracker = NavigationTracker::new();
        tracker.start(route_to(0.0, 0.0));
        tracker.on_fix(fix(1.0, 1.0, 0));

        let session = tracker.start(route_to(2.0, 2.0));

        assert!(session.is_active());
        assert!(session.last_fix().is_none());
        assert_eq!(session.route().unwrap().destination(), point(2.0, 2.0));

        let update = tracker.on_fix(fix(1.0, 1.0, 1_000));
        assert!(update.speed_kmh.is_none());
    }
}
