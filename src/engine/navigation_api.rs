use super::{ActiveWatch, Engine};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::{NavigationAPI, NavigationStatus},
    entities::{NavigationView, RoutePath},
    error::{invalid_state_error, missing_input_error, Error},
};

impl Engine {
    #[tracing::instrument(skip(self))]
    async fn plan_route(&self, start: &str, destination: &str) -> Result<RoutePath, Error> {
        let (origin, destination) = futures::try_join!(
            self.geocoder.resolve(start),
            self.geocoder.resolve(destination)
        )?;

        self.router.compute_route(origin, destination).await
    }
}

#[async_trait]
impl NavigationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn start_navigation(
        &self,
        start: String,
        destination: String,
    ) -> Result<NavigationView, Error> {
        let (start, destination) = (start.trim(), destination.trim());

        if start.is_empty() || destination.is_empty() {
            return Err(self.report("cannot start navigation", missing_input_error()));
        }

        let token = Uuid::new_v4();
        self.state.lock().await.pending = Some(token);

        let planned = self.plan_route(start, destination).await;

        let mut state = self.state.lock().await;

        if state.pending != Some(token) {
            tracing::warn!("start superseded while planning, discarding route");
            return Err(invalid_state_error());
        }
        state.pending = None;

        let route = planned.map_err(|err| self.report("error starting navigation", err))?;

        tracing::info!(
            "route planned: {} waypoints, {:.2} km",
            route.len(),
            route.length_km()
        );

        state.release_watch(self.positions.as_ref());
        let subscription = self.positions.watch();

        state.tracker.start(route);
        state.session = Some(token);
        state.view = NavigationView::tracking();
        self.sink.render(&state.view);

        let task = self.spawn_tracking(token, subscription.updates);
        state.watch = Some(ActiveWatch {
            handle: subscription.handle,
            task,
        });

        Ok(state.view.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn stop_navigation(&self) -> Result<NavigationView, Error> {
        let mut state = self.state.lock().await;

        state.pending = None;
        state.session = None;
        state.release_watch(self.positions.as_ref());
        state.tracker.stop();
        state.view = NavigationView::idle();

        self.sink.render(&state.view);

        Ok(state.view.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn find_route(&self) -> Result<RoutePath, Error> {
        let state = self.state.lock().await;

        state
            .tracker
            .session()
            .route()
            .cloned()
            .ok_or_else(|| invalid_state_error())
    }

    #[tracing::instrument(skip(self))]
    async fn navigation_status(&self) -> Result<NavigationStatus, Error> {
        let state = self.state.lock().await;
        let session = state.tracker.session();

        Ok(NavigationStatus {
            status: session.status(),
            view: state.view.clone(),
            destination: session.route().map(|route| route.destination()),
            last_fix: session.last_fix().copied(),
        })
    }
}
