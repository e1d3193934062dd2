mod location_api;
mod navigation_api;

use async_channel::Receiver;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    api::API,
    config::Config,
    entities::{NavigationView, Notice, PositionError, PositionFix},
    error::Error,
    external::{GeocodingService, PositionSource, PresentationSink, RouteProvider, WatchHandle},
    tracker::NavigationTracker,
};

/// Runs one navigation session at a time on top of the external services.
pub struct Engine {
    state: Arc<Mutex<Navigation>>,
    positions: Arc<dyn PositionSource>,
    geocoder: Arc<dyn GeocodingService>,
    router: Arc<dyn RouteProvider>,
    sink: Arc<dyn PresentationSink>,
    notice_ttl: chrono::Duration,
}

struct Navigation {
    tracker: NavigationTracker,
    view: NavigationView,
    /// Start attempt still geocoding or routing.
    pending: Option<Uuid>,
    /// Session whose fixes are being tracked.
    session: Option<Uuid>,
    watch: Option<ActiveWatch>,
}

struct ActiveWatch {
    handle: WatchHandle,
    task: JoinHandle<()>,
}

impl Navigation {
    fn new() -> Self {
        Self {
            tracker: NavigationTracker::new(),
            view: NavigationView::idle(),
            pending: None,
            session: None,
            watch: None,
        }
    }

    fn release_watch(&mut self, positions: &dyn PositionSource) {
        if let Some(watch) = self.watch.take() {
            positions.unwatch(watch.handle);
            watch.task.abort();
        }
    }
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(
        config: &Config,
        positions: Arc<dyn PositionSource>,
        geocoder: Arc<dyn GeocodingService>,
        router: Arc<dyn RouteProvider>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(Navigation::new())),
            positions,
            geocoder,
            router,
            sink,
            notice_ttl: config.notice_ttl(),
        }
    }

    /// Shows `err` to the user and hands it back for propagation.
    fn report(&self, context: &str, err: Error) -> Error {
        tracing::warn!("{}: {}", context, err);

        self.sink.notify(Notice::error(
            format!("{}: {}", context, err.message),
            self.notice_ttl,
        ));

        err
    }

    fn spawn_tracking(
        &self,
        session: Uuid,
        updates: Receiver<Result<PositionFix, PositionError>>,
    ) -> JoinHandle<()> {
        let tracking = Tracking {
            session,
            state: self.state.clone(),
            positions: self.positions.clone(),
            sink: self.sink.clone(),
            notice_ttl: self.notice_ttl,
        };

        tokio::spawn(tracking.run(updates))
    }
}

/// Feeds one session's subscription into the tracker, one fix at a time.
struct Tracking {
    session: Uuid,
    state: Arc<Mutex<Navigation>>,
    positions: Arc<dyn PositionSource>,
    sink: Arc<dyn PresentationSink>,
    notice_ttl: chrono::Duration,
}

impl Tracking {
    #[tracing::instrument(name = "Tracking::run", skip_all, fields(session = %self.session))]
    async fn run(self, updates: Receiver<Result<PositionFix, PositionError>>) {
        while let Ok(update) = updates.recv().await {
            let fix = match update {
                Ok(fix) => fix,
                Err(err) => {
                    tracing::warn!("position watch error: {:?}", err);
                    self.sink.notify(Notice::error(
                        format!("GPS tracking error: {}", err.message()),
                        self.notice_ttl,
                    ));
                    continue;
                }
            };

            let mut state = self.state.lock().await;

            if state.session != Some(self.session) {
                break;
            }

            let update = state.tracker.on_fix(fix);
            let view = NavigationView::from_update(&update, &state.view);
            state.view = view;
            self.sink.render(&state.view);

            if update.arrived {
                self.sink.notify(Notice::info(
                    "you have arrived at your destination",
                    self.notice_ttl,
                ));

                state.session = None;
                if let Some(watch) = state.watch.take() {
                    // this task is the one being released; just stop reading
                    self.positions.unwatch(watch.handle);
                }
                break;
            }
        }

        tracing::info!("position tracking finished");
    }
}

impl API for Engine {}
