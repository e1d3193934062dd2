//! Services the tracker depends on but does not implement.

mod geocoder;
pub mod nominatim;
pub mod osrm;

use async_channel::Receiver;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, NavigationView, Notice, PositionError, PositionFix, RoutePath};
use crate::error::Error;

pub use geocoder::Geocoder;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchHandle(Uuid);

impl WatchHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WatchHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixes and errors from one `watch` call, in the order the device
/// reported them. The channel closes once the handle is unwatched.
#[derive(Debug)]
pub struct Subscription {
    pub handle: WatchHandle,
    pub updates: Receiver<Result<PositionFix, PositionError>>,
}

#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_fix(&self) -> Result<PositionFix, Error>;
    fn watch(&self) -> Subscription;
    fn unwatch(&self, handle: WatchHandle);
}

#[async_trait]
pub trait GeocodingService: Send + Sync {
    async fn resolve(&self, text: &str) -> Result<Coordinates, Error>;
}

/// Free-text lookup behind a [`Geocoder`]. `Ok(None)` means no match.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, text: &str) -> Result<Option<Coordinates>, Error>;
}

#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RoutePath, Error>;
}

pub trait PresentationSink: Send + Sync {
    fn render(&self, view: &NavigationView);
    fn notify(&self, notice: Notice);
}
