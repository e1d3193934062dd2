use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::{Coordinates, NavigationView, PositionFix, RoutePath, Status};
use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationStatus {
    pub status: Status,
    pub view: NavigationView,
    pub destination: Option<Coordinates>,
    pub last_fix: Option<PositionFix>,
}

#[async_trait]
pub trait NavigationAPI {
    async fn start_navigation(
        &self,
        start: String,
        destination: String,
    ) -> Result<NavigationView, Error>;
    async fn stop_navigation(&self) -> Result<NavigationView, Error>;
    async fn find_route(&self) -> Result<RoutePath, Error>;
    async fn navigation_status(&self) -> Result<NavigationStatus, Error>;
}

#[async_trait]
pub trait LocationAPI {
    async fn locate(&self) -> Result<PositionFix, Error>;
    async fn geocode(&self, text: String) -> Result<Coordinates, Error>;
}

pub trait API: NavigationAPI + LocationAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
