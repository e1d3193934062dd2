//! Position source fed by the client.
//!
//! The browser (or the simulator) reports fixes and errors; every open
//! subscription receives them in report order.

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    entities::{PositionError, PositionFix},
    error::Error,
    external::{PositionSource, Subscription, WatchHandle},
};

type Update = Result<PositionFix, PositionError>;

#[derive(Debug)]
pub struct DevicePositionSource {
    timeout: Duration,
    maximum_age: Duration,
    last_fix: Mutex<Option<PositionFix>>,
    watchers: Mutex<HashMap<WatchHandle, Sender<Update>>>,
}

impl DevicePositionSource {
    pub fn new(timeout: Duration, maximum_age: Duration) -> Self {
        Self {
            timeout,
            maximum_age,
            last_fix: Mutex::new(None),
            watchers: Mutex::new(HashMap::new()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn report_fix(&self, fix: PositionFix) {
        *self.last_fix.lock().unwrap_or_else(|e| e.into_inner()) = Some(fix);
        self.broadcast(Ok(fix));
    }

    #[tracing::instrument(skip(self))]
    pub fn report_error(&self, error: PositionError) {
        tracing::warn!("device reported {:?}", error);
        self.broadcast(Err(error));
    }

    pub fn watcher_count(&self) -> usize {
        self.watchers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn broadcast(&self, update: Update) {
        let mut watchers = self.watchers.lock().unwrap_or_else(|e| e.into_inner());

        // receivers dropped without unwatch
        watchers.retain(|_, tx| tx.try_send(update).is_ok());
    }

    fn fresh_fix(&self) -> Option<PositionFix> {
        let last_fix = *self.last_fix.lock().unwrap_or_else(|e| e.into_inner());
        let maximum_age = self.maximum_age.as_millis() as i64;
        let now = Utc::now().timestamp_millis();

        last_fix.filter(|fix| {
            now.checked_sub(fix.timestamp_millis)
                .map_or(false, |age| (0..=maximum_age).contains(&age))
        })
    }

    fn subscribe(&self) -> (WatchHandle, Receiver<Update>) {
        let (tx, rx) = async_channel::unbounded();
        let handle = WatchHandle::new();

        self.watchers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(handle, tx);

        (handle, rx)
    }
}

#[async_trait]
impl PositionSource for DevicePositionSource {
    #[tracing::instrument(skip(self))]
    async fn current_fix(&self) -> Result<PositionFix, Error> {
        if let Some(fix) = self.fresh_fix() {
            return Ok(fix);
        }

        let (handle, rx) = self.subscribe();
        let result = tokio::time::timeout(self.timeout, rx.recv()).await;
        self.unwatch(handle);

        match result {
            Ok(Ok(Ok(fix))) => Ok(fix),
            Ok(Ok(Err(error))) => Err(error.into()),
            Ok(Err(_)) => Err(PositionError::Unavailable.into()),
            Err(_) => Err(PositionError::TimedOut.into()),
        }
    }

    fn watch(&self) -> Subscription {
        let (handle, updates) = self.subscribe();

        tracing::info!("watching device position: {:?}", handle);

        Subscription { handle, updates }
    }

    fn unwatch(&self, handle: WatchHandle) {
        // dropping the sender closes the subscription
        self.watchers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&handle);
    }
}
