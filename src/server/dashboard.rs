use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::entities::{NavigationView, Notice};
use crate::external::PresentationSink;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub view: NavigationView,
    pub notices: Vec<Notice>,
}

/// Keeps what the client should currently display.
#[derive(Debug)]
pub struct Dashboard {
    view: Mutex<NavigationView>,
    notices: Mutex<Vec<Notice>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            view: Mutex::new(NavigationView::idle()),
            notices: Mutex::new(vec![]),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let view = self.view.lock().unwrap_or_else(|e| e.into_inner()).clone();

        let mut notices = self.notices.lock().unwrap_or_else(|e| e.into_inner());
        let now = Utc::now();
        notices.retain(|notice| !notice.is_expired(now));

        Snapshot {
            view,
            notices: notices.clone(),
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSink for Dashboard {
    fn render(&self, view: &NavigationView) {
        *self.view.lock().unwrap_or_else(|e| e.into_inner()) = view.clone();
    }

    fn notify(&self, notice: Notice) {
        tracing::info!("notice: {}", notice.message);

        let mut notices = self.notices.lock().unwrap_or_else(|e| e.into_inner());
        let now = Utc::now();
        notices.retain(|shown| !shown.is_expired(now));
        notices.push(notice);
    }
}
