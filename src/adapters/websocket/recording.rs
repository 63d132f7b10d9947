//! Recording broadcaster for testing.
//!
//! Captures every event instead of fanning it out, so handler tests can
//! assert on what would have reached admin sessions.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::AdminEvent;
use crate::ports::AdminBroadcaster;

#[derive(Debug, Clone, Default)]
pub struct RecordingBroadcaster {
    events: Arc<Mutex<Vec<AdminEvent>>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events broadcast so far, oldest first.
    pub fn events(&self) -> Vec<AdminEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Names of the events broadcast so far.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(AdminEvent::name).collect()
    }
}

#[async_trait]
impl AdminBroadcaster for RecordingBroadcaster {
    async fn broadcast(&self, event: AdminEvent) -> usize {
        self.events.lock().unwrap().push(event);
        1
    }
}
