//! Debounced scene autosave.
//!
//! DESIGN
//! ======
//! Every scene change reschedules a single pending write: the previous timer
//! is cancelled and a new one starts, so bursts of edits coalesce into one
//! write after the quiet period. At most one write is ever pending. Write
//! failures are warn-logged and swallowed — autosave is best effort, the
//! next change tries again.

#[cfg(test)]
#[path = "autosave_test.rs"]
mod autosave_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use canvas::Scene;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::store::LocalStore;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Debounces whole-scene writes to a [`LocalStore`].
pub struct SceneAutosaver {
    store: Arc<LocalStore>,
    delay: Duration,
    /// The one pending write, if any. Cancel-and-restart on every schedule.
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SceneAutosaver {
    #[must_use]
    pub fn new(store: Arc<LocalStore>, delay: Duration) -> Self {
        Self { store, delay, pending: Mutex::new(None) }
    }

    /// Schedule a write of this scene snapshot after the quiet period,
    /// cancelling any write already pending.
    pub fn schedule(&self, scene: Scene) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let store = Arc::clone(&self.store);
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = store.save_scene(&scene) {
                warn!(error = %e, "scene autosave failed");
            }
        }));
    }

    /// True while a write is scheduled but not yet performed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}
