use tracing::{info, warn};

use crate::io::remote::{ItemPatch, RemoteStore, StoreError};
use crate::model::item::{ActionItem, Priority};

/// Message shown when the store answers an analysis with `success: false`
const ANALYSIS_REJECTED: &str = "Failed to generate action items";
const LOAD_REJECTED: &str = "Failed to fetch action items";

/// Everything a view needs to render: the mirrored items, the single
/// user-visible error, and whether a transcript submission is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub items: Vec<ActionItem>,
    pub error: Option<String>,
    pub busy: bool,
}

impl ListState {
    pub fn find(&self, id: &str) -> Option<&ActionItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

/// Result of a mutating operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The store accepted the change and the list was reloaded.
    /// `affected` is the number of items created, updated, or deleted.
    Applied { affected: usize },
    /// The id was not in the local list; nothing was sent
    Skipped,
    /// The store refused or could not be reached; see [`ListController::error`]
    Failed,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }
}

type Subscriber = Box<dyn FnMut(&ListState) + Send>;

/// Owner of the in-memory action item list.
///
/// Every change goes to the remote store first; on success the whole list is
/// fetched again. Local items are never patched in place, so a failed call
/// leaves them exactly as they were.
pub struct ListController<S> {
    store: S,
    state: ListState,
    subscribers: Vec<Subscriber>,
}

impl<S: RemoteStore> ListController<S> {
    pub fn new(store: S) -> Self {
        ListController {
            store,
            state: ListState::default(),
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.state.items
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    /// Register an observer called with the state after every change
    pub fn subscribe(&mut self, subscriber: impl FnMut(&ListState) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
    }

    /// Replace the local list with the store's. On failure the list is left
    /// alone and no user-visible error is set; the error is logged and
    /// returned for callers that want to report it.
    pub fn load_all(&mut self) -> Result<usize, StoreError> {
        let result = self.store.list_all().and_then(|envelope| {
            if envelope.success {
                Ok(envelope.action_items)
            } else {
                Err(StoreError::Rejected(LOAD_REJECTED.to_string()))
            }
        });
        match result {
            Ok(items) => {
                info!(count = items.len(), "loaded action items");
                let count = items.len();
                self.state.items = items;
                self.notify();
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "failed to load action items");
                Err(e)
            }
        }
    }

    /// Send a transcript for analysis. The caller validates length first.
    pub fn submit_transcript(&mut self, transcript: &str) -> Outcome {
        self.state.busy = true;
        self.notify();

        let result = self.store.analyze(transcript).and_then(|envelope| {
            if envelope.success {
                Ok(envelope.action_items.len())
            } else {
                Err(StoreError::Rejected(ANALYSIS_REJECTED.to_string()))
            }
        });

        self.state.busy = false;
        match result {
            Ok(created) => {
                info!(created, "transcript analyzed");
                self.finish_mutation(created)
            }
            Err(e) => self.fail("analyze transcript", e),
        }
    }

    /// Flip an item between pending and completed. Unknown ids are ignored.
    pub fn toggle_complete(&mut self, id: &str) -> Outcome {
        let Some(item) = self.state.find(id) else {
            return Outcome::Skipped;
        };
        let patch = ItemPatch::status(item.status.flipped());
        match self.store.update(id, &patch) {
            Ok(()) => {
                info!(id, ?patch, "toggled action item");
                self.finish_mutation(1)
            }
            Err(e) => self.fail("update action item", e),
        }
    }

    /// Change an item's priority. Unknown ids are ignored.
    pub fn set_priority(&mut self, id: &str, priority: Priority) -> Outcome {
        if self.state.find(id).is_none() {
            return Outcome::Skipped;
        }
        let patch = ItemPatch::priority(priority);
        match self.store.update(id, &patch) {
            Ok(()) => {
                info!(id, priority = priority.as_str(), "changed priority");
                self.finish_mutation(1)
            }
            Err(e) => self.fail("update action item", e),
        }
    }

    pub fn delete_item(&mut self, id: &str) -> Outcome {
        match self.store.delete(id) {
            Ok(()) => {
                info!(id, "deleted action item");
                self.finish_mutation(1)
            }
            Err(e) => self.fail("delete action item", e),
        }
    }

    pub fn clear_error(&mut self) {
        if self.state.error.take().is_some() {
            self.notify();
        }
    }

    /// Reload after a successful write. A failed reload is logged by
    /// `load_all` and does not undo the write.
    fn finish_mutation(&mut self, affected: usize) -> Outcome {
        if self.load_all().is_err() {
            // load_all only notifies on success; a cleared busy flag still
            // has to reach subscribers
            self.notify();
        }
        Outcome::Applied { affected }
    }

    fn fail(&mut self, action: &str, error: StoreError) -> Outcome {
        warn!(action, error = %error, "remote call failed");
        self.state.error = Some(error.message());
        self.notify();
        Outcome::Failed
    }
}
