//! In-memory [`RemoteStore`] for tests. Records every call and can be told
//! to fail, so controller behavior can be checked without a server.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::io::remote::{HealthStatus, ItemPatch, ItemsEnvelope, RemoteStore, StoreError};
use crate::model::item::{ActionItem, Priority, Status};

/// One recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Analyze(String),
    List,
    Update(String, ItemPatch),
    Delete(String),
    Health,
}

#[derive(Default)]
struct Inner {
    items: Vec<ActionItem>,
    calls: Vec<Call>,
    mutation_failure: Option<String>,
    list_failure: Option<String>,
    analyze_rejects: bool,
    next_id: usize,
}

/// Cloning shares the underlying state, so a test can hand one clone to the
/// code under test and inspect through another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn with_items(items: Vec<ActionItem>) -> Self {
        let store = MemoryStore::default();
        store.lock().items = items;
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn items(&self) -> Vec<ActionItem> {
        self.lock().items.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Make every analyze/update/delete fail with a 500 carrying `message`
    pub fn fail_mutations(&self, message: &str) {
        self.lock().mutation_failure = Some(message.to_string());
    }

    pub fn fail_list(&self, message: &str) {
        self.lock().list_failure = Some(message.to_string());
    }

    /// Make analyze answer `success: false`
    pub fn reject_analysis(&self) {
        self.lock().analyze_rejects = true;
    }

    /// Replace the stored items behind the client's back
    pub fn set_items(&self, items: Vec<ActionItem>) {
        self.lock().items = items;
    }

    fn mutation_error(inner: &Inner) -> Option<StoreError> {
        inner.mutation_failure.as_ref().map(|m| StoreError::Api {
            status: 500,
            message: m.clone(),
        })
    }
}

impl RemoteStore for MemoryStore {
    fn analyze(&self, transcript: &str) -> Result<ItemsEnvelope, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(Call::Analyze(transcript.to_string()));
        if let Some(err) = Self::mutation_error(&inner) {
            return Err(err);
        }
        if inner.analyze_rejects {
            return Ok(ItemsEnvelope::default());
        }
        // One item per sentence
        let mut created = Vec::new();
        for sentence in transcript.split('.').map(str::trim).filter(|s| !s.is_empty()) {
            inner.next_id += 1;
            let n = inner.next_id;
            created.push(item(
                &format!("new-{}", n),
                sentence,
                Status::Pending,
                Priority::Medium,
                &format!("2024-02-01T09:{:02}:00Z", n % 60),
            ));
        }
        inner.items.extend(created.iter().cloned());
        Ok(ItemsEnvelope {
            success: true,
            total_count: created.len(),
            action_items: created,
        })
    }

    fn list_all(&self) -> Result<ItemsEnvelope, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(Call::List);
        if let Some(message) = &inner.list_failure {
            return Err(StoreError::Transport(message.clone()));
        }
        Ok(ItemsEnvelope {
            success: true,
            total_count: inner.items.len(),
            action_items: inner.items.clone(),
        })
    }

    fn update(&self, id: &str, patch: &ItemPatch) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(Call::Update(id.to_string(), patch.clone()));
        if let Some(err) = Self::mutation_error(&inner) {
            return Err(err);
        }
        let Some(item) = inner.items.iter_mut().find(|i| i.id == id) else {
            return Err(StoreError::Api {
                status: 404,
                message: "Action item not found".into(),
            });
        };
        if let Some(status) = patch.status {
            item.status = status;
        }
        if let Some(priority) = patch.priority {
            item.priority = priority;
        }
        item.updated_at = Some("2024-03-01T12:00:00Z".into());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(Call::Delete(id.to_string()));
        if let Some(err) = Self::mutation_error(&inner) {
            return Err(err);
        }
        inner.items.retain(|i| i.id != id);
        Ok(())
    }

    fn health(&self) -> Result<HealthStatus, StoreError> {
        self.lock().calls.push(Call::Health);
        Ok(HealthStatus {
            status: "healthy".into(),
            ..Default::default()
        })
    }
}

/// Build an action item for tests
pub fn item(id: &str, text: &str, status: Status, priority: Priority, created_at: &str) -> ActionItem {
    ActionItem {
        id: id.to_string(),
        text: text.to_string(),
        status,
        priority,
        created_at: created_at.to_string(),
        updated_at: None,
    }
}

/// The two-item list used throughout the tests
pub fn sample_items() -> Vec<ActionItem> {
    vec![
        item("1", "Fix bug", Status::Pending, Priority::High, "2024-01-15T10:00:00Z"),
        item("2", "Write docs", Status::Completed, Priority::Low, "2024-01-16T10:00:00Z"),
    ]
}
