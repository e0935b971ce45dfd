use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::io::remote::RemoteStore;
use crate::model::item::Priority;
use crate::ops::controller::{ListController, ListState, Outcome};

/// Requests sent from the TUI to the store worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    Submit(String),
    Toggle(String),
    SetPriority(String, Priority),
    Delete(String),
    ClearError,
}

/// Events sent from the store worker back to the TUI event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// The controller's state changed
    State(ListState),
    /// A transcript was accepted; `created` items were added
    Submitted { created: usize },
}

/// Background thread owning the [`ListController`]. Remote calls block this
/// thread, never the UI.
pub struct StoreWorker {
    tx: mpsc::Sender<Command>,
    rx: mpsc::Receiver<WorkerEvent>,
}

impl StoreWorker {
    /// Spawn the worker. It runs until the `StoreWorker` is dropped.
    pub fn start<S>(store: S) -> std::io::Result<Self>
    where
        S: RemoteStore + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (evt_tx, evt_rx) = mpsc::channel();

        thread::Builder::new()
            .name("store-worker".into())
            .spawn(move || {
                let mut controller = ListController::new(store);
                let snapshots = evt_tx.clone();
                controller.subscribe(move |state| {
                    let _ = snapshots.send(WorkerEvent::State(state.clone()));
                });

                for cmd in cmd_rx {
                    debug!(?cmd, "worker command");
                    if let Some(event) = run_command(&mut controller, cmd)
                        && evt_tx.send(event).is_err()
                    {
                        break;
                    }
                }
                debug!("store worker stopped");
            })?;

        Ok(StoreWorker {
            tx: cmd_tx,
            rx: evt_rx,
        })
    }

    /// Queue a command. Returns false if the worker has gone away.
    pub fn send(&self, cmd: Command) -> bool {
        self.tx.send(cmd).is_ok()
    }

    /// Non-blocking poll for pending worker events.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }

    #[cfg(test)]
    fn recv(&self) -> Option<WorkerEvent> {
        self.rx.recv_timeout(std::time::Duration::from_secs(5)).ok()
    }
}

/// Apply one command. State changes reach the UI through the subscriber;
/// the returned event carries anything extra the UI needs to know.
fn run_command<S: RemoteStore>(
    controller: &mut ListController<S>,
    cmd: Command,
) -> Option<WorkerEvent> {
    match cmd {
        Command::Reload => {
            // Failures are logged by the controller and stay silent
            let _ = controller.load_all();
            None
        }
        Command::Submit(transcript) => match controller.submit_transcript(&transcript) {
            Outcome::Applied { affected } => Some(WorkerEvent::Submitted { created: affected }),
            Outcome::Skipped | Outcome::Failed => None,
        },
        Command::Toggle(id) => {
            controller.toggle_complete(&id);
            None
        }
        Command::SetPriority(id, priority) => {
            controller.set_priority(&id, priority);
            None
        }
        Command::Delete(id) => {
            controller.delete_item(&id);
            None
        }
        Command::ClearError => {
            controller.clear_error();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory_store::{Call, MemoryStore, sample_items};
    use crate::model::item::Status;

    /// Receive events until one matches `pred`
    fn wait_for(worker: &StoreWorker, pred: impl Fn(&WorkerEvent) -> bool) -> WorkerEvent {
        loop {
            let event = worker.recv().expect("worker event");
            if pred(&event) {
                return event;
            }
        }
    }

    fn state_of(event: WorkerEvent) -> ListState {
        match event {
            WorkerEvent::State(state) => state,
            other => panic!("expected state, got {:?}", other),
        }
    }

    #[test]
    fn test_reload_sends_snapshot() {
        let store = MemoryStore::with_items(sample_items());
        let worker = StoreWorker::start(store).unwrap();
        assert!(worker.send(Command::Reload));

        let state = state_of(wait_for(&worker, |e| matches!(e, WorkerEvent::State(_))));
        assert_eq!(state.items, sample_items());
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_toggle_round_trips_through_store() {
        let store = MemoryStore::with_items(sample_items());
        let worker = StoreWorker::start(store.clone()).unwrap();
        worker.send(Command::Reload);
        wait_for(&worker, |e| matches!(e, WorkerEvent::State(_)));

        worker.send(Command::Toggle("1".into()));
        let state = state_of(wait_for(&worker, |e| {
            matches!(e, WorkerEvent::State(s) if s.find("1").is_some_and(|i| i.status == Status::Completed))
        }));
        assert_eq!(state.error, None);
        assert!(store.calls().contains(&Call::Update(
            "1".into(),
            crate::io::remote::ItemPatch::status(Status::Completed)
        )));
    }

    #[test]
    fn test_submit_reports_busy_then_created() {
        let store = MemoryStore::with_items(Vec::new());
        let worker = StoreWorker::start(store).unwrap();
        worker.send(Command::Submit("Alice sends the deck. Bob books a room.".into()));

        let busy = state_of(wait_for(&worker, |e| matches!(e, WorkerEvent::State(_))));
        assert!(busy.busy);
        let done = wait_for(&worker, |e| matches!(e, WorkerEvent::Submitted { .. }));
        assert_eq!(done, WorkerEvent::Submitted { created: 2 });
        assert!(worker.poll().iter().all(|e| !matches!(e, WorkerEvent::State(s) if s.busy)));
    }

    #[test]
    fn test_failure_surfaces_error_then_clears() {
        let store = MemoryStore::with_items(sample_items());
        store.fail_mutations("Database unavailable");
        let worker = StoreWorker::start(store).unwrap();
        worker.send(Command::Reload);
        wait_for(&worker, |e| matches!(e, WorkerEvent::State(_)));

        worker.send(Command::Delete("2".into()));
        let state = state_of(wait_for(&worker, |e| {
            matches!(e, WorkerEvent::State(s) if s.error.is_some())
        }));
        assert_eq!(state.error.as_deref(), Some("Database unavailable"));
        assert_eq!(state.items, sample_items());

        worker.send(Command::ClearError);
        let state = state_of(wait_for(&worker, |e| matches!(e, WorkerEvent::State(_))));
        assert_eq!(state.error, None);
    }
}
