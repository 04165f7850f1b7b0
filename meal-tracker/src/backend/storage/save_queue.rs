//! Serialised persistence of full entry snapshots.
//!
//! Every mutation produces a complete snapshot of the collection. Snapshots
//! are written one at a time and in submission order. In background mode a
//! snapshot that is still waiting when a newer one arrives is replaced by the
//! newer one: it already contains every earlier change, so nothing is lost.

use log::{debug, error, warn};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use super::error::StorageError;
use super::traits::EntryStorage;
use crate::backend::domain::models::food_entry::FoodEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Write before returning to the caller
    #[default]
    Immediate,
    /// Hand the snapshot to a single writer thread
    Background,
}

/// Front door for saving snapshots, whatever the mode
pub enum Persister {
    Immediate(Arc<dyn EntryStorage>),
    Background(SaveQueue),
}

impl Persister {
    pub fn new(storage: Arc<dyn EntryStorage>, mode: PersistMode) -> Self {
        match mode {
            PersistMode::Immediate => Persister::Immediate(storage),
            PersistMode::Background => match SaveQueue::new(storage.clone()) {
                Ok(queue) => Persister::Background(queue),
                Err(e) => {
                    warn!("Could not start background saver ({}), saving synchronously", e);
                    Persister::Immediate(storage)
                }
            },
        }
    }

    /// Save `entries`. In background mode this only queues the snapshot and
    /// reports a failure of an earlier queued save, if any.
    pub fn persist(&self, entries: &[FoodEntry]) -> Result<(), StorageError> {
        match self {
            Persister::Immediate(storage) => storage.save_all(entries),
            Persister::Background(queue) => {
                let earlier_failure = queue.take_failure();
                queue.submit(entries.to_vec());
                earlier_failure
            }
        }
    }

    /// Block until everything handed to [`Persister::persist`] is on disk
    pub fn flush(&self) -> Result<(), StorageError> {
        match self {
            Persister::Immediate(_) => Ok(()),
            Persister::Background(queue) => queue.flush(),
        }
    }
}

struct PendingSave {
    generation: u64,
    entries: Vec<FoodEntry>,
}

#[derive(Default)]
struct QueueState {
    pending: Option<PendingSave>,
    /// Generation of the newest submitted snapshot
    submitted: u64,
    /// Generation of the newest snapshot whose write has finished
    written: u64,
    failure: Option<(u64, String)>,
    shutting_down: bool,
}

struct QueueShared {
    state: Mutex<QueueState>,
    changed: Condvar,
}

impl QueueShared {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Single background writer with coalescing
pub struct SaveQueue {
    shared: Arc<QueueShared>,
    worker: Option<JoinHandle<()>>,
}

impl SaveQueue {
    pub fn new(storage: Arc<dyn EntryStorage>) -> std::io::Result<Self> {
        let shared = Arc::new(QueueShared {
            state: Mutex::new(QueueState::default()),
            changed: Condvar::new(),
        });

        let worker_shared = shared.clone();
        let worker = thread::Builder::new()
            .name("entry-saver".to_string())
            .spawn(move || run_worker(worker_shared, storage))?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Queue a snapshot; returns its generation number
    pub fn submit(&self, entries: Vec<FoodEntry>) -> u64 {
        let mut state = self.shared.lock();
        state.submitted += 1;
        let generation = state.submitted;

        if let Some(replaced) = state.pending.take() {
            debug!("Snapshot #{} superseded by #{}", replaced.generation, generation);
        }
        state.pending = Some(PendingSave { generation, entries });

        self.shared.changed.notify_all();
        generation
    }

    /// Wait for every submitted snapshot to be written
    pub fn flush(&self) -> Result<(), StorageError> {
        let mut state = self.shared.lock();
        while state.written < state.submitted {
            state = self
                .shared
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        drop(state);
        self.take_failure()
    }

    /// Generation of the newest snapshot that has been written (or failed)
    pub fn written_generation(&self) -> u64 {
        self.shared.lock().written
    }

    fn take_failure(&self) -> Result<(), StorageError> {
        match self.shared.lock().failure.take() {
            Some((generation, message)) => Err(StorageError::DeferredWrite { generation, message }),
            None => Ok(()),
        }
    }
}

impl Drop for SaveQueue {
    fn drop(&mut self) {
        {
            let mut state = self.shared.lock();
            state.shutting_down = true;
            self.shared.changed.notify_all();
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Background saver panicked");
            }
        }
    }
}

fn run_worker(shared: Arc<QueueShared>, storage: Arc<dyn EntryStorage>) {
    loop {
        let job = {
            let mut state = shared.lock();
            loop {
                // Pending work is drained before honouring shutdown
                if let Some(job) = state.pending.take() {
                    break Some(job);
                }
                if state.shutting_down {
                    break None;
                }
                state = shared.changed.wait(state).unwrap_or_else(PoisonError::into_inner);
            }
        };

        let Some(job) = job else {
            debug!("Background saver stopped");
            return;
        };

        let result = storage.save_all(&job.entries);

        let mut state = shared.lock();
        state.written = job.generation;
        match result {
            // A later full snapshot supersedes an earlier failed one
            Ok(()) => state.failure = None,
            Err(e) => {
                error!("Background save #{} failed: {}", job.generation, e);
                state.failure = Some((job.generation, e.to_string()));
            }
        }
        shared.changed.notify_all();
    }
}
