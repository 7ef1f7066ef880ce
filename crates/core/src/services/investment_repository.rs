use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};

use crate::errors::CoreError;
use crate::models::investment::{seed_investments, Investment, NewInvestment};
use crate::storage::manager::InvestmentStore;

use super::broadcast::{Broadcast, Subscription};

/// An immutable view of the whole collection at one point in time.
pub type Snapshot = Arc<Vec<Investment>>;

/// Owns the canonical, insertion-ordered investment collection.
///
/// Every committed transition publishes the complete new collection to all
/// subscribers and then writes it to the store. Writers are serialized, so
/// subscribers observe transitions in exactly the order they were applied.
pub struct InvestmentRepository {
    state: Broadcast<Snapshot>,
    store: InvestmentStore,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for InvestmentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestmentRepository")
            .field("investments", &self.state.get().len())
            .field("subscribers", &self.state.listener_count())
            .field("store", &self.store)
            .finish()
    }
}

impl InvestmentRepository {
    /// Hydrate from `store`, or seed it.
    ///
    /// A missing key and an unreadable blob both fall back to the seed set,
    /// which is written back immediately so the next start reads clean data.
    /// Any other load error (the backend could not be read at all) is
    /// returned and the stored value is left untouched.
    pub fn open(store: InvestmentStore) -> Result<Self, CoreError> {
        let (initial, reseeded) = match store.load() {
            Ok(Some(investments)) => {
                debug!("Loaded {} investments from '{}'", investments.len(), store.key());
                (investments, false)
            }
            Ok(None) => {
                info!("No investments stored under '{}', using seed set", store.key());
                (seed_investments(), true)
            }
            Err(e @ CoreError::Corruption(_)) => {
                warn!("Discarding unreadable investments ({e}); reseeding");
                (seed_investments(), true)
            }
            Err(e) => {
                error!("Failed to read investments from '{}': {e}", store.key());
                return Err(e);
            }
        };

        if reseeded {
            if let Err(e) = store.save(&initial) {
                error!("Failed to persist seed investments: {e}");
            }
        }

        Ok(Self {
            state: Broadcast::new(Arc::new(initial)),
            store,
            write_lock: Mutex::new(()),
        })
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// The latest committed collection.
    #[must_use]
    pub fn current_snapshot(&self) -> Vec<Investment> {
        self.state.get().as_ref().clone()
    }

    /// The latest committed collection without copying it.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.get()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<Investment> {
        self.state.get().iter().find(|i| i.id == id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.get().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.get().is_empty()
    }

    /// Register `observer`; it is called right away with the current
    /// collection and then after every committed transition.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&[Investment]) + Send + Sync + 'static,
    {
        debug!("Repository subscriber added ({} active)", self.state.listener_count() + 1);
        self.state.subscribe(move |snapshot: &Snapshot| observer(snapshot.as_slice()))
    }

    /// Same as [`subscribe`](Self::subscribe) but hands out the shared snapshot.
    pub fn subscribe_snapshots<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.state.subscribe(observer)
    }

    /// One greater than the largest id, or 1 for an empty collection.
    ///
    /// Nothing is reserved: two calls without an insert in between return
    /// the same id. Use [`apply_insert_new`](Self::apply_insert_new) to
    /// assign and insert in one step.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        Self::next_id_in(&self.state.get())
    }

    fn next_id_in(investments: &[Investment]) -> u64 {
        investments.iter().map(|i| i.id).max().map_or(1, |max| max + 1)
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Append a record that already carries an id.
    pub fn apply_insert(&self, record: Investment) -> Result<(), CoreError> {
        let _writer = self.writer();
        let current = self.state.get();
        if current.iter().any(|i| i.id == record.id) {
            return Err(CoreError::DuplicateId(record.id));
        }
        let mut next = current.as_ref().clone();
        debug!("Inserting investment {}", record.id);
        next.push(record);
        self.commit(next);
        Ok(())
    }

    /// Assign the next id to `new` and append it, atomically.
    pub fn apply_insert_new(&self, new: NewInvestment) -> Investment {
        let _writer = self.writer();
        let current = self.state.get();
        let record = new.into_investment(Self::next_id_in(&current));
        let mut next = current.as_ref().clone();
        debug!("Inserting investment {}", record.id);
        next.push(record.clone());
        self.commit(next);
        record
    }

    /// Replace the record with the same id in place. Returns the previous record.
    pub fn apply_replace(&self, record: Investment) -> Result<Investment, CoreError> {
        let _writer = self.writer();
        let current = self.state.get();
        let idx = current
            .iter()
            .position(|i| i.id == record.id)
            .ok_or(CoreError::InvestmentNotFound(record.id))?;
        let mut next = current.as_ref().clone();
        debug!("Replacing investment {}", record.id);
        let previous = std::mem::replace(&mut next[idx], record);
        self.commit(next);
        Ok(previous)
    }

    /// Remove the record with `id`. Returns the removed record.
    pub fn apply_remove(&self, id: u64) -> Result<Investment, CoreError> {
        let _writer = self.writer();
        let current = self.state.get();
        let idx = current
            .iter()
            .position(|i| i.id == id)
            .ok_or(CoreError::InvestmentNotFound(id))?;
        let mut next = current.as_ref().clone();
        debug!("Removing investment {id}");
        let removed = next.remove(idx);
        self.commit(next);
        Ok(removed)
    }

    /// Make `snapshot` the committed state again (rollback).
    pub fn restore(&self, snapshot: Snapshot) {
        let _writer = self.writer();
        debug!("Restoring snapshot of {} investments", snapshot.len());
        self.publish_and_persist(snapshot);
    }

    fn commit(&self, next: Vec<Investment>) {
        self.publish_and_persist(Arc::new(next));
    }

    /// Caller must hold the write lock.
    fn publish_and_persist(&self, next: Snapshot) {
        self.state.publish(Arc::clone(&next));
        // In-memory state stays authoritative when the write fails.
        if let Err(e) = self.store.save(&next) {
            error!("Failed to persist investments: {e}");
        }
    }

    fn writer(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
