//! The user's collection of won items

use std::sync::Arc;

use parking_lot::Mutex;

use cf_core::{CollectionEntry, Item};

use crate::error::StoreResult;
use crate::remote::RemoteStore;

const INVENTORY_PATH: &str = "inventory";

struct CollectionInner {
    entries: Vec<CollectionEntry>,
    sync_in_flight: bool,
    sync_queued: bool,
}

/// Local cache of previously won items, mirrored to the `inventory`
/// document on every mutation.
///
/// Local state is the source of truth for the current session; the remote
/// document is a cross-session backup. Mutations commit locally first and
/// then sync fire-and-forget — a sync failure is logged and never rolls the
/// local mutation back. Writes go through a single-slot queue: at most one
/// PUT is in flight, and any number of mutations arriving meanwhile
/// coalesce into exactly one follow-up PUT with a fresh snapshot, so
/// interleaved partial writes to the same document cannot happen.
///
/// Cloning the store clones a handle to the same collection.
#[derive(Clone)]
pub struct CollectionStore {
    inner: Arc<Mutex<CollectionInner>>,
    remote: Option<Arc<dyn RemoteStore>>,
}

impl CollectionStore {
    pub fn new(remote: Option<Arc<dyn RemoteStore>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CollectionInner {
                entries: Vec::new(),
                sync_in_flight: false,
                sync_queued: false,
            })),
            remote,
        }
    }

    /// A store with no remote; every sync is a logged no-op
    pub fn local_only() -> Self {
        Self::new(None)
    }

    /// Append a won item (duplicates allowed — the collection is a multiset
    /// of snapshots) and trigger a background sync.
    pub fn push(&self, item: Item) {
        {
            let mut inner = self.inner.lock();
            log::debug!("collection push: {} ({} total)", item.name, inner.entries.len() + 1);
            inner.entries.push(item);
        }
        self.request_sync();
    }

    /// Remove by index. Out-of-range indices are a no-op, not an error —
    /// deletions coming from a stale rendered view must not corrupt state.
    pub fn remove(&self, index: usize) {
        let removed = {
            let mut inner = self.inner.lock();
            if index < inner.entries.len() {
                Some(inner.entries.remove(index))
            } else {
                None
            }
        };
        match removed {
            Some(entry) => {
                log::debug!("collection remove [{index}]: {}", entry.name);
                self.request_sync();
            }
            None => log::debug!("collection remove [{index}] out of range, ignored"),
        }
    }

    /// Ordered snapshot of the collection
    pub fn list(&self) -> Vec<CollectionEntry> {
        self.inner.lock().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Read the remote inventory document once, at startup. Absent or
    /// malformed documents leave the collection empty — never fatal.
    pub async fn load(&self) {
        let Some(remote) = self.remote.clone() else {
            log::debug!("no remote configured, collection starts empty");
            return;
        };

        match remote.get(INVENTORY_PATH).await {
            Ok(Some(value)) => match serde_json::from_value::<Vec<CollectionEntry>>(value) {
                Ok(entries) => {
                    log::info!("loaded {} collection entries", entries.len());
                    self.inner.lock().entries = entries;
                }
                Err(e) => {
                    log::warn!("inventory document malformed, starting empty: {e}");
                }
            },
            Ok(None) => log::debug!("no inventory document, starting empty"),
            Err(e) => log::warn!("inventory load failed, starting empty: {e}"),
        }
    }

    /// One wholesale write of the current collection (full replace, last
    /// writer wins). Exposed for explicit flushes; mutations already call
    /// this through the background queue.
    pub async fn sync(&self) -> StoreResult<()> {
        let Some(remote) = self.remote.clone() else {
            log::debug!("no remote configured, sync skipped");
            return Ok(());
        };
        let document = self.snapshot_document();
        remote.put(INVENTORY_PATH, document).await
    }

    fn snapshot_document(&self) -> serde_json::Value {
        let entries = self.inner.lock().entries.clone();
        // Vec<Item> serialization cannot fail
        serde_json::to_value(entries).unwrap_or(serde_json::Value::Array(Vec::new()))
    }

    /// Fire-and-forget sync through the single-slot queue. Needs a tokio
    /// runtime; with no remote configured it is a local-only no-op.
    fn request_sync(&self) {
        let Some(remote) = self.remote.clone() else {
            log::debug!("no remote configured, sync skipped");
            return;
        };

        {
            let mut inner = self.inner.lock();
            if inner.sync_in_flight {
                // Coalesce: the in-flight write re-runs once with a fresh
                // snapshot when it finishes.
                inner.sync_queued = true;
                return;
            }
            inner.sync_in_flight = true;
        }

        let this = self.clone();
        tokio::spawn(async move {
            loop {
                let document = this.snapshot_document();
                match remote.put(INVENTORY_PATH, document).await {
                    Ok(()) => log::debug!("collection synced"),
                    Err(e) => log::warn!("collection sync failed, local state kept: {e}"),
                }

                let mut inner = this.inner.lock();
                if inner.sync_queued {
                    inner.sync_queued = false;
                    continue;
                }
                inner.sync_in_flight = false;
                break;
            }
        });
    }
}
