//! crates/logging/src/context.rs
//! Indentation depth and metadata partitioned by calling-thread identity.

use std::thread::{self, ThreadId};

use dashmap::DashMap;
use serde_json::Value;

use crate::entry::Fields;

/// Per-thread logging context shared across the process.
///
/// Each thread owns exactly one partition, keyed by its
/// [`ThreadId`](std::thread::ThreadId): an indentation counter and a
/// metadata map. Every operation acts on the *calling* thread's partition
/// only, so two threads never observe each other's indentation or metadata.
/// The partition maps themselves are concurrent, which keeps thread
/// creation and retirement safe without a global lock.
///
/// Indentation entries are created lazily on the first
/// [`indent`](Self::indent) and removed once the counter returns to zero;
/// metadata entries persist until explicitly removed or cleared.
#[derive(Debug, Default)]
pub(crate) struct ThreadContextMap {
    indents: DashMap<ThreadId, u32>,
    metadata: DashMap<ThreadId, Fields>,
}

impl ThreadContextMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds one level of indentation for the calling thread.
    pub(crate) fn indent(&self) {
        *self.indents.entry(thread::current().id()).or_insert(0) += 1;
    }

    /// Removes one level of indentation for the calling thread.
    ///
    /// The counter never goes below zero, and the entry is dropped entirely
    /// once it reaches zero. Deindenting a thread with no recorded
    /// indentation is a no-op, not an error: a guard may legitimately fire
    /// after a reset cleared the state underneath it.
    pub(crate) fn deindent(&self) {
        let id = thread::current().id();
        let remove = match self.indents.get_mut(&id) {
            Some(mut depth) if *depth > 1 => {
                *depth -= 1;
                false
            }
            Some(_) => true,
            None => false,
        };
        if remove {
            self.indents.remove(&id);
        }
    }

    /// Returns the calling thread's indentation depth, zero when unknown.
    pub(crate) fn current_indent(&self) -> u32 {
        self.indents
            .get(&thread::current().id())
            .map_or(0, |depth| *depth)
    }

    /// Inserts or replaces a metadata entry for the calling thread.
    pub(crate) fn add_metadata(&self, key: &str, value: Value) {
        self.metadata
            .entry(thread::current().id())
            .or_default()
            .insert(key.to_owned(), value);
    }

    /// Removes a metadata entry for the calling thread; absent keys are a
    /// no-op. The partition is dropped once its map empties.
    pub(crate) fn remove_metadata(&self, key: &str) {
        let id = thread::current().id();
        let remove = match self.metadata.get_mut(&id) {
            Some(mut map) => {
                map.remove(key);
                map.is_empty()
            }
            None => false,
        };
        if remove {
            self.metadata.remove(&id);
        }
    }

    /// Empties the calling thread's metadata map.
    pub(crate) fn clear_metadata(&self) {
        self.metadata.remove(&thread::current().id());
    }

    /// Returns an owned snapshot of the calling thread's metadata, `None`
    /// when the thread has none.
    pub(crate) fn snapshot_metadata(&self) -> Option<Fields> {
        self.metadata
            .get(&thread::current().id())
            .filter(|map| !map.is_empty())
            .map(|map| map.value().clone())
    }

    /// Drops both partitions belonging to the calling thread.
    pub(crate) fn clear_current_thread(&self) {
        let id = thread::current().id();
        self.indents.remove(&id);
        self.metadata.remove(&id);
    }

    /// Drops every partition. Used only by full registry teardown in tests
    /// of the map itself; the registry's reset deliberately touches the
    /// calling thread alone.
    #[cfg(test)]
    pub(crate) fn clear_all(&self) {
        self.indents.clear();
        self.metadata.clear();
    }
}
