//! Thread-safe handle to a tree
//!
//! Every call takes one exclusive lock for its whole duration, so mutations
//! never interleave with each other or with reads. Results are returned as
//! owned copies; nothing borrowed from the tree escapes the lock.

use crate::record::{Record, RecordUpdate};
use crate::tree::{TraversalOrder, TreeConfig, TreeEngine, TreeKind, TreePolicy, TreeStats};
use crate::Result;
use parking_lot::Mutex;
use tracing::{debug, info, instrument};

/// A tree guarded by a single mutex
pub struct SharedTree<P: TreePolicy> {
    inner: Mutex<TreeEngine<P>>,
}

impl<P: TreePolicy> Default for SharedTree<P> {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

impl<P: TreePolicy> SharedTree<P> {
    /// Create an empty shared tree
    pub fn new(config: TreeConfig) -> Self {
        info!(tree = %P::KIND, duplicates = ?config.duplicates, "tree created");
        Self::from_tree(TreeEngine::with_config(config))
    }

    /// Wrap an existing tree
    pub fn from_tree(tree: TreeEngine<P>) -> Self {
        Self {
            inner: Mutex::new(tree),
        }
    }

    pub fn kind(&self) -> TreeKind {
        P::KIND
    }

    #[instrument(skip(self, record), fields(tree = %P::KIND, id = record.id()))]
    pub fn insert(&self, record: Record) -> Result<Record> {
        let stored = self.inner.lock().insert(record)?;
        debug!("record inserted");
        Ok(stored)
    }

    pub fn search(&self, id: u64) -> Result<Record> {
        self.inner.lock().search(id).cloned()
    }

    #[instrument(skip(self, changes), fields(tree = %P::KIND))]
    pub fn update(&self, id: u64, changes: &RecordUpdate) -> Result<Record> {
        let updated = self.inner.lock().update(id, changes)?;
        debug!("record updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(tree = %P::KIND))]
    pub fn delete(&self, id: u64) -> Result<Record> {
        let removed = self.inner.lock().delete(id)?;
        debug!("record deleted");
        Ok(removed)
    }

    pub fn traverse(&self, order: TraversalOrder) -> Vec<Record> {
        self.inner.lock().traverse(order)
    }

    pub fn height(&self) -> usize {
        self.inner.lock().height()
    }

    pub fn count(&self) -> usize {
        self.inner.lock().count()
    }

    pub fn is_balanced(&self) -> bool {
        self.inner.lock().is_balanced()
    }

    pub fn stats(&self) -> TreeStats {
        self.inner.lock().stats()
    }

    /// Run `f` with the tree locked, for callers that need several
    /// operations to observe one consistent state
    pub fn with_tree<R>(&self, f: impl FnOnce(&mut TreeEngine<P>) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}
