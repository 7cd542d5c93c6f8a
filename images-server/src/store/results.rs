//! Concurrent per-image label store.

use std::sync::atomic::{AtomicI64, Ordering};

use images_common::{ImageId, DEFAULT_LABEL, IMAGE_COUNT};

/// Predicted label per image, written concurrently by result requests.
///
/// Each image owns one atomic slot: writes to different ids never touch
/// the same memory, and a reader never sees a half-written label. Writes
/// to the same id are last-write-wins.
pub struct ResultStore {
    labels: Box<[AtomicI64]>,
}

impl ResultStore {
    /// Every image starts with [`DEFAULT_LABEL`].
    pub fn new() -> Self {
        Self {
            labels: (0..IMAGE_COUNT).map(|_| AtomicI64::new(DEFAULT_LABEL)).collect(),
        }
    }

    /// Store `label` for `id`, returning the label it replaced.
    pub fn record(&self, id: ImageId, label: i64) -> i64 {
        self.labels[id.index()].swap(label, Ordering::AcqRel)
    }

    pub fn get(&self, id: ImageId) -> i64 {
        self.labels[id.index()].load(Ordering::Acquire)
    }

    /// Copy of every label, ordered by image id.
    pub fn snapshot(&self) -> Vec<i64> {
        self.labels
            .iter()
            .map(|label| label.load(Ordering::Acquire))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultStore").field("len", &self.len()).finish()
    }
}
