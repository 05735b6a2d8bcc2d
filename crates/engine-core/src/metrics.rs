use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    documents_migrated: AtomicU64,
    documents_skipped: AtomicU64,
    rows_affected: AtomicU64,
}

#[derive(Debug, Clone)]
pub struct StageMetrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageMetricsSnapshot {
    pub documents_migrated: u64,
    pub documents_skipped: u64,
    pub rows_affected: u64,
}

impl StageMetrics {
    pub fn new() -> Self {
        StageMetrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    pub fn increment_migrated(&self, count: u64) {
        self.inner
            .documents_migrated
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_skipped(&self, count: u64) {
        self.inner
            .documents_skipped
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_rows(&self, count: u64) {
        self.inner.rows_affected.fetch_add(count, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.inner.documents_migrated.store(0, Ordering::Relaxed);
        self.inner.documents_skipped.store(0, Ordering::Relaxed);
        self.inner.rows_affected.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StageMetricsSnapshot {
        StageMetricsSnapshot {
            documents_migrated: self.inner.documents_migrated.load(Ordering::Relaxed),
            documents_skipped: self.inner.documents_skipped.load(Ordering::Relaxed),
            rows_affected: self.inner.rows_affected.load(Ordering::Relaxed),
        }
    }
}

impl Default for StageMetrics {
    fn default() -> Self {
        Self::new()
    }
}
