//! Loading progress shared between players and a splash/loading screen.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Observer notified as a player's frames resolve.
pub trait ProgressReporter {
    /// Announce how many assets this reporter will account for. Called once per player.
    fn set_total(&self, count: usize);

    /// One asset resolved, successfully or not.
    fn increment_loaded(&self);
}

/// Page-wide loading progress.
///
/// Created by the page before any player mounts and dropped when the page goes away. Each player
/// gets its own [`ProgressHandle`]; the context aggregates every handle's total and loaded counts.
#[derive(Debug, Default)]
pub struct LoadingContext {
    total: AtomicUsize,
    loaded: AtomicUsize,
    registered: AtomicUsize,
}

impl LoadingContext {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Hand out a reporter for one player.
    pub fn reporter(self: &Arc<Self>) -> ProgressHandle {
        self.registered.fetch_add(1, Ordering::Relaxed);
        ProgressHandle {
            ctx: Arc::clone(self),
            total_set: AtomicBool::new(false),
        }
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::Acquire)
    }

    pub fn loaded(&self) -> usize {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn registered(&self) -> usize {
        self.registered.load(Ordering::Relaxed)
    }

    /// `round(loaded / total * 100)`, capped at 100. An empty context counts as one pending asset.
    pub fn progress_percent(&self) -> u8 {
        let total = self.total().max(1);
        let loaded = self.loaded();
        let pct = (loaded as f64 / total as f64 * 100.0).round();
        pct.min(100.0) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.progress_percent() >= 100
    }
}

/// A player's view of the [`LoadingContext`].
#[derive(Debug)]
pub struct ProgressHandle {
    ctx: Arc<LoadingContext>,
    total_set: AtomicBool,
}

impl ProgressHandle {
    pub fn context(&self) -> &Arc<LoadingContext> {
        &self.ctx
    }
}

impl ProgressReporter for ProgressHandle {
    fn set_total(&self, count: usize) {
        if self.total_set.swap(true, Ordering::AcqRel) {
            tracing::debug!(count, "progress total already set, ignoring");
            return;
        }
        self.ctx.total.fetch_add(count, Ordering::AcqRel);
    }

    fn increment_loaded(&self) {
        self.ctx.loaded.fetch_add(1, Ordering::AcqRel);
    }
}
