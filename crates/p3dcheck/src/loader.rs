//! Concurrent batch loading.
//!
//! One task per discovered file on a fixed worker pool:
//!
//! ```text
//!   [Scanner] ──> [Path Channel] ──┬──> Worker 1 ──┐
//!                                  ├──> Worker 2 ──┼──> [Result Channel] ──> caller
//!                                  └──> Worker N ──┘
//! ```
//!
//! Workers pull paths, read + decode + verify, and push finished models.
//! Results therefore arrive in completion order, not submission order. A
//! file that fails to open or decode is counted, logged at debug level, and
//! dropped; it never aborts a sibling or the batch.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;

use p3dcheck_format::{decode_model, Model};
use p3dcheck_verify::{verify_model, Registry};

use crate::error::{LoadError, LoadResult};
use crate::scan;

/// Completed models buffered ahead of the caller before workers block.
const RESULT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for one batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Worker threads decoding files.
    pub worker_count: usize,
    /// Directory path fragments that exclude a subtree from the scan.
    pub veto_substrings: Vec<String>,
    /// Whether decoded models go through the verification pass.
    pub verify: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            worker_count: thread::available_parallelism().map_or(4, NonZeroUsize::get),
            veto_substrings: vec!["!".to_string(), "@".to_string()],
            verify: true,
        }
    }
}

/// Counters for one batch run.
#[derive(Clone, Debug, Default)]
pub struct BatchStats {
    /// Files attempted, success or failure.
    pub attempted: usize,
    /// Models decoded (and verified) successfully.
    pub loaded: usize,
    /// Files dropped because reading them failed.
    pub io_failures: usize,
    /// Files dropped because decoding them failed.
    pub decode_failures: usize,
}

/// A running batch and its handle: results, progress, cancellation.
///
/// Dropping the loader cancels outstanding work and joins the workers;
/// decoding is read-only, so abandonment has no side effects.
pub struct BatchLoader {
    results: Option<Receiver<Model>>,
    progress: Arc<AtomicUsize>,
    cancel: Arc<AtomicBool>,
    stats: Arc<Mutex<BatchStats>>,
    total: usize,
    workers: Vec<JoinHandle<()>>,
}

impl BatchLoader {
    /// Scans `root` and starts decoding everything found.
    #[must_use]
    pub fn start(root: impl AsRef<Path>, config: BatchConfig, registry: Arc<Registry>) -> Self {
        let root = root.as_ref();
        let paths = scan::scan_directory(root, &config.veto_substrings);
        let total = paths.len();
        tracing::info!("Scanned {} model file(s) under {}", total, root.display());

        // Path channel sized to hold the whole scan so enqueueing never blocks.
        let (path_tx, path_rx) = bounded::<PathBuf>(total.max(1));
        for path in paths {
            let _ = path_tx.send(path);
        }
        drop(path_tx);

        let (result_tx, result_rx) = bounded::<Model>(RESULT_CHANNEL_CAPACITY);
        let progress = Arc::new(AtomicUsize::new(0));
        let cancel = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(Mutex::new(BatchStats::default()));

        let worker_count = config.worker_count.clamp(1, total.max(1));
        let mut workers = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let worker_paths = path_rx.clone();
            let worker_results = result_tx.clone();
            let worker_progress = Arc::clone(&progress);
            let worker_cancel = Arc::clone(&cancel);
            let worker_stats = Arc::clone(&stats);
            let worker_registry = Arc::clone(&registry);
            let verify = config.verify;

            workers.push(thread::spawn(move || {
                worker_loop(
                    &worker_paths,
                    &worker_results,
                    &worker_progress,
                    &worker_cancel,
                    &worker_stats,
                    &worker_registry,
                    verify,
                );
            }));
        }
        drop(result_tx);

        Self {
            results: Some(result_rx),
            progress,
            cancel,
            stats,
            total,
            workers,
        }
    }

    /// The next finished model, in completion order.
    ///
    /// Blocks until one arrives; `None` once every worker is done and the
    /// buffer is drained.
    #[must_use]
    pub fn recv(&self) -> Option<Model> {
        self.results.as_ref()?.recv().ok()
    }

    /// Files attempted so far, success or failure.
    #[must_use]
    pub fn progress(&self) -> usize {
        self.progress.load(Ordering::SeqCst)
    }

    /// Files the scan discovered.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Asks workers to stop after the file each is currently on.
    pub fn cancel(&self) {
        tracing::info!("Cancelling batch run");
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Snapshot of the run counters.
    #[must_use]
    pub fn stats(&self) -> BatchStats {
        self.stats.lock().clone()
    }
}

impl Drop for BatchLoader {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::SeqCst);

        // Disconnect the result channel so a worker blocked on a full
        // buffer errors out instead of deadlocking the join below.
        drop(self.results.take());

        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop(
    paths: &Receiver<PathBuf>,
    results: &Sender<Model>,
    progress: &AtomicUsize,
    cancel: &AtomicBool,
    stats: &Mutex<BatchStats>,
    registry: &Registry,
    verify: bool,
) {
    while let Ok(path) = paths.recv() {
        if cancel.load(Ordering::Relaxed) {
            break;
        }

        let outcome = load_one(&path, registry, verify);
        progress.fetch_add(1, Ordering::SeqCst);
        {
            let mut counters = stats.lock();
            counters.attempted += 1;
            match &outcome {
                Ok(_) => counters.loaded += 1,
                Err(LoadError::Io(_)) => counters.io_failures += 1,
                Err(LoadError::Format(_)) => counters.decode_failures += 1,
            }
        }

        match outcome {
            Ok(model) => {
                if results.send(model).is_err() {
                    break;
                }
            }
            Err(error) => {
                tracing::debug!("Dropping {}: {}", path.display(), error);
            }
        }
    }
}

fn load_one(path: &Path, registry: &Registry, verify: bool) -> LoadResult<Model> {
    let bytes = std::fs::read(path)?;
    let mut model = decode_model(path, &bytes)?;
    if verify {
        verify_model(&mut model, registry);
    }
    Ok(model)
}
