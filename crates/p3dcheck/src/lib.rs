//! # P3DCHECK
//!
//! Batch checking of P3D model containers: scan a directory tree, decode
//! every model on a worker pool, run property verification, and report the
//! findings.
//!
//! ## Design Principles
//!
//! 1. **Per-file isolation**: a file that fails to open or decode is
//!    counted and dropped; siblings and the batch never notice
//! 2. **Completion order**: finished models stream back as workers finish
//!    them, with a progress counter ticking once per attempt
//! 3. **Abandonable**: cancellation flips a flag workers check between
//!    files; decoding is read-only, so nothing needs undoing
//!
//! ## Core Components
//!
//! - `scan_directory`: recursive model discovery with directory vetoes
//! - `BatchLoader`: the worker pool, its progress, stats, and cancellation
//! - `render_report`/`write_report`: the flattened findings report
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use p3dcheck::{BatchConfig, BatchLoader};
//! use p3dcheck_verify::Registry;
//!
//! let registry = Arc::new(Registry::standard());
//! let loader = BatchLoader::start("models/", BatchConfig::default(), registry);
//! while let Some(model) = loader.recv() {
//!     println!("{}: {} LODs", model.path().display(), model.lods().len());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod loader;
pub mod report;
pub mod scan;

pub use error::{LoadError, LoadResult};
pub use loader::{BatchConfig, BatchLoader, BatchStats};
pub use report::{render_report, write_report};
pub use scan::scan_directory;
