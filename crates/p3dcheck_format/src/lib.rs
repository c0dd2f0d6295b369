//! # P3DCHECK Format
//!
//! Decoding for the P3D model container: per-LOD property tables out of raw
//! bytes, nothing else materialized.
//!
//! ## Design Principles
//!
//! 1. **Structural skipping**: Geometry, bones and materials are consumed
//!    for alignment only, never kept
//! 2. **Single-file failure**: Every decode error names this file's problem
//!    and aborts only this file's decode
//! 3. **Exact keys, tolerant comparisons**: the LOD table is addressed by
//!    exact resolution value, while category tests compare under relative
//!    tolerance because encoder rounding drifts across tool versions
//!
//! ## Core Components
//!
//! - `Cursor`: bounds-checked little-endian reads with explicit position
//! - `codec`: the container's LZSS block compression
//! - `decode_model`: `MLOD`/`ODOL` dispatch producing a [`Model`]
//! - `Model`/`Lod`/`Property`: the decoded tree diagnostics attach to
//! - `LodResolution`: tolerant-equality resolution value with category
//!   classification
//!
//! ## Example
//!
//! ```rust,ignore
//! use p3dcheck_format::decode_model;
//!
//! let bytes = std::fs::read("tank.p3d")?;
//! let model = decode_model("tank.p3d", &bytes)?;
//! for (resolution, lod) in model.lods().iter() {
//!     println!("{resolution}: {} properties", lod.property_count());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod codec;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod model;
pub mod resolution;

pub use cursor::Cursor;
pub use decode::{decode_model, MLOD_MAGIC, ODOL_MAGIC};
pub use error::{FormatError, FormatResult};
pub use model::{Diagnostic, Lod, LodMap, Model, Property, Severity};
pub use resolution::{LodCategory, LodResolution};
