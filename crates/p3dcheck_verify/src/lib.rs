//! # P3DCHECK Verify
//!
//! Validation of the named properties a decoded model carries: a fixed
//! registry of per-name condition chains, evaluated per LOD, producing
//! severity-tagged findings on the model itself.
//!
//! ## Design Principles
//!
//! 1. **Exhaustive evaluation**: every condition of a known property runs;
//!    one property can collect several independent findings
//! 2. **Raw values only**: conditions read property tables and resolutions,
//!    never other findings
//! 3. **Build once, share freely**: the registry is immutable after
//!    construction and safe for concurrent readers
//!
//! ## Core Components
//!
//! - `Condition`: one check with its configuration, pass or fail-with-message
//! - `Registry`: lower-cased property name → ordered condition chain
//! - `verify_model`: the pass attaching findings to a decoded
//!   [`Model`](p3dcheck_format::Model)
//!
//! ## Example
//!
//! ```rust,ignore
//! use p3dcheck_format::decode_model;
//! use p3dcheck_verify::{verify_model, Registry};
//!
//! let bytes = std::fs::read("tank.p3d")?;
//! let mut model = decode_model("tank.p3d", &bytes)?;
//! let registry = Registry::standard();
//! verify_model(&mut model, &registry);
//! if model.has_errors() {
//!     eprintln!("{} failed verification", model.path().display());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod condition;
pub mod registry;
pub mod verify;

pub use condition::{CheckContext, Condition, Finding};
pub use registry::Registry;
pub use verify::verify_model;
