//! # tangle-config
//!
//! Configuration for a tangle analysis run.
//!
//! A [`TangleConfig`] is immutable for the duration of one run. It is
//! fingerprinted by the incremental cache, so any change to it (a flipped
//! tracking flag, a new extension) invalidates every cached file.
//!
//! Configuration can be built programmatically, or loaded from layered
//! sources with [`TangleConfig::load`]:
//!
//! ```text
//! defaults  <  tangle.toml | tangle.json | package.json "tangle"  <  TANGLE_* env
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod loading;
pub mod validation;

pub use config::*;
pub use discovery::ConfigDiscovery;
pub use error::*;
pub use validation::validate;
