//! fv-core: stable foundation for floodview.
//!
//! Contains:
//! - ids (run identifiers)
//! - run (the immutable run record + WMS layer naming)
//! - catalog (the amount x duration run grid)
//! - error (shared error types)

pub mod catalog;
pub mod error;
pub mod ids;
pub mod run;

pub use catalog::{BUILTIN_AMOUNTS, BUILTIN_DURATIONS, BUILTIN_FIRST_RUN_ID, RunCatalog};
pub use error::{CoreError, CoreResult};
pub use ids::RunId;
pub use run::{DEFAULT_LAYER_PREFIX, Run, layer_name};
