//! Shared application service layer for floodview.
//!
//! This crate provides a unified interface for both CLI and GUI frontends:
//! compiling a viewer configuration into a live map context, the run
//! selector state store that keeps the overlay in step with the selected
//! run, and catalog queries.

pub mod error;
pub mod observe;
pub mod query;
pub mod selector;
pub mod session;

// Re-export key types for convenience
pub use error::{AppError, AppResult, Axis, SelectorError, SelectorResult};
pub use observe::{SelectionChange, SubscriptionId};
pub use query::{CatalogReport, RunSummary, catalog_report, list_runs};
pub use selector::{RunSelector, SelectionState};
pub use session::{ViewerSession, compile_session, load_session};
