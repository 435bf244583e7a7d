//! The run record.

use crate::ids::RunId;

/// Prefix the WMS server uses for per-run layer names.
pub const DEFAULT_LAYER_PREFIX: &str = "run";

/// One simulation configuration: a rainfall amount applied over a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Run {
    pub id: RunId,
    /// Rainfall amount (mm).
    pub amount: u32,
    /// Rainfall duration (min).
    pub duration: u32,
}

impl Run {
    pub const fn new(id: u32, amount: u32, duration: u32) -> Self {
        Self {
            id: RunId::new(id),
            amount,
            duration,
        }
    }

    /// Server-side layer name for this run under `prefix`.
    pub fn layer_name(&self, prefix: &str) -> String {
        layer_name(prefix, self.id)
    }
}

/// `prefix` followed by the decimal run id, no padding.
pub fn layer_name(prefix: &str, id: RunId) -> String {
    format!("{prefix}{id}")
}
