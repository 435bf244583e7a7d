//! Run catalog: the amount x duration grid of simulation runs.

use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, CoreResult};
use crate::ids::RunId;
use crate::run::Run;

/// Rainfall amounts (mm) of the built-in catalog.
pub const BUILTIN_AMOUNTS: [u32; 5] = [20, 40, 60, 80, 100];
/// Rainfall durations (min) of the built-in catalog.
pub const BUILTIN_DURATIONS: [u32; 3] = [60, 180, 360];
/// Id of the first built-in run; ids are contiguous from here.
pub const BUILTIN_FIRST_RUN_ID: u32 = 648;

/// Read-only list of runs plus the two axes the selection controls index into.
///
/// Runs are kept in the order they were given; lookups scan in that order and
/// return the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCatalog {
    runs: Vec<Run>,
    amounts: Vec<u32>,
    durations: Vec<u32>,
}

impl RunCatalog {
    /// Build a catalog from explicit parts.
    ///
    /// Rejects empty axes, repeated axis values, repeated run ids, runs that
    /// fall off either axis and repeated (amount, duration) pairs. Gaps in the
    /// grid are allowed; see [`RunCatalog::missing_pairs`].
    pub fn new(runs: Vec<Run>, amounts: Vec<u32>, durations: Vec<u32>) -> CoreResult<Self> {
        check_axis("amount", &amounts)?;
        check_axis("duration", &durations)?;
        if runs.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }

        let mut ids = HashSet::new();
        let mut pairs: HashMap<(u32, u32), RunId> = HashMap::new();
        for run in &runs {
            if !ids.insert(run.id) {
                return Err(CoreError::DuplicateRunId { id: run.id.get() });
            }
            if !amounts.contains(&run.amount) {
                return Err(CoreError::OffAxis {
                    id: run.id.get(),
                    axis: "amount",
                    value: run.amount,
                });
            }
            if !durations.contains(&run.duration) {
                return Err(CoreError::OffAxis {
                    id: run.id.get(),
                    axis: "duration",
                    value: run.duration,
                });
            }
            if let Some(first) = pairs.insert((run.amount, run.duration), run.id) {
                return Err(CoreError::DuplicatePair {
                    first: first.get(),
                    second: run.id.get(),
                    amount: run.amount,
                    duration: run.duration,
                });
            }
        }

        Ok(Self {
            runs,
            amounts,
            durations,
        })
    }

    /// The fifteen runs published on the WMS server: ids 648..=662 laid out
    /// row-major over (amount, duration).
    pub fn builtin() -> Self {
        let mut runs = Vec::with_capacity(BUILTIN_AMOUNTS.len() * BUILTIN_DURATIONS.len());
        let mut id = BUILTIN_FIRST_RUN_ID;
        for amount in BUILTIN_AMOUNTS {
            for duration in BUILTIN_DURATIONS {
                runs.push(Run::new(id, amount, duration));
                id += 1;
            }
        }
        Self {
            runs,
            amounts: BUILTIN_AMOUNTS.to_vec(),
            durations: BUILTIN_DURATIONS.to_vec(),
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn amounts(&self) -> &[u32] {
        &self.amounts
    }

    pub fn durations(&self) -> &[u32] {
        &self.durations
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Default selection. Construction guarantees at least one run.
    pub fn first(&self) -> &Run {
        &self.runs[0]
    }

    pub fn get(&self, id: RunId) -> Option<&Run> {
        self.runs.iter().find(|r| r.id == id)
    }

    /// First run (in catalog order) with this amount and duration.
    pub fn find(&self, amount: u32, duration: u32) -> Option<&Run> {
        self.runs
            .iter()
            .find(|r| r.amount == amount && r.duration == duration)
    }

    pub fn amount_index(&self, amount: u32) -> Option<usize> {
        self.amounts.iter().position(|&a| a == amount)
    }

    pub fn duration_index(&self, duration: u32) -> Option<usize> {
        self.durations.iter().position(|&d| d == duration)
    }

    /// Grid cells with no run, row-major over (amount, duration).
    pub fn missing_pairs(&self) -> Vec<(u32, u32)> {
        let mut missing = Vec::new();
        for &amount in &self.amounts {
            for &duration in &self.durations {
                if self.find(amount, duration).is_none() {
                    missing.push((amount, duration));
                }
            }
        }
        missing
    }

    pub fn is_total(&self) -> bool {
        self.runs.len() == self.amounts.len() * self.durations.len()
    }

    /// Smallest and largest run id.
    pub fn id_range(&self) -> (RunId, RunId) {
        let first = self.first().id;
        self.runs.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.id), hi.max(r.id))
        })
    }
}

impl Default for RunCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_axis(axis: &'static str, values: &[u32]) -> CoreResult<()> {
    if values.is_empty() {
        return Err(CoreError::EmptyAxis { axis });
    }
    let mut seen = HashSet::new();
    for &value in values {
        if !seen.insert(value) {
            return Err(CoreError::DuplicateAxisValue { axis, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_fifteen_contiguous_runs() {
        let catalog = RunCatalog::builtin();
        assert_eq!(catalog.len(), 15);
        let ids: Vec<u32> = catalog.runs().iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, (648..=662).collect::<Vec<_>>());
        assert_eq!(catalog.id_range(), (RunId::new(648), RunId::new(662)));
    }

    #[test]
    fn builtin_is_row_major() {
        let catalog = RunCatalog::builtin();
        assert_eq!(*catalog.first(), Run::new(648, 20, 60));
        assert_eq!(catalog.runs()[1], Run::new(649, 20, 180));
        assert_eq!(catalog.runs()[3], Run::new(651, 40, 60));
        assert_eq!(catalog.runs()[14], Run::new(662, 100, 360));
    }

    #[test]
    fn builtin_is_total() {
        let catalog = RunCatalog::builtin();
        assert!(catalog.is_total());
        assert!(catalog.missing_pairs().is_empty());
    }

    #[test]
    fn builtin_passes_validation() {
        let builtin = RunCatalog::builtin();
        let rebuilt = RunCatalog::new(
            builtin.runs().to_vec(),
            builtin.amounts().to_vec(),
            builtin.durations().to_vec(),
        )
        .unwrap();
        assert_eq!(rebuilt, builtin);
    }

    #[test]
    fn find_and_indices() {
        let catalog = RunCatalog::builtin();
        assert_eq!(catalog.find(60, 180).map(|r| r.id.get()), Some(655));
        assert_eq!(catalog.find(60, 90), None);
        assert_eq!(catalog.amount_index(100), Some(4));
        assert_eq!(catalog.duration_index(360), Some(2));
        assert_eq!(catalog.amount_index(30), None);
    }

    #[test]
    fn gaps_are_reported_not_rejected() {
        let catalog = RunCatalog::new(
            vec![Run::new(1, 10, 60), Run::new(2, 20, 120)],
            vec![10, 20],
            vec![60, 120],
        )
        .unwrap();
        assert!(!catalog.is_total());
        assert_eq!(catalog.missing_pairs(), vec![(10, 120), (20, 60)]);
    }

    #[test]
    fn rejects_malformed_parts() {
        let run = Run::new(1, 10, 60);
        assert_eq!(
            RunCatalog::new(vec![run], vec![], vec![60]),
            Err(CoreError::EmptyAxis { axis: "amount" })
        );
        assert_eq!(
            RunCatalog::new(vec![run], vec![10, 10], vec![60]),
            Err(CoreError::DuplicateAxisValue {
                axis: "amount",
                value: 10
            })
        );
        assert_eq!(
            RunCatalog::new(vec![], vec![10], vec![60]),
            Err(CoreError::EmptyCatalog)
        );
        assert_eq!(
            RunCatalog::new(vec![run, Run::new(1, 10, 120)], vec![10], vec![60, 120]),
            Err(CoreError::DuplicateRunId { id: 1 })
        );
        assert_eq!(
            RunCatalog::new(vec![Run::new(1, 15, 60)], vec![10], vec![60]),
            Err(CoreError::OffAxis {
                id: 1,
                axis: "amount",
                value: 15
            })
        );
        assert_eq!(
            RunCatalog::new(vec![run, Run::new(2, 10, 60)], vec![10], vec![60]),
            Err(CoreError::DuplicatePair {
                first: 1,
                second: 2,
                amount: 10,
                duration: 60
            })
        );
    }
}
