//! Query helpers over a run catalog.

use fv_core::{RunCatalog, RunId};
use serde::Serialize;

/// One catalog row, as listed by frontends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub id: RunId,
    pub amount: u32,
    pub duration: u32,
    pub layer: String,
}

/// List every run with the overlay layer it maps to.
pub fn list_runs(catalog: &RunCatalog, layer_prefix: &str) -> Vec<RunSummary> {
    catalog
        .runs()
        .iter()
        .map(|run| RunSummary {
            id: run.id,
            amount: run.amount,
            duration: run.duration,
            layer: run.layer_name(layer_prefix),
        })
        .collect()
}

/// Shape and coverage of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogReport {
    pub run_count: usize,
    pub amount_count: usize,
    pub duration_count: usize,
    pub id_range: (RunId, RunId),
    /// Grid cells with no run, as `(amount, duration)`.
    pub missing: Vec<(u32, u32)>,
}

impl CatalogReport {
    pub fn is_total(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn catalog_report(catalog: &RunCatalog) -> CatalogReport {
    CatalogReport {
        run_count: catalog.len(),
        amount_count: catalog.amounts().len(),
        duration_count: catalog.durations().len(),
        id_range: catalog.id_range(),
        missing: catalog.missing_pairs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_core::Run;

    #[test]
    fn lists_builtin_runs_with_layers() {
        let runs = list_runs(&RunCatalog::builtin(), "run");
        assert_eq!(runs.len(), 15);
        assert_eq!(runs[7].id, RunId::new(655));
        assert_eq!(runs[7].layer, "run655");
        assert_eq!((runs[7].amount, runs[7].duration), (60, 180));
    }

    #[test]
    fn report_flags_gaps() {
        let builtin = catalog_report(&RunCatalog::builtin());
        assert!(builtin.is_total());
        assert_eq!(builtin.run_count, 15);
        assert_eq!(builtin.id_range, (RunId::new(648), RunId::new(662)));

        let sparse = RunCatalog::new(vec![Run::new(9, 10, 60)], vec![10, 20], vec![60]).unwrap();
        let report = catalog_report(&sparse);
        assert!(!report.is_total());
        assert_eq!(report.missing, vec![(20, 60)]);
    }
}
