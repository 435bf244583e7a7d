//! Run selector: the selection state store behind the run controls.
//!
//! Three pieces of state are kept in step: the selected run, the amount index
//! and the duration index. Whenever a run transition completes the overlay's
//! `layers` parameter is pointed at that run.
//!
//! # Transitions
//!
//! - [`RunSelector::select_run`] / [`RunSelector::update_run`]: the run
//!   changed. Indices are recomputed from the run and the overlay is updated.
//!   This is the only path that writes to the overlay.
//! - [`RunSelector::set_amount_index`] / [`RunSelector::set_duration_index`]:
//!   an index control moved. Only the index changes.
//! - [`RunSelector::find_run`]: resolve the current indices to a run and, if
//!   one exists, run the "run changed" transition for it. No match is a
//!   silent no-op.

use fv_core::{DEFAULT_LAYER_PREFIX, Run, RunCatalog, RunId};
use fv_map::{OverlayParams, WmsParams};
use serde::Serialize;

use crate::error::{Axis, SelectorError, SelectorResult};
use crate::observe::{Listeners, SelectionChange, SubscriptionId};

/// Point-in-time copy of the selection, for display and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub run: Run,
    pub amount_index: usize,
    pub duration_index: usize,
    pub amount: u32,
    pub duration: u32,
    pub layer: String,
}

pub struct RunSelector<O: OverlayParams> {
    catalog: RunCatalog,
    overlay: O,
    layer_prefix: String,
    run: Run,
    amount_index: usize,
    duration_index: usize,
    time: Option<f64>,
    listeners: Listeners,
}

impl<O: OverlayParams> RunSelector<O> {
    pub fn new(catalog: RunCatalog, overlay: O) -> Self {
        Self::with_layer_prefix(catalog, overlay, DEFAULT_LAYER_PREFIX)
    }

    /// Start on the catalog's first run.
    ///
    /// Indices start at that run's position, which is `(0, 0)` for a
    /// row-major catalog. The overlay is not written: whoever built it
    /// already parameterized it for the default run.
    pub fn with_layer_prefix(catalog: RunCatalog, overlay: O, layer_prefix: &str) -> Self {
        let run = *catalog.first();
        let amount_index = catalog.amount_index(run.amount).unwrap_or(0);
        let duration_index = catalog.duration_index(run.duration).unwrap_or(0);
        Self {
            catalog,
            overlay,
            layer_prefix: layer_prefix.to_string(),
            run,
            amount_index,
            duration_index,
            time: None,
            listeners: Listeners::default(),
        }
    }

    pub fn catalog(&self) -> &RunCatalog {
        &self.catalog
    }

    pub fn runs(&self) -> &[Run] {
        self.catalog.runs()
    }

    pub fn amounts(&self) -> &[u32] {
        self.catalog.amounts()
    }

    pub fn durations(&self) -> &[u32] {
        self.catalog.durations()
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn amount_index(&self) -> usize {
        self.amount_index
    }

    pub fn duration_index(&self) -> usize {
        self.duration_index
    }

    pub fn time(&self) -> Option<f64> {
        self.time
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn layer_prefix(&self) -> &str {
        &self.layer_prefix
    }

    /// Overlay layer name for the selected run.
    pub fn layer(&self) -> String {
        self.run.layer_name(&self.layer_prefix)
    }

    /// Make the catalog run `id` the selection, then run [`Self::update_run`].
    pub fn select_run(&mut self, id: RunId) -> SelectorResult<()> {
        let run = *self
            .catalog
            .get(id)
            .ok_or(SelectorError::UnknownRun(id))?;
        self.run = run;
        self.update_run();
        Ok(())
    }

    /// Re-derive indices from the selected run and point the overlay at it.
    pub fn update_run(&mut self) {
        if let Some(index) = self.catalog.amount_index(self.run.amount) {
            self.amount_index = index;
        }
        if let Some(index) = self.catalog.duration_index(self.run.duration) {
            self.duration_index = index;
        }

        let layer = self.layer();
        self.overlay.set_params(WmsParams::layers(layer.clone()));
        tracing::debug!(
            run = %self.run.id,
            amount_index = self.amount_index,
            duration_index = self.duration_index,
            layer = %layer,
            "run updated"
        );

        self.listeners.emit(&SelectionChange::RunChanged {
            run: self.run,
            layer,
        });
    }

    /// Move the amount control. Out-of-range indices are rejected.
    pub fn set_amount_index(&mut self, index: usize) -> SelectorResult<()> {
        check_index(Axis::Amount, index, self.amounts().len())?;
        self.amount_index = index;
        self.emit_indices();
        Ok(())
    }

    /// Move the duration control. Out-of-range indices are rejected.
    pub fn set_duration_index(&mut self, index: usize) -> SelectorResult<()> {
        check_index(Axis::Duration, index, self.durations().len())?;
        self.duration_index = index;
        self.emit_indices();
        Ok(())
    }

    /// Move both controls at once; nothing changes unless both are in range.
    pub fn set_indices(&mut self, amount_index: usize, duration_index: usize) -> SelectorResult<()> {
        check_index(Axis::Amount, amount_index, self.amounts().len())?;
        check_index(Axis::Duration, duration_index, self.durations().len())?;
        self.amount_index = amount_index;
        self.duration_index = duration_index;
        self.emit_indices();
        Ok(())
    }

    /// Select the first catalog run matching the current indices.
    ///
    /// When no run matches, the selection and the overlay are left as they
    /// are and nothing is reported.
    pub fn find_run(&mut self) {
        let amount = self.amounts().get(self.amount_index).copied();
        let duration = self.durations().get(self.duration_index).copied();
        let found = match (amount, duration) {
            (Some(amount), Some(duration)) => self.catalog.find(amount, duration).copied(),
            _ => None,
        };

        match found {
            Some(run) => {
                self.run = run;
                self.update_run();
            }
            None => {
                tracing::debug!(
                    amount_index = self.amount_index,
                    duration_index = self.duration_index,
                    ?amount,
                    ?duration,
                    "no run for selected amount/duration"
                );
            }
        }
    }

    /// Diagnostic hook for the time control. Records and logs the value.
    pub fn update_time(&mut self, time: f64) {
        self.time = Some(time);
        tracing::debug!(time, "time updated");
    }

    pub fn snapshot(&self) -> SelectionState {
        SelectionState {
            run: self.run,
            amount_index: self.amount_index,
            duration_index: self.duration_index,
            amount: self.run.amount,
            duration: self.run.duration,
            layer: self.layer(),
        }
    }

    /// Register a change listener. Listeners are called synchronously after
    /// each applied edit, in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&SelectionChange) + 'static) -> SubscriptionId {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// `(index, label)` ticks for the amount control.
    pub fn amount_marks(&self) -> Vec<(usize, String)> {
        marks(self.amounts())
    }

    /// `(index, label)` ticks for the duration control.
    pub fn duration_marks(&self) -> Vec<(usize, String)> {
        marks(self.durations())
    }

    fn emit_indices(&mut self) {
        self.listeners.emit(&SelectionChange::IndicesChanged {
            amount_index: self.amount_index,
            duration_index: self.duration_index,
        });
    }
}

fn check_index(axis: Axis, index: usize, len: usize) -> SelectorResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(SelectorError::IndexOutOfRange { axis, index, len })
    }
}

fn marks(values: &[u32]) -> Vec<(usize, String)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        writes: Vec<String>,
    }

    impl OverlayParams for Recorder {
        fn set_params(&mut self, params: WmsParams) {
            self.writes
                .push(params.get("layers").unwrap_or_default().to_string());
        }
    }

    fn selector() -> RunSelector<Recorder> {
        RunSelector::new(RunCatalog::builtin(), Recorder::default())
    }

    #[test]
    fn initial_state() {
        let sel = selector();
        assert_eq!(sel.run().id, RunId::new(648));
        assert_eq!((sel.amount_index(), sel.duration_index()), (0, 0));
        assert!(sel.overlay().writes.is_empty());
        assert_eq!(sel.layer(), "run648");
    }

    #[test]
    fn index_edits_do_not_touch_run_or_overlay() {
        let mut sel = selector();
        sel.set_amount_index(3).unwrap();
        sel.set_duration_index(2).unwrap();
        assert_eq!(sel.run().id, RunId::new(648));
        assert_eq!((sel.amount_index(), sel.duration_index()), (3, 2));
        assert!(sel.overlay().writes.is_empty());
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let mut sel = selector();
        sel.set_indices(1, 1).unwrap();

        assert_eq!(
            sel.set_amount_index(5),
            Err(SelectorError::IndexOutOfRange {
                axis: Axis::Amount,
                index: 5,
                len: 5
            })
        );
        assert_eq!(
            sel.set_indices(0, 3),
            Err(SelectorError::IndexOutOfRange {
                axis: Axis::Duration,
                index: 3,
                len: 3
            })
        );
        assert_eq!((sel.amount_index(), sel.duration_index()), (1, 1));
    }

    #[test]
    fn unknown_run_is_rejected() {
        let mut sel = selector();
        assert_eq!(
            sel.select_run(RunId::new(700)),
            Err(SelectorError::UnknownRun(RunId::new(700)))
        );
        assert_eq!(sel.run().id, RunId::new(648));
        assert!(sel.overlay().writes.is_empty());
    }

    #[test]
    fn update_time_is_recorded_only() {
        let mut sel = selector();
        sel.update_time(42.5);
        assert_eq!(sel.time(), Some(42.5));
        assert!(sel.overlay().writes.is_empty());
    }

    #[test]
    fn marks_label_axis_values() {
        let sel = selector();
        assert_eq!(
            sel.duration_marks(),
            vec![
                (0, "60".to_string()),
                (1, "180".to_string()),
                (2, "360".to_string())
            ]
        );
        assert_eq!(sel.amount_marks().len(), 5);
    }

    #[test]
    fn custom_prefix_is_used_for_layers() {
        let mut sel = RunSelector::with_layer_prefix(RunCatalog::builtin(), Recorder::default(), "flood_");
        sel.select_run(RunId::new(650)).unwrap();
        assert_eq!(sel.overlay().writes, vec!["flood_650".to_string()]);
    }
}
