//! Change notifications for the selector store.

use fv_core::Run;

/// What a selector edit changed. Delivered after the edit is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// A run transition completed; `layer` is the value pushed to the overlay.
    RunChanged { run: Run, layer: String },
    /// An index control moved. The selected run is not recomputed.
    IndicesChanged {
        amount_index: usize,
        duration_index: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SelectionChange)>;

/// Listener registry, notified synchronously in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, change: &SelectionChange) {
        for (_, listener) in &mut self.entries {
            listener(change);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
