//! Change notification for hosts watching an executor.

use stepvm_common::Program;

use crate::history::HistoryItem;

/// Read-only view of the executor after a state change.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub memory: &'a [i32],
    pub program: &'a Program,
    pub counter: i32,
    pub history: &'a [HistoryItem],
    pub cursor: usize,
}

impl<'a> Snapshot<'a> {
    pub fn is_halted(&self) -> bool {
        self.program.get(self.counter).is_none()
    }

    /// The step that produced the current state, if any.
    pub fn last_step(&self) -> Option<&'a HistoryItem> {
        self.cursor.checked_sub(1).and_then(|i| self.history.get(i))
    }
}

/// Callback invoked with a fresh snapshot after every state change.
pub type Listener = Box<dyn FnMut(&Snapshot<'_>)>;

/// Token returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, snapshot: &Snapshot<'_>) {
        for (_, listener) in &mut self.listeners {
            listener(snapshot);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}
