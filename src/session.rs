use crate::color_math::HexError;
use crate::color_state::{CenterSwitch, ColorSnapshot, ColorState};
use crate::event::PickerEvent;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Shareable handle to one picker's [`ColorState`].
///
/// The presentation layer may push events from any thread through
/// [`events`](Self::events); they are applied one frame at a time by
/// [`pump`](Self::pump), and every applied frame is broadcast to
/// subscribers. Clones share the same state.
#[derive(Clone)]
pub struct PickerSession {
    state: Arc<RwLock<ColorState>>,
    event_sender: Sender<PickerEvent>,
    event_receiver: Receiver<PickerEvent>,
    subscribers: Arc<Mutex<Vec<Sender<ColorSnapshot>>>>,
}

impl PickerSession {
    pub fn new(center_switch: CenterSwitch) -> Self {
        let (event_sender, event_receiver) = unbounded();

        Self {
            state: Arc::new(RwLock::new(ColorState::new(center_switch))),
            event_sender,
            event_receiver,
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Sender<PickerEvent> {
        self.event_sender.clone()
    }

    /// Receive a snapshot after every applied change.
    pub fn subscribe(&self) -> Receiver<ColorSnapshot> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ColorState) -> R,
    {
        f(&self.state.read())
    }

    pub fn snapshot(&self) -> ColorSnapshot {
        self.state.read().snapshot()
    }

    /// Apply one event right away, bypassing the queue.
    pub fn dispatch(&self, event: PickerEvent) -> ColorSnapshot {
        let snapshot = self.state.write().apply(event);
        self.broadcast(&snapshot);
        snapshot
    }

    pub fn set_hex(&self, hex: &str) -> Result<ColorSnapshot, HexError> {
        let snapshot = self.state.write().set_from_hex(hex)?;
        self.broadcast(&snapshot);
        Ok(snapshot)
    }

    pub fn set_center_switch(&self, center_switch: CenterSwitch) {
        self.state.write().set_center_switch(center_switch);
    }

    /// Apply everything queued since the last frame.
    ///
    /// Returns `None` if nothing was queued.
    pub fn pump(&self) -> Option<ColorSnapshot> {
        let pending: Vec<PickerEvent> = self.event_receiver.try_iter().collect();
        if pending.is_empty() {
            return None;
        }

        let received = pending.len();
        let batch = coalesce(pending);
        let applied = batch.len();

        let snapshot = {
            let mut state = self.state.write();
            let mut last = None;
            for event in batch {
                last = Some(state.apply(event));
            }
            last?
        };

        tracing::trace!(received, applied, hex = %snapshot.hex, "frame applied");
        self.broadcast(&snapshot);
        Some(snapshot)
    }

    fn broadcast(&self, snapshot: &ColorSnapshot) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

impl Default for PickerSession {
    fn default() -> Self {
        Self::new(CenterSwitch::default())
    }
}

/// Collapse each run of same-kind drag events to its last event.
///
/// Discrete events (reset, toggle, whole-RGB edits) are always kept, and
/// ordering between different kinds is preserved.
pub fn coalesce(events: impl IntoIterator<Item = PickerEvent>) -> Vec<PickerEvent> {
    let mut out: Vec<PickerEvent> = Vec::new();

    for event in events {
        if let (Some(last), Some(kind)) = (out.last_mut(), event.drag_kind()) {
            if last.drag_kind() == Some(kind) {
                *last = event;
                continue;
            }
        }
        out.push(event);
    }

    out
}
