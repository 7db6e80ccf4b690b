//! Change Notification
//!
//! Per-topic observer registry with synchronous dispatch. A panicking
//! observer is caught and logged without disturbing its siblings or the
//! mutation that triggered the notification.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use psyche_events::{StateChange, Topic};

type Callback = Rc<dyn Fn(&StateChange)>;

/// Handle returned by `observe`, used to unregister the callback later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Shared per-topic observer registry
///
/// Cloning is cheap and every clone points at the same registry, so one
/// hub can be handed to several components at construction and they all
/// notify the same audience. Dispatch iterates over a snapshot of the
/// topic's list: callbacks may register or unregister observers mid-flight
/// without affecting the current round.
#[derive(Clone, Default)]
pub struct Observers {
    inner: Rc<Registry>,
}

#[derive(Default)]
struct Registry {
    next_id: Cell<u64>,
    by_topic: RefCell<HashMap<Topic, Vec<(ObserverId, Callback)>>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one topic. Returns a handle for `remove`.
    pub fn observe(&self, topic: Topic, callback: impl Fn(&StateChange) + 'static) -> ObserverId {
        let id = ObserverId(self.inner.next_id.get() + 1);
        self.inner.next_id.set(id.0);
        self.inner
            .by_topic
            .borrow_mut()
            .entry(topic)
            .or_default()
            .push((id, Rc::new(callback)));
        id
    }

    /// Unregister a previously registered callback. Returns false if the
    /// handle is not (or no longer) registered.
    pub fn remove(&self, id: ObserverId) -> bool {
        let mut by_topic = self.inner.by_topic.borrow_mut();
        for list in by_topic.values_mut() {
            let before = list.len();
            list.retain(|(observer_id, _)| *observer_id != id);
            if list.len() < before {
                return true;
            }
        }
        false
    }

    /// Invoke every observer registered for the change's topic, in
    /// registration order. A panic in one observer is logged and the
    /// remaining observers still run.
    pub fn emit(&self, change: &StateChange) {
        let snapshot: Vec<(ObserverId, Callback)> = {
            let by_topic = self.inner.by_topic.borrow();
            match by_topic.get(&change.topic()) {
                Some(list) if !list.is_empty() => list.clone(),
                _ => return,
            }
        };

        for (id, callback) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| callback(change))).is_err() {
                tracing::warn!(
                    observer = id.0,
                    topic = ?change.topic(),
                    "observer panicked during dispatch, continuing with remaining observers"
                );
            }
        }
    }

    /// Number of observers currently registered for a topic.
    pub fn count(&self, topic: Topic) -> usize {
        self.inner
            .by_topic
            .borrow()
            .get(&topic)
            .map_or(0, |list| list.len())
    }
}
