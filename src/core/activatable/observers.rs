//=========================================================================
// State Observers
//=========================================================================
//
// Observer list for activation state changes.
//
// Dispatch iterates a snapshot of subscription ids and takes each
// handler out of its slot while it runs, so handlers may subscribe or
// unsubscribe (themselves or others) from inside a notification.
//
//   notify() → snapshot ids → for id: take handler → call → put back
//                                                      (unless removed)
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

//=== Internal Dependencies ===============================================

use super::StateChange;

//=== Types ===============================================================

/// Boxed state-change handler.
pub type StateObserver = Box<dyn FnMut(&StateChange)>;

/// Token identifying one registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Slot storage. A `None` slot is an observer currently being called.
struct Slots {
    next_id: u64,
    entries: BTreeMap<SubscriptionId, Option<StateObserver>>,
}

//=== StateObservers ======================================================

/// Ordered list of state-change observers.
///
/// Observers are called in subscription order. An observer subscribed
/// during a dispatch is first called on the next dispatch; an observer
/// removed during a dispatch is not called again.
pub struct StateObservers {
    slots: Rc<RefCell<Slots>>,
}

impl StateObservers {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 1,
                entries: BTreeMap::new(),
            })),
        }
    }

    /// Returns a weak handle that can remove observers, e.g. from inside
    /// a handler.
    pub fn handle(&self) -> ObserverHandle {
        ObserverHandle {
            slots: Rc::downgrade(&self.slots),
        }
    }

    pub fn subscribe(&self, observer: StateObserver) -> SubscriptionId {
        let mut slots = self.slots.borrow_mut();
        let id = SubscriptionId(slots.next_id);
        slots.next_id += 1;
        slots.entries.insert(id, Some(observer));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        remove(&self.slots, id)
    }

    /// Number of registered observers, including one currently running.
    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deregisters every observer.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut self.slots.borrow_mut().entries);
        drop(drained);
    }

    /// Delivers `change` to every observer registered when the call began.
    pub fn notify(&self, change: StateChange) {
        let ids: Vec<SubscriptionId> = self.slots.borrow().entries.keys().copied().collect();

        for id in ids {
            let taken = self
                .slots
                .borrow_mut()
                .entries
                .get_mut(&id)
                .and_then(Option::take);

            let Some(mut observer) = taken else {
                continue;
            };

            observer(&change);

            let mut slots = self.slots.borrow_mut();
            if let Some(slot) = slots.entries.get_mut(&id) {
                *slot = Some(observer);
            } else {
                // Removed during its own call.
                drop(slots);
                drop(observer);
            }
        }
    }
}

impl Default for StateObservers {
    fn default() -> Self {
        Self::new()
    }
}

//=== ObserverHandle ======================================================

/// Weak reference to a [`StateObservers`] list.
///
/// Becomes inert once the list is dropped.
#[derive(Clone)]
pub struct ObserverHandle {
    slots: Weak<RefCell<Slots>>,
}

impl ObserverHandle {
    /// Removes an observer. Returns `false` if it was not registered or
    /// the list no longer exists.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self.slots.upgrade() {
            Some(slots) => remove(&slots, id),
            None => false,
        }
    }
}

//--- Helpers -------------------------------------------------------------

fn remove(slots: &RefCell<Slots>, id: SubscriptionId) -> bool {
    let removed = slots.borrow_mut().entries.remove(&id);
    removed.is_some()
}

//=========================================================================
// Unit Tests
//=========================================================================
