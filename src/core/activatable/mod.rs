//=========================================================================
// Activatable
//=========================================================================
//
// Two-state lifecycle (Inactive / Active) with transient transition
// states, shared by every overlay the screen locker can show.
//
// Architecture:
//   Activatable (trait)
//     └─ ActivatableCore (state + StateObservers)
//           └─ set_state() → StateObservers::notify() → observers
//
// State graph:
// ```text
//   Inactive ──activate──> Activating ──tick──> Active
//      ^                                          │
//      └────tick──── Deactivating <──deactivate───┘
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Module Declarations =================================================

mod observers;

//=== Public API ==========================================================

pub use observers::{ObserverHandle, StateObserver, StateObservers, SubscriptionId};

//=== ActivatableState ====================================================

/// Lifecycle state of an activatable element.
///
/// `Inactive` and `Active` are stable. `Activating` and `Deactivating`
/// last for as long as the element's own transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivatableState {
    /// Hidden, not blocking anything. Initial state.
    #[default]
    Inactive,

    /// Transition toward `Active` in progress.
    Activating,

    /// Fully shown.
    Active,

    /// Transition toward `Inactive` in progress.
    Deactivating,
}

impl ActivatableState {
    /// Returns `true` for `Activating` and `Deactivating`.
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Activating | Self::Deactivating)
    }
}

impl fmt::Display for ActivatableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inactive => "inactive",
            Self::Activating => "activating",
            Self::Active => "active",
            Self::Deactivating => "deactivating",
        };
        f.write_str(name)
    }
}

//=== ActivatableId =======================================================

/// Process-unique identity of an activatable instance.
///
/// Carried in every [`StateChange`] so observers can tell which instance
/// emitted a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivatableId(u64);

impl ActivatableId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

//=== StateChange =========================================================

/// Notification payload delivered to observers on every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// Instance whose state changed.
    pub source: ActivatableId,

    /// State the instance has just entered.
    pub state: ActivatableState,
}

//=== Activatable Trait ===================================================

/// Capability of reporting and transitioning through the activation
/// lifecycle with observable notifications.
///
/// # Idempotence
///
/// Implementations are expected to treat `activate` while `Active` as a
/// no-op, and `activate(false)` while `Activating` as a no-op too;
/// `activate(true)` while `Activating` completes the transition at once.
/// `deactivate` mirrors this.
pub trait Activatable {
    /// Moves toward `Active`. With `immediate`, reaches it before returning.
    fn activate(&mut self, immediate: bool);

    /// Moves toward `Inactive`. With `immediate`, reaches it before returning.
    fn deactivate(&mut self, immediate: bool);

    /// Current lifecycle state.
    fn activatable_state(&self) -> ActivatableState;

    /// Identity reported in this instance's notifications.
    fn activatable_id(&self) -> ActivatableId;

    /// Registers an observer for state changes.
    fn subscribe(&self, observer: StateObserver) -> SubscriptionId;

    /// Removes an observer. Returns `false` if it was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Returns `true` if the state is `Active`.
    fn is_active(&self) -> bool {
        self.activatable_state() == ActivatableState::Active
    }

    /// Returns `true` if the state is `Inactive`.
    fn is_inactive(&self) -> bool {
        self.activatable_state() == ActivatableState::Inactive
    }

    /// Returns `true` while a transition is running.
    fn is_transitioning(&self) -> bool {
        self.activatable_state().is_transitioning()
    }
}

//=== ActivatableCore =====================================================

/// State holder and observer list that concrete activatables embed.
///
/// `set_state` is the only way to change state; it notifies observers
/// only when the state actually changes. Dropping the core deregisters
/// every observer.
pub struct ActivatableCore {
    id: ActivatableId,
    state: ActivatableState,
    observers: StateObservers,
}

impl ActivatableCore {
    //--- Construction -----------------------------------------------------

    /// Creates a core in the `Inactive` state.
    pub fn new() -> Self {
        Self::with_state(ActivatableState::Inactive)
    }

    /// Creates a core in the given initial state. No notification is sent.
    pub fn with_state(state: ActivatableState) -> Self {
        Self {
            id: ActivatableId::next(),
            state,
            observers: StateObservers::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn id(&self) -> ActivatableId {
        self.id
    }

    pub fn state(&self) -> ActivatableState {
        self.state
    }

    pub fn observers(&self) -> &StateObservers {
        &self.observers
    }

    //--- Mutation ---------------------------------------------------------

    /// Enters `state` and notifies observers.
    ///
    /// Returns `false` without notifying if `state` is the current state.
    pub fn set_state(&mut self, state: ActivatableState) -> bool {
        if state == self.state {
            return false;
        }

        self.state = state;
        self.observers.notify(StateChange {
            source: self.id,
            state,
        });
        true
    }

    pub fn subscribe(&self, observer: StateObserver) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl Default for ActivatableCore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActivatableCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivatableCore")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Drop for ActivatableCore {
    fn drop(&mut self) {
        self.observers.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
