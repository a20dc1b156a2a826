//=========================================================================
// Screen Locker Manager
//=========================================================================
//
// Lock/unlock state machine on top of the overlay activation lifecycle.
//
// Session state:
//   children   - hosted nodes; at most one overlay once a request starts
//   watch      - subscription on the overlay whose transition is awaited
//   pending    - callback of the in-flight request
//   lock_token - held iff input is suppressed
//
// Overlay observers only record state changes into `inbox`. The manager
// drains the inbox before returning from every public call, so callbacks
// run with full `&mut` access to the manager.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use super::handle::{LockerHandle, LockerRequest};
use crate::core::activatable::{
    ActivatableId, ActivatableState, StateChange, StateObserver, SubscriptionId,
};
use crate::core::error::LockerError;
use crate::core::input::{InputLock, InputLockToken};
use crate::core::overlay::{
    LockerKey, LockerType, Overlay, OverlayNode, OverlayRegistry, RenderSurface,
};

//=== Types ===============================================================

/// Completion callback of a lock or unlock request.
///
/// Receives the manager, so it may issue the next request directly.
pub type CompleteCallback<K> = Box<dyn FnOnce(&mut ScreenLockerManager<K>)>;

/// Hook run on every new overlay after [`Overlay::init`].
pub type OverlayInitializer<K> = Box<dyn Fn(&mut dyn Overlay<K>, &RenderSurface)>;

/// Upper bound on handle requests executed per update.
const MAX_REQUESTS_PER_FRAME: usize = 64;

/// Stable state the watched overlay is expected to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchKind {
    Activation,
    Deactivation,
}

#[derive(Debug, Clone, Copy)]
struct Watch {
    target: ActivatableId,
    subscription: SubscriptionId,
    kind: WatchKind,
}

//=== ScreenLockerManager =================================================

/// Owner of the screen locker overlays and of the input lock token.
///
/// Lives on the UI thread. Other threads reach it through a
/// [`LockerHandle`].
///
/// # Example
///
/// ```rust
/// # use std::time::Duration;
/// # use screen_locker::prelude::*;
/// let mut locker = ScreenLockerBuilder::new()
///     .with_template(FadeTemplate::new(LockerType::SceneLoader))
///     .build()?;
///
/// locker.lock(LockerType::SceneLoader, |locker| {
///     // Overlay fully shown; load the scene, then:
///     if let Err(err) = locker.unlock(|_| {}) {
///         log::error!("Failed to unlock screen: {}", err);
///     }
/// })?;
/// assert!(locker.is_locked());
///
/// // Drive transitions from the frame loop.
/// for _ in 0..60 {
///     locker.update(Duration::from_millis(16))?;
/// }
/// assert!(!locker.is_locked());
/// # Ok::<(), LockerError>(())
/// ```
pub struct ScreenLockerManager<K: LockerKey = LockerType> {
    registry: OverlayRegistry<K>,
    surface: RenderSurface,
    initializer: Option<OverlayInitializer<K>>,
    children: Vec<Box<dyn OverlayNode<K>>>,
    watch: Option<Watch>,
    pending: Option<CompleteCallback<K>>,
    inbox: Rc<RefCell<VecDeque<StateChange>>>,
    input_lock: InputLock,
    lock_token: Option<InputLockToken>,
    sender: Sender<LockerRequest<K>>,
    requests: Receiver<LockerRequest<K>>,
}

impl<K: LockerKey> ScreenLockerManager<K> {
    //--- Construction -----------------------------------------------------

    pub(super) fn from_parts(
        registry: OverlayRegistry<K>,
        surface: RenderSurface,
        initializer: Option<OverlayInitializer<K>>,
        input_lock: InputLock,
        (sender, requests): (Sender<LockerRequest<K>>, Receiver<LockerRequest<K>>),
    ) -> Self {
        Self {
            registry,
            surface,
            initializer,
            children: Vec::new(),
            watch: None,
            pending: None,
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            input_lock,
            lock_token: None,
            sender,
            requests,
        }
    }

    //--- Public API -------------------------------------------------------

    /// Shows the overlay registered for `key` and locks input.
    ///
    /// `on_complete` runs once the overlay is fully shown, or immediately
    /// if there is no template for `key` (logged as a warning). Any
    /// request still in flight is superseded and its callback dropped.
    ///
    /// # Errors
    ///
    /// [`LockerError::NotAnOverlay`] if the template produces a node
    /// without the overlay contract; [`LockerError::InputLock`] if the
    /// input lock pairing is broken.
    pub fn lock<F>(&mut self, key: K, on_complete: F) -> Result<(), LockerError>
    where
        F: FnOnce(&mut Self) + 'static,
    {
        self.lock_boxed(key, Box::new(on_complete))
    }

    /// Hides the current overlay and releases input.
    ///
    /// `on_complete` runs once the overlay is gone, or immediately if
    /// nothing is shown. An overlay that is already `Inactive` is left
    /// hosted; only the lock and its callback complete. Any request still
    /// in flight is superseded and its callback dropped.
    ///
    /// # Errors
    ///
    /// [`LockerError::InputLock`] if the input lock pairing is broken.
    pub fn unlock<F>(&mut self, on_complete: F) -> Result<(), LockerError>
    where
        F: FnOnce(&mut Self) + 'static,
    {
        self.unlock_boxed(Box::new(on_complete))
    }

    /// Executes queued handle requests, advances overlay transitions, and
    /// completes requests whose overlay reached its target state.
    pub fn update(&mut self, dt: Duration) -> Result<(), LockerError> {
        self.process_requests()?;

        for node in &mut self.children {
            if let Some(overlay) = node.as_overlay_mut() {
                overlay.update(dt);
            }
        }

        self.pump_notifications()
    }

    /// Returns a handle for submitting requests from elsewhere.
    pub fn handle(&self) -> LockerHandle<K> {
        LockerHandle::new(self.sender.clone())
    }

    /// Hosts an arbitrary node under the manager.
    ///
    /// The next lock or unlock request removes it unless it is the one
    /// overlay an unlock request keeps.
    pub fn attach_node(&mut self, node: Box<dyn OverlayNode<K>>) {
        debug!("Attached node '{}'", node.name());
        self.children.push(node);
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while the manager holds the input lock.
    pub fn is_locked(&self) -> bool {
        self.lock_token.is_some()
    }

    /// Returns `true` while a lock or unlock request awaits its overlay.
    pub fn is_transition_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// First hosted overlay, if any.
    pub fn current_overlay(&self) -> Option<&dyn Overlay<K>> {
        self.children.iter().find_map(|node| node.as_overlay())
    }

    pub fn current_locker_type(&self) -> Option<K> {
        self.current_overlay().map(|overlay| overlay.locker_type())
    }

    pub fn input_lock(&self) -> &InputLock {
        &self.input_lock
    }

    pub fn registry(&self) -> &OverlayRegistry<K> {
        &self.registry
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    //--- Lock -------------------------------------------------------------

    fn lock_boxed(&mut self, key: K, on_complete: CompleteCallback<K>) -> Result<(), LockerError> {
        self.release_handlers(false);
        self.destroy_children();

        let Some(template) = self.registry.get(key) else {
            warn!("There is no overlay template for the {:?} lock type", key);
            self.set_locked(false)?;
            on_complete(self);
            return Ok(());
        };

        let mut node = template.instantiate();
        let forwarder = self.forwarder();

        let Some(overlay) = node.as_overlay_mut() else {
            return Err(LockerError::NotAnOverlay {
                key: format!("{:?}", key),
                node: node.name().to_owned(),
            });
        };

        overlay.init(&self.surface);
        if let Some(initializer) = &self.initializer {
            initializer(&mut *overlay, &self.surface);
        }

        if overlay.locker_type() != key {
            warn!(
                "Overlay registered for {:?} reports lock type {:?}",
                key,
                overlay.locker_type()
            );
        }

        let already_active = overlay.is_active();
        let target = overlay.activatable_id();
        let subscription = (!already_active).then(|| overlay.subscribe(forwarder));

        // Input is taken before the overlay is hosted; a failed acquire
        // drops the node together with its subscription.
        let already_locked = self.is_locked();
        self.set_locked(true)?;

        if already_active {
            warn!(
                "Overlay for the {:?} lock type is already active after creation",
                key
            );
            self.children.push(node);
            on_complete(self);
            return Ok(());
        }

        debug!("Locking with overlay '{}' ({:?})", node.name(), key);
        self.children.push(node);
        self.watch = subscription.map(|subscription| Watch {
            target,
            subscription,
            kind: WatchKind::Activation,
        });
        self.pending = Some(on_complete);

        if let Some(overlay) = self.find_overlay_mut(target) {
            overlay.activate(already_locked);
        }

        self.pump_notifications()
    }

    //--- Unlock -----------------------------------------------------------

    fn unlock_boxed(&mut self, on_complete: CompleteCallback<K>) -> Result<(), LockerError> {
        self.release_handlers(false);

        let current = self.retain_single_overlay();
        let target = match current {
            Some((target, state)) if state != ActivatableState::Inactive => target,
            _ => {
                self.set_locked(false)?;
                on_complete(self);
                return Ok(());
            }
        };

        let forwarder = self.forwarder();
        let subscription = match self.find_overlay_mut(target) {
            Some(overlay) => overlay.subscribe(forwarder),
            None => {
                self.set_locked(false)?;
                on_complete(self);
                return Ok(());
            }
        };

        debug_assert!(self.watch.is_none(), "unlock found a watch still wired");
        self.watch = Some(Watch {
            target,
            subscription,
            kind: WatchKind::Deactivation,
        });
        self.pending = Some(on_complete);

        if let Some(overlay) = self.find_overlay_mut(target) {
            overlay.deactivate(false);
        }

        self.pump_notifications()
    }

    //--- Notification Handling --------------------------------------------

    /// Observer that records state changes for the manager to handle.
    fn forwarder(&self) -> StateObserver {
        let inbox = Rc::clone(&self.inbox);
        Box::new(move |change: &StateChange| inbox.borrow_mut().push_back(*change))
    }

    fn pump_notifications(&mut self) -> Result<(), LockerError> {
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(change) = next else {
                return Ok(());
            };
            self.on_state_change(change)?;
        }
    }

    fn on_state_change(&mut self, change: StateChange) -> Result<(), LockerError> {
        let Some(watch) = self.watch else {
            return Ok(());
        };
        if watch.target != change.source {
            return Ok(());
        }

        match (watch.kind, change.state) {
            (WatchKind::Activation, ActivatableState::Active) => {
                debug!("Overlay reached active state, input locked");
                self.release_handlers(true);
            }
            (WatchKind::Deactivation, ActivatableState::Inactive) => {
                debug!("Overlay reached inactive state, input unlocked");
                self.destroy_overlay(watch.target);
                if let Err(err) = self.set_locked(false) {
                    self.release_handlers(false);
                    return Err(err);
                }
                self.release_handlers(true);
            }
            _ => {}
        }

        Ok(())
    }

    //--- release_handlers() -----------------------------------------------
    //
    // Unwires the current watch and clears the pending callback. The
    // callback is taken out before it runs so a request issued from
    // inside it starts from a clean slate.
    //
    fn release_handlers(&mut self, invoke_callback: bool) {
        if let Some(watch) = self.watch.take() {
            if let Some(overlay) = self.find_overlay_mut(watch.target) {
                overlay.unsubscribe(watch.subscription);
            }
        }

        let callback = self.pending.take();
        if invoke_callback {
            if let Some(callback) = callback {
                callback(self);
            }
        } else if callback.is_some() {
            debug!("Pending screen locker request superseded");
        }
    }

    //--- Input Lock -------------------------------------------------------

    fn set_locked(&mut self, locked: bool) -> Result<(), LockerError> {
        if locked == self.is_locked() {
            return Ok(());
        }

        if locked {
            let token = self.input_lock.acquire().map_err(|err| {
                error!("Failed to lock input: {}", err);
                err
            })?;
            self.lock_token = Some(token);
        } else if let Some(token) = self.lock_token.take() {
            self.input_lock.release(token).map_err(|err| {
                error!("Failed to unlock input: {}", err);
                err
            })?;
        }

        Ok(())
    }

    //--- Child Management -------------------------------------------------

    fn find_overlay_mut(&mut self, target: ActivatableId) -> Option<&mut dyn Overlay<K>> {
        self.children
            .iter_mut()
            .filter_map(|node| node.as_overlay_mut())
            .find(|overlay| overlay.activatable_id() == target)
    }

    fn destroy_children(&mut self) {
        for node in self.children.drain(..) {
            debug!("Destroying node '{}'", node.name());
        }
    }

    fn destroy_overlay(&mut self, target: ActivatableId) {
        self.children.retain(|node| {
            let is_target = node
                .as_overlay()
                .is_some_and(|overlay| overlay.activatable_id() == target);
            if is_target {
                debug!("Destroying overlay '{}'", node.name());
            }
            !is_target
        });
    }

    /// Keeps the first overlay child and destroys everything else.
    ///
    /// Returns the kept overlay's id and state.
    fn retain_single_overlay(&mut self) -> Option<(ActivatableId, ActivatableState)> {
        let mut kept: Option<Box<dyn OverlayNode<K>>> = None;

        for node in std::mem::take(&mut self.children) {
            let is_overlay = node.as_overlay().is_some();
            if !is_overlay {
                debug!("Destroying stray node '{}'", node.name());
            } else if kept.is_some() {
                warn!("Destroying extra overlay '{}'", node.name());
            } else {
                kept = Some(node);
            }
        }

        let node = kept?;
        let current = node
            .as_overlay()
            .map(|overlay| (overlay.activatable_id(), overlay.activatable_state()));
        self.children.push(node);
        current
    }

    //--- Request Processing -----------------------------------------------

    fn process_requests(&mut self) -> Result<(), LockerError> {
        let mut drained = 0;

        while drained < MAX_REQUESTS_PER_FRAME {
            let Ok(request) = self.requests.try_recv() else {
                break;
            };
            drained += 1;

            match request {
                LockerRequest::Lock { key, on_complete } => {
                    self.lock_boxed(key, on_complete)?;
                }
                LockerRequest::Unlock { on_complete } => {
                    self.unlock_boxed(on_complete)?;
                }
            }
        }

        if drained >= MAX_REQUESTS_PER_FRAME && !self.requests.is_empty() {
            warn!("Screen locker request backlog: executed {} requests this frame", drained);
        }

        Ok(())
    }
}

//--- Trait Implementations -----------------------------------------------

impl<K: LockerKey> fmt::Debug for ScreenLockerManager<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenLockerManager")
            .field("registry", &self.registry)
            .field("children", &self.children.len())
            .field("current", &self.current_locker_type())
            .field("locked", &self.is_locked())
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl<K: LockerKey> Drop for ScreenLockerManager<K> {
    fn drop(&mut self) {
        self.release_handlers(false);

        if let Some(token) = self.lock_token.take() {
            warn!("Screen locker dropped while locked, releasing input");
            if let Err(err) = self.input_lock.release(token) {
                error!("Failed to unlock input on teardown: {}", err);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
