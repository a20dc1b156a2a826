//=========================================================================
// Fade Overlay
//=========================================================================
//
// Bundled overlay that fades a full-screen cover in and out.
//
// Opacity runs from 0.0 (Inactive) to 1.0 (Active) and is advanced by
// `update(dt)` while a transition runs. Immediate requests and
// zero-length fades jump straight to the target state.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{LockerKey, Overlay, OverlayNode, OverlayTemplate, RenderSurface, SurfaceConfig};
use crate::core::activatable::{
    Activatable, ActivatableCore, ActivatableId, ActivatableState, StateObserver, SubscriptionId,
};

const DEFAULT_FADE: Duration = Duration::from_millis(250);

//=== FadeTemplate ========================================================

/// Template producing [`FadeOverlay`] instances.
///
/// # Example
///
/// ```rust
/// # use std::time::Duration;
/// # use screen_locker::prelude::*;
/// let template = FadeTemplate::new(LockerType::SceneLoader)
///     .with_fade_in(Duration::from_millis(400))
///     .with_fade_out(Duration::from_millis(200));
/// assert_eq!(template.locker_type(), LockerType::SceneLoader);
/// ```
#[derive(Debug, Clone)]
pub struct FadeTemplate<K: LockerKey> {
    locker_type: K,
    name: String,
    fade_in: Duration,
    fade_out: Duration,
    start_active: bool,
}

impl<K: LockerKey> FadeTemplate<K> {
    /// Creates a template with 250 ms fades.
    pub fn new(locker_type: K) -> Self {
        Self {
            locker_type,
            name: format!("{:?}", locker_type),
            fade_in: DEFAULT_FADE,
            fade_out: DEFAULT_FADE,
            start_active: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_fade_in(mut self, fade_in: Duration) -> Self {
        self.fade_in = fade_in;
        self
    }

    pub fn with_fade_out(mut self, fade_out: Duration) -> Self {
        self.fade_out = fade_out;
        self
    }

    /// Instances start fully shown, in the `Active` state.
    pub fn start_active(mut self) -> Self {
        self.start_active = true;
        self
    }
}

impl<K: LockerKey> OverlayTemplate<K> for FadeTemplate<K> {
    fn locker_type(&self) -> K {
        self.locker_type
    }

    fn instantiate(&self) -> Box<dyn OverlayNode<K>> {
        let mut overlay = FadeOverlay::new(self.locker_type)
            .with_name(self.name.clone())
            .with_fades(self.fade_in, self.fade_out);

        if self.start_active {
            overlay = overlay.shown();
        }

        Box::new(overlay)
    }
}

//=== FadeOverlay =========================================================

/// Full-screen cover with timed fade transitions.
#[derive(Debug)]
pub struct FadeOverlay<K: LockerKey> {
    core: ActivatableCore,
    locker_type: K,
    name: String,
    fade_in: Duration,
    fade_out: Duration,
    opacity: f32,
    surface: Option<SurfaceConfig>,
}

impl<K: LockerKey> FadeOverlay<K> {
    //--- Construction -----------------------------------------------------

    pub fn new(locker_type: K) -> Self {
        Self {
            core: ActivatableCore::new(),
            locker_type,
            name: format!("{:?}", locker_type),
            fade_in: DEFAULT_FADE,
            fade_out: DEFAULT_FADE,
            opacity: 0.0,
            surface: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_fades(mut self, fade_in: Duration, fade_out: Duration) -> Self {
        self.fade_in = fade_in;
        self.fade_out = fade_out;
        self
    }

    /// Starts in `Active` at full opacity. No notification is sent.
    pub fn shown(mut self) -> Self {
        self.core = ActivatableCore::with_state(ActivatableState::Active);
        self.opacity = 1.0;
        self
    }

    //--- Queries ----------------------------------------------------------

    /// Current cover opacity in `0.0..=1.0`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Surface metrics received in [`Overlay::init`].
    pub fn surface(&self) -> Option<&SurfaceConfig> {
        self.surface.as_ref()
    }

    //--- Internal Helpers -------------------------------------------------

    fn finish_activation(&mut self) {
        self.opacity = 1.0;
        self.core.set_state(ActivatableState::Active);
    }

    fn finish_deactivation(&mut self) {
        self.opacity = 0.0;
        self.core.set_state(ActivatableState::Inactive);
    }
}

/// Fraction of a fade of length `total` covered by `dt`.
fn fade_step(dt: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    dt.as_secs_f32() / total.as_secs_f32()
}

//--- Activatable ---------------------------------------------------------

impl<K: LockerKey> Activatable for FadeOverlay<K> {
    fn activate(&mut self, immediate: bool) {
        match self.core.state() {
            ActivatableState::Active => {}
            ActivatableState::Activating if !immediate => {}
            _ if immediate || self.fade_in.is_zero() => self.finish_activation(),
            _ => {
                self.core.set_state(ActivatableState::Activating);
            }
        }
    }

    fn deactivate(&mut self, immediate: bool) {
        match self.core.state() {
            ActivatableState::Inactive => {}
            ActivatableState::Deactivating if !immediate => {}
            _ if immediate || self.fade_out.is_zero() => self.finish_deactivation(),
            _ => {
                self.core.set_state(ActivatableState::Deactivating);
            }
        }
    }

    fn activatable_state(&self) -> ActivatableState {
        self.core.state()
    }

    fn activatable_id(&self) -> ActivatableId {
        self.core.id()
    }

    fn subscribe(&self, observer: StateObserver) -> SubscriptionId {
        self.core.subscribe(observer)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.core.unsubscribe(id)
    }
}

//--- Overlay -------------------------------------------------------------

impl<K: LockerKey> Overlay<K> for FadeOverlay<K> {
    fn locker_type(&self) -> K {
        self.locker_type
    }

    fn init(&mut self, surface: &RenderSurface) {
        debug!(
            "Overlay '{}' attached to {}x{} surface (sort order {})",
            self.name,
            surface.config().width,
            surface.config().height,
            surface.sort_order()
        );
        self.surface = Some(*surface.config());
    }

    fn update(&mut self, dt: Duration) {
        match self.core.state() {
            ActivatableState::Activating => {
                self.opacity += fade_step(dt, self.fade_in);
                if self.opacity >= 1.0 {
                    self.finish_activation();
                }
            }
            ActivatableState::Deactivating => {
                self.opacity -= fade_step(dt, self.fade_out);
                if self.opacity <= 0.0 {
                    self.finish_deactivation();
                }
            }
            ActivatableState::Active | ActivatableState::Inactive => {}
        }
    }
}

impl<K: LockerKey> OverlayNode<K> for FadeOverlay<K> {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_overlay(&self) -> Option<&dyn Overlay<K>> {
        Some(self)
    }

    fn as_overlay_mut(&mut self) -> Option<&mut dyn Overlay<K>> {
        Some(self)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::activatable::StateChange;
    use crate::core::overlay::LockerType;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TICK: Duration = Duration::from_millis(100);

    fn overlay() -> FadeOverlay<LockerType> {
        FadeOverlay::new(LockerType::BusyWait)
            .with_fades(Duration::from_millis(300), Duration::from_millis(200))
    }

    fn record(overlay: &FadeOverlay<LockerType>) -> Rc<RefCell<Vec<ActivatableState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        overlay.subscribe(Box::new(move |change: &StateChange| {
            sink.borrow_mut().push(change.state);
        }));
        seen
    }

    //--- Activation -------------------------------------------------------

    #[test]
    fn fade_in_reaches_active_after_duration() {
        let mut overlay = overlay();
        let seen = record(&overlay);

        overlay.activate(false);
        assert_eq!(overlay.activatable_state(), ActivatableState::Activating);

        overlay.update(TICK);
        overlay.update(TICK);
        assert_eq!(overlay.activatable_state(), ActivatableState::Activating);

        overlay.update(TICK * 2);
        assert!(overlay.is_active());
        assert_eq!(overlay.opacity(), 1.0);
        assert_eq!(
            *seen.borrow(),
            vec![ActivatableState::Activating, ActivatableState::Active]
        );
    }

    #[test]
    fn immediate_activation_skips_transition() {
        let mut overlay = overlay();
        let seen = record(&overlay);

        overlay.activate(true);

        assert!(overlay.is_active());
        assert_eq!(*seen.borrow(), vec![ActivatableState::Active]);
    }

    #[test]
    fn zero_fade_completes_synchronously() {
        let mut overlay = FadeOverlay::new(LockerType::GameLoader)
            .with_fades(Duration::ZERO, Duration::ZERO);

        overlay.activate(false);
        assert!(overlay.is_active());

        overlay.deactivate(false);
        assert!(overlay.is_inactive());
    }

    #[test]
    fn repeated_activate_is_a_no_op() {
        let mut overlay = overlay();
        let seen = record(&overlay);

        overlay.activate(false);
        overlay.activate(false);
        assert_eq!(*seen.borrow(), vec![ActivatableState::Activating]);

        overlay.activate(true);
        overlay.activate(true);
        assert_eq!(
            *seen.borrow(),
            vec![ActivatableState::Activating, ActivatableState::Active]
        );
    }

    //--- Deactivation -----------------------------------------------------

    #[test]
    fn fade_out_reaches_inactive() {
        let mut overlay = overlay().shown();
        let seen = record(&overlay);

        overlay.deactivate(false);
        overlay.update(TICK);
        assert_eq!(overlay.activatable_state(), ActivatableState::Deactivating);

        overlay.update(TICK * 2);
        assert!(overlay.is_inactive());
        assert_eq!(overlay.opacity(), 0.0);
        assert_eq!(
            *seen.borrow(),
            vec![ActivatableState::Deactivating, ActivatableState::Inactive]
        );
    }

    #[test]
    fn reversing_mid_fade_keeps_progress() {
        let mut overlay = overlay();

        overlay.activate(false);
        overlay.update(TICK);
        let partial = overlay.opacity();
        assert!(partial > 0.0 && partial < 1.0);

        overlay.deactivate(false);
        assert_eq!(overlay.activatable_state(), ActivatableState::Deactivating);
        assert_eq!(overlay.opacity(), partial);

        overlay.update(TICK);
        assert!(overlay.is_inactive());
    }

    //--- Templates --------------------------------------------------------

    #[test]
    fn template_instantiates_overlay_nodes() {
        let template = FadeTemplate::new(LockerType::SceneLoader).with_name("scene fade");
        let mut node = template.instantiate();

        assert_eq!(node.name(), "scene fade");
        let overlay = node.as_overlay_mut().expect("fade overlay exposes contract");
        assert_eq!(overlay.locker_type(), LockerType::SceneLoader);
        assert!(overlay.is_inactive());
    }

    #[test]
    fn start_active_template_produces_shown_overlay() {
        let node = FadeTemplate::new(LockerType::BusyWait).start_active().instantiate();
        let overlay = node.as_overlay().expect("fade overlay exposes contract");
        assert!(overlay.is_active());
    }

    #[test]
    fn init_stores_surface_metrics() {
        let mut overlay = overlay();
        let surface = RenderSurface::new(SurfaceConfig::default()).unwrap();

        overlay.init(&surface);
        assert_eq!(overlay.surface(), Some(&SurfaceConfig::default()));
    }
}
