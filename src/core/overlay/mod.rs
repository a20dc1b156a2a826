//=========================================================================
// Overlay System
//=========================================================================
//
// Contracts between the screen locker manager and the visual elements it
// shows while input is locked.
//
// Architecture:
//   OverlayRegistry
//     └─ templates: HashMap<K, Box<dyn OverlayTemplate<K>>>
//                         │ instantiate()
//                         ▼
//                  Box<dyn OverlayNode<K>> ──as_overlay_mut()──> dyn Overlay<K>
//
// A node is anything the manager can host as a child. Only nodes that
// expose the `Overlay` contract can be used as lockers.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::activatable::Activatable;

//=== Module Declarations =================================================

mod fade;
mod registry;
mod surface;
mod template;

//=== Public API ==========================================================

pub use fade::{FadeOverlay, FadeTemplate};
pub use registry::OverlayRegistry;
pub use surface::{RenderSurface, SurfaceConfig};
pub use template::{FnTemplate, StaticNode};

//=== Locker Key Trait ====================================================

/// Marker trait for locker type identifiers.
///
/// Keys select an overlay template from the registry. Typically
/// implemented by an application enum; [`LockerType`] covers the
/// common cases.
pub trait LockerKey: Clone + Copy + Eq + Ord + Hash + Debug + 'static {}

//=== LockerType ==========================================================

/// Default set of overlay purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LockerType {
    /// Shown while the game loads at startup.
    GameLoader,

    /// Shown across a scene switch.
    SceneLoader,

    /// Short busy indicator for blocking operations.
    BusyWait,
}

impl LockerKey for LockerType {}

//=== Overlay Trait =======================================================

/// A visual element the screen locker can show.
pub trait Overlay<K: LockerKey>: Activatable {
    /// Registry key this overlay serves.
    fn locker_type(&self) -> K;

    /// Called once after instantiation, before activation.
    ///
    /// Default implementation does nothing.
    fn init(&mut self, _surface: &RenderSurface) {}

    /// Advances any running transition by `dt`.
    ///
    /// Default implementation does nothing, which suits overlays that
    /// only ever change state immediately.
    fn update(&mut self, _dt: Duration) {}
}

//=== OverlayNode Trait ===================================================

/// An object hosted as a child of the screen locker manager.
///
/// Overlays return themselves from the `as_overlay*` accessors; other
/// nodes keep the defaults and are treated as strays.
pub trait OverlayNode<K: LockerKey> {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    fn as_overlay(&self) -> Option<&dyn Overlay<K>> {
        None
    }

    fn as_overlay_mut(&mut self) -> Option<&mut dyn Overlay<K>> {
        None
    }
}

//=== OverlayTemplate Trait ===============================================

/// Factory for overlay nodes, one per locker type.
pub trait OverlayTemplate<K: LockerKey> {
    /// Registry key the template is stored under.
    fn locker_type(&self) -> K;

    /// Creates a fresh node.
    fn instantiate(&self) -> Box<dyn OverlayNode<K>>;
}
