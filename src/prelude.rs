//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use screen_locker::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Manager
pub use crate::core::locker::{LockerHandle, ScreenLockerBuilder, ScreenLockerManager};

// Activation lifecycle
pub use crate::core::activatable::{Activatable, ActivatableCore, ActivatableState, StateChange};

// Overlays
pub use crate::core::overlay::{
    FadeOverlay, FadeTemplate, FnTemplate, LockerKey, LockerType, Overlay, OverlayNode,
    OverlayTemplate, RenderSurface, StaticNode, SurfaceConfig,
};

// Input
pub use crate::core::input::{InputEvent, InputLock};

// Errors
pub use crate::core::error::LockerError;
