//=========================================================================
// Core Systems
//=========================================================================
//
// Everything that runs on the UI/update thread.
//
// Architecture:
//   locker      ScreenLockerManager, builder, request handle
//     ├─ overlay      Overlay contracts, registry, bundled overlays
//     │    └─ activatable  lifecycle state machine + observers
//     └─ input        InputLock, input events
//   error       LockerError
//
//=========================================================================

//=== Module Declarations =================================================

pub mod activatable;
pub mod error;
pub mod input;
pub mod locker;
pub mod overlay;

//=== Public API ==========================================================

pub use activatable::{Activatable, ActivatableState};
pub use error::LockerError;
pub use input::InputLock;
pub use locker::{LockerHandle, ScreenLockerBuilder, ScreenLockerManager};
pub use overlay::{LockerKey, LockerType, Overlay};
