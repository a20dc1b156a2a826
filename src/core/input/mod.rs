//=========================================================================
// Input
//
// Input representation and the process-wide input lock that keeps
// pointer/touch input away from the application while a screen locker
// overlay is shown.
//
// Responsibilities:
// - Describe platform input in an engine-friendly form (`event`)
// - Own the single-holder suppression switch (`InputLock`)
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod input_lock;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, MouseButton, TouchPhase};
pub use input_lock::{InputLock, InputLockError, InputLockToken};
