//=========================================================================
// Screen Locker — Library Root
//
// Modal "screen locker" overlays for interactive applications: loading
// screens, scene-transition covers and busy indicators that block user
// input while they are shown.
//
// Responsibilities:
// - Expose the manager (`ScreenLockerManager`) and its builder
// - Define the overlay and activation contracts overlays implement
// - Provide the process-wide input lock and its Winit integration
//
// Typical usage:
// ```no_run
// use std::time::Duration;
// use screen_locker::prelude::*;
//
// fn main() -> Result<(), LockerError> {
//     let mut locker = ScreenLockerBuilder::new()
//         .with_template(FadeTemplate::new(LockerType::GameLoader))
//         .build()?;
//
//     locker.lock(LockerType::GameLoader, |locker| {
//         if let Err(err) = locker.unlock(|_| {}) {
//             log::error!("Failed to unlock screen: {}", err);
//         }
//     })?;
//
//     loop {
//         locker.update(Duration::from_millis(16))?;
//     }
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the lock/unlock state machine, overlay contracts and the
// input lock. `platform` maps Winit window events onto the input lock.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::core::{LockerError, ScreenLockerBuilder, ScreenLockerManager};
