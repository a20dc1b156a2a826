//=========================================================================
// Screen Locker
//=========================================================================
//
// Shows one blocking overlay at a time and keeps pointer input locked
// while it is up.
//
// Architecture:
//   ScreenLockerBuilder ──build()──> ScreenLockerManager
//                                      ├─ registry: OverlayRegistry<K>
//                                      ├─ children: Vec<Box<dyn OverlayNode<K>>>
//                                      ├─ watch + pending callback
//                                      ├─ lock_token: Option<InputLockToken>
//                                      └─ requests: Receiver<LockerRequest<K>>
//                                                     ^
//                                     LockerHandle ───┘ (any thread)
//
// Flow:
//   lock(key, cb)  → instantiate → activate → [Active]   → cb
//   unlock(cb)     → deactivate  → [Inactive] → destroy  → cb
//
// A new request always supersedes the one in flight; the superseded
// callback is dropped without being called.
//
//=========================================================================

//=== Module Declarations =================================================

mod builder;
mod handle;
mod manager;

//=== Public API ==========================================================

pub use builder::ScreenLockerBuilder;
pub use handle::{LockerHandle, LockerRequest, RemoteCallback};
pub use manager::{CompleteCallback, OverlayInitializer, ScreenLockerManager};
