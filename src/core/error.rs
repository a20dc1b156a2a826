//=========================================================================
// Locker Errors
//=========================================================================
//
// Fatal outcomes of screen locker operations.
//
// Recoverable conditions (missing template, overlay already active) are
// logged and completed in place; they never show up here. Apart from
// the handle's queue errors, everything in this enum is a wiring or
// invariant bug the caller should not continue past.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputLockError;

//=== LockerError =========================================================

/// Errors returned by the screen locker.
#[derive(Debug, Error)]
pub enum LockerError {
    /// A template produced a node that does not expose the overlay contract.
    #[error("template for {key} instantiated `{node}`, which is not a valid overlay")]
    NotAnOverlay { key: String, node: String },

    /// Two templates were supplied for the same locker type.
    #[error("more than one overlay template registered for {key}")]
    DuplicateTemplate { key: String },

    /// The render surface configuration cannot host overlays.
    #[error("invalid render surface: {0}")]
    InvalidSurface(String),

    /// The input lock acquire/release pairing was broken.
    #[error("input lock invariant violated: {0}")]
    InputLock(#[from] InputLockError),

    /// The manager behind a [`LockerHandle`](crate::core::locker::LockerHandle)
    /// has been dropped.
    #[error("screen locker manager is no longer running")]
    Disconnected,

    /// The manager's request queue is at capacity.
    #[error("screen locker request queue is full")]
    RequestQueueFull,
}

//=========================================================================
// Unit Tests
//=========================================================================
