//=========================================================================
// Input Lock
//
// Process-wide pointer/touch suppression with single-holder tokens.
//
// Responsibilities:
// - Hand out exactly one token at a time
// - Accept back only the outstanding token
// - Answer "is input suppressed?" from any thread
//
// Notes:
// The lock is a cheap cloneable handle around shared atomics. The screen
// locker manager is its only writer; the windowing layer reads it to
// drop pointer input while an overlay is up.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

//=== External Crates =====================================================

use log::debug;
use thiserror::Error;

//=== Internal Modules ====================================================

use super::event::InputEvent;

//=== InputLockError ======================================================

/// Misuse of the acquire/release pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputLockError {
    /// `acquire` called while a token is outstanding.
    #[error("input lock is already held by token {0}")]
    AlreadyHeld(u64),

    /// `release` called while no token is outstanding.
    #[error("input lock is not held")]
    NotHeld,

    /// `release` called with a token other than the outstanding one.
    #[error("input lock token mismatch: held {held}, released {released}")]
    TokenMismatch { held: u64, released: u64 },
}

//=== InputLockToken ======================================================

/// Proof of holding the input lock.
///
/// Not `Clone`: the only way to end the lock is to hand this back to
/// [`InputLock::release`].
#[must_use = "dropping the token leaves input suppressed"]
#[derive(PartialEq, Eq)]
pub struct InputLockToken(u64);

impl InputLockToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for InputLockToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InputLockToken({})", self.0)
    }
}

//=== InputLock ===========================================================

struct Shared {
    /// Outstanding token id, 0 when unlocked.
    holder: AtomicU64,
    next_token: AtomicU64,
}

/// Shared input suppression switch.
///
/// Locked ⇔ exactly one [`InputLockToken`] is outstanding.
#[derive(Clone)]
pub struct InputLock {
    shared: Arc<Shared>,
}

impl InputLock {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                holder: AtomicU64::new(0),
                next_token: AtomicU64::new(1),
            }),
        }
    }

    //--- acquire() --------------------------------------------------------
    //
    // Fails instead of nesting: a second acquire is a logic error in the
    // caller, not a request to count deeper.
    //
    pub fn acquire(&self) -> Result<InputLockToken, InputLockError> {
        let id = self.shared.next_token.fetch_add(1, Ordering::Relaxed);

        self.shared
            .holder
            .compare_exchange(0, id, Ordering::AcqRel, Ordering::Acquire)
            .map_err(InputLockError::AlreadyHeld)?;

        debug!("Input lock acquired (token {})", id);
        Ok(InputLockToken(id))
    }

    //--- release() --------------------------------------------------------

    /// Ends the lock held by `token`.
    ///
    /// On error the token is consumed and the lock state is left as it was.
    pub fn release(&self, token: InputLockToken) -> Result<(), InputLockError> {
        let released = token.id();

        match self
            .shared
            .holder
            .compare_exchange(released, 0, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                debug!("Input lock released (token {})", released);
                Ok(())
            }
            Err(0) => Err(InputLockError::NotHeld),
            Err(held) => Err(InputLockError::TokenMismatch { held, released }),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while a token is outstanding.
    pub fn is_locked(&self) -> bool {
        self.shared.holder.load(Ordering::Acquire) != 0
    }

    /// Returns `false` for pointer/touch events while locked.
    pub fn admits(&self, event: &InputEvent) -> bool {
        !(event.is_pointer() && self.is_locked())
    }

    /// Removes every event [`admits`](Self::admits) rejects.
    pub fn filter(&self, events: &mut Vec<InputEvent>) {
        if self.is_locked() {
            events.retain(|event| !event.is_pointer());
        }
    }
}

impl Default for InputLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputLock")
            .field("holder", &self.shared.holder.load(Ordering::Acquire))
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::{KeyCode, MouseButton};

    //--- Pairing ----------------------------------------------------------

    #[test]
    fn acquire_then_release() {
        let lock = InputLock::new();
        assert!(!lock.is_locked());

        let token = lock.acquire().unwrap();
        assert!(lock.is_locked());

        lock.release(token).unwrap();
        assert!(!lock.is_locked());
    }

    #[test]
    fn second_acquire_fails() {
        let lock = InputLock::new();
        let token = lock.acquire().unwrap();

        assert_eq!(lock.acquire(), Err(InputLockError::AlreadyHeld(token.id())));
        assert!(lock.is_locked());
    }

    #[test]
    fn stale_token_is_rejected() {
        let lock = InputLock::new();
        let first = lock.acquire().unwrap();
        let stale = InputLockToken(first.0);
        lock.release(first).unwrap();

        assert_eq!(lock.release(stale), Err(InputLockError::NotHeld));
    }

    #[test]
    fn foreign_token_is_rejected() {
        let lock = InputLock::new();
        let other = InputLock::new();
        let burned = other.acquire().unwrap();
        other.release(burned).unwrap();

        let held = lock.acquire().unwrap();
        let foreign = other.acquire().unwrap();
        assert_eq!(held.id(), 1);
        assert_eq!(foreign.id(), 2);

        assert_eq!(
            lock.release(foreign),
            Err(InputLockError::TokenMismatch { held: 1, released: 2 })
        );
        assert!(lock.is_locked());
    }

    #[test]
    fn clones_share_state() {
        let lock = InputLock::new();
        let observer = lock.clone();

        let token = lock.acquire().unwrap();
        assert!(observer.is_locked());

        observer.release(token).unwrap();
        assert!(!lock.is_locked());
    }

    //--- Filtering --------------------------------------------------------

    #[test]
    fn pointer_events_dropped_only_while_locked() {
        let lock = InputLock::new();
        let click = InputEvent::MouseButtonDown { button: MouseButton::Left };
        let key = InputEvent::KeyDown { key: KeyCode::Escape };

        assert!(lock.admits(&click));

        let token = lock.acquire().unwrap();
        assert!(!lock.admits(&click));
        assert!(lock.admits(&key));

        let mut events = vec![click, key, InputEvent::MouseMoved { x: 4.0, y: 2.0 }];
        lock.filter(&mut events);
        assert_eq!(events, vec![key]);

        lock.release(token).unwrap();
    }
}
