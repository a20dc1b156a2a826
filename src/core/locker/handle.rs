//=========================================================================
// Locker Handle
//=========================================================================
//
// Cloneable request sender for call sites that do not own the manager.
//
// Architecture:
//   LockerHandle ──try_send──> bounded channel ──> ScreenLockerManager::update()
//
// Requests are executed in send order on the manager's thread, at the
// start of its next update.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Sender, TrySendError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::ScreenLockerManager;
use crate::core::error::LockerError;
use crate::core::overlay::{LockerKey, LockerType};

//=== Types ===============================================================

/// Completion callback that can cross threads.
pub type RemoteCallback<K> = Box<dyn FnOnce(&mut ScreenLockerManager<K>) + Send>;

/// Request queued through a [`LockerHandle`].
pub enum LockerRequest<K: LockerKey> {
    Lock {
        key: K,
        on_complete: RemoteCallback<K>,
    },
    Unlock {
        on_complete: RemoteCallback<K>,
    },
}

//=== LockerHandle ========================================================

/// Sends lock/unlock requests to a [`ScreenLockerManager`].
///
/// Obtained from [`ScreenLockerManager::handle`]. Stops working once the
/// manager is dropped.
pub struct LockerHandle<K: LockerKey = LockerType> {
    sender: Sender<LockerRequest<K>>,
}

impl<K: LockerKey> LockerHandle<K> {
    pub(super) fn new(sender: Sender<LockerRequest<K>>) -> Self {
        Self { sender }
    }

    //--- Requests ---------------------------------------------------------

    /// Queues a lock request.
    ///
    /// # Errors
    ///
    /// [`LockerError::Disconnected`] if the manager is gone, or
    /// [`LockerError::RequestQueueFull`] if it has fallen behind.
    pub fn lock<F>(&self, key: K, on_complete: F) -> Result<(), LockerError>
    where
        F: FnOnce(&mut ScreenLockerManager<K>) + Send + 'static,
    {
        self.send(LockerRequest::Lock {
            key,
            on_complete: Box::new(on_complete),
        })
    }

    /// Queues an unlock request.
    pub fn unlock<F>(&self, on_complete: F) -> Result<(), LockerError>
    where
        F: FnOnce(&mut ScreenLockerManager<K>) + Send + 'static,
    {
        self.send(LockerRequest::Unlock {
            on_complete: Box::new(on_complete),
        })
    }

    /// Queues a lock request nobody waits on.
    pub fn lock_detached(&self, key: K) -> Result<(), LockerError> {
        self.lock(key, |_| {})
    }

    /// Queues an unlock request nobody waits on.
    pub fn unlock_detached(&self) -> Result<(), LockerError> {
        self.unlock(|_| {})
    }

    //--- Internal Helpers -------------------------------------------------

    fn send(&self, request: LockerRequest<K>) -> Result<(), LockerError> {
        match self.sender.try_send(request) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                warn!("Screen locker request queue is full, request dropped");
                Err(LockerError::RequestQueueFull)
            }
            Err(TrySendError::Disconnected(_)) => Err(LockerError::Disconnected),
        }
    }
}

impl<K: LockerKey> Clone for LockerHandle<K> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn requests_arrive_in_send_order() {
        let (tx, rx) = bounded(4);
        let handle = LockerHandle::new(tx);

        handle.lock_detached(LockerType::BusyWait).unwrap();
        handle.unlock_detached().unwrap();

        assert!(matches!(
            rx.try_recv(),
            Ok(LockerRequest::Lock { key: LockerType::BusyWait, .. })
        ));
        assert!(matches!(rx.try_recv(), Ok(LockerRequest::Unlock { .. })));
    }

    #[test]
    fn full_queue_is_reported() {
        let (tx, _rx) = bounded(1);
        let handle = LockerHandle::<LockerType>::new(tx);

        handle.unlock_detached().unwrap();
        assert!(matches!(
            handle.unlock_detached(),
            Err(LockerError::RequestQueueFull)
        ));
    }

    #[test]
    fn dropped_receiver_disconnects() {
        let (tx, rx) = bounded(1);
        let handle = LockerHandle::<LockerType>::new(tx);
        drop(rx);

        assert!(matches!(
            handle.lock_detached(LockerType::GameLoader),
            Err(LockerError::Disconnected)
        ));
    }

    #[test]
    fn handle_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<LockerHandle<LockerType>>();
    }
}
