//=========================================================================
// Function Templates
//=========================================================================
//
// Templates backed by a closure, for overlays defined by the
// application, plus a plain node type for non-overlay children.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{LockerKey, OverlayNode, OverlayTemplate};

//=== FnTemplate ==========================================================

/// Template that calls `factory` to create each node.
///
/// # Example
///
/// ```rust
/// # use screen_locker::prelude::*;
/// let template = FnTemplate::new(LockerType::BusyWait, || {
///     Box::new(FadeOverlay::new(LockerType::BusyWait)) as Box<dyn OverlayNode<LockerType>>
/// });
/// assert_eq!(template.locker_type(), LockerType::BusyWait);
/// ```
pub struct FnTemplate<K, F> {
    locker_type: K,
    factory: F,
}

impl<K, F> FnTemplate<K, F>
where
    K: LockerKey,
    F: Fn() -> Box<dyn OverlayNode<K>>,
{
    pub fn new(locker_type: K, factory: F) -> Self {
        Self {
            locker_type,
            factory,
        }
    }
}

impl<K, F> OverlayTemplate<K> for FnTemplate<K, F>
where
    K: LockerKey,
    F: Fn() -> Box<dyn OverlayNode<K>>,
{
    fn locker_type(&self) -> K {
        self.locker_type
    }

    fn instantiate(&self) -> Box<dyn OverlayNode<K>> {
        (self.factory)()
    }
}

//=== StaticNode ==========================================================

/// Child node without the overlay contract (backdrops, decorations).
///
/// The manager never keeps these across a lock or unlock request.
#[derive(Debug, Clone)]
pub struct StaticNode {
    name: String,
}

impl StaticNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl<K: LockerKey> OverlayNode<K> for StaticNode {
    fn name(&self) -> &str {
        &self.name
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::overlay::{FadeOverlay, LockerType};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn factory_runs_per_instantiation() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let template = FnTemplate::new(LockerType::GameLoader, move || {
            counter.set(counter.get() + 1);
            Box::new(FadeOverlay::new(LockerType::GameLoader)) as Box<dyn OverlayNode<LockerType>>
        });

        template.instantiate();
        template.instantiate();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn static_node_is_not_an_overlay() {
        let mut node: Box<dyn OverlayNode<LockerType>> = Box::new(StaticNode::new("backdrop"));
        assert_eq!(node.name(), "backdrop");
        assert!(node.as_overlay().is_none());
        assert!(node.as_overlay_mut().is_none());
    }
}
