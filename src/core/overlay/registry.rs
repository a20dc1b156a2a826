//=========================================================================
// Overlay Registry
//=========================================================================
//
// Immutable `LockerKey → template` map, built once when the manager is
// constructed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{LockerKey, OverlayTemplate};
use crate::core::error::LockerError;

//=== OverlayRegistry =====================================================

/// Lookup table from locker type to overlay template.
///
/// Each template is stored under the key it reports through
/// [`OverlayTemplate::locker_type`].
pub struct OverlayRegistry<K: LockerKey> {
    templates: HashMap<K, Box<dyn OverlayTemplate<K>>>,
}

impl<K: LockerKey> OverlayRegistry<K> {
    //--- Construction -----------------------------------------------------

    /// Creates a registry with no templates. Every lock request against
    /// it completes without showing anything.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Builds the registry from a list of templates.
    ///
    /// # Errors
    ///
    /// [`LockerError::DuplicateTemplate`] if two templates report the
    /// same locker type.
    pub fn from_templates<I>(templates: I) -> Result<Self, LockerError>
    where
        I: IntoIterator<Item = Box<dyn OverlayTemplate<K>>>,
    {
        let mut registry = Self::empty();

        for template in templates {
            let key = template.locker_type();
            if registry.templates.contains_key(&key) {
                return Err(LockerError::DuplicateTemplate {
                    key: format!("{:?}", key),
                });
            }

            debug!("Registered overlay template for {:?}", key);
            registry.templates.insert(key, template);
        }

        Ok(registry)
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, key: K) -> Option<&dyn OverlayTemplate<K>> {
        self.templates.get(&key).map(|template| template.as_ref())
    }

    pub fn contains(&self, key: K) -> bool {
        self.templates.contains_key(&key)
    }

    /// Registered keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        let mut keys: Vec<K> = self.templates.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<K: LockerKey> fmt::Debug for OverlayRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
