//=========================================================================
// Screen Locker Builder
//=========================================================================
//
// Fluent configuration for a ScreenLockerManager.
//
// ```text
//     ScreenLockerBuilder ──build()──> ScreenLockerManager
//         │
//         ├─ with_surface()
//         ├─ with_template() / with_templates()
//         ├─ with_input_lock()
//         ├─ with_request_capacity()
//         └─ with_overlay_initializer()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::info;

//=== Internal Dependencies ===============================================

use super::manager::{OverlayInitializer, ScreenLockerManager};
use crate::core::error::LockerError;
use crate::core::input::InputLock;
use crate::core::overlay::{
    LockerKey, LockerType, Overlay, OverlayRegistry, OverlayTemplate, RenderSurface,
    SurfaceConfig,
};

//=== ScreenLockerBuilder =================================================

/// Builder for configuring and constructing a [`ScreenLockerManager`].
///
/// # Default Values
///
/// - **Surface**: [`SurfaceConfig::default`] (1920 × 1080, scale 1.0)
/// - **Templates**: none (every lock completes without an overlay)
/// - **Input lock**: a fresh, unshared [`InputLock`]
/// - **Request capacity**: 32 queued handle requests
///
/// # Examples
///
/// ```rust
/// # use std::time::Duration;
/// # use screen_locker::prelude::*;
/// let input_lock = InputLock::new();
///
/// let locker = ScreenLockerBuilder::new()
///     .with_surface(SurfaceConfig {
///         width: 1280,
///         height: 720,
///         ..SurfaceConfig::default()
///     })
///     .with_template(FadeTemplate::new(LockerType::GameLoader))
///     .with_template(
///         FadeTemplate::new(LockerType::BusyWait).with_fade_in(Duration::from_millis(100)),
///     )
///     .with_input_lock(input_lock.clone())
///     .build()?;
///
/// assert_eq!(locker.registry().len(), 2);
/// # Ok::<(), LockerError>(())
/// ```
pub struct ScreenLockerBuilder<K: LockerKey = LockerType> {
    surface: SurfaceConfig,
    templates: Vec<Box<dyn OverlayTemplate<K>>>,
    input_lock: Option<InputLock>,
    request_capacity: usize,
    initializer: Option<OverlayInitializer<K>>,
}

impl<K: LockerKey> ScreenLockerBuilder<K> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            templates: Vec::new(),
            input_lock: None,
            request_capacity: 32,
            initializer: None,
        }
    }

    /// Sets the surface overlays are hosted on.
    pub fn with_surface(mut self, surface: SurfaceConfig) -> Self {
        self.surface = surface;
        self
    }

    /// Adds an overlay template, keyed by its own locker type.
    pub fn with_template<T>(mut self, template: T) -> Self
    where
        T: OverlayTemplate<K> + 'static,
    {
        self.templates.push(Box::new(template));
        self
    }

    /// Adds a list of boxed templates.
    pub fn with_templates<I>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn OverlayTemplate<K>>>,
    {
        self.templates.extend(templates);
        self
    }

    /// Uses an existing input lock, e.g. one already handed to the
    /// windowing layer.
    pub fn with_input_lock(mut self, input_lock: InputLock) -> Self {
        self.input_lock = Some(input_lock);
        self
    }

    /// Sets how many [`LockerHandle`](super::LockerHandle) requests may
    /// wait for the next update.
    ///
    /// Default: 32. Clamped to at least 1.
    pub fn with_request_capacity(mut self, capacity: usize) -> Self {
        self.request_capacity = capacity.max(1);
        self
    }

    /// Runs `initializer` on every overlay right after [`Overlay::init`].
    pub fn with_overlay_initializer<F>(mut self, initializer: F) -> Self
    where
        F: Fn(&mut dyn Overlay<K>, &RenderSurface) + 'static,
    {
        self.initializer = Some(Box::new(initializer));
        self
    }

    /// Validates the configuration and builds the manager.
    ///
    /// # Errors
    ///
    /// [`LockerError::InvalidSurface`] for an unusable surface,
    /// [`LockerError::DuplicateTemplate`] if two templates share a key.
    pub fn build(self) -> Result<ScreenLockerManager<K>, LockerError> {
        let surface = RenderSurface::new(self.surface)?;
        let registry = OverlayRegistry::from_templates(self.templates)?;
        let input_lock = self.input_lock.unwrap_or_default();

        info!(
            "Screen locker ready: {} overlay template(s), {}x{} surface",
            registry.len(),
            surface.config().width,
            surface.config().height
        );

        Ok(ScreenLockerManager::from_parts(
            registry,
            surface,
            self.initializer,
            input_lock,
            bounded(self.request_capacity),
        ))
    }
}

impl<K: LockerKey> Default for ScreenLockerBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
