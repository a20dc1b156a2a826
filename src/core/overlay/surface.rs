//=========================================================================
// Render Surface
//=========================================================================
//
// The canvas the manager hosts its overlays on. Rendering itself lives
// outside this crate; overlays only read the surface metrics when they
// are initialized.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::LockerError;

//=== SurfaceConfig =======================================================

/// Render surface parameters.
///
/// # Default Values
///
/// - **Size**: 1920 × 1080 physical pixels
/// - **Scale factor**: 1.0
/// - **Sort order**: 100 (above regular UI)
/// - **Blocks raycasts**: true
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    /// Width in physical pixels.
    pub width: u32,

    /// Height in physical pixels.
    pub height: u32,

    /// Physical pixels per logical pixel.
    pub scale_factor: f64,

    /// Draw order relative to other surfaces; higher draws on top.
    pub sort_order: i32,

    /// Whether the surface swallows pointer hit-tests meant for content
    /// underneath.
    pub blocks_raycasts: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            scale_factor: 1.0,
            sort_order: 100,
            blocks_raycasts: true,
        }
    }
}

//=== RenderSurface =======================================================

/// Validated surface handed to overlays on initialization.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    config: SurfaceConfig,
}

impl RenderSurface {
    /// Validates `config`.
    ///
    /// # Errors
    ///
    /// [`LockerError::InvalidSurface`] for a zero dimension or a scale
    /// factor that is not positive and finite.
    pub fn new(config: SurfaceConfig) -> Result<Self, LockerError> {
        if config.width == 0 || config.height == 0 {
            return Err(LockerError::InvalidSurface(format!(
                "size must be non-zero, got {}x{}",
                config.width, config.height
            )));
        }

        if !config.scale_factor.is_finite() || config.scale_factor <= 0.0 {
            return Err(LockerError::InvalidSurface(format!(
                "scale factor must be positive, got {}",
                config.scale_factor
            )));
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Size in logical pixels.
    pub fn logical_size(&self) -> (f64, f64) {
        (
            f64::from(self.config.width) / self.config.scale_factor,
            f64::from(self.config.height) / self.config.scale_factor,
        )
    }

    pub fn sort_order(&self) -> i32 {
        self.config.sort_order
    }

    pub fn blocks_raycasts(&self) -> bool {
        self.config.blocks_raycasts
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
