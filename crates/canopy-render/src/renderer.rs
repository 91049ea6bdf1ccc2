//! Renderer trait abstraction.

use crate::raster::Raster;
use canopy_core::base::BaseLayer;
use thiserror::Error;
use tiny_skia::Pixmap;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid surface size: {0}x{0}")]
    InvalidSize(u32),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single composited frame.
///
/// Stacking is fixed: silhouette fill, pattern, highlight, then the raster
/// overlay clipped to the canopy.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Silhouette parameters.
    pub base: &'a BaseLayer,
    /// Drawn content to composite over the base, if any.
    pub overlay: Option<&'a Raster>,
    /// Edge length of the square output in physical pixels.
    pub output_size: u32,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(base: &'a BaseLayer, output_size: u32) -> Self {
        Self {
            base,
            overlay: None,
            output_size,
        }
    }

    /// Set the raster overlay.
    pub fn with_overlay(mut self, overlay: &'a Raster) -> Self {
        self.overlay = Some(overlay);
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Composite one frame for the given context.
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderResult<Pixmap>;
}
