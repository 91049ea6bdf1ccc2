//! Canopy Render Library
//!
//! The raster side of the umbrella designer: the backing raster and stroke
//! rasterization, the PNG snapshot codec, the base layer renderer and the
//! compositor that clips drawn content to the canopy.
//! The default implementation uses tiny-skia for CPU rendering.

mod base_layer;
pub mod codec;
pub mod controller;
mod convert;
pub mod raster;
mod renderer;
mod skia_impl;
pub mod surface;

pub use base_layer::BaseLayerRenderer;
pub use codec::{CodecError, CodecResult};
pub use controller::DesignController;
pub use raster::Raster;
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use skia_impl::SkiaRenderer;
pub use surface::{DrawingSurface, SurfaceId};

use canopy_core::base::BaseLayer;
use canopy_core::geometry::EDITOR_DISPLAY_SIZE;
use canopy_core::snapshot::Snapshot;
use canopy_core::tools::ToolSettings;
use canopy_core::view::ViewMode;
use tiny_skia::Pixmap;

/// Default edge length of the shareable poster in pixels.
pub const POSTER_SIZE: u32 = 920;

/// Output edge length of the editor surface at the current zoom.
pub fn editor_output_size(tools: &ToolSettings) -> u32 {
    tools.display_edge(EDITOR_DISPLAY_SIZE).round().max(1.0) as u32
}

/// Render a surface showing `snapshot` over `base`.
///
/// Interactive surfaces render at the zoomed editor size, replay surfaces at
/// poster size. An undecodable snapshot renders as an empty overlay.
pub fn render(
    base: &BaseLayer,
    mode: ViewMode,
    tools: &ToolSettings,
    snapshot: Option<&Snapshot>,
) -> RenderResult<Pixmap> {
    let size = match mode {
        ViewMode::Interactive => editor_output_size(tools),
        ViewMode::Replay => POSTER_SIZE,
    };
    let mut surface = DrawingSurface::new(mode)?;
    surface.mount(snapshot);
    surface.render(&mut SkiaRenderer::new(), base, size)
}
