//! CPU compositor built on tiny-skia.

use crate::base_layer::{BaseLayerRenderer, view_transform};
use crate::convert::to_skia_path;
use crate::raster::Raster;
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use canopy_core::base::overlay_clip_path;
use tiny_skia::{BlendMode, FillRule, FilterQuality, Mask, Pixmap, PixmapPaint, Transform};

/// Composites the base layer and the raster overlay into a pixmap.
#[derive(Default)]
pub struct SkiaRenderer {
    base: BaseLayerRenderer,
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `overlay` scaled to the output, masked by the canopy clip.
    fn composite_overlay(&self, pixmap: &mut Pixmap, overlay: &Raster) -> RenderResult<()> {
        let size = pixmap.width();
        let mut mask = Mask::new(size, size).ok_or(RendererError::InvalidSize(size))?;
        let clip = to_skia_path(&overlay_clip_path())
            .ok_or_else(|| RendererError::RenderFailed("empty clip outline".into()))?;
        mask.fill_path(&clip, FillRule::Winding, true, view_transform(size));

        let scale = size as f32 / overlay.resolution() as f32;
        let quality = if (scale - 1.0).abs() < f32::EPSILON {
            FilterQuality::Nearest
        } else {
            FilterQuality::Bicubic
        };
        let paint = PixmapPaint {
            opacity: 1.0,
            blend_mode: BlendMode::SourceOver,
            quality,
        };
        pixmap.draw_pixmap(
            0,
            0,
            overlay.pixmap().as_ref(),
            &paint,
            Transform::from_scale(scale, scale),
            Some(&mask),
        );
        Ok(())
    }
}

impl Renderer for SkiaRenderer {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderResult<Pixmap> {
        let size = ctx.output_size;
        let mut pixmap = Pixmap::new(size, size).ok_or(RendererError::InvalidSize(size))?;

        self.base.render_into(&mut pixmap, ctx.base)?;

        if let Some(overlay) = ctx.overlay {
            self.composite_overlay(&mut pixmap, overlay)?;
        }
        Ok(pixmap)
    }
}
