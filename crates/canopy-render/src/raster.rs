//! Fixed-resolution backing raster for drawn content.
//!
//! Pixels are stored premultiplied (tiny-skia's native layout). The raster
//! is transparent except where painted; stroke steps are rasterized as soon
//! as they arrive.

use crate::convert::to_skia_color;
use crate::renderer::{RenderResult, RendererError};
use canopy_core::stroke::StrokeStep;
use canopy_core::tools::{StrokeStyle, ToolKind};
use kurbo::Point;
use tiny_skia::{
    BlendMode, Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8,
    Stroke, Transform,
};

/// Square pixel grid holding drawn content.
#[derive(Clone, PartialEq)]
pub struct Raster {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("resolution", &self.resolution())
            .finish_non_exhaustive()
    }
}

impl Raster {
    /// Create a fully transparent raster of `resolution` x `resolution` pixels.
    pub fn new(resolution: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(resolution, resolution).ok_or(RendererError::InvalidSize(resolution))?;
        Ok(Self { pixmap })
    }

    /// Edge length in pixels. Never changes after creation.
    pub fn resolution(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// All pixels in row-major order, premultiplied.
    pub fn pixels(&self) -> &[PremultipliedColorU8] {
        self.pixmap.pixels()
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        self.pixmap.pixel(x, y)
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Rasterize one step of the stroke pipeline.
    pub fn apply(&mut self, step: &StrokeStep) {
        match step {
            StrokeStep::Begin { at, style } => self.paint_dot(*at, style),
            StrokeStep::Extend { from, to, style } => self.paint_segment(*from, *to, style),
        }
    }

    /// Paint a round dot with the stroke's width, as a pen touching down does.
    pub fn paint_dot(&mut self, at: Point, style: &StrokeStyle) {
        let radius = (style.width / 2.0) as f32;
        let Some(path) = PathBuilder::from_circle(at.x as f32, at.y as f32, radius) else {
            log::trace!("Skipping degenerate dot at {at:?}");
            return;
        };
        let paint = stroke_paint(style);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Paint one segment with round caps, so consecutive segments join
    /// without seams.
    pub fn paint_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        if from == to {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            log::trace!("Skipping degenerate segment {from:?} -> {to:?}");
            return;
        };

        let stroke = Stroke {
            width: style.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        let paint = stroke_paint(style);
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Paint for a stroke: source-over with the brush color for paint,
/// destination-out (clear to transparent) for erase.
fn stroke_paint(style: &StrokeStyle) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };
    match style.tool {
        ToolKind::Paint => {
            paint.set_color(to_skia_color(style.color));
            paint.blend_mode = BlendMode::SourceOver;
        }
        ToolKind::Erase => {
            paint.set_color(Color::BLACK);
            paint.blend_mode = BlendMode::DestinationOut;
        }
    }
    paint
}
