//! Base layer renderer: shaft, canopy fill, pattern tiling and highlight.
//!
//! A pure function of the [`BaseLayer`] parameters and the output size;
//! the only state kept is a cache of rasterized pattern tiles.

use crate::convert::{to_skia_color, to_skia_path, to_skia_rect};
use crate::renderer::{RenderResult, RendererError};
use canopy_core::base::{
    BaseLayer, HANDLE_WIDTH, PATTERN_TILE, Pattern, SHAFT_COLOR, VIEW_BOX, canopy_bounds, canopy_path,
    handle_path, shaft_rect,
};
use canopy_core::color::RgbaColor;
use std::collections::HashMap;
use tiny_skia::{
    Color, FillRule, FilterQuality, GradientStop, LineCap, LinearGradient, Paint, PathBuilder, Pixmap,
    Shader, SpreadMode, Stroke, Transform,
};

/// Top opacity of the glossy highlight gradient.
const HIGHLIGHT_TOP_ALPHA: f32 = 0.9;
/// Opacity of the whole highlight layer.
const HIGHLIGHT_OPACITY: f32 = 0.15;

/// Transform from view box units to an output of `size` pixels.
pub(crate) fn view_transform(size: u32) -> Transform {
    let scale = size as f32 / VIEW_BOX as f32;
    Transform::from_scale(scale, scale)
}

/// Renders the silhouette beneath the raster overlay.
#[derive(Default)]
pub struct BaseLayerRenderer {
    /// Pattern tiles keyed by pattern and pixel density.
    tiles: HashMap<(Pattern, u32), Pixmap>,
}

impl BaseLayerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the base layer into `pixmap`, scaled to its width.
    pub fn render_into(&mut self, pixmap: &mut Pixmap, base: &BaseLayer) -> RenderResult<()> {
        let transform = view_transform(pixmap.width());
        let canopy = to_skia_path(&canopy_path())
            .ok_or_else(|| RendererError::RenderFailed("empty canopy outline".into()))?;

        draw_shaft(pixmap, transform);

        let fill = solid_paint(base.fill);
        pixmap.fill_path(&canopy, &fill, FillRule::Winding, transform, None);

        if base.pattern != Pattern::None {
            let density = (pixmap.width() as f32 / VIEW_BOX as f32).ceil().max(1.0) as u32;
            let tile = match self.tiles.entry((base.pattern, density)) {
                std::collections::hash_map::Entry::Occupied(e) => e.into_mut(),
                std::collections::hash_map::Entry::Vacant(e) => e.insert(pattern_tile(base.pattern, density)?),
            };
            let paint = Paint {
                shader: tiny_skia::Pattern::new(
                    tile.as_ref(),
                    SpreadMode::Repeat,
                    FilterQuality::Bilinear,
                    1.0,
                    pattern_transform(base.pattern, density),
                ),
                anti_alias: true,
                ..Paint::default()
            };
            pixmap.fill_path(&canopy, &paint, FillRule::Winding, transform, None);
        }

        if let Some(shader) = highlight_shader() {
            let paint = Paint {
                shader,
                anti_alias: true,
                ..Paint::default()
            };
            pixmap.fill_path(&canopy, &paint, FillRule::Winding, transform, None);
        }

        Ok(())
    }
}

fn solid_paint(color: RgbaColor) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };
    paint.set_color(to_skia_color(color));
    paint
}

fn draw_shaft(pixmap: &mut Pixmap, transform: Transform) {
    let paint = solid_paint(SHAFT_COLOR);
    if let Some(rect) = to_skia_rect(shaft_rect()) {
        pixmap.fill_rect(rect, &paint, transform, None);
    }
    if let Some(hook) = to_skia_path(&handle_path()) {
        let stroke = Stroke {
            width: HANDLE_WIDTH as f32,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(&hook, &paint, &stroke, transform, None);
    }
}

/// Rasterize one pattern tile at `density` pixels per view box unit.
fn pattern_tile(pattern: Pattern, density: u32) -> RenderResult<Pixmap> {
    let k = density as f32;
    let edge = (PATTERN_TILE as f32 * k).round() as u32;
    let mut tile = Pixmap::new(edge, edge).ok_or(RendererError::InvalidSize(edge))?;
    let scale = Transform::from_scale(k, k);

    let path = match pattern {
        Pattern::None => None,
        Pattern::Dots => {
            let mut pb = PathBuilder::new();
            pb.push_circle(2.0, 2.0, 1.5);
            pb.push_circle(12.0, 12.0, 1.5);
            pb.finish()
        }
        Pattern::Stripes => tiny_skia::Rect::from_xywh(0.0, 0.0, 2.0, 20.0).map(PathBuilder::from_rect),
        Pattern::Grid => {
            // Only the inner half of each edge line falls inside the tile.
            let mut pb = PathBuilder::new();
            if let Some(top) = tiny_skia::Rect::from_xywh(0.0, 0.0, 20.0, 0.5) {
                pb.push_rect(top);
            }
            if let Some(left) = tiny_skia::Rect::from_xywh(0.0, 0.0, 0.5, 20.0) {
                pb.push_rect(left);
            }
            pb.finish()
        }
    };

    if let Some(path) = path {
        let alpha = match pattern {
            Pattern::Dots => 0.4,
            _ => 0.3,
        };
        let mut paint = Paint {
            anti_alias: true,
            ..Paint::default()
        };
        paint.set_color(Color::from_rgba(1.0, 1.0, 1.0, alpha).unwrap_or(Color::WHITE));
        tile.fill_path(&path, &paint, FillRule::Winding, scale, None);
    }
    Ok(tile)
}

/// Maps tile pixels to view box units; stripes run at 45 degrees.
fn pattern_transform(pattern: Pattern, density: u32) -> Transform {
    let inv = 1.0 / density as f32;
    let base = match pattern {
        Pattern::Stripes => Transform::from_rotate(45.0),
        _ => Transform::identity(),
    };
    base.pre_scale(inv, inv)
}

fn highlight_shader() -> Option<Shader<'static>> {
    let bounds = canopy_bounds();
    let top = Color::from_rgba(1.0, 1.0, 1.0, HIGHLIGHT_TOP_ALPHA * HIGHLIGHT_OPACITY)?;
    LinearGradient::new(
        tiny_skia::Point::from_xy(0.0, bounds.y0 as f32),
        tiny_skia::Point::from_xy(0.0, bounds.y1 as f32),
        vec![
            GradientStop::new(0.0, top),
            GradientStop::new(1.0, Color::from_rgba(1.0, 1.0, 1.0, 0.0)?),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
}
