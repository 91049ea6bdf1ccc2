//! Vector description of the umbrella silhouette beneath the raster overlay.
//!
//! All geometry is expressed in a square view box of [`VIEW_BOX`] units and
//! scaled to the output size at render time.

use crate::color::{RgbaColor, parse_hex_color};
use kurbo::{Affine, BezPath, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Edge length of the silhouette view box.
pub const VIEW_BOX: f64 = 200.0;

/// Edge length of one pattern tile, in view box units.
pub const PATTERN_TILE: f64 = 20.0;

/// Scale applied to the canopy outline to get the overlay clip, so strokes
/// near the edge stay inside the visible fill.
pub const CLIP_INSET_SCALE: f64 = 0.99;

/// Color of the shaft and handle.
pub const SHAFT_COLOR: RgbaColor = RgbaColor::opaque(0x1e, 0x29, 0x3b);

pub const DEFAULT_FILL: &str = "#1e40af";

/// Tiling pattern drawn over the canopy fill.
///
/// Parsed leniently: unknown identifiers become [`Pattern::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pattern {
    #[default]
    None,
    Dots,
    Stripes,
    Grid,
}

impl Pattern {
    /// Parse a pattern identifier. Unknown values mean "no pattern".
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "dots" => Pattern::Dots,
            "stripes" => Pattern::Stripes,
            "grid" => Pattern::Grid,
            "none" => Pattern::None,
            other => {
                log::debug!("Unknown pattern id {other:?}, using none");
                Pattern::None
            }
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Pattern::None => "none",
            Pattern::Dots => "dots",
            Pattern::Stripes => "stripes",
            Pattern::Grid => "grid",
        }
    }
}

impl From<String> for Pattern {
    fn from(id: String) -> Self {
        Pattern::from_id(&id)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.id().to_string()
    }
}

/// The product silhouette parameters chosen by the user.
///
/// Stateless with respect to the drawing: it never stores raster content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseLayer {
    /// Canopy fill color.
    pub fill: RgbaColor,
    /// Tiling pattern over the fill.
    pub pattern: Pattern,
}

impl Default for BaseLayer {
    fn default() -> Self {
        Self {
            fill: RgbaColor::from_hex(DEFAULT_FILL).unwrap_or(RgbaColor::black()),
            pattern: Pattern::None,
        }
    }
}

impl BaseLayer {
    pub fn new(fill: RgbaColor, pattern: Pattern) -> Self {
        Self { fill, pattern }
    }

    /// Build from loosely-typed UI values. Returns `None` for an unparsable color.
    pub fn from_ids(fill_hex: &str, pattern_id: &str) -> Option<Self> {
        let fill = parse_hex_color(fill_hex)?;
        Some(Self::new(fill.into(), Pattern::from_id(pattern_id)))
    }
}

/// Canopy outline: a dome over a scalloped hem.
pub fn canopy_path() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((10.0, 100.0));
    path.quad_to((100.0, 0.0), (190.0, 100.0));
    path.quad_to((145.0, 90.0), (100.0, 100.0));
    path.quad_to((55.0, 90.0), (10.0, 100.0));
    path.close_path();
    path
}

/// Clip region for the raster overlay: the canopy outline scaled slightly
/// towards its center.
pub fn overlay_clip_path() -> BezPath {
    let outline = canopy_path();
    let center = outline.bounding_box().center();
    let inset = Affine::translate(center.to_vec2())
        * Affine::scale(CLIP_INSET_SCALE)
        * Affine::translate(-center.to_vec2());
    inset * outline
}

/// The straight part of the shaft, running from under the canopy to the handle.
pub fn shaft_rect() -> Rect {
    Rect::new(98.0, 90.0, 102.0, 190.0)
}

/// Handle hook, stroked [`HANDLE_WIDTH`] wide with round caps.
pub fn handle_path() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((98.0, 185.0));
    path.quad_to((98.0, 200.0), (85.0, 200.0));
    path
}

pub const HANDLE_WIDTH: f64 = 4.0;

/// Vertical extent of the canopy, used to span the glossy highlight.
pub fn canopy_bounds() -> Rect {
    canopy_path().bounding_box()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_unknown_pattern_is_none() {
        assert_eq!(Pattern::from_id("dots"), Pattern::Dots);
        assert_eq!(Pattern::from_id(" Grid "), Pattern::Grid);
        assert_eq!(Pattern::from_id("plaid"), Pattern::None);
        assert_eq!(Pattern::from_id(""), Pattern::None);
    }

    #[test]
    fn test_pattern_serde_is_lenient() {
        let p: Pattern = serde_json::from_str("\"stripes\"").unwrap();
        assert_eq!(p, Pattern::Stripes);
        let p: Pattern = serde_json::from_str("\"checkerboard\"").unwrap();
        assert_eq!(p, Pattern::None);
        assert_eq!(serde_json::to_string(&Pattern::Grid).unwrap(), "\"grid\"");
    }

    #[test]
    fn test_base_layer_from_ids() {
        let base = BaseLayer::from_ids("#1e40af", "dots").unwrap();
        assert_eq!(base.fill, RgbaColor::opaque(0x1e, 0x40, 0xaf));
        assert_eq!(base.pattern, Pattern::Dots);
        assert!(BaseLayer::from_ids("navy", "dots").is_none());
        assert_eq!(BaseLayer::default(), BaseLayer::from_ids(DEFAULT_FILL, "none").unwrap());
    }

    #[test]
    fn test_canopy_geometry() {
        let bounds = canopy_bounds();
        assert!((bounds.x0 - 10.0).abs() < 1e-9);
        assert!((bounds.x1 - 190.0).abs() < 1e-9);
        // The dome peaks halfway to its control point.
        assert!((bounds.y0 - 50.0).abs() < 1e-9);
        let canopy = canopy_path();
        assert!(canopy.contains(Point::new(100.0, 70.0)));
        assert!(!canopy.contains(Point::new(100.0, 150.0)));
        assert!(!canopy.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_clip_is_inset_from_canopy() {
        let outer = canopy_path().bounding_box();
        let inner = overlay_clip_path().bounding_box();
        assert!(inner.x0 > outer.x0);
        assert!(inner.x1 < outer.x1);
        assert!(inner.y0 > outer.y0);
        assert!(inner.y1 < outer.y1);
        assert!((inner.center() - outer.center()).hypot() < 1e-9);
    }
}
