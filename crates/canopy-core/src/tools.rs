//! Paint tools and the brush settings applied to new strokes.

use crate::color::RgbaColor;
use serde::{Deserialize, Serialize};

/// Line width multiplier for the paint tool.
pub const PAINT_WIDTH_FACTOR: f64 = 2.0;
/// Line width multiplier for the erase tool. Erasing is coarser than painting.
pub const ERASE_WIDTH_FACTOR: f64 = 4.0;

pub const MIN_BRUSH_SIZE: f64 = 1.0;
pub const MAX_BRUSH_SIZE: f64 = 20.0;
pub const DEFAULT_BRUSH_SIZE: f64 = 3.0;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Composite color over existing content.
    #[default]
    Paint,
    /// Clear existing content to transparent.
    Erase,
}

impl ToolKind {
    /// Width multiplier applied to the shared base brush size.
    pub fn width_factor(self) -> f64 {
        match self {
            ToolKind::Paint => PAINT_WIDTH_FACTOR,
            ToolKind::Erase => ERASE_WIDTH_FACTOR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Paint => "paint",
            ToolKind::Erase => "erase",
        }
    }
}

/// Fully resolved styling for one stroke, captured when the stroke begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub tool: ToolKind,
    /// Paint color. Ignored by the erase tool.
    pub color: RgbaColor,
    /// Line width in raster pixels.
    pub width: f64,
}

impl StrokeStyle {
    pub fn paint(color: RgbaColor, base_size: f64) -> Self {
        Self {
            tool: ToolKind::Paint,
            color,
            width: base_size * PAINT_WIDTH_FACTOR,
        }
    }

    pub fn erase(base_size: f64) -> Self {
        Self {
            tool: ToolKind::Erase,
            color: RgbaColor::transparent(),
            width: base_size * ERASE_WIDTH_FACTOR,
        }
    }
}

/// Tool configuration owned by a design session.
///
/// Zoom only affects presentation scale; it never feeds into raster
/// resolution or coordinate mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawToolSettings")]
pub struct ToolSettings {
    /// Currently selected tool.
    pub tool: ToolKind,
    /// Color used by the paint tool.
    pub brush_color: RgbaColor,
    /// Shared base size for both tools.
    brush_size: f64,
    /// Display zoom factor of the editor surface.
    zoom: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            brush_color: RgbaColor::white(),
            brush_size: DEFAULT_BRUSH_SIZE,
            zoom: 1.0,
        }
    }
}

/// Tool settings as stored, before the brush size and zoom are clamped.
#[derive(Deserialize)]
struct RawToolSettings {
    tool: ToolKind,
    brush_color: RgbaColor,
    brush_size: f64,
    zoom: f64,
}

impl From<RawToolSettings> for ToolSettings {
    fn from(raw: RawToolSettings) -> Self {
        let mut tools = Self {
            tool: raw.tool,
            brush_color: raw.brush_color,
            ..Self::default()
        };
        tools.set_brush_size(raw.brush_size);
        tools.set_zoom(raw.zoom);
        tools
    }
}

impl ToolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    /// Set the base brush size, clamped to the supported range.
    pub fn set_brush_size(&mut self, size: f64) {
        if size.is_finite() {
            self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = round_zoom(zoom.clamp(MIN_ZOOM, MAX_ZOOM));
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Style for a stroke started now with the active tool.
    pub fn stroke_style(&self) -> StrokeStyle {
        match self.tool {
            ToolKind::Paint => StrokeStyle::paint(self.brush_color, self.brush_size),
            ToolKind::Erase => StrokeStyle::erase(self.brush_size),
        }
    }

    /// On-screen edge length of a surface whose unscaled edge is `base_edge`.
    pub fn display_edge(&self, base_edge: f64) -> f64 {
        base_edge * self.zoom
    }
}

// Keeps repeated 0.1 steps from drifting (0.1 + 0.2 != 0.3).
fn round_zoom(zoom: f64) -> f64 {
    (zoom * 100.0).round() / 100.0
}
