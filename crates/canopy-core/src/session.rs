//! Design session: the state shared between the drawing surface and the
//! controls around it.
//!
//! The session is threaded explicitly through callers; there is no ambient
//! global state. It owns the latest snapshot, which is written only when a
//! stroke completes (last write wins) and is replaced wholesale by a clear.

use crate::base::{BaseLayer, Pattern};
use crate::color::{RgbaColor, is_preset_fill};
use crate::snapshot::Snapshot;
use crate::tools::ToolSettings;
use crate::view::{DesignStep, ViewMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of custom fill colors remembered.
pub const MAX_CUSTOM_COLORS: usize = 5;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration and drawing state for one design session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignSession {
    /// Current step of the design flow.
    pub step: DesignStep,
    /// Silhouette fill and pattern.
    pub base: BaseLayer,
    /// Tool, brush and zoom settings.
    pub tools: ToolSettings,
    /// Most recently chosen non-preset fill colors, newest first.
    #[serde(default)]
    custom_colors: Vec<RgbaColor>,
    /// Latest committed drawing; `None` means an empty raster.
    #[serde(default)]
    latest_snapshot: Option<Snapshot>,
}

impl DesignSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_step(&mut self, step: DesignStep) {
        log::debug!("Design step -> {}", step.name());
        self.step = step;
    }

    /// View mode the editor surface should use for the current step.
    pub fn view_mode(&self) -> ViewMode {
        self.step.view_mode()
    }

    /// Select a canopy fill color, remembering it if it is not a preset.
    pub fn select_fill(&mut self, color: RgbaColor) {
        self.base.fill = color;
        if is_preset_fill(color) || self.custom_colors.contains(&color) {
            return;
        }
        self.custom_colors.insert(0, color);
        self.custom_colors.truncate(MAX_CUSTOM_COLORS);
    }

    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.base.pattern = pattern;
    }

    pub fn custom_colors(&self) -> &[RgbaColor] {
        &self.custom_colors
    }

    /// Store the snapshot produced by a completed stroke.
    pub fn commit_snapshot(&mut self, snapshot: Snapshot) {
        log::debug!("Committed snapshot ({} bytes)", snapshot.encoded_len());
        self.latest_snapshot = Some(snapshot);
    }

    pub fn latest_snapshot(&self) -> Option<&Snapshot> {
        self.latest_snapshot.as_ref()
    }

    pub fn has_drawing(&self) -> bool {
        self.latest_snapshot.is_some()
    }

    /// Discard the drawing after asking `confirm`. Irreversible once confirmed.
    ///
    /// Returns whether the drawing was cleared.
    pub fn clear_drawing(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }
        self.latest_snapshot = None;
        log::info!("Drawing cleared");
        true
    }

    /// Serialize the session to JSON.
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a session from JSON.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{MAX_BRUSH_SIZE, MIN_ZOOM, ToolKind};

    fn snap(tag: &str) -> Snapshot {
        Snapshot::from_data_url(format!("data:image/png;base64,{tag}"))
    }

    #[test]
    fn test_defaults() {
        let session = DesignSession::new();
        assert_eq!(session.step, DesignStep::Design);
        assert_eq!(session.view_mode(), ViewMode::Replay);
        assert_eq!(session.base, BaseLayer::default());
        assert!(!session.has_drawing());
    }

    #[test]
    fn test_paint_step_is_interactive() {
        let mut session = DesignSession::new();
        session.set_step(DesignStep::Paint);
        assert_eq!(session.view_mode(), ViewMode::Interactive);
    }

    #[test]
    fn test_custom_colors_keep_five_newest() {
        let mut session = DesignSession::new();
        for i in 0..7u8 {
            session.select_fill(RgbaColor::opaque(i, i, i));
        }
        let customs = session.custom_colors();
        assert_eq!(customs.len(), MAX_CUSTOM_COLORS);
        assert_eq!(customs[0], RgbaColor::opaque(6, 6, 6));
        assert_eq!(customs[4], RgbaColor::opaque(2, 2, 2));
        assert_eq!(session.base.fill, RgbaColor::opaque(6, 6, 6));
    }

    #[test]
    fn test_presets_and_duplicates_not_remembered() {
        let mut session = DesignSession::new();
        let preset = RgbaColor::from_hex("#be123c").unwrap();
        session.select_fill(preset);
        assert!(session.custom_colors().is_empty());
        assert_eq!(session.base.fill, preset);

        let custom = RgbaColor::opaque(1, 2, 3);
        session.select_fill(custom);
        session.select_fill(custom);
        assert_eq!(session.custom_colors(), &[custom]);
    }

    #[test]
    fn test_last_snapshot_wins() {
        let mut session = DesignSession::new();
        session.commit_snapshot(snap("AAAA"));
        session.commit_snapshot(snap("BBBB"));
        assert_eq!(session.latest_snapshot(), Some(&snap("BBBB")));
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut session = DesignSession::new();
        session.commit_snapshot(snap("AAAA"));

        assert!(!session.clear_drawing(|| false));
        assert!(session.has_drawing());

        assert!(session.clear_drawing(|| true));
        assert!(session.latest_snapshot().is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut session = DesignSession::new();
        session.tools.set_tool(ToolKind::Erase);
        session.tools.set_zoom(1.3);
        session.set_pattern(Pattern::Stripes);
        session.select_fill(RgbaColor::opaque(9, 8, 7));
        session.commit_snapshot(snap("AAAA"));

        let json = session.to_json().unwrap();
        let back = DesignSession::from_json(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_json_missing_optional_fields() {
        let json = r#"{
            "step": "paint",
            "base": { "fill": { "r": 1, "g": 2, "b": 3, "a": 255 }, "pattern": "polka" },
            "tools": { "tool": "paint", "brush_color": { "r": 255, "g": 255, "b": 255, "a": 255 },
                       "brush_size": 3.0, "zoom": 1.0 }
        }"#;
        let session = DesignSession::from_json(json).unwrap();
        assert_eq!(session.base.pattern, Pattern::None);
        assert!(session.latest_snapshot().is_none());
        assert!(session.custom_colors().is_empty());
    }

    #[test]
    fn test_json_tool_settings_clamped() {
        let json = r#"{
            "step": "paint",
            "base": { "fill": { "r": 1, "g": 2, "b": 3, "a": 255 }, "pattern": "none" },
            "tools": { "tool": "erase", "brush_color": { "r": 255, "g": 255, "b": 255, "a": 255 },
                       "brush_size": 5000.0, "zoom": 0.0 }
        }"#;
        let session = DesignSession::from_json(json).unwrap();
        assert_eq!(session.tools.tool, ToolKind::Erase);
        assert!((session.tools.brush_size() - MAX_BRUSH_SIZE).abs() < f64::EPSILON);
        assert!((session.tools.zoom() - MIN_ZOOM).abs() < f64::EPSILON);
        assert!((session.tools.stroke_style().width - 80.0).abs() < f64::EPSILON);
        assert!((session.tools.display_edge(400.0) - 200.0).abs() < 1e-9);
    }
}
