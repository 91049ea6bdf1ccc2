//! Session scripts: a saved session plus a list of UI actions to replay.
//!
//! A script stands in for the interactive shell. Each action is what a
//! control or the pointer would have produced:
//!
//! ```json
//! {
//!   "actions": [
//!     { "action": "set_step", "step": "paint" },
//!     { "action": "set_fill_color", "color": "#1e40af" },
//!     { "action": "pointer", "event": { "type": "down", "source": { "kind": "mouse", "client": { "x": 80, "y": 150 } } } },
//!     { "action": "pointer", "event": { "type": "up" } }
//!   ]
//! }
//! ```

use crate::{AppError, AppResult};
use canopy_core::base::Pattern;
use canopy_core::color::RgbaColor;
use canopy_core::geometry::EDITOR_DISPLAY_SIZE;
use canopy_core::input::PointerEvent;
use canopy_core::session::DesignSession;
use canopy_core::tools::ToolKind;
use canopy_core::view::DesignStep;
use canopy_render::DesignController;
use kurbo::{Point, Rect};
use serde::Deserialize;

/// A scripted design session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    /// Session to resume; a fresh one when absent.
    #[serde(default)]
    pub session: Option<DesignSession>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One scripted UI action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Move to another design step.
    SetStep { step: DesignStep },
    /// Change the canopy fill color (hex).
    SetFillColor { color: String },
    /// Change the canopy pattern. Unknown ids mean no pattern.
    SetPattern { pattern: Pattern },
    /// Change the current tool.
    SetTool { tool: ToolKind },
    /// Change the paint color (hex).
    SetBrushColor { color: String },
    /// Change the shared brush size.
    SetBrushSize { size: f64 },
    SetZoom { zoom: f64 },
    ZoomIn,
    ZoomOut,
    ZoomReset,
    /// Pointer input on the editor. `bounds` defaults to the editor's
    /// on-screen rectangle at the current zoom, anchored at the origin.
    Pointer {
        event: PointerEvent,
        #[serde(default)]
        bounds: Option<Rect>,
    },
    /// Clear the drawing; only a confirmed clear takes effect.
    ClearDrawing { confirm: bool },
}

/// Outcome of replaying a script.
pub struct ScriptRun {
    pub controller: DesignController,
    /// Number of strokes committed while replaying.
    pub commits: usize,
}

/// Replay `script` against a controller with a raster of `resolution`.
pub fn run_script(script: Script, resolution: u32) -> AppResult<ScriptRun> {
    let session = script.session.unwrap_or_default();
    let mut controller = DesignController::with_resolution(session, resolution)?;
    let mut commits = 0;

    for (index, action) in script.actions.into_iter().enumerate() {
        log::trace!("Action {index}: {action:?}");
        match action {
            Action::SetStep { step } => controller.set_step(step),
            Action::SetFillColor { color } => controller.select_fill(parse_color(&color)?),
            Action::SetPattern { pattern } => controller.set_pattern(pattern),
            Action::SetTool { tool } => controller.tools_mut().set_tool(tool),
            Action::SetBrushColor { color } => controller.tools_mut().brush_color = parse_color(&color)?,
            Action::SetBrushSize { size } => controller.tools_mut().set_brush_size(size),
            Action::SetZoom { zoom } => controller.tools_mut().set_zoom(zoom),
            Action::ZoomIn => controller.tools_mut().zoom_in(),
            Action::ZoomOut => controller.tools_mut().zoom_out(),
            Action::ZoomReset => controller.tools_mut().reset_zoom(),
            Action::Pointer { event, bounds } => {
                let bounds = bounds.unwrap_or_else(|| editor_bounds(&controller));
                if controller.handle_pointer(&event, bounds) {
                    commits += 1;
                }
            }
            Action::ClearDrawing { confirm } => {
                controller.clear(|| confirm);
            }
        }
    }

    Ok(ScriptRun { controller, commits })
}

fn editor_bounds(controller: &DesignController) -> Rect {
    let edge = controller.session().tools.display_edge(EDITOR_DISPLAY_SIZE);
    Rect::from_origin_size(Point::ORIGIN, (edge, edge))
}

fn parse_color(hex: &str) -> AppResult<RgbaColor> {
    RgbaColor::from_hex(hex).ok_or_else(|| AppError::InvalidColor(hex.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::geometry::RASTER_RESOLUTION;

    const STROKE: &str = r##"{
        "actions": [
            { "action": "set_step", "step": "paint" },
            { "action": "set_fill_color", "color": "#123456" },
            { "action": "set_pattern", "pattern": "stripes" },
            { "action": "pointer", "event": { "type": "down", "source": { "kind": "mouse", "client": { "x": 50, "y": 150 } } } },
            { "action": "pointer", "event": { "type": "move", "source": { "kind": "touch", "touches": [{ "x": 350, "y": 150 }] } } },
            { "action": "pointer", "event": { "type": "leave" } }
        ]
    }"##;

    #[test]
    fn test_replays_stroke() {
        let run = run_script(Script::from_json(STROKE).unwrap(), RASTER_RESOLUTION).unwrap();
        assert_eq!(run.commits, 1);
        let session = run.controller.session();
        assert!(session.has_drawing());
        assert_eq!(session.base.pattern, Pattern::Stripes);
        assert_eq!(session.custom_colors(), &[RgbaColor::from_hex("#123456").unwrap()]);
        assert_eq!(run.controller.editor().raster().pixel(400, 300).unwrap().alpha(), 255);
    }

    #[test]
    fn test_default_bounds_follow_zoom() {
        let json = r#"{
            "actions": [
                { "action": "set_step", "step": "paint" },
                { "action": "set_zoom", "zoom": 2.0 },
                { "action": "pointer", "event": { "type": "down", "source": { "kind": "mouse", "client": { "x": 400, "y": 400 } } } },
                { "action": "pointer", "event": { "type": "up" } }
            ]
        }"#;
        let run = run_script(Script::from_json(json).unwrap(), RASTER_RESOLUTION).unwrap();
        // Client (400, 400) on an 800 px editor is the raster center.
        assert_eq!(run.controller.editor().raster().pixel(400, 400).unwrap().alpha(), 255);
        assert_eq!(run.controller.editor().raster().pixel(790, 790).unwrap().alpha(), 0);
    }

    #[test]
    fn test_explicit_bounds() {
        let json = r#"{
            "actions": [
                { "action": "set_step", "step": "paint" },
                { "action": "pointer",
                  "event": { "type": "down", "source": { "kind": "mouse", "client": { "x": 150, "y": 150 } } },
                  "bounds": { "x0": 100, "y0": 100, "x1": 200, "y1": 200 } },
                { "action": "pointer", "event": { "type": "cancel" } }
            ]
        }"#;
        let run = run_script(Script::from_json(json).unwrap(), RASTER_RESOLUTION).unwrap();
        assert_eq!(run.commits, 1);
        assert_eq!(run.controller.editor().raster().pixel(400, 400).unwrap().alpha(), 255);
    }

    #[test]
    fn test_clear_and_tools() {
        let json = r#"{
            "actions": [
                { "action": "set_step", "step": "paint" },
                { "action": "set_tool", "tool": "erase" },
                { "action": "set_brush_size", "size": 50 },
                { "action": "zoom_in" },
                { "action": "zoom_in" },
                { "action": "zoom_out" },
                { "action": "pointer", "event": { "type": "down", "source": { "kind": "mouse", "client": { "x": 10, "y": 10 } } } },
                { "action": "pointer", "event": { "type": "up" } },
                { "action": "clear_drawing", "confirm": false }
            ]
        }"#;
        let run = run_script(Script::from_json(json).unwrap(), RASTER_RESOLUTION).unwrap();
        let tools = &run.controller.session().tools;
        assert_eq!(tools.tool, ToolKind::Erase);
        assert_eq!(tools.brush_size(), 20.0);
        assert!((tools.zoom() - 1.1).abs() < 1e-9);
        assert!(run.controller.session().has_drawing());
    }

    #[test]
    fn test_confirmed_clear() {
        let mut script = Script::from_json(STROKE).unwrap();
        script.actions.push(Action::ClearDrawing { confirm: true });
        let run = run_script(script, RASTER_RESOLUTION).unwrap();
        assert!(!run.controller.session().has_drawing());
        assert!(run.controller.editor().raster().is_blank());
    }

    #[test]
    fn test_resumes_session() {
        let first = run_script(Script::from_json(STROKE).unwrap(), RASTER_RESOLUTION).unwrap();
        let session = first.controller.into_session();
        let script = Script {
            session: Some(session.clone()),
            actions: vec![Action::ZoomReset],
        };
        let run = run_script(script, RASTER_RESOLUTION).unwrap();
        assert_eq!(run.commits, 0);
        assert_eq!(run.controller.session().latest_snapshot(), session.latest_snapshot());
        assert!(!run.controller.editor().raster().is_blank());
    }

    #[test]
    fn test_invalid_color() {
        let json = r#"{ "actions": [{ "action": "set_brush_color", "color": "teal" }] }"#;
        let err = run_script(Script::from_json(json).unwrap(), RASTER_RESOLUTION).err().unwrap();
        assert!(matches!(err, AppError::InvalidColor(c) if c == "teal"));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let json = r#"{ "actions": [{ "action": "undo" }] }"#;
        assert!(matches!(Script::from_json(json), Err(AppError::Json(_))));
    }
}
