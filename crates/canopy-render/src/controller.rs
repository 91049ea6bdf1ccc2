//! View controller: ties a design session to its editor surface.
//!
//! The controller owns the session, forwards pointer events to the editor
//! with the session's current tool settings, stores committed snapshots and
//! remounts the editor whenever the design step changes. The poster view
//! always gets a fresh replay surface decoded from the latest snapshot.

use crate::editor_output_size;
use crate::renderer::RenderResult;
use crate::skia_impl::SkiaRenderer;
use crate::surface::DrawingSurface;
use canopy_core::base::Pattern;
use canopy_core::color::RgbaColor;
use canopy_core::geometry::RASTER_RESOLUTION;
use canopy_core::input::PointerEvent;
use canopy_core::session::DesignSession;
use canopy_core::tools::ToolSettings;
use canopy_core::view::{DesignStep, ViewMode};
use kurbo::Rect;
use tiny_skia::Pixmap;

/// Drives one design session.
pub struct DesignController {
    session: DesignSession,
    editor: DrawingSurface,
    renderer: SkiaRenderer,
}

impl DesignController {
    /// Create a controller for `session`, mounting its latest drawing.
    pub fn new(session: DesignSession) -> RenderResult<Self> {
        Self::with_resolution(session, RASTER_RESOLUTION)
    }

    /// Create a controller whose editor raster has a custom resolution.
    pub fn with_resolution(session: DesignSession, resolution: u32) -> RenderResult<Self> {
        let mut editor = DrawingSurface::with_resolution(session.view_mode(), resolution)?;
        editor.mount(session.latest_snapshot());
        Ok(Self {
            session,
            editor,
            renderer: SkiaRenderer::new(),
        })
    }

    pub fn session(&self) -> &DesignSession {
        &self.session
    }

    pub fn into_session(self) -> DesignSession {
        self.session
    }

    pub fn editor(&self) -> &DrawingSurface {
        &self.editor
    }

    /// Tool settings for subsequent strokes.
    pub fn tools_mut(&mut self) -> &mut ToolSettings {
        &mut self.session.tools
    }

    pub fn select_fill(&mut self, color: RgbaColor) {
        self.session.select_fill(color);
    }

    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.session.set_pattern(pattern);
    }

    /// Move to another design step and remount the editor in that step's
    /// view mode.
    pub fn set_step(&mut self, step: DesignStep) {
        if step == self.session.step {
            return;
        }
        self.session.set_step(step);
        self.editor.set_mode(self.session.view_mode());
        self.editor.mount(self.session.latest_snapshot());
    }

    /// Forward a pointer event to the editor surface displayed at `bounds`.
    ///
    /// Returns true when the event committed a new snapshot to the session.
    pub fn handle_pointer(&mut self, event: &PointerEvent, bounds: Rect) -> bool {
        match self.editor.handle_pointer(event, bounds, &self.session.tools) {
            Some(snapshot) => {
                self.session.commit_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    /// Composite the editor at its zoomed display size.
    pub fn render_editor(&mut self) -> RenderResult<Pixmap> {
        let size = editor_output_size(&self.session.tools);
        self.editor.render(&mut self.renderer, &self.session.base, size)
    }

    /// Composite a read-only poster of the latest drawing at `size` pixels.
    pub fn render_poster(&mut self, size: u32) -> RenderResult<Pixmap> {
        let mut poster = DrawingSurface::with_resolution(ViewMode::Replay, self.editor.resolution())?;
        poster.mount(self.session.latest_snapshot());
        poster.render(&mut self.renderer, &self.session.base, size)
    }

    /// Clear the drawing after `confirm` agrees. Irreversible.
    pub fn clear(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !self.session.clear_drawing(confirm) {
            return false;
        }
        self.editor.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::geometry::EDITOR_DISPLAY_SIZE;
    use canopy_core::input::InputSource;
    use canopy_core::tools::ToolKind;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, EDITOR_DISPLAY_SIZE, EDITOR_DISPLAY_SIZE)
    }

    fn stroke(controller: &mut DesignController, from: (f64, f64), to: (f64, f64)) -> bool {
        controller.handle_pointer(
            &PointerEvent::Down {
                source: InputSource::mouse(from.0, from.1),
            },
            bounds(),
        );
        controller.handle_pointer(
            &PointerEvent::Move {
                source: InputSource::touch(to.0, to.1),
            },
            bounds(),
        );
        controller.handle_pointer(&PointerEvent::Up, bounds())
    }

    fn painting() -> DesignController {
        let mut controller = DesignController::new(DesignSession::new()).unwrap();
        controller.set_step(DesignStep::Paint);
        controller
    }

    #[test]
    fn test_design_step_ignores_strokes() {
        let mut controller = DesignController::new(DesignSession::new()).unwrap();
        assert_eq!(controller.editor().mode(), ViewMode::Replay);
        assert!(!stroke(&mut controller, (100.0, 150.0), (300.0, 150.0)));
        assert!(!controller.session().has_drawing());
    }

    #[test]
    fn test_stroke_commits_to_session() {
        let mut controller = painting();
        assert!(stroke(&mut controller, (100.0, 150.0), (300.0, 150.0)));
        assert!(controller.session().has_drawing());
    }

    #[test]
    fn test_drawing_survives_step_changes() {
        let mut controller = painting();
        stroke(&mut controller, (100.0, 150.0), (300.0, 150.0));
        let drawn = controller.editor().raster().clone();

        controller.set_step(DesignStep::Share);
        assert_eq!(controller.editor().mode(), ViewMode::Replay);
        controller.set_step(DesignStep::Paint);
        assert_eq!(controller.editor().raster(), &drawn);
    }

    #[test]
    fn test_editor_renders_at_zoomed_size() {
        let mut controller = painting();
        controller.tools_mut().set_zoom(1.5);
        assert_eq!(controller.render_editor().unwrap().width(), 600);
        controller.tools_mut().set_zoom(0.5);
        assert_eq!(controller.render_editor().unwrap().width(), 200);
    }

    #[test]
    fn test_poster_matches_editor_overlay() {
        let mut controller = painting();
        controller.select_fill(RgbaColor::from_hex("#be123c").unwrap());
        controller.set_pattern(Pattern::Grid);
        stroke(&mut controller, (80.0, 160.0), (320.0, 150.0));

        let editor = controller.render_editor().unwrap();
        let poster = controller.render_poster(400).unwrap();
        assert_eq!(editor.data(), poster.data());
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut controller = painting();
        stroke(&mut controller, (100.0, 150.0), (300.0, 150.0));

        assert!(!controller.clear(|| false));
        assert!(!controller.editor().raster().is_blank());

        assert!(controller.clear(|| true));
        assert!(controller.editor().raster().is_blank());
        assert!(!controller.session().has_drawing());

        // Nothing comes back on remount.
        controller.set_step(DesignStep::Share);
        controller.set_step(DesignStep::Paint);
        assert!(controller.editor().raster().is_blank());
        let poster = controller.render_poster(200).unwrap();
        let plain = DesignController::new(DesignSession::new())
            .unwrap()
            .render_poster(200)
            .unwrap();
        assert_eq!(poster.data(), plain.data());
    }

    #[test]
    fn test_erase_tool_from_session() {
        let mut controller = painting();
        stroke(&mut controller, (50.0, 150.0), (350.0, 150.0));
        controller.tools_mut().set_tool(ToolKind::Erase);
        controller.tools_mut().set_brush_size(10.0);
        stroke(&mut controller, (200.0, 100.0), (200.0, 200.0));
        assert_eq!(controller.editor().raster().pixel(400, 300).unwrap().alpha(), 0);
        assert_eq!(controller.editor().raster().pixel(200, 300).unwrap().alpha(), 255);
    }

    #[test]
    fn test_custom_resolution() {
        let mut session = DesignSession::new();
        session.set_step(DesignStep::Paint);
        let mut controller = DesignController::with_resolution(session, 200).unwrap();
        assert_eq!(controller.editor().resolution(), 200);
        assert!(stroke(&mut controller, (100.0, 150.0), (300.0, 150.0)));
        assert_eq!(controller.editor().raster().pixel(50, 75).unwrap().alpha(), 255);
        assert_eq!(controller.render_poster(400).unwrap().width(), 400);
    }

    #[test]
    fn test_resumes_saved_session() {
        let mut controller = painting();
        stroke(&mut controller, (100.0, 150.0), (300.0, 150.0));
        let drawn = controller.editor().raster().clone();

        let json = controller.into_session().to_json().unwrap();
        let resumed = DesignController::new(DesignSession::from_json(&json).unwrap()).unwrap();
        assert_eq!(resumed.editor().mode(), ViewMode::Interactive);
        assert_eq!(resumed.editor().raster(), &drawn);
    }
}
