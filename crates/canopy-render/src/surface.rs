//! The drawing surface: a raster overlay driven by pointer input.
//!
//! Each surface exclusively owns its raster. A second surface (e.g. the
//! poster preview) never shares it; it gets its own raster decoded from the
//! latest snapshot.

use crate::codec::{self, CodecResult};
use crate::raster::Raster;
use crate::renderer::{RenderContext, RenderResult, Renderer};
use canopy_core::base::BaseLayer;
use canopy_core::geometry::{RASTER_RESOLUTION, map_to_raster};
use canopy_core::input::PointerEvent;
use canopy_core::snapshot::Snapshot;
use canopy_core::stroke::StrokeTracker;
use canopy_core::tools::ToolSettings;
use canopy_core::view::ViewMode;
use kurbo::Rect;
use tiny_skia::Pixmap;
use uuid::Uuid;

/// Unique identifier for a drawing surface instance.
pub type SurfaceId = Uuid;

/// Addressable raster canvas with a stroke pipeline in front of it.
#[derive(Debug)]
pub struct DrawingSurface {
    id: SurfaceId,
    mode: ViewMode,
    raster: Raster,
    tracker: StrokeTracker,
}

impl DrawingSurface {
    /// Create an empty surface at the standard raster resolution.
    pub fn new(mode: ViewMode) -> RenderResult<Self> {
        Self::with_resolution(mode, RASTER_RESOLUTION)
    }

    /// Create an empty surface with a custom raster resolution.
    pub fn with_resolution(mode: ViewMode, resolution: u32) -> RenderResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            mode,
            raster: Raster::new(resolution)?,
            tracker: StrokeTracker::new(),
        })
    }

    /// Create a read-only surface showing `snapshot`.
    pub fn replay(snapshot: Option<&Snapshot>) -> RenderResult<Self> {
        let mut surface = Self::new(ViewMode::Replay)?;
        surface.mount(snapshot);
        Ok(surface)
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch view mode. Leaving interactive mode drops any unfinished stroke.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode == self.mode {
            return;
        }
        if !mode.accepts_input() && self.tracker.is_stroking() {
            log::debug!("Surface {}: dropping unfinished stroke on mode change", self.id);
            self.tracker.reset();
        }
        self.mode = mode;
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn resolution(&self) -> u32 {
        self.raster.resolution()
    }

    pub fn is_stroking(&self) -> bool {
        self.tracker.is_stroking()
    }

    /// Load content on (re)mount: decode `snapshot` over the raster, or
    /// clear it when there is none.
    ///
    /// A snapshot that cannot be decoded leaves an empty raster rather than
    /// failing the surface. Returns whether snapshot content was restored.
    pub fn mount(&mut self, snapshot: Option<&Snapshot>) -> bool {
        self.tracker.reset();
        let Some(snapshot) = snapshot else {
            self.raster.clear();
            return false;
        };
        match codec::decode_into(snapshot, &mut self.raster) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Surface {}: discarding undecodable snapshot: {e}", self.id);
                self.raster.clear();
                false
            }
        }
    }

    /// Discard all drawn content.
    pub fn clear(&mut self) {
        self.tracker.reset();
        self.raster.clear();
    }

    /// Feed one pointer event through the stroke pipeline.
    ///
    /// `bounds` is the surface's current on-screen rectangle in client
    /// coordinates. Returns the new snapshot when the event completed a
    /// stroke; callers store it as the session's latest drawing.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        bounds: Rect,
        tools: &ToolSettings,
    ) -> Option<Snapshot> {
        if !self.mode.accepts_input() {
            return None;
        }

        match event {
            PointerEvent::Down { source } => {
                if self.tracker.is_stroking() {
                    return None;
                }
                let point = source
                    .contact_point()
                    .and_then(|contact| map_to_raster(contact, bounds, self.resolution()));
                let Some(point) = point else {
                    log::debug!("Surface {}: dropped pointer-down with no drawable position", self.id);
                    return None;
                };
                if let Some(step) = self.tracker.begin(point, tools.stroke_style()) {
                    self.raster.apply(&step);
                }
                None
            }
            PointerEvent::Move { source } => {
                if !self.tracker.is_stroking() {
                    return None;
                }
                let point = source
                    .contact_point()
                    .and_then(|contact| map_to_raster(contact, bounds, self.resolution()))?;
                if let Some(step) = self.tracker.extend(point) {
                    self.raster.apply(&step);
                }
                None
            }
            PointerEvent::Up | PointerEvent::Leave | PointerEvent::Cancel => {
                let stroke = self.tracker.finish()?;
                log::debug!(
                    "Surface {}: {} stroke finished with {} points",
                    self.id,
                    stroke.style.tool.name(),
                    stroke.len()
                );
                match self.snapshot() {
                    Ok(snapshot) => Some(snapshot),
                    Err(e) => {
                        log::error!("Surface {}: failed to encode snapshot: {e}", self.id);
                        None
                    }
                }
            }
        }
    }

    /// Encode the current raster content.
    pub fn snapshot(&self) -> CodecResult<Snapshot> {
        codec::encode(&self.raster)
    }

    /// Composite the base layer and this surface's overlay at `size` pixels.
    pub fn render(
        &self,
        renderer: &mut impl Renderer,
        base: &BaseLayer,
        size: u32,
    ) -> RenderResult<Pixmap> {
        renderer.render(&RenderContext::new(base, size).with_overlay(&self.raster))
    }
}
