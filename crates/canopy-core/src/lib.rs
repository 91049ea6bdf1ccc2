//! Canopy Core Library
//!
//! Platform-agnostic data structures and logic for the umbrella designer's
//! drawing surface: coordinate mapping, input normalization, tools, the
//! stroke state machine, the base layer description and session state.

pub mod base;
pub mod color;
pub mod geometry;
pub mod input;
pub mod session;
pub mod snapshot;
pub mod stroke;
pub mod tools;
pub mod view;

pub use base::{BaseLayer, Pattern};
pub use color::{RgbaColor, parse_hex_color};
pub use geometry::{EDITOR_DISPLAY_SIZE, RASTER_RESOLUTION, map_to_raster};
pub use input::{InputSource, PointerEvent};
pub use session::{DesignSession, SessionError};
pub use snapshot::{Snapshot, SnapshotError};
pub use stroke::{Stroke, StrokeStep, StrokeTracker};
pub use tools::{StrokeStyle, ToolKind, ToolSettings};
pub use view::{DesignStep, ViewMode};
