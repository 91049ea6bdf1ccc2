//! Input events for mouse/touch handling on the drawing surface.
//!
//! Platform bindings translate their native events into [`PointerEvent`]s;
//! the rest of the pipeline only ever sees the normalized contact point.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Where a pointer event came from, carrying its contact point(s) in client
/// coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputSource {
    /// Mouse or pen: a single client position.
    Mouse { client: Point },
    /// Touch: every active touch point, first one is the primary contact.
    Touch { touches: Vec<Point> },
}

impl InputSource {
    /// A mouse source at the given client position.
    pub fn mouse(x: f64, y: f64) -> Self {
        InputSource::Mouse {
            client: Point::new(x, y),
        }
    }

    /// A single-finger touch source at the given client position.
    pub fn touch(x: f64, y: f64) -> Self {
        InputSource::Touch {
            touches: vec![Point::new(x, y)],
        }
    }

    /// The primary contact point (the first touch when several are active).
    pub fn contact_point(&self) -> Option<Point> {
        match self {
            InputSource::Mouse { client } => Some(*client),
            InputSource::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { source: InputSource },
    Move { source: InputSource },
    Up,
    /// The pointer left the surface mid-gesture.
    Leave,
    /// The platform cancelled the gesture (e.g. touchcancel).
    Cancel,
}

impl PointerEvent {
    /// Whether this event ends an in-progress stroke.
    pub fn is_termination(&self) -> bool {
        matches!(self, PointerEvent::Up | PointerEvent::Leave | PointerEvent::Cancel)
    }

    /// The primary contact point carried by the event, if any.
    pub fn contact_point(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { source } | PointerEvent::Move { source } => source.contact_point(),
            PointerEvent::Up | PointerEvent::Leave | PointerEvent::Cancel => None,
        }
    }
}
