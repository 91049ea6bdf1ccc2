//! Stroke state machine: one pointer-down to pointer-up gesture.
//!
//! The tracker decides *what* happens to the raster for each mapped
//! coordinate; the raster itself lives in the render crate and applies the
//! returned [`StrokeStep`]s immediately.

use crate::tools::StrokeStyle;
use kurbo::Point;

/// One continuous gesture in raster space.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Mapped coordinates in order; never empty.
    pub points: Vec<Point>,
    /// Style captured when the stroke began.
    pub style: StrokeStyle,
}

impl Stroke {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// State of the stroke pipeline.
#[derive(Debug, Clone, Default)]
enum StrokeState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// A gesture is in progress.
    Stroking(Stroke),
}

/// Raster mutation requested by the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeStep {
    /// A new path starts at `at`; rasterized as a round dot of the stroke width.
    Begin { at: Point, style: StrokeStyle },
    /// The path was extended by one segment.
    Extend {
        from: Point,
        to: Point,
        style: StrokeStyle,
    },
}

/// Tracks the in-progress stroke and rejects out-of-sequence input.
#[derive(Debug, Clone, Default)]
pub struct StrokeTracker {
    state: StrokeState,
}

impl StrokeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a stroke is in progress.
    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking(_))
    }

    /// Start a stroke. Ignored (returns `None`) while already stroking.
    pub fn begin(&mut self, at: Point, style: StrokeStyle) -> Option<StrokeStep> {
        if self.is_stroking() {
            return None;
        }
        self.state = StrokeState::Stroking(Stroke {
            points: vec![at],
            style,
        });
        Some(StrokeStep::Begin { at, style })
    }

    /// Extend the current stroke. Ignored (returns `None`) while idle.
    pub fn extend(&mut self, to: Point) -> Option<StrokeStep> {
        let StrokeState::Stroking(stroke) = &mut self.state else {
            return None;
        };
        let from = *stroke.points.last()?;
        stroke.points.push(to);
        Some(StrokeStep::Extend {
            from,
            to,
            style: stroke.style,
        })
    }

    /// End the current stroke and return it. Returns `None` while idle.
    ///
    /// Pointer-up, pointer-leave and pointer-cancel all end a stroke this way.
    pub fn finish(&mut self) -> Option<Stroke> {
        match std::mem::take(&mut self.state) {
            StrokeState::Stroking(stroke) => Some(stroke),
            StrokeState::Idle => None,
        }
    }

    /// Drop any in-progress stroke without reporting it.
    pub fn reset(&mut self) {
        self.state = StrokeState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RgbaColor;

    fn style() -> StrokeStyle {
        StrokeStyle::paint(RgbaColor::white(), 3.0)
    }

    #[test]
    fn test_stroke_lifecycle() {
        let mut tracker = StrokeTracker::new();
        assert!(!tracker.is_stroking());

        let step = tracker.begin(Point::new(1.0, 1.0), style());
        assert!(matches!(step, Some(StrokeStep::Begin { .. })));
        assert!(tracker.is_stroking());

        let step = tracker.extend(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(
            step,
            StrokeStep::Extend {
                from: Point::new(1.0, 1.0),
                to: Point::new(5.0, 5.0),
                style: style(),
            }
        );

        let stroke = tracker.finish().unwrap();
        assert_eq!(stroke.len(), 2);
        assert_eq!(stroke.points[1], Point::new(5.0, 5.0));
        assert!(!tracker.is_stroking());
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut tracker = StrokeTracker::new();
        assert!(tracker.extend(Point::new(5.0, 5.0)).is_none());
        assert!(!tracker.is_stroking());
    }

    #[test]
    fn test_nested_down_is_ignored() {
        let mut tracker = StrokeTracker::new();
        tracker.begin(Point::new(1.0, 1.0), style());
        let erase = StrokeStyle::erase(3.0);
        assert!(tracker.begin(Point::new(9.0, 9.0), erase).is_none());

        let stroke = tracker.finish().unwrap();
        assert_eq!(stroke.points, vec![Point::new(1.0, 1.0)]);
        assert_eq!(stroke.style, style());
    }

    #[test]
    fn test_finish_while_idle() {
        let mut tracker = StrokeTracker::new();
        assert!(tracker.finish().is_none());
    }

    #[test]
    fn test_tap_is_single_point_stroke() {
        let mut tracker = StrokeTracker::new();
        tracker.begin(Point::new(3.0, 4.0), style());
        let stroke = tracker.finish().unwrap();
        assert_eq!(stroke.points, vec![Point::new(3.0, 4.0)]);
        assert!(tracker.finish().is_none());
    }

    #[test]
    fn test_reset_drops_stroke() {
        let mut tracker = StrokeTracker::new();
        tracker.begin(Point::new(3.0, 4.0), style());
        tracker.reset();
        assert!(tracker.finish().is_none());
    }
}
