//! Mapping from client (screen) coordinates into raster space.
//!
//! The backing raster has a fixed square resolution that is independent of
//! how large the surface is displayed. Pointer positions arrive in client
//! coordinates and are mapped through the on-screen bounding rectangle of
//! the displayed surface, so CSS-style zoom and responsive layout never
//! change where a stroke lands on the raster.

use kurbo::{Point, Rect, Size};

/// Fixed logical resolution of the backing raster (width = height).
pub const RASTER_RESOLUTION: u32 = 800;

/// Unscaled on-screen edge length of the editor surface.
pub const EDITOR_DISPLAY_SIZE: f64 = 400.0;

/// Map a contact point in client coordinates to raster coordinates.
///
/// `bounds` is the on-screen bounding rectangle of the displayed surface.
/// Returns `None` when the rectangle has no area (or is not finite), since a
/// zero-size surface cannot be drawn on.
pub fn map_to_raster(contact: Point, bounds: Rect, resolution: u32) -> Option<Point> {
    let size = bounds.size();
    if !is_drawable(size) || !contact.is_finite() {
        return None;
    }

    let res = f64::from(resolution);
    let x = (contact.x - bounds.x0) * (res / size.width);
    let y = (contact.y - bounds.y0) * (res / size.height);
    Some(Point::new(x, y))
}

/// Map a raster coordinate back into client coordinates (inverse of
/// [`map_to_raster`]).
pub fn raster_to_client(point: Point, bounds: Rect, resolution: u32) -> Option<Point> {
    let size = bounds.size();
    if !is_drawable(size) || resolution == 0 {
        return None;
    }

    let res = f64::from(resolution);
    Some(Point::new(
        bounds.x0 + point.x * (size.width / res),
        bounds.y0 + point.y * (size.height / res),
    ))
}

/// Bounding rectangle of a square surface of `edge` length centered on
/// `center`, e.g. the editor surface displayed at some zoom factor.
pub fn centered_square(center: Point, edge: f64) -> Rect {
    Rect::from_center_size(center, Size::new(edge, edge))
}

fn is_drawable(size: Size) -> bool {
    size.is_finite() && size.width > 0.0 && size.height > 0.0
}
