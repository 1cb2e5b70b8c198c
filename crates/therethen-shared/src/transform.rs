//! Screen ↔ geographic conversion for a flat (equirectangular) map surface.
//!
//! The mapping is affine: the viewport centre sits at the middle of the
//! surface and the span covers its full width/height. Screen `y` grows
//! downward while latitude grows northward, hence the sign flip.
//!
//! Precondition for every function here: both span deltas and both size
//! components are non-zero. Nothing is checked; a zero span yields
//! non-finite results.

use crate::types::{GeoPoint, GeoRectangle, ScreenPoint, ScreenRect, ScreenSize, Viewport};

/// Map a point on the surface to the coordinate under it.
pub fn point_to_coordinate(viewport: &Viewport, size: ScreenSize, point: ScreenPoint) -> GeoPoint {
    let latitude =
        viewport.center.latitude - viewport.span.latitude_delta * (point.y / size.height - 0.5);
    let longitude =
        viewport.center.longitude + viewport.span.longitude_delta * (point.x / size.width - 0.5);
    GeoPoint::new(latitude, longitude)
}

/// Inverse of [`point_to_coordinate`].
pub fn coordinate_to_point(viewport: &Viewport, size: ScreenSize, coord: GeoPoint) -> ScreenPoint {
    let span = viewport.span;
    let x = (coord.longitude - viewport.center.longitude + span.longitude_delta * 0.5)
        / span.longitude_delta
        * size.width;
    let y = (viewport.center.latitude - coord.latitude + span.latitude_delta * 0.5)
        / span.latitude_delta
        * size.height;
    ScreenPoint::new(x, y)
}

/// Project both corners of `rect` and return their pixel bounding box.
///
/// The projected corners may come out in either order, so the box is built
/// from explicit min/max on each axis.
pub fn coordinate_to_screen_rect(
    viewport: &Viewport,
    size: ScreenSize,
    rect: &GeoRectangle,
) -> ScreenRect {
    let a = coordinate_to_point(viewport, size, rect.top_left);
    let b = coordinate_to_point(viewport, size, rect.bottom_right);
    ScreenRect::from_corners(a, b)
}
