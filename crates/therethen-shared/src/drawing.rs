//! Rectangle drawing gesture tracking.
//!
//! The host UI forwards drag callbacks; on gesture end the drawer emits a
//! [`GeoRectangle`] built from the pixel bounding box and returns to idle.
//! There is no cancel API: a view that goes away mid-drag just drops the
//! drawer.

use crate::transform::point_to_coordinate;
use crate::types::{GeoRectangle, ScreenPoint, ScreenRect, ScreenSize, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawingState {
    #[default]
    Idle,
    Dragging {
        start: ScreenPoint,
        current: ScreenPoint,
    },
}

#[derive(Debug, Default)]
pub struct RectangleDrawer {
    state: DrawingState,
}

impl RectangleDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DrawingState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Dragging { .. })
    }

    /// Handle a drag update. The first update of a gesture records `start`;
    /// later ones only move the current point.
    pub fn gesture_changed(&mut self, start: ScreenPoint, location: ScreenPoint) {
        let start = match self.state {
            DrawingState::Idle => start,
            DrawingState::Dragging { start, .. } => start,
        };
        self.state = DrawingState::Dragging {
            start,
            current: location,
        };
    }

    /// Pixel rectangle for live preview while dragging.
    pub fn preview(&self) -> Option<ScreenRect> {
        match self.state {
            DrawingState::Idle => None,
            DrawingState::Dragging { start, current } => {
                Some(ScreenRect::from_corners(start, current))
            }
        }
    }

    /// Finish the gesture at `location`.
    ///
    /// Returns `None` if no drag was in progress. Zero-area rectangles are
    /// returned as-is; rejecting them is up to the caller.
    ///
    /// `top_left` / `bottom_right` are the projections of the pixel min/max
    /// corners. Normalize before using them as geographic extremes.
    pub fn gesture_ended(
        &mut self,
        location: ScreenPoint,
        viewport: &Viewport,
        size: ScreenSize,
    ) -> Option<GeoRectangle> {
        let DrawingState::Dragging { start, .. } = std::mem::take(&mut self.state) else {
            return None;
        };

        let bounds = ScreenRect::from_corners(start, location);
        let top_left = point_to_coordinate(viewport, size, bounds.min_corner());
        let bottom_right = point_to_coordinate(viewport, size, bounds.max_corner());
        Some(GeoRectangle::new(top_left, bottom_right))
    }
}
