use ratatui::prelude::Rect;

use super::{Footprint, Viewport, rect_contains};

/// Where the overlay sits on screen.
///
/// `Uninitialized` means the overlay has not been placed since it was last
/// reset; the next [`ViewportPositioner::initialize`] centers it. Once
/// `Positioned`, the top-left corner always satisfies
/// `0 <= x <= viewport.width - footprint.width` (and likewise for `y`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OverlayGeometry {
    #[default]
    Uninitialized,
    Positioned { x: u16, y: u16 },
}

impl OverlayGeometry {
    pub fn top_left(self) -> Option<(u16, u16)> {
        match self {
            OverlayGeometry::Uninitialized => None,
            OverlayGeometry::Positioned { x, y } => Some((x, y)),
        }
    }

    pub fn is_positioned(self) -> bool {
        matches!(self, OverlayGeometry::Positioned { .. })
    }
}

/// Pointer offset from the overlay's top-left corner, recorded on grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub offset_x: i32,
    pub offset_y: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(HeaderDrag),
}

impl DragState {
    pub fn is_active(self) -> bool {
        matches!(self, DragState::Dragging(_))
    }
}

/// Clamp a signed candidate coordinate into `[0, viewport - footprint]`.
///
/// When the footprint is larger than the viewport the upper bound collapses
/// to zero, so the overlay pins to the top/left edge.
pub fn clamp_axis(candidate: i32, viewport: u16, footprint: u16) -> u16 {
    let max = i32::from(viewport.saturating_sub(footprint));
    candidate.clamp(0, max) as u16
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ViewportPositioner {
    viewport: Viewport,
    geometry: OverlayGeometry,
    drag: DragState,
}

impl ViewportPositioner {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            geometry: OverlayGeometry::Uninitialized,
            drag: DragState::Idle,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn geometry(&self) -> OverlayGeometry {
        self.geometry
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Center the overlay if it has not been placed yet.
    pub fn initialize(&mut self, footprint: Footprint) -> bool {
        if self.geometry.is_positioned() {
            return false;
        }
        let x = self.viewport.width.saturating_sub(footprint.width) / 2;
        let y = self.viewport.height.saturating_sub(footprint.height) / 2;
        self.geometry = OverlayGeometry::Positioned { x, y };
        true
    }

    /// Grab the overlay at the given pointer cell.
    pub fn begin_drag(&mut self, column: u16, row: u16) -> bool {
        let Some((x, y)) = self.geometry.top_left() else {
            return false;
        };
        self.drag = DragState::Dragging(HeaderDrag {
            offset_x: i32::from(column) - i32::from(x),
            offset_y: i32::from(row) - i32::from(y),
        });
        true
    }

    /// Follow the pointer, clamping on every move. Returns whether the
    /// geometry changed.
    pub fn update_drag(&mut self, column: u16, row: u16, footprint: Footprint) -> bool {
        let DragState::Dragging(drag) = self.drag else {
            return false;
        };
        let candidate_x = i32::from(column) - drag.offset_x;
        let candidate_y = i32::from(row) - drag.offset_y;
        let next = OverlayGeometry::Positioned {
            x: clamp_axis(candidate_x, self.viewport.width, footprint.width),
            y: clamp_axis(candidate_y, self.viewport.height, footprint.height),
        };
        let moved = next != self.geometry;
        self.geometry = next;
        moved
    }

    /// Release the grab. Returns whether a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        let was_dragging = self.drag.is_active();
        self.drag = DragState::Idle;
        was_dragging
    }

    /// Forget the position so the next session re-centers.
    pub fn reset(&mut self) {
        self.geometry = OverlayGeometry::Uninitialized;
        self.drag = DragState::Idle;
    }

    /// Pull an existing position back inside the viewport for `footprint`.
    pub fn reclamp(&mut self, footprint: Footprint) -> bool {
        let Some((x, y)) = self.geometry.top_left() else {
            return false;
        };
        let next = OverlayGeometry::Positioned {
            x: clamp_axis(i32::from(x), self.viewport.width, footprint.width),
            y: clamp_axis(i32::from(y), self.viewport.height, footprint.height),
        };
        let moved = next != self.geometry;
        self.geometry = next;
        moved
    }

    pub fn set_viewport(&mut self, viewport: Viewport, footprint: Footprint) -> bool {
        self.viewport = viewport;
        self.reclamp(footprint)
    }

    /// On-screen rectangle, clipped to the viewport.
    pub fn rect(&self, footprint: Footprint) -> Option<Rect> {
        let (x, y) = self.geometry.top_left()?;
        Some(Rect {
            x,
            y,
            width: footprint.width.min(self.viewport.width.saturating_sub(x)),
            height: footprint.height.min(self.viewport.height.saturating_sub(y)),
        })
    }

    pub fn contains(&self, column: u16, row: u16, footprint: Footprint) -> bool {
        self.rect(footprint)
            .is_some_and(|rect| rect_contains(rect, column, row))
    }
}
