pub mod grid;
pub mod mode;
pub mod positioner;

pub use grid::{GridLayout, WidthClass};
pub use mode::{Footprint, FootprintTable, LayoutMode, LayoutModeController};
pub use positioner::{DragState, HeaderDrag, OverlayGeometry, ViewportPositioner, clamp_axis};

use ratatui::prelude::Rect;

/// Size of the host screen the overlay floats over, in cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl From<Rect> for Viewport {
    fn from(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::prelude::Rect;

    #[test]
    fn rect_contains_edge_cases() {
        let r = Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 5,
        };
        assert!(!rect_contains(r, 0, 0));
        let r2 = Rect {
            x: 1,
            y: 1,
            width: 3,
            height: 3,
        };
        assert!(rect_contains(r2, 1, 1));
        assert!(!rect_contains(r2, 4, 1));
    }

    #[test]
    fn viewport_from_rect_ignores_origin() {
        let v = Viewport::from(Rect::new(3, 4, 80, 24));
        assert_eq!(v, Viewport::new(80, 24));
    }
}
