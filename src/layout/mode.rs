use crate::constants::{EXPANDED_HEIGHT, EXPANDED_WIDTH, MINIMIZED_HEIGHT, MINIMIZED_WIDTH};

/// Rendered size of the overlay in one layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub width: u16,
    pub height: u16,
}

impl Footprint {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    #[default]
    Expanded,
    Minimized,
}

impl LayoutMode {
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::Expanded => LayoutMode::Minimized,
            LayoutMode::Minimized => LayoutMode::Expanded,
        }
    }

    pub fn is_minimized(self) -> bool {
        matches!(self, LayoutMode::Minimized)
    }
}

/// The one place that maps a layout mode to its footprint.
///
/// Both the mode controller and the positioner read sizes from here, so clamp
/// bounds and the rendered rectangle cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootprintTable {
    pub expanded: Footprint,
    pub minimized: Footprint,
}

impl Default for FootprintTable {
    fn default() -> Self {
        Self {
            expanded: Footprint::new(EXPANDED_WIDTH, EXPANDED_HEIGHT),
            minimized: Footprint::new(MINIMIZED_WIDTH, MINIMIZED_HEIGHT),
        }
    }
}

impl FootprintTable {
    pub fn for_mode(&self, mode: LayoutMode) -> Footprint {
        match mode {
            LayoutMode::Expanded => self.expanded,
            LayoutMode::Minimized => self.minimized,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutModeController {
    mode: LayoutMode,
    table: FootprintTable,
}

impl LayoutModeController {
    pub fn new(table: FootprintTable) -> Self {
        Self {
            mode: LayoutMode::Expanded,
            table,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn table(&self) -> &FootprintTable {
        &self.table
    }

    pub fn footprint(&self) -> Footprint {
        self.table.for_mode(self.mode)
    }

    pub fn toggle(&mut self) -> LayoutMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn reset(&mut self) {
        self.mode = LayoutMode::Expanded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut ctl = LayoutModeController::default();
        let before = ctl.footprint();
        assert_eq!(ctl.toggle(), LayoutMode::Minimized);
        assert_ne!(ctl.footprint(), before);
        assert_eq!(ctl.toggle(), LayoutMode::Expanded);
        assert_eq!(ctl.footprint(), before);
    }

    #[test]
    fn minimized_footprint_is_compact() {
        let table = FootprintTable::default();
        let e = table.for_mode(LayoutMode::Expanded);
        let m = table.for_mode(LayoutMode::Minimized);
        assert!(m.width < e.width && m.height < e.height);
    }
}
