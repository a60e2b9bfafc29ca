//! Responsive column arrangement for the participant grid.

use ratatui::prelude::{Constraint, Direction, Layout, Rect};

use crate::constants::WIDE_BREAKPOINT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Narrow,
    Wide,
}

impl WidthClass {
    pub fn for_width(width: u16, breakpoint: u16) -> Self {
        if width >= breakpoint {
            WidthClass::Wide
        } else {
            WidthClass::Narrow
        }
    }

    pub fn for_default_breakpoint(width: u16) -> Self {
        Self::for_width(width, WIDE_BREAKPOINT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u16,
    pub rows: u16,
}

pub fn columns(count: usize, class: WidthClass) -> u16 {
    match (count, class) {
        (0..=2, WidthClass::Narrow) => 1,
        (0..=2, WidthClass::Wide) => 2,
        (3..=4, _) => 2,
        (_, WidthClass::Narrow) => 2,
        (_, WidthClass::Wide) => 3,
    }
}

pub fn arrange(count: usize, class: WidthClass) -> GridLayout {
    let columns = columns(count, class);
    let rows = count.div_ceil(usize::from(columns));
    GridLayout {
        columns,
        rows: u16::try_from(rows).unwrap_or(u16::MAX),
    }
}

/// Split `area` into one tile per participant, row-major.
pub fn cells(area: Rect, count: usize, class: WidthClass) -> Vec<Rect> {
    if count == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let grid = arrange(count, class);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, u32::from(grid.rows)); grid.rows as usize])
        .split(area);
    let mut tiles = Vec::with_capacity(count);
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, u32::from(grid.columns));
                grid.columns as usize
            ])
            .split(*row);
        for col in cols.iter() {
            if tiles.len() == count {
                return tiles;
            }
            tiles.push(*col);
        }
    }
    tiles
}
