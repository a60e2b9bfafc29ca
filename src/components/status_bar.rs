use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// One-line bar along the bottom of the host screen: key hints on the left,
/// call status on the right.
pub struct StatusBar {
    left: String,
    right: String,
    style: Style,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            style: Style::default(),
        }
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Component for StatusBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let y = area.y;
        let x = area.x;
        let width = area.width as usize;
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        for cx in bounds.x..bounds.x.saturating_add(bounds.width) {
            if let Some(cell) = buffer.cell_mut((cx, y)) {
                cell.set_symbol(" ");
                cell.set_style(self.style);
            }
        }

        let left = truncate_to_width(&self.left, width);
        safe_set_string(buffer, bounds, x, y, &left, self.style);

        if !self.right.is_empty() && width > 0 {
            let right = truncate_to_width(&self.right, width);
            let right_width = right.chars().count();
            if right_width < width {
                let start_x = x.saturating_add((width - right_width) as u16);
                safe_set_string(buffer, bounds, start_x, y, &right, self.style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use ratatui::buffer::Buffer;

    #[test]
    fn renders_left_and_right_segments() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let mut s = StatusBar::new();
        s.set_left("keys");
        s.set_right("0:05");
        s.render(&mut frame, area);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "k");
        assert_eq!(buf.cell((16, 0)).unwrap().symbol(), "0");
        assert_eq!(buf.cell((19, 0)).unwrap().symbol(), "5");
    }
}
