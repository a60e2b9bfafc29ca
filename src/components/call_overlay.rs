//! Renders an [`OverlayView`] as a floating bordered panel and maps clicks on
//! its buttons back to actions.
//!
//! Row layout inside the footprint (top to bottom): border, header, body,
//! controls, border. The header row doubles as the drag handle.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear};

use crate::layout::{LayoutMode, rect_contains};
use crate::overlay::{CallControl, OverlayView, Surface};
use crate::theme;
use crate::ui::UiFrame;

use super::{Component, ParticipantGridComponent};

const CLOSE_LABEL: &str = "[x]";
const MINIMIZE_LABEL: &str = "[_]";
const EXPAND_LABEL: &str = "[+]";

/// A clickable region of the rendered overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayHit {
    Minimize,
    Close,
    Control(CallControl),
}

#[derive(Debug, Default)]
pub struct CallOverlayComponent {
    view: Option<OverlayView>,
    hits: Vec<(Rect, OverlayHit)>,
    grid: ParticipantGridComponent,
}

impl CallOverlayComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the view and rebuild the button regions from its geometry, so
    /// hit tests track the overlay between renders.
    pub fn set_view(&mut self, view: Option<OverlayView>) {
        self.hits = view.as_ref().map(Self::button_regions).unwrap_or_default();
        self.view = view;
    }

    pub fn view(&self) -> Option<&OverlayView> {
        self.view.as_ref()
    }

    /// Button under the given cell for the current view.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<OverlayHit> {
        self.hits
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, hit)| *hit)
    }

    /// Header, body and controls rows inside the border. `None` when the
    /// footprint is too small to draw.
    fn panel_rows(rect: Rect) -> Option<(Rect, Rect, Rect)> {
        if rect.width < 8 || rect.height < 4 {
            return None;
        }
        let inner = Block::default().borders(Borders::ALL).inner(rect);
        let header = Rect::new(inner.x, inner.y, inner.width, 1);
        let body = Rect::new(
            inner.x,
            inner.y.saturating_add(1),
            inner.width,
            inner.height.saturating_sub(2),
        );
        let controls = Rect::new(
            inner.x,
            inner.y.saturating_add(inner.height.saturating_sub(1)),
            inner.width,
            1,
        );
        Some((header, body, controls))
    }

    /// Columns of the close and minimize buttons on the header row.
    fn header_buttons(row: Rect) -> (u16, u16) {
        let close_x = row.x.saturating_add(row.width.saturating_sub(3));
        (close_x, close_x.saturating_sub(4))
    }

    fn control_slots(view: &OverlayView, row: Rect) -> Vec<(CallControl, String, Rect)> {
        let labels: Vec<(CallControl, String)> = view
            .controls
            .iter()
            .map(|c| (*c, format!(" {} ", Self::control_label(view, *c))))
            .collect();
        let total: usize = labels.iter().map(|(_, l)| l.chars().count()).sum::<usize>()
            + labels.len().saturating_sub(1);
        let mut x = row
            .x
            .saturating_add(row.width.saturating_sub(total as u16) / 2);
        labels
            .into_iter()
            .map(|(control, label)| {
                let width = label.chars().count() as u16;
                let slot = Rect::new(x, row.y, width, 1);
                x = x.saturating_add(width + 1);
                (control, label, slot)
            })
            .collect()
    }

    fn button_regions(view: &OverlayView) -> Vec<(Rect, OverlayHit)> {
        let Some((header, _, controls)) = Self::panel_rows(view.rect) else {
            return Vec::new();
        };
        let (close_x, minimize_x) = Self::header_buttons(header);
        let mut hits = vec![
            (Rect::new(close_x, header.y, 3, 1), OverlayHit::Close),
            (Rect::new(minimize_x, header.y, 3, 1), OverlayHit::Minimize),
        ];
        hits.extend(
            Self::control_slots(view, controls)
                .into_iter()
                .map(|(control, _, slot)| (slot, OverlayHit::Control(control))),
        );
        hits
    }

    fn control_label(view: &OverlayView, control: CallControl) -> &'static str {
        match control {
            CallControl::Mute if view.muted => "Unmute",
            CallControl::Mute => "Mute",
            CallControl::Camera if view.camera_off => "Camera on",
            CallControl::Camera => "Camera off",
            CallControl::EndCall => "End",
        }
    }

    fn control_style(view: &OverlayView, control: CallControl) -> Style {
        let active = match control {
            CallControl::Mute => view.muted,
            CallControl::Camera => view.camera_off,
            CallControl::EndCall => true,
        };
        let bg = if active {
            theme::control_active_bg()
        } else {
            theme::control_bg()
        };
        Style::default().fg(theme::overlay_fg()).bg(bg)
    }

    fn render_header(&self, frame: &mut UiFrame<'_>, view: &OverlayView, row: Rect) {
        let style = Style::default().fg(theme::header_fg()).bg(theme::header_bg());
        let blank = " ".repeat(row.width as usize);
        frame.set_string(row.x, row.y, &blank, style);

        let (close_x, minimize_x) = Self::header_buttons(row);
        let toggle_label = match view.mode {
            LayoutMode::Expanded => MINIMIZE_LABEL,
            LayoutMode::Minimized => EXPAND_LABEL,
        };
        frame.set_string(close_x, row.y, CLOSE_LABEL, style.fg(theme::danger()));
        frame.set_string(minimize_x, row.y, toggle_label, style);

        let duration_x = minimize_x.saturating_sub(view.duration.chars().count() as u16 + 1);
        frame.set_string(duration_x, row.y, &view.duration, style);

        let badge = if view.online { "●" } else { "○" };
        let badge_style = if view.online {
            style.fg(theme::online())
        } else {
            style.fg(theme::muted_fg())
        };
        frame.set_string(row.x, row.y, badge, badge_style);
        let title_x = row.x.saturating_add(2);
        let title_room = duration_x.saturating_sub(title_x).saturating_sub(1);
        let title: String = view.title.chars().take(title_room as usize).collect();
        frame.set_string(title_x, row.y, &title, style.add_modifier(Modifier::BOLD));
    }

    fn render_body(&mut self, frame: &mut UiFrame<'_>, view: &OverlayView, body: Rect) {
        if body.width == 0 || body.height == 0 {
            return;
        }
        let mid = body.y.saturating_add(body.height.saturating_sub(1) / 2);
        let fg = Style::default().fg(theme::overlay_fg());
        let dim = Style::default().fg(theme::muted_fg());
        let initials = Style::default()
            .fg(theme::accent())
            .add_modifier(Modifier::BOLD);
        match view.surface {
            Surface::LocalPreview => {
                frame.set_centered(body, mid, "◉ Your camera", fg);
                if view.show_pip {
                    Self::render_pip(frame, view, body);
                }
            }
            Surface::ContactAvatar => {
                frame.set_centered(body, mid, &format!("( {} )", view.initials), initials);
                let status = if view.camera_off {
                    "Camera off"
                } else if view.kind.is_video() {
                    "Connecting video…"
                } else {
                    "Voice call"
                };
                if body.height > 2 {
                    frame.set_centered(body, mid.saturating_add(1), status, dim);
                }
            }
            Surface::Thumbnails => {
                let half = body.width / 2;
                let left = Rect::new(body.x, body.y, half, body.height);
                let right = Rect::new(
                    body.x.saturating_add(half),
                    body.y,
                    body.width - half,
                    body.height,
                );
                frame.set_centered(left, mid, &view.initials, initials);
                frame.set_centered(right, mid, "You", fg);
            }
            Surface::VoiceIndicator => {
                // Alternate the glyph every second so the indicator pulses.
                let glyph = if view.duration.ends_with(['0', '2', '4', '6', '8']) {
                    "mic ●"
                } else {
                    "mic ○"
                };
                let label = if view.muted { "mic muted" } else { glyph };
                frame.set_centered(body, mid, label, fg);
            }
            Surface::ParticipantGrid => {
                self.grid
                    .set_participants(view.participants.clone(), view.width_class);
                self.grid.render(frame, body);
            }
        }
    }

    fn render_pip(frame: &mut UiFrame<'_>, view: &OverlayView, body: Rect) {
        let width = 12.min(body.width);
        let height = 4.min(body.height);
        if width < 4 || height < 3 {
            return;
        }
        let pip = Rect::new(
            body.x.saturating_add(body.width - width),
            body.y.saturating_add(body.height - height),
            width,
            height,
        );
        frame.render_widget(Clear, pip);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::muted_fg()));
        let inner = block.inner(pip);
        frame.render_widget(block, pip);
        frame.set_centered(
            inner,
            inner.y,
            &view.initials,
            Style::default().fg(theme::accent()),
        );
    }

    fn render_controls(&self, frame: &mut UiFrame<'_>, view: &OverlayView, row: Rect) {
        for (control, label, slot) in Self::control_slots(view, row) {
            frame.set_string(slot.x, slot.y, &label, Self::control_style(view, control));
        }
    }
}

impl Component for CallOverlayComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, _area: Rect) {
        let Some(view) = self.view.take() else {
            return;
        };
        self.hits = Self::button_regions(&view);
        let Some((header, body, controls)) = Self::panel_rows(view.rect) else {
            self.view = Some(view);
            return;
        };
        frame.render_widget(Clear, view.rect);
        let border = if view.dragging {
            theme::overlay_border_dragging()
        } else {
            theme::overlay_border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme::overlay_bg()));
        frame.render_widget(block, view.rect);

        self.render_header(frame, &view, header);
        self.render_body(frame, &view, body);
        self.render_controls(frame, &view, controls);
        self.view = Some(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use crate::overlay::{CallOverlay, OverlayConfig};
    use crate::session::{CallKind, ContactIdentity};
    use ratatui::buffer::Buffer;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    fn render(overlay: &CallOverlay) -> (CallOverlayComponent, Buffer) {
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        let mut comp = CallOverlayComponent::new();
        comp.set_view(overlay.view());
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            comp.render(&mut frame, area);
        }
        (comp, buf)
    }

    #[test]
    fn header_shows_title_and_duration() {
        let mut o = CallOverlay::new(OverlayConfig::default(), Viewport::new(120, 40));
        o.open(CallKind::Video, ContactIdentity::new("Ada Lovelace"));
        let (_, buf) = render(&o);
        let header = row_text(&buf, 10);
        assert!(header.contains("Ada Lovelace"), "{header}");
        assert!(header.contains("0:00"), "{header}");
        assert!(header.contains(CLOSE_LABEL));
        assert!(header.contains(MINIMIZE_LABEL));
    }

    #[test]
    fn hit_test_finds_header_and_control_buttons() {
        let mut o = CallOverlay::new(OverlayConfig::default(), Viewport::new(120, 40));
        o.open(CallKind::Video, ContactIdentity::new("Ada Lovelace"));
        let (comp, buf) = render(&o);
        let rect = o.rect().unwrap();
        let close_x = rect.x + rect.width - 4;
        assert_eq!(comp.hit_test(close_x, rect.y + 1), Some(OverlayHit::Close));
        assert_eq!(
            comp.hit_test(close_x - 4, rect.y + 1),
            Some(OverlayHit::Minimize)
        );

        let controls_y = rect.y + rect.height - 2;
        let row = row_text(&buf, controls_y);
        let byte = row.find(" Mute ").unwrap();
        let mute_x = row[..byte].chars().count() as u16;
        assert_eq!(
            comp.hit_test(mute_x + 1, controls_y),
            Some(OverlayHit::Control(CallControl::Mute))
        );
        assert!(row.contains(" Camera off "));
        assert!(row.contains(" End "));
        assert_eq!(comp.hit_test(0, 0), None);
    }

    #[test]
    fn voice_call_omits_camera_button() {
        let mut o = CallOverlay::new(OverlayConfig::default(), Viewport::new(120, 40));
        o.open(CallKind::Voice, ContactIdentity::new("Ada Lovelace"));
        let (_, buf) = render(&o);
        let rect = o.rect().unwrap();
        let row = row_text(&buf, rect.y + rect.height - 2);
        assert!(row.contains(" Mute "));
        assert!(!row.contains("Camera"));
    }

    #[test]
    fn clearing_the_view_drops_hit_regions() {
        let mut o = CallOverlay::new(OverlayConfig::default(), Viewport::new(120, 40));
        o.open(CallKind::Video, ContactIdentity::new("Ada Lovelace"));
        let (mut comp, _) = render(&o);
        let rect = o.rect().unwrap();
        comp.set_view(None);
        assert_eq!(comp.hit_test(rect.x + rect.width - 4, rect.y + 1), None);
    }

    #[test]
    fn new_view_moves_hit_regions_without_a_render() {
        let mut o = CallOverlay::new(OverlayConfig::default(), Viewport::new(120, 40));
        o.open(CallKind::Video, ContactIdentity::new("Ada Lovelace"));
        let (mut comp, _) = render(&o);
        let before = o.rect().unwrap();

        o.toggle_minimize();
        comp.set_view(o.view());
        let after = o.rect().unwrap();
        assert_ne!(before, after);

        let close_x = after.x + after.width - 4;
        assert_eq!(comp.hit_test(close_x, after.y + 1), Some(OverlayHit::Close));
        assert_eq!(
            comp.hit_test(close_x - 4, after.y + 1),
            Some(OverlayHit::Minimize)
        );
        assert_eq!(
            comp.hit_test(before.x + before.width - 4, before.y + 1),
            None
        );
    }
}
