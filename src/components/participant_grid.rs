//! Remote participant tiles for group calls.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear};

use crate::layout::grid::{self, WidthClass};
use crate::media::Participant;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, Clone)]
pub struct ParticipantGridComponent {
    participants: Vec<Participant>,
    class: WidthClass,
}

impl Default for ParticipantGridComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticipantGridComponent {
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            class: WidthClass::Narrow,
        }
    }

    pub fn set_participants(&mut self, participants: Vec<Participant>, class: WidthClass) {
        self.participants = participants;
        self.class = class;
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    fn render_tile(frame: &mut UiFrame<'_>, tile: Rect, participant: &Participant) {
        frame.render_widget(Clear, tile);
        let quality = theme::quality(participant.connection_quality);
        let block = Block::default()
            .title(participant.display_name.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::muted_fg()));
        let inner = block.inner(tile);
        frame.render_widget(block, tile);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Quality dot in the top-right corner of the border.
        let dot_x = tile.x.saturating_add(tile.width.saturating_sub(2));
        frame.set_string(dot_x, tile.y, "●", Style::default().fg(quality));

        let mid = inner.y.saturating_add(inner.height.saturating_sub(1) / 2);
        if participant.stream.is_some() && participant.video_on {
            frame.set_centered(
                inner,
                mid,
                "▶ live video",
                Style::default().fg(theme::overlay_fg()),
            );
        } else {
            frame.set_centered(
                inner,
                mid,
                &participant.initials(),
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            );
            if inner.height > 2 {
                frame.set_centered(
                    inner,
                    mid.saturating_add(1),
                    "Camera off",
                    Style::default().fg(theme::muted_fg()),
                );
            }
        }

        let mut badges = vec![participant.connection_quality.label().to_string()];
        if !participant.video_on {
            badges.push("Camera Off".to_string());
        }
        if !participant.audio_on {
            badges.push("Muted".to_string());
        }
        let bottom = inner.y.saturating_add(inner.height.saturating_sub(1));
        if inner.height > 1 {
            frame.set_string(
                inner.x,
                bottom,
                &badges.join(" · "),
                Style::default().fg(quality),
            );
        }
    }
}

impl super::Component for ParticipantGridComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.participants.is_empty() {
            let mid = area.y.saturating_add(area.height / 2);
            frame.set_centered(
                area,
                mid,
                "Waiting for participants…",
                Style::default().fg(theme::muted_fg()),
            );
            return;
        }
        let tiles = grid::cells(area, self.participants.len(), self.class);
        for (tile, participant) in tiles.iter().zip(&self.participants) {
            Self::render_tile(frame, *tile, participant);
        }
    }
}
