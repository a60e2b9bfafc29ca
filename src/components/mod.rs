use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod call_overlay;
pub mod participant_grid;
pub mod status_bar;

pub use call_overlay::{CallOverlayComponent, OverlayHit};
pub use participant_grid::ParticipantGridComponent;
pub use status_bar::StatusBar;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect);
}
