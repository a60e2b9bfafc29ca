//! Call session overlay controller.
//!
//! `CallOverlay` is what a host screen mounts. It owns one optional
//! [`CallSession`] plus every piece of presentation state that belongs to it:
//! the duration timer, the overlay position and drag grab, the layout mode,
//! the local media toggles and the pointer capture lease. Every operation is
//! total; operations that make no sense in the current state are no-ops.
//!
//! The host learns about state changes by draining [`OverlayChange`]s after
//! dispatching input or ticking the timer, and re-renders from
//! [`CallOverlay::view`].

use std::sync::Arc;
use std::time::Duration;

use ratatui::prelude::Rect;

use crate::constants::{HEADER_ROWS, TICK_PERIOD, WIDE_BREAKPOINT};
use crate::layout::grid::{self, GridLayout, WidthClass};
use crate::layout::{
    DragState, Footprint, FootprintTable, LayoutMode, LayoutModeController, OverlayGeometry,
    Viewport, ViewportPositioner,
};
use crate::media::{MediaToggleState, Participant};
use crate::session::{
    CallKind, CallSession, CallTarget, SessionStatus, SessionTimer, format_duration,
};
use crate::state::PointerCapture;
use crate::utils::clock::{Clock, default_clock};

/// Tunables for one overlay instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayConfig {
    pub footprints: FootprintTable,
    pub tick_period: Duration,
    pub wide_breakpoint: u16,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            footprints: FootprintTable::default(),
            tick_period: TICK_PERIOD,
            wide_breakpoint: WIDE_BREAKPOINT,
        }
    }
}

/// Notification for the host that something it renders has changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayChange {
    Opened(CallKind),
    Ended,
    Tick(u64),
    Moved,
    LayoutModeChanged(LayoutMode),
    MediaChanged(MediaToggleState),
    ParticipantsChanged,
    PeerHangupRequested(String),
    ViewportChanged(Viewport),
}

/// What fills the body of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Looping local camera preview.
    LocalPreview,
    /// Large contact avatar with the online badge.
    ContactAvatar,
    /// Side-by-side contact/self thumbnails in the minimized overlay.
    Thumbnails,
    /// Pulsing microphone indicator in the minimized overlay.
    VoiceIndicator,
    /// Remote participant tiles for a group call.
    ParticipantGrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallControl {
    Mute,
    Camera,
    EndCall,
}

/// Derived presentation state, recomputed on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub kind: CallKind,
    pub mode: LayoutMode,
    pub rect: Rect,
    pub title: String,
    pub initials: String,
    pub online: bool,
    pub duration: String,
    pub surface: Surface,
    pub show_pip: bool,
    pub controls: Vec<CallControl>,
    pub muted: bool,
    pub camera_off: bool,
    pub dragging: bool,
    pub grid: Option<GridLayout>,
    pub width_class: WidthClass,
    pub participants: Vec<Participant>,
}

pub struct CallOverlay {
    config: OverlayConfig,
    clock: Arc<dyn Clock>,
    session: Option<CallSession>,
    timer: SessionTimer,
    positioner: ViewportPositioner,
    layout: LayoutModeController,
    media: MediaToggleState,
    capture: PointerCapture,
    changes: Vec<OverlayChange>,
}

impl std::fmt::Debug for CallOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallOverlay")
            .field("session", &self.session)
            .field("elapsed", &self.timer.elapsed_secs())
            .field("geometry", &self.positioner.geometry())
            .field("mode", &self.layout.mode())
            .field("media", &self.media)
            .finish()
    }
}

impl CallOverlay {
    pub fn new(config: OverlayConfig, viewport: Viewport) -> Self {
        Self::with_clock(config, viewport, default_clock())
    }

    pub fn with_clock(config: OverlayConfig, viewport: Viewport, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            session: None,
            timer: SessionTimer::new(config.tick_period),
            positioner: ViewportPositioner::new(viewport),
            layout: LayoutModeController::new(config.footprints),
            media: MediaToggleState::default(),
            capture: PointerCapture::new(),
            changes: Vec::new(),
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(CallSession::is_active)
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&CallSession> {
        self.session.as_ref().filter(|s| s.is_active())
    }

    /// The most recent session once it has ended. Kept until the next open.
    pub fn ended_session(&self) -> Option<&CallSession> {
        self.session.as_ref().filter(|s| !s.is_active())
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.timer.elapsed_secs())
    }

    pub fn mode(&self) -> LayoutMode {
        self.layout.mode()
    }

    pub fn footprint(&self) -> Footprint {
        self.layout.footprint()
    }

    pub fn geometry(&self) -> OverlayGeometry {
        self.positioner.geometry()
    }

    pub fn drag_state(&self) -> DragState {
        self.positioner.drag_state()
    }

    pub fn media(&self) -> MediaToggleState {
        self.media
    }

    pub fn viewport(&self) -> Viewport {
        self.positioner.viewport()
    }

    pub fn pointer_capture_held(&self) -> bool {
        self.capture.is_held()
    }

    /// Lease changes the host must apply to its input driver.
    pub fn take_pointer_capture_change(&mut self) -> Option<bool> {
        self.capture.take_change()
    }

    pub fn drain_changes(&mut self) -> Vec<OverlayChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Start a session. Opening while another session is active ends that
    /// session first, so there is only ever one timer source.
    pub fn open(&mut self, kind: CallKind, target: impl Into<CallTarget>) {
        if self.is_active() {
            tracing::info!("replacing active call session");
            self.end_call();
        }
        let target = target.into();
        let now = self.clock.now();
        tracing::info!(%kind, title = %target.title(), "opening call overlay");
        self.session = Some(CallSession::new(kind, target, now));
        self.media.reset();
        self.layout.reset();
        self.timer.start(now);
        self.positioner.initialize(self.layout.footprint());
        self.changes.push(OverlayChange::Opened(kind));
    }

    /// End the session from any sub-state. Returns `false` when no session
    /// was active.
    pub fn end_call(&mut self) -> bool {
        let Some(session) = self.session.as_mut().filter(|s| s.is_active()) else {
            return false;
        };
        session.status = SessionStatus::Ended;
        tracing::info!(
            kind = %session.kind,
            elapsed_secs = self.timer.elapsed_secs(),
            "ending call"
        );
        self.release_session_resources();
        self.changes.push(OverlayChange::Ended);
        true
    }

    fn release_session_resources(&mut self) {
        self.timer.stop();
        if self.positioner.end_drag() {
            tracing::debug!("drag cancelled by session teardown");
        }
        self.capture.release();
        self.positioner.reset();
        self.media.reset();
        self.layout.reset();
    }

    /// Advance the duration timer against the clock.
    pub fn tick(&mut self) -> u32 {
        let fired = self.timer.advance(self.clock.now());
        if fired > 0 {
            self.changes
                .push(OverlayChange::Tick(self.timer.elapsed_secs()));
        }
        fired
    }

    pub fn toggle_minimize(&mut self) -> Option<LayoutMode> {
        if !self.is_active() {
            return None;
        }
        let mode = self.layout.toggle();
        tracing::debug!(?mode, "layout mode changed");
        self.changes.push(OverlayChange::LayoutModeChanged(mode));
        if self.positioner.reclamp(self.layout.footprint()) {
            self.changes.push(OverlayChange::Moved);
        }
        Some(mode)
    }

    pub fn toggle_mute(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.media.toggle_mute();
        self.changes.push(OverlayChange::MediaChanged(self.media));
        true
    }

    /// Flip the local camera. Voice sessions have no camera control.
    pub fn toggle_camera(&mut self) -> bool {
        let Some(session) = self.session() else {
            return false;
        };
        if !session.kind.is_video() {
            return false;
        }
        self.media.toggle_camera();
        self.changes.push(OverlayChange::MediaChanged(self.media));
        true
    }

    /// Screen rectangle of the overlay, if open and placed.
    pub fn rect(&self) -> Option<Rect> {
        if !self.is_active() {
            return None;
        }
        self.positioner.rect(self.layout.footprint())
    }

    /// The draggable strip along the top of the overlay.
    pub fn header_rect(&self) -> Option<Rect> {
        let rect = self.rect()?;
        Some(Rect {
            height: rect.height.min(HEADER_ROWS),
            ..rect
        })
    }

    /// Pointer pressed. Starts a drag when the press lands on the header.
    pub fn pointer_down(&mut self, column: u16, row: u16) -> bool {
        let Some(header) = self.header_rect() else {
            return false;
        };
        if !crate::layout::rect_contains(header, column, row) {
            return false;
        }
        if !self.positioner.begin_drag(column, row) {
            return false;
        }
        self.capture.acquire();
        tracing::debug!(column, row, "overlay drag started");
        true
    }

    pub fn pointer_move(&mut self, column: u16, row: u16) -> bool {
        if !self.positioner.is_dragging() {
            return false;
        }
        let moved = self
            .positioner
            .update_drag(column, row, self.layout.footprint());
        if moved {
            self.changes.push(OverlayChange::Moved);
        }
        moved
    }

    pub fn pointer_up(&mut self) -> bool {
        if !self.positioner.end_drag() {
            return false;
        }
        self.capture.release();
        tracing::debug!(geometry = ?self.positioner.geometry(), "overlay drag ended");
        true
    }

    /// The host screen changed size.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.positioner.viewport() {
            return;
        }
        let moved = self
            .positioner
            .set_viewport(viewport, self.layout.footprint());
        tracing::debug!(width = viewport.width, height = viewport.height, moved, "viewport resized");
        self.changes.push(OverlayChange::ViewportChanged(viewport));
        if moved {
            self.changes.push(OverlayChange::Moved);
        }
    }

    /// Replace the participant list supplied by the signaling layer.
    pub fn update_participants(&mut self, participants: Vec<Participant>) -> bool {
        let Some(session) = self.session.as_mut().filter(|s| s.is_active()) else {
            return false;
        };
        match &mut session.target {
            CallTarget::Participants(list) => {
                *list = participants;
                self.changes.push(OverlayChange::ParticipantsChanged);
                true
            }
            CallTarget::Contact(_) => {
                tracing::debug!("ignoring participant update for a one-to-one call");
                false
            }
        }
    }

    pub fn participants(&self) -> &[Participant] {
        self.session()
            .map(|s| s.target.participants())
            .unwrap_or(&[])
    }

    /// Ask the signaling layer to drop one remote participant. The list
    /// itself only changes when the signaling layer sends an update.
    pub fn request_peer_hangup(&mut self, id: &str) -> bool {
        if !self.participants().iter().any(|p| p.id == id) {
            return false;
        }
        tracing::info!(peer = id, "peer hangup requested");
        self.changes
            .push(OverlayChange::PeerHangupRequested(id.to_string()));
        true
    }

    pub fn width_class(&self) -> WidthClass {
        WidthClass::for_width(self.positioner.viewport().width, self.config.wide_breakpoint)
    }

    pub fn grid_layout(&self) -> Option<GridLayout> {
        match self.session().map(|s| &s.target) {
            Some(CallTarget::Participants(list)) => {
                Some(grid::arrange(list.len(), self.width_class()))
            }
            _ => None,
        }
    }

    pub fn view(&self) -> Option<OverlayView> {
        let session = self.session()?;
        let rect = self.rect()?;
        let mode = self.layout.mode();
        let camera_on = session.kind.is_video() && !self.media.camera_off();
        let group = matches!(session.target, CallTarget::Participants(_));
        let surface = match (mode, group, camera_on) {
            (LayoutMode::Expanded, true, _) => Surface::ParticipantGrid,
            (LayoutMode::Expanded, false, true) => Surface::LocalPreview,
            (LayoutMode::Expanded, false, false) => Surface::ContactAvatar,
            (LayoutMode::Minimized, _, true) => Surface::Thumbnails,
            (LayoutMode::Minimized, _, false) => Surface::VoiceIndicator,
        };
        let mut controls = vec![CallControl::Mute];
        if session.kind.is_video() {
            controls.push(CallControl::Camera);
        }
        controls.push(CallControl::EndCall);
        let (initials, online) = match &session.target {
            CallTarget::Contact(contact) => (contact.initials(), contact.online),
            CallTarget::Participants(list) => (
                list.first().map(Participant::initials).unwrap_or_default(),
                !list.is_empty(),
            ),
        };
        Some(OverlayView {
            kind: session.kind,
            mode,
            rect,
            title: session.target.title(),
            initials,
            online,
            duration: self.formatted_duration(),
            surface,
            show_pip: surface == Surface::LocalPreview,
            controls,
            muted: self.media.muted(),
            camera_off: self.media.camera_off(),
            dragging: self.positioner.is_dragging(),
            grid: self.grid_layout(),
            width_class: self.width_class(),
            participants: session.target.participants().to_vec(),
        })
    }
}

impl Drop for CallOverlay {
    fn drop(&mut self) {
        if self.is_active() || self.timer.is_running() || self.capture.is_held() {
            tracing::debug!("tearing down call overlay with live session resources");
            if let Some(session) = self.session.as_mut().filter(|s| s.is_active()) {
                session.status = SessionStatus::Ended;
            }
            self.release_session_resources();
        }
    }
}
