//! Host screen loop: routes terminal input to a [`CallOverlay`] and renders
//! the overlay on top of whatever the host draws.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::actions::Action;
use crate::components::{CallOverlayComponent, Component, OverlayHit, StatusBar};
use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::KeyBindings;
use crate::layout::Viewport;
use crate::overlay::{CallControl, CallOverlay, OverlayChange};
use crate::session::{CallKind, CallTarget};
use crate::theme;
use crate::ui::UiFrame;

const HINT_ACTIONS: [Action; 7] = [
    Action::StartVideoCall,
    Action::StartVoiceCall,
    Action::ToggleMute,
    Action::ToggleCamera,
    Action::ToggleMinimize,
    Action::EndCall,
    Action::Quit,
];

/// Viewport the overlay may occupy: the terminal minus the status row.
pub fn overlay_viewport(width: u16, height: u16) -> Viewport {
    Viewport::new(width, height.saturating_sub(1))
}

pub trait HasCallOverlay {
    fn overlay(&mut self) -> &mut CallOverlay;
}

pub trait CallApp: HasCallOverlay {
    /// Who gets called when the user starts a call from the keyboard.
    fn call_target(&self) -> CallTarget;

    /// Draw the host screen underneath the overlay.
    fn render_host(&mut self, frame: &mut UiFrame<'_>, area: Rect);

    /// Called for every change drained from the overlay, in order.
    fn on_overlay_change(&mut self, _change: &OverlayChange) {}
}

/// Input routing and chrome shared by every host.
pub struct CallScreen {
    keys: KeyBindings,
    chrome: CallOverlayComponent,
    status: StatusBar,
}

impl CallScreen {
    pub fn new(keys: KeyBindings) -> Self {
        let mut status = StatusBar::new();
        status.set_style(
            Style::default()
                .fg(theme::status_fg())
                .bg(theme::status_bg()),
        );
        status.set_left(keys.hints(&HINT_ACTIONS).join("  "));
        Self {
            keys,
            chrome: CallOverlayComponent::new(),
            status,
        }
    }

    pub fn keys(&self) -> &KeyBindings {
        &self.keys
    }

    pub fn chrome(&self) -> &CallOverlayComponent {
        &self.chrome
    }

    pub fn handle_event<A: CallApp>(&mut self, app: &mut A, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) => match self.keys.action_for_key(key) {
                Some(action) => self.apply_action(app, action),
                None => ControlFlow::Continue,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    // Earlier events in the same burst may have moved the overlay.
                    self.chrome.set_view(app.overlay().view());
                    match self.chrome.hit_test(mouse.column, mouse.row) {
                        Some(hit) => self.apply_hit(app, hit),
                        None => {
                            app.overlay().pointer_down(mouse.column, mouse.row);
                            ControlFlow::Continue
                        }
                    }
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    app.overlay().pointer_move(mouse.column, mouse.row);
                    ControlFlow::Continue
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    app.overlay().pointer_up();
                    ControlFlow::Continue
                }
                _ => ControlFlow::Continue,
            },
            Event::Resize(width, height) => {
                app.overlay().resize(overlay_viewport(*width, *height));
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }

    pub fn apply_action<A: CallApp>(&mut self, app: &mut A, action: Action) -> ControlFlow {
        match action {
            Action::Quit => {
                app.overlay().end_call();
                return ControlFlow::Quit;
            }
            Action::StartVideoCall => {
                let target = app.call_target();
                app.overlay().open(CallKind::Video, target);
            }
            Action::StartVoiceCall => {
                let target = app.call_target();
                app.overlay().open(CallKind::Voice, target);
            }
            Action::EndCall => {
                app.overlay().end_call();
            }
            Action::ToggleMute => {
                app.overlay().toggle_mute();
            }
            Action::ToggleCamera => {
                app.overlay().toggle_camera();
            }
            Action::ToggleMinimize => {
                app.overlay().toggle_minimize();
            }
            Action::HangupPeer(n) => {
                let overlay = app.overlay();
                let id = usize::from(n)
                    .checked_sub(1)
                    .and_then(|index| overlay.participants().get(index).map(|p| p.id.clone()));
                if let Some(id) = id {
                    overlay.request_peer_hangup(&id);
                }
            }
        }
        ControlFlow::Continue
    }

    pub fn apply_hit<A: CallApp>(&mut self, app: &mut A, hit: OverlayHit) -> ControlFlow {
        let action = match hit {
            OverlayHit::Minimize => Action::ToggleMinimize,
            OverlayHit::Close | OverlayHit::Control(CallControl::EndCall) => Action::EndCall,
            OverlayHit::Control(CallControl::Mute) => Action::ToggleMute,
            OverlayHit::Control(CallControl::Camera) => Action::ToggleCamera,
        };
        self.apply_action(app, action)
    }

    /// Hand lease changes to the driver and overlay changes to the host.
    pub fn flush<A, D>(&mut self, app: &mut A, driver: &mut D) -> io::Result<()>
    where
        A: CallApp,
        D: InputDriver,
    {
        if let Some(held) = app.overlay().take_pointer_capture_change() {
            driver.set_pointer_tracking(held)?;
        }
        for change in app.overlay().drain_changes() {
            if change == OverlayChange::Ended {
                self.chrome.set_view(None);
            }
            app.on_overlay_change(&change);
        }
        Ok(())
    }

    pub fn draw<A: CallApp>(&mut self, frame: &mut UiFrame<'_>, app: &mut A) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let host = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        let status_row = Rect::new(area.x, area.y.saturating_add(host.height), area.width, 1);
        app.render_host(frame, host);

        let overlay = app.overlay();
        let right = match overlay.session() {
            Some(session) => {
                let mut text = format!("{} call · {}", session.kind, overlay.formatted_duration());
                if overlay.media().muted() {
                    text.push_str(" · muted");
                }
                text
            }
            None => "no call".to_string(),
        };
        self.status.set_right(right);
        self.status.render(frame, status_row);

        self.chrome.set_view(overlay.view());
        self.chrome.render(frame, area);
    }
}

/// Run the host screen until the user quits.
pub fn run_call_app<B, D, A>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    app: &mut A,
    keys: KeyBindings,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
    A: CallApp,
{
    let size = terminal
        .size()
        .map_err(|e| io::Error::other(e.to_string()))?;
    app.overlay().resize(overlay_viewport(size.width, size.height));

    let mut screen = CallScreen::new(keys);
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|driver, event| {
        let flow = match event {
            Some(evt) => screen.handle_event(app, &evt),
            None => {
                app.overlay().tick();
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        screen.draw(&mut ui, app);
                    })
                    .map_err(|e| io::Error::other(e.to_string()))?;
                ControlFlow::Continue
            }
        };
        screen.flush(app, driver)?;
        Ok(flow)
    });

    screen.flush(app, event_loop.driver())?;
    event_loop.driver().set_mouse_capture(false)?;
    result
}
