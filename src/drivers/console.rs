use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::style::Print;

use super::InputDriver;
use super::keyboard::KeyboardNormalizer;

/// xterm "button-event tracking": motion is reported only while a button is
/// held. On for the lifetime of a header drag.
const BUTTON_MOTION_ON: &str = "\x1b[?1002h";
/// xterm and VTE hold a single tracking mode, and resetting any of 1000, 1002
/// or 1003 switches reporting off entirely. Every reset is therefore followed
/// by re-selecting click-only tracking (1000).
const CLICK_ONLY: &str = "\x1b[?1003l\x1b[?1002l\x1b[?1000h";

pub struct ConsoleInputDriver<W: Write = io::Stdout> {
    out: W,
    normalizer: KeyboardNormalizer,
    event_queue: VecDeque<Event>,
    mouse_capture: bool,
    pointer_tracking: bool,
}

impl Default for ConsoleInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> ConsoleInputDriver<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            normalizer: KeyboardNormalizer::new(),
            event_queue: VecDeque::new(),
            mouse_capture: false,
            pointer_tracking: false,
        }
    }

    pub fn pointer_tracking(&self) -> bool {
        self.pointer_tracking
    }

    pub fn mouse_capture(&self) -> bool {
        self.mouse_capture
    }

    /// Queue an event ahead of the terminal. Used to inject synthetic input.
    pub fn push_event(&mut self, evt: Event) {
        self.event_queue.push_back(evt);
    }

    fn read_internal(&mut self) -> io::Result<Event> {
        loop {
            let evt = crossterm::event::read()?;
            if let Some(normalized) = self.normalizer.normalize(evt) {
                return Ok(normalized);
            }
        }
    }
}

impl<W: Write> InputDriver for ConsoleInputDriver<W> {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.event_queue.is_empty() {
            return Ok(true);
        }
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        if let Some(evt) = self.event_queue.pop_front() {
            return Ok(evt);
        }
        self.read_internal()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled == self.mouse_capture {
            return Ok(());
        }
        if enabled {
            execute!(self.out, EnableMouseCapture, Print(CLICK_ONLY))?;
        } else {
            execute!(self.out, DisableMouseCapture)?;
            self.pointer_tracking = false;
        }
        self.mouse_capture = enabled;
        Ok(())
    }

    fn set_pointer_tracking(&mut self, enabled: bool) -> io::Result<()> {
        if enabled == self.pointer_tracking || !self.mouse_capture {
            return Ok(());
        }
        let seq = if enabled { BUTTON_MOTION_ON } else { CLICK_ONLY };
        execute!(self.out, Print(seq))?;
        tracing::trace!(enabled, "pointer tracking");
        self.pointer_tracking = enabled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

    fn captured(d: &ConsoleInputDriver<Vec<u8>>) -> String {
        String::from_utf8_lossy(&d.out).into_owned()
    }

    #[test]
    fn poll_and_read_from_queue() {
        let mut d = ConsoleInputDriver::with_writer(Vec::new());
        d.push_event(Event::Key(KeyEvent::new(
            KeyCode::Char('z'),
            KeyModifiers::NONE,
        )));
        d.push_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 2,
            row: 3,
            modifiers: KeyModifiers::NONE,
        }));
        assert!(d.poll(Duration::from_millis(0)).unwrap());
        assert!(matches!(d.read().unwrap(), Event::Key(k) if k.code == KeyCode::Char('z')));
        assert!(matches!(d.read().unwrap(), Event::Mouse(m) if m.column == 2 && m.row == 3));
    }

    /// Tracking mode a terminal keeping a single mode would end up in after
    /// replaying `out`: any set selects that mode, any reset clears it.
    fn effective_mode(out: &str) -> Option<u16> {
        let mut mode = None;
        for seq in out.split("\x1b[?").skip(1) {
            let end = seq.find(['h', 'l']).unwrap_or(seq.len());
            let Ok(code) = seq[..end].parse::<u16>() else {
                continue;
            };
            if !matches!(code, 1000 | 1002 | 1003) {
                continue;
            }
            mode = match &seq[end..end + 1] {
                "h" => Some(code),
                _ => None,
            };
        }
        mode
    }

    #[test]
    fn pointer_tracking_toggles_button_motion_mode() {
        let mut d = ConsoleInputDriver::with_writer(Vec::new());
        d.set_mouse_capture(true).unwrap();
        assert!(captured(&d).ends_with(CLICK_ONLY));

        d.set_pointer_tracking(true).unwrap();
        assert!(d.pointer_tracking());
        assert!(captured(&d).ends_with(BUTTON_MOTION_ON));

        // Repeated requests do not rewrite the mode.
        let len = d.out.len();
        d.set_pointer_tracking(true).unwrap();
        assert_eq!(d.out.len(), len);

        d.set_pointer_tracking(false).unwrap();
        assert!(!d.pointer_tracking());
        assert!(captured(&d).ends_with(CLICK_ONLY));
    }

    #[test]
    fn clicks_stay_reported_after_capture_and_drag() {
        let mut d = ConsoleInputDriver::with_writer(Vec::new());
        d.set_mouse_capture(true).unwrap();
        assert_eq!(effective_mode(&captured(&d)), Some(1000));

        d.set_pointer_tracking(true).unwrap();
        assert_eq!(effective_mode(&captured(&d)), Some(1002));

        d.set_pointer_tracking(false).unwrap();
        assert_eq!(effective_mode(&captured(&d)), Some(1000));

        d.set_mouse_capture(false).unwrap();
        assert_eq!(effective_mode(&captured(&d)), None);
    }

    #[test]
    fn pointer_tracking_needs_mouse_capture() {
        let mut d = ConsoleInputDriver::with_writer(Vec::new());
        d.set_pointer_tracking(true).unwrap();
        assert!(!d.pointer_tracking());
        assert!(d.out.is_empty());
    }

    #[test]
    fn disabling_capture_drops_tracking() {
        let mut d = ConsoleInputDriver::with_writer(Vec::new());
        d.set_mouse_capture(true).unwrap();
        d.set_pointer_tracking(true).unwrap();
        d.set_mouse_capture(false).unwrap();
        assert!(!d.mouse_capture());
        assert!(!d.pointer_tracking());
    }
}
