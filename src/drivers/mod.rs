pub mod console;
pub mod keyboard;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

/// Source of terminal input events.
///
/// `set_mouse_capture` turns basic click reporting on or off for the whole
/// session. `set_pointer_tracking` is the narrower switch the overlay flips
/// while a header drag holds the pointer capture lease: it asks the terminal
/// for motion events with a button held, and nothing else.
pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
    fn set_pointer_tracking(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }

    fn set_pointer_tracking(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_pointer_tracking(enabled)
    }
}
