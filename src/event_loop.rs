use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded loop that owns the input driver.
///
/// Every pass calls the handler once with `None` (the idle slot, where the
/// host advances the call timer and redraws) and then, if input is waiting,
/// once per queued event in arrival order. Bursts of mouse drag reports are
/// drained in one go so the overlay position never lags behind the pointer.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
