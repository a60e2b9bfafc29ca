//! Pointer capture lease for overlay drags.
//!
//! Drag tracking needs pointer-move reports for the whole screen, not just the
//! overlay. Instead of leaving those reports switched on as ambient global
//! state, the controller acquires a lease when a drag starts and releases it
//! when the drag ends, when the call ends, or when the controller is dropped.
//! The host flushes lease changes to its input driver through
//! [`PointerCapture::take_change`].

#[derive(Debug, Default, Clone, Copy)]
pub struct PointerCapture {
    held: bool,
    dirty: bool,
    acquisitions: u64,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Total number of successful acquisitions, for diagnostics.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions
    }

    /// Acquire the lease. Returns `false` if it was already held.
    pub fn acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        self.dirty = !self.dirty;
        self.acquisitions += 1;
        true
    }

    /// Release the lease. Returns `false` if it was not held.
    pub fn release(&mut self) -> bool {
        if !self.held {
            return false;
        }
        self.held = false;
        self.dirty = !self.dirty;
        true
    }

    /// Report the lease state if it changed since the last call.
    ///
    /// An acquire immediately followed by a release cancels out, so the
    /// driver is never asked to toggle tracking for nothing.
    pub fn take_change(&mut self) -> Option<bool> {
        if self.dirty {
            self.dirty = false;
            Some(self.held)
        } else {
            None
        }
    }
}
