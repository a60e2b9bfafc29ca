//! Shared crate-wide constants.

use std::time::Duration;

/// Overlay width (in terminal columns) while expanded.
pub const EXPANDED_WIDTH: u16 = 64;

/// Overlay height (in terminal rows) while expanded.
pub const EXPANDED_HEIGHT: u16 = 22;

/// Overlay width (in terminal columns) while minimized.
///
/// Large enough for the header (initials, name, duration and the two header
/// buttons) plus the compact control row.
pub const MINIMIZED_WIDTH: u16 = 32;

/// Overlay height (in terminal rows) while minimized.
pub const MINIMIZED_HEIGHT: u16 = 7;

/// Period of the session duration timer.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Viewport width (in terminal columns) at which the participant grid
/// switches to its wide arrangement.
///
/// Units: terminal columns. Roughly the width a 1024 px browser window
/// occupies when rendered at a typical monospace cell width.
pub const WIDE_BREAKPOINT: u16 = 100;

/// How often the host loop wakes up without input to advance the timer and
/// redraw.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Rows taken by the draggable overlay header (border plus title row).
pub const HEADER_ROWS: u16 = 2;
