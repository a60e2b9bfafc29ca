//! A draggable voice/video call overlay for terminal hosts.
//!
//! [`overlay::CallOverlay`] is the controller a host screen mounts. It owns
//! the call session, its duration timer, the overlay position, the layout
//! mode and the local media toggles. [`runner`] wires it to a terminal.

pub mod actions;
pub mod components;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod layout;
pub mod media;
pub mod overlay;
pub mod runner;
pub mod session;
pub mod state;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod utils;

pub use error::ConfigError;
pub use overlay::{CallOverlay, OverlayChange, OverlayConfig};
pub use session::{CallKind, CallTarget, ContactIdentity};
