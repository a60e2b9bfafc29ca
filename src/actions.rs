use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Session lifecycle
    StartVideoCall,
    StartVoiceCall,
    EndCall,
    // Local media
    ToggleMute,
    ToggleCamera,
    // Layout
    ToggleMinimize,
    /// Ask the signaling side to drop the N-th participant (1-based).
    HangupPeer(u8),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => write!(f, "Quit"),
            Action::StartVideoCall => write!(f, "Start video call"),
            Action::StartVoiceCall => write!(f, "Start voice call"),
            Action::EndCall => write!(f, "End call"),
            Action::ToggleMute => write!(f, "Mute / unmute"),
            Action::ToggleCamera => write!(f, "Camera on / off"),
            Action::ToggleMinimize => write!(f, "Minimize / expand"),
            Action::HangupPeer(n) => write!(f, "Hang up participant {n}"),
        }
    }
}
