//! Call session data owned by the overlay controller.

pub mod timer;

pub use timer::{SessionTimer, format_duration};

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::ConfigError;
use crate::media::Participant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Voice,
    Video,
}

impl CallKind {
    pub fn is_video(self) -> bool {
        matches!(self, CallKind::Video)
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallKind::Voice => "voice",
            CallKind::Video => "video",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for CallKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "voice" | "audio" => Ok(CallKind::Voice),
            "video" => Ok(CallKind::Video),
            _ => Err(ConfigError::InvalidKind(s.to_string())),
        }
    }
}

/// The person on the other end of a one-to-one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactIdentity {
    pub name: String,
    pub avatar: Option<String>,
    pub online: bool,
}

impl ContactIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
            online: false,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    /// First letter of every word in the name, used when no avatar is drawn.
    pub fn initials(&self) -> String {
        initials_of(&self.name)
    }
}

pub(crate) fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Who a session connects to.
#[derive(Debug, Clone, PartialEq)]
pub enum CallTarget {
    Contact(ContactIdentity),
    Participants(Vec<Participant>),
}

impl CallTarget {
    /// Name shown in the overlay header.
    pub fn title(&self) -> String {
        match self {
            CallTarget::Contact(contact) => contact.name.clone(),
            CallTarget::Participants(list) => match list.len() {
                0 => "Waiting for participants".to_string(),
                1 => list[0].display_name.clone(),
                n => format!("{} + {} others", list[0].display_name, n - 1),
            },
        }
    }

    pub fn participants(&self) -> &[Participant] {
        match self {
            CallTarget::Contact(_) => &[],
            CallTarget::Participants(list) => list,
        }
    }
}

impl From<ContactIdentity> for CallTarget {
    fn from(contact: ContactIdentity) -> Self {
        CallTarget::Contact(contact)
    }
}

impl From<Vec<Participant>> for CallTarget {
    fn from(list: Vec<Participant>) -> Self {
        CallTarget::Participants(list)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Ended,
}

/// One call's lifetime, from open to end.
#[derive(Debug, Clone)]
pub struct CallSession {
    pub kind: CallKind,
    pub target: CallTarget,
    pub started_at: Instant,
    pub status: SessionStatus,
}

impl CallSession {
    pub fn new(kind: CallKind, target: CallTarget, started_at: Instant) -> Self {
        Self {
            kind,
            target,
            started_at,
            status: SessionStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}
