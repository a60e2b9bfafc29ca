//! Local media toggles and the read-only view of remote participants.
//!
//! Remote participant data is supplied by whatever signaling layer the host
//! plugs in. The overlay renders it but never changes it; the only local,
//! mutable media state is [`MediaToggleState`].

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MediaToggleState {
    muted: bool,
    camera_off: bool,
}

impl MediaToggleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn camera_off(&self) -> bool {
        self.camera_off
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn toggle_camera(&mut self) -> bool {
        self.camera_off = !self.camera_off;
        self.camera_off
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConnectionQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ConnectionQuality {
    /// Classify a link from its round-trip time and video packet loss.
    pub fn from_stats(round_trip_ms: f64, packets_lost: u64) -> Self {
        if round_trip_ms > 300.0 || packets_lost > 50 {
            ConnectionQuality::Poor
        } else if round_trip_ms > 150.0 || packets_lost > 20 {
            ConnectionQuality::Fair
        } else if round_trip_ms > 50.0 {
            ConnectionQuality::Good
        } else {
            ConnectionQuality::Excellent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectionQuality::Excellent => "Excellent",
            ConnectionQuality::Good => "Good",
            ConnectionQuality::Fair => "Fair",
            ConnectionQuality::Poor => "Poor",
        }
    }
}

impl fmt::Display for ConnectionQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ConnectionQuality {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(ConnectionQuality::Excellent),
            "good" => Ok(ConnectionQuality::Good),
            "fair" => Ok(ConnectionQuality::Fair),
            "poor" => Ok(ConnectionQuality::Poor),
            _ => Err(ConfigError::InvalidQuality(s.to_string())),
        }
    }
}

/// Opaque reference to a media stream owned by the signaling layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamHandle(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: String,
    pub display_name: String,
    pub stream: Option<StreamHandle>,
    pub video_on: bool,
    pub audio_on: bool,
    pub connection_quality: ConnectionQuality,
}

impl Participant {
    /// A connected participant with both media directions on.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            stream: Some(StreamHandle(format!("stream-{id}"))),
            id,
            display_name: display_name.into(),
            video_on: true,
            audio_on: true,
            connection_quality: ConnectionQuality::Good,
        }
    }

    /// Parse a `name[:flag...]` spec as accepted on the command line.
    ///
    /// Flags: `video`/`novideo`, `audio`/`muted`, and a connection quality
    /// label. Unlisted media directions default to off, so `Ada:audio:fair`
    /// describes an audio-only participant on a fair link. A participant
    /// without video has no stream to draw.
    pub fn parse_spec(id: impl Into<String>, spec: &str) -> Result<Self, ConfigError> {
        let mut parts = spec.split(':');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let mut participant = Participant::new(id, name);
        participant.video_on = false;
        participant.audio_on = false;
        for flag in parts {
            match flag.trim().to_ascii_lowercase().as_str() {
                "" => {}
                "video" => participant.video_on = true,
                "novideo" => participant.video_on = false,
                "audio" => participant.audio_on = true,
                "muted" => participant.audio_on = false,
                other => {
                    participant.connection_quality =
                        other.parse().map_err(|_| ConfigError::InvalidParticipant {
                            spec: spec.to_string(),
                            reason: format!("unknown flag `{other}`"),
                        })?;
                }
            }
        }
        if !participant.video_on {
            participant.stream = None;
        }
        Ok(participant)
    }

    pub fn initials(&self) -> String {
        crate::session::initials_of(&self.display_name)
    }
}
