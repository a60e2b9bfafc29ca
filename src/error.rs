//! Errors raised while turning host input (CLI flags, participant specs)
//! into overlay data. The overlay controller itself never fails.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown call kind `{0}` (expected `voice` or `video`)")]
    InvalidKind(String),
    #[error("unknown connection quality `{0}` (expected excellent, good, fair or poor)")]
    InvalidQuality(String),
    #[error("invalid participant spec `{spec}`: {reason}")]
    InvalidParticipant { spec: String, reason: String },
    #[error("participant name must not be empty")]
    EmptyName,
}
