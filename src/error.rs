//! Error types for configuration loading and session control
//!
//! Gameplay outcomes (no target, empty collections, death) are state
//! transitions, not errors. These cover the few things a host can get wrong.

use std::fmt;

/// Failure to load or validate a [`crate::Tuning`]
#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid JSON for the tuning schema
    Parse(serde_json::Error),
    /// A value parsed but is outside its usable range
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse tuning: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Failure while starting or steering a session
#[derive(Debug)]
pub enum SessionError {
    /// The frontend could not provide a drawing surface. Fatal at startup.
    SurfaceUnavailable(String),
    Config(ConfigError),
    /// Upgrade index outside the current offer
    InvalidChoice { index: usize, available: usize },
    /// An upgrade was chosen while no level-up was pending
    NoPendingChoice,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceUnavailable(reason) => write!(f, "rendering surface unavailable: {reason}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::InvalidChoice { index, available } => {
                write!(f, "upgrade choice {index} out of range ({available} offered)")
            }
            Self::NoPendingChoice => write!(f, "no upgrade choice is pending"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SessionError::InvalidChoice { index: 4, available: 3 };
        assert_eq!(err.to_string(), "upgrade choice 4 out of range (3 offered)");

        let err = SessionError::from(ConfigError::Invalid {
            field: "max_dt",
            reason: "must be positive".into(),
        });
        assert_eq!(err.to_string(), "invalid tuning value `max_dt`: must be positive");
        assert!(std::error::Error::source(&err).is_some());
    }
}
