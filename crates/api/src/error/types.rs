//! Error type definitions for card communication and fixture handling

use thiserror::Error as ThisError;

/// Primary error type for the codec, channels and fixture providers
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The channel failed to deliver a command or a response
    #[error("transport failure: {context}: {message}")]
    Transport {
        context: &'static str,
        message: String,
    },

    /// A reply arrived but cannot be a response (no status word)
    #[error("malformed response: {context}: {length} byte(s) received")]
    MalformedResponse { context: &'static str, length: usize },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected at most {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// A fixture category, curve or key the caller asked for does not exist
    #[error("missing fixture: {kind} `{name}`")]
    MissingFixture { kind: &'static str, name: String },

    /// Other error
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for codec, channel and provider operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand for a transport failure
    pub fn transport(context: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for a missing fixture
    pub fn missing(kind: &'static str, name: impl Into<String>) -> Self {
        Self::MissingFixture {
            kind,
            name: name.into(),
        }
    }

    /// Whether the channel can no longer be trusted after this error
    ///
    /// Device state after a failed exchange is undefined, so these abort the
    /// enclosing suite instead of being recorded on a test node.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::MalformedResponse { .. })
    }

    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::Transport { message, .. } => Self::Transport { context, message },
            Self::MalformedResponse { length, .. } => Self::MalformedResponse { context, length },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::MissingFixture { kind, name } => Self::MissingFixture { kind, name },
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }
}
