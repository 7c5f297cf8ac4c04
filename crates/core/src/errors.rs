//! Error types for wayfarer operations.

/// Result type alias for wayfarer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for wayfarer operations using thiserror.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Configuration misuse detected during the configuration phase.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The event toggle registry was mutated after the runtime phase began.
    #[error("cannot {operation} legacy state events at runtime; configure them before startup completes")]
    Frozen { operation: &'static str },

    /// An event name outside the recognized legacy set.
    #[error("unrecognized legacy state event '{name}'")]
    UnknownEvent { name: String },
}

impl Error {
    /// Create a configuration error with the given message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
