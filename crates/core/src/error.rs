/// Result alias that carries the custom [`AnimationError`] type.
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Common error type for the core crate.
///
/// Every variant aborts the playback invocation that produced it; the player
/// never skips a single offending shape and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    /// A rotate or scale step needs a centroid, which does not exist for a
    /// polygon without vertices.
    #[error("cannot compute the centroid of an empty geometry")]
    EmptyGeometry,
    /// Steps and durations must be paired one to one.
    #[error("timeline has {steps} steps but {durations} durations")]
    MismatchedTimeline { steps: usize, durations: usize },
    /// A color string that is not of the `#rrggbb` form.
    #[error("invalid color `{0}`, expected `#rrggbb`")]
    InvalidColor(String),
    /// Playback was interrupted through a [`crate::CancelToken`].
    #[error("playback cancelled")]
    Cancelled,
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl AnimationError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for AnimationError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for AnimationError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
