/// Crate-wide result alias.
pub type SeaResult<T> = Result<T, SeaError>;

/// Top-level error type for chart loading, rendering, capture and encoding.
///
/// Transient pose-source failures are not represented here: they are absorbed by the feed and
/// surface as "no update" instead.
#[derive(thiserror::Error, Debug)]
pub enum SeaError {
    /// Invalid or unreadable configuration / static input.
    #[error("config error: {0}")]
    Config(String),

    /// Failure while drawing into the chart surface.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while persisting a frame or snapshot.
    #[error("capture error: {0}")]
    Capture(String),

    /// Failure while assembling frames into an animation.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeaError {
    /// Build a [`SeaError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SeaError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SeaError::Capture`].
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`SeaError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SeaError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
