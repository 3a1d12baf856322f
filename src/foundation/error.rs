/// Convenience result type used across scanwipe.
pub type ScanwipeResult<T> = Result<T, ScanwipeError>;

/// Top-level error taxonomy for a generation run.
///
/// Every variant aborts the whole run; no partial video is ever produced.
#[derive(thiserror::Error, Debug)]
pub enum ScanwipeError {
    /// One or both source images were not supplied.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// A source could not be decoded as an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Compositing or still-encoding a frame failed.
    #[error("render error: {0}")]
    Render(String),

    /// The encoder service could not be initialized.
    #[error("encoder init error: {0}")]
    EncoderInit(String),

    /// The encoder failed while staging input or producing the video.
    #[error("encode error: {0}")]
    Encode(String),

    /// The encoded output could not be read back.
    #[error("read error: {0}")]
    Read(String),

    /// Invalid user-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanwipeError {
    /// Build a [`ScanwipeError::MissingInput`] value.
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Build a [`ScanwipeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ScanwipeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScanwipeError::EncoderInit`] value.
    pub fn encoder_init(msg: impl Into<String>) -> Self {
        Self::EncoderInit(msg.into())
    }

    /// Build a [`ScanwipeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ScanwipeError::Read`] value.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Build a [`ScanwipeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
