use alloc::string::String;
use enough::StopReason;

/// Errors from PAM ingestion and QOI encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QoiError {
    #[error("empty input image: {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: usize, height: usize },

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("stripe {index} failed to encode")]
    StripeFailed { index: usize },

    #[error("output write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Coarse classification of a [`QoiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source image was malformed, unsupported, truncated or over limits.
    InputData,
    /// The request itself cannot be carried out (empty image, bad dimensions, cancelled).
    Invocation,
    /// Producing or delivering the encoded stream failed.
    Output,
}

impl QoiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedFormat
            | Self::InvalidHeader(_)
            | Self::UnsupportedVariant(_)
            | Self::UnexpectedEof
            | Self::LimitExceeded(_) => ErrorKind::InputData,
            Self::EmptyImage { .. } | Self::DimensionsTooLarge { .. } | Self::Cancelled(_) => {
                ErrorKind::Invocation
            }
            Self::StripeFailed { .. } | Self::Io(_) => ErrorKind::Output,
        }
    }
}

impl From<StopReason> for QoiError {
    fn from(r: StopReason) -> Self {
        QoiError::Cancelled(r)
    }
}
