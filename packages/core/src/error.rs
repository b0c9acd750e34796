//! Error types for feature intake, prediction calls and handoffs

use thiserror::Error;

use crate::features::FeatureKind;

/// Uploaded or pasted text did not decompose into exactly N numeric tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Invalid file format. Must contain exactly {expected} numeric values.")]
    WrongCount { expected: usize, found: usize },

    #[error("Invalid file format. Must contain exactly {expected} numeric values.")]
    NotNumeric {
        expected: usize,
        position: usize,
        token: String,
    },
}

/// A slot failed the pre-submission check. No request is issued.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{name} is required.")]
    Empty { index: usize, name: &'static str },

    #[error("All features must be valid numbers ({name}: '{value}').")]
    NotNumeric {
        index: usize,
        name: &'static str,
        value: String,
    },

    #[error("Field index {index} is out of range for {arity} features.")]
    OutOfRange { index: usize, arity: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The endpoint answered with a non-success status
    Status(u16),
    /// No response arrived
    Transport,
    /// A success status whose body does not match the expected result
    Decode,
}

/// A prediction endpoint rejected the request or could not be reached.
///
/// `detail` is the text shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{detail}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub detail: String,
}

impl RemoteError {
    pub const GENERIC_DETAIL: &'static str = "Prediction failed";
    pub const TRANSPORT_DETAIL: &'static str = "Failed to fetch prediction.";

    pub fn status(status: u16, detail: Option<String>) -> Self {
        Self {
            kind: RemoteErrorKind::Status(status),
            detail: detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| Self::GENERIC_DETAIL.to_string()),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: RemoteErrorKind::Transport,
            detail: if message.is_empty() {
                Self::TRANSPORT_DETAIL.to_string()
            } else {
                message
            },
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: RemoteErrorKind::Decode,
            detail: message.into(),
        }
    }
}

/// Anything a form can end up displaying after an upload or a submission.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// The explanation service was unreachable or answered with something unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExplanationError {
    #[error("Explanation request failed: {0}")]
    Transport(String),

    #[error("Explanation service responded with status {0}")]
    Status(u16),

    #[error("Explanation response could not be parsed: {0}")]
    Parse(String),
}

/// A handoff token could not be turned back into a snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandoffError {
    #[error("Handoff token is not valid base64: {0}")]
    Encoding(String),

    #[error("Handoff payload is malformed: {0}")]
    Payload(String),

    #[error("Unsupported handoff version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Handoff carries a malformed {0:?} feature vector")]
    MalformedVector(FeatureKind),
}
