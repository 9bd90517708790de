//! Error taxonomy for the verification pipeline.
//!
//! These are the typed errors the pipeline can surface to the API layer.
//! Parsing is deliberately absent: a malformed model reply degrades to
//! `unknown` verdict values instead of erroring (see `labsafe-inference`).

use thiserror::Error;

/// Result type for verification pipeline operations.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Errors produced by the verification pipeline.
///
/// Each variant documents the HTTP status the API layer maps it to.
#[derive(Error, Debug, Clone)]
pub enum VerifyError {
    /// The request carried no usable image part (400 Bad Request).
    ///
    /// Raised before the upload area is touched; no artifact exists to
    /// clean up when this is returned.
    #[error("no image file found in the request")]
    MissingInput,

    /// The upload area rejected the write (500 Internal Server Error).
    #[error("failed to store uploaded image: {reason}")]
    StorageWrite {
        reason: String,
    },

    /// A stored artifact could not be read back for encoding, e.g. it was
    /// already removed or is zero bytes (500 Internal Server Error).
    #[error("failed to encode stored image: {reason}")]
    Decode {
        reason: String,
    },

    /// The inference service failed at the transport or envelope level
    /// (502 Bad Gateway). Carries the upstream HTTP status when one was
    /// received. Not retried here; retry policy belongs to callers.
    #[error("inference service error: {message}")]
    Inference {
        status: Option<u16>,
        message: String,
    },
}

impl VerifyError {
    /// Storage-write error from an I/O failure.
    pub fn storage(err: std::io::Error) -> Self {
        VerifyError::StorageWrite {
            reason: err.to_string(),
        }
    }

    /// Decode error from an I/O failure.
    pub fn decode(err: std::io::Error) -> Self {
        VerifyError::Decode {
            reason: err.to_string(),
        }
    }

    /// Inference transport error with no upstream status (connect failure,
    /// timeout, malformed envelope).
    pub fn inference_transport(message: impl Into<String>) -> Self {
        VerifyError::Inference {
            status: None,
            message: message.into(),
        }
    }

    /// Inference error carrying the upstream HTTP status.
    pub fn inference_status(status: u16, message: impl Into<String>) -> Self {
        VerifyError::Inference {
            status: Some(status),
            message: message.into(),
        }
    }
}
