//! Image transport encoding.
//!
//! Reads a stored artifact fully into memory and base64-encodes it for
//! the inline-data part of the inference request. The MIME type is the
//! one declared by the upload; bytes are never sniffed.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::{VerifyError, VerifyResult};

/// An image ready for the wire: base64 payload plus declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

/// Encode a stored artifact for transport.
///
/// Fails with [`VerifyError::Decode`] when the file is unreadable (for
/// example already released) or empty.
pub async fn encode(path: &Path, mime_type: &str) -> VerifyResult<EncodedImage> {
    let bytes = tokio::fs::read(path).await.map_err(VerifyError::decode)?;
    if bytes.is_empty() {
        return Err(VerifyError::Decode {
            reason: format!("artifact {} is empty", path.display()),
        });
    }

    Ok(EncodedImage {
        data: STANDARD.encode(&bytes),
        mime_type: mime_type.to_string(),
    })
}
