//! Scoped upload area for image artifacts.
//!
//! Each verification request stores exactly one artifact and must release
//! it on every exit path. Report intake uses the same store but keeps its
//! artifact so it can be served under `/uploads`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use common::{VerifyError, VerifyResult};
use uuid::Uuid;

/// Handle to one stored artifact.
///
/// Carries the declared MIME type along so the codec never re-detects it
/// from bytes.
#[derive(Debug, Clone)]
pub struct ArtifactHandle {
    path: PathBuf,
    file_name: String,
    mime_type: String,
}

impl ArtifactHandle {
    /// Filesystem location of the stored bytes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unique file name inside the upload area.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type as declared by the upload, passed through uninspected.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Filesystem-backed store for uploaded images.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create the store, making sure the upload area exists.
    pub fn new(root: impl Into<PathBuf>) -> VerifyResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(VerifyError::storage)?;
        Ok(Self { root })
    }

    /// Directory the artifacts live in; also the static-serving root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store one upload under a unique, collision-resistant name derived
    /// from the receipt time and the original extension.
    pub async fn acquire(
        &self,
        data: &[u8],
        declared_name: Option<&str>,
        mime_type: &str,
    ) -> VerifyResult<ArtifactHandle> {
        let file_name = unique_name(declared_name);
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, data)
            .await
            .map_err(VerifyError::storage)?;

        tracing::debug!(file = %file_name, bytes = data.len(), "stored upload artifact");
        Ok(ArtifactHandle {
            path,
            file_name,
            mime_type: mime_type.to_string(),
        })
    }

    /// Delete the artifact. Idempotent: releasing an already-removed
    /// artifact is a no-op. Failures are logged, never propagated, so
    /// cleanup can never mask the primary outcome of a request.
    pub async fn release(&self, handle: &ArtifactHandle) {
        match tokio::fs::remove_file(&handle.path).await {
            Ok(()) => {
                tracing::debug!(file = %handle.file_name, "released upload artifact");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    file = %handle.file_name,
                    error = %e,
                    "failed to release upload artifact"
                );
            }
        }
    }
}

/// `<receipt-millis>-<uuid-fragment><original-extension>`.
///
/// The receipt timestamp keeps names sortable; the uuid fragment makes
/// them collision-resistant without any shared counter.
fn unique_name(declared_name: Option<&str>) -> String {
    let ext = declared_name
        .map(Path::new)
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let receipt = Utc::now().timestamp_millis();
    let nonce = Uuid::new_v4().simple().to_string();
    format!("{receipt}-{}{ext}", &nonce[..8])
}
