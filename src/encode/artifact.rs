use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::ScanwipeResult;

/// MIME type of every artifact.
pub const VIDEO_MIME: &str = "video/mp4";
/// File name used by [`VideoArtifact::save_download`].
pub const DOWNLOAD_FILE_NAME: &str = "animation.mp4";

/// The encoded video. Cloning shares the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoArtifact {
    bytes: Arc<[u8]>,
}

impl VideoArtifact {
    /// Wrap encoded MP4 bytes.
    pub fn mp4(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Always [`VIDEO_MIME`].
    pub fn mime(&self) -> &'static str {
        VIDEO_MIME
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Return `true` for an empty buffer.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the video to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ScanwipeResult<()> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("write video '{}'", path.display()))?;
        Ok(())
    }

    /// Write the video as `animation.mp4` inside `dir` and return the full path.
    pub fn save_download(&self, dir: impl AsRef<Path>) -> ScanwipeResult<PathBuf> {
        let path = dir.as_ref().join(DOWNLOAD_FILE_NAME);
        self.save_to(&path)?;
        Ok(path)
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ScanwipeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/artifact.rs"]
mod tests;
