use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{ScanwipeError, ScanwipeResult};

/// Where a source image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image file on the local filesystem.
    Path(PathBuf),
    /// Encoded image bytes already held in memory.
    Bytes(Arc<[u8]>),
}

impl ImageSource {
    /// Source backed by a filesystem path.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Source backed by in-memory encoded bytes.
    pub fn bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Short human-readable label used in logs and errors.
    pub fn describe(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }

    /// Return `true` when the source points at something that could be read.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Path(p) => p.is_file(),
            Self::Bytes(b) => !b.is_empty(),
        }
    }

    /// Load the encoded bytes.
    pub fn load(&self) -> ScanwipeResult<Arc<[u8]>> {
        match self {
            Self::Path(p) => Ok(read_file(p)?.into()),
            Self::Bytes(b) => Ok(b.clone()),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&Path> for ImageSource {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b.into())
    }
}

fn read_file(path: &Path) -> ScanwipeResult<Vec<u8>> {
    if !path.is_file() {
        return Err(ScanwipeError::missing_input(format!(
            "image '{}' does not exist",
            path.display()
        )));
    }
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(bytes)
}

/// Reject the run up front when either image is absent; otherwise hand both back.
pub fn require_inputs<'a>(
    before: Option<&'a ImageSource>,
    after: Option<&'a ImageSource>,
) -> ScanwipeResult<(&'a ImageSource, &'a ImageSource)> {
    let (before, after) = match (before, after) {
        (Some(b), Some(a)) => (b, a),
        (None, None) => {
            return Err(ScanwipeError::missing_input(
                "both before and after images are required",
            ));
        }
        (None, Some(_)) => return Err(ScanwipeError::missing_input("before image is required")),
        (Some(_), None) => return Err(ScanwipeError::missing_input("after image is required")),
    };
    for (label, src) in [("before", before), ("after", after)] {
        if !src.is_present() {
            return Err(ScanwipeError::missing_input(format!(
                "{label} image {} is empty or missing",
                src.describe()
            )));
        }
    }
    Ok((before, after))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
