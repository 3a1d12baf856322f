use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::{
    encode::service::EncoderService,
    foundation::error::{ScanwipeError, ScanwipeResult},
};

/// Encoder service backed by the system `ffmpeg` binary.
///
/// The namespace is a private scratch directory created by `init` and removed when the service is
/// dropped. `exec` runs `ffmpeg` with that directory as its working directory, so namespace names
/// in the arguments resolve to staged files.
#[derive(Debug)]
pub struct FfmpegService {
    program: PathBuf,
    workdir: Option<ScratchDir>,
}

impl FfmpegService {
    /// Service using `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("ffmpeg")
    }

    /// Service using a specific `ffmpeg` executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: None,
        }
    }

    /// Scratch directory backing the namespace, once initialized.
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_ref().map(|d| d.0.as_path())
    }

    fn resolve(&self, name: &str) -> ScanwipeResult<PathBuf> {
        let dir = self
            .workdir()
            .ok_or_else(|| ScanwipeError::encode("ffmpeg service is not initialized"))?;
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ScanwipeError::validation(format!(
                "invalid encoder namespace name '{name}'"
            )));
        }
        Ok(dir.join(name))
    }
}

impl Default for FfmpegService {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderService for FfmpegService {
    fn init(&mut self) -> ScanwipeResult<()> {
        if self.workdir.is_some() {
            return Ok(());
        }
        if !is_program_runnable(&self.program) {
            return Err(ScanwipeError::encoder_init(format!(
                "'{}' is required for MP4 encoding, but could not be run",
                self.program.display()
            )));
        }

        let dir = std::env::temp_dir().join(format!(
            "scanwipe_encode_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ));
        std::fs::create_dir_all(&dir).map_err(|e| {
            ScanwipeError::encoder_init(format!(
                "create encoder workdir '{}': {e}",
                dir.display()
            ))
        })?;
        tracing::debug!(workdir = %dir.display(), "ffmpeg service ready");
        self.workdir = Some(ScratchDir(dir));
        Ok(())
    }

    fn write_file(&mut self, name: &str, bytes: &[u8]) -> ScanwipeResult<()> {
        let path = self.resolve(name)?;
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        Ok(())
    }

    fn exec(&mut self, args: &[&str]) -> ScanwipeResult<()> {
        let dir = self
            .workdir()
            .ok_or_else(|| ScanwipeError::encode("ffmpeg service is not initialized"))?;

        let output = Command::new(&self.program)
            .current_dir(dir)
            .args(["-hide_banner", "-loglevel", "error", "-nostdin"])
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ScanwipeError::encode(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanwipeError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }

    fn read_file(&mut self, name: &str) -> ScanwipeResult<Vec<u8>> {
        let path = self.resolve(name)?;
        std::fs::read(&path)
            .map_err(|e| ScanwipeError::read(format!("read '{}': {e}", path.display())))
    }

    fn delete_file(&mut self, name: &str) -> ScanwipeResult<()> {
        let path = self.resolve(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("delete '{}'", path.display()))
                .into()),
        }
    }
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    is_program_runnable(Path::new("ffmpeg"))
}

fn is_program_runnable(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[derive(Debug)]
struct ScratchDir(PathBuf);

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
