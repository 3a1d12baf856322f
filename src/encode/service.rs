use crate::foundation::error::ScanwipeResult;

/// Input frame rate of the staged image sequence.
pub const OUTPUT_FPS: u32 = 30;
/// Name of the encoded video inside the encoder namespace.
pub const OUTPUT_FILE_NAME: &str = "output.mp4";
/// Numbered-sequence pattern matching [`staged_frame_name`].
pub const INPUT_PATTERN: &str = "frame%04d.png";

/// The fixed encode invocation: 30 fps numbered PNGs in, H.264 / yuv420p MP4 out, overwriting.
pub const ENCODE_ARGS: [&str; 10] = [
    "-framerate",
    "30",
    "-i",
    INPUT_PATTERN,
    "-c:v",
    "libx264",
    "-pix_fmt",
    "yuv420p",
    "-y",
    OUTPUT_FILE_NAME,
];

/// Namespace name of the `i`-th staged frame (`frame0000.png`, `frame0001.png`, ...).
pub fn staged_frame_name(i: usize) -> String {
    format!("frame{i:04}.png")
}

/// Contract of an external encoder addressed through a private file namespace.
///
/// Names are flat (no directories) and unrelated to host filesystem paths.
pub trait EncoderService: Send {
    /// Prepare the service. Called at most once per [`crate::Encoder`].
    fn init(&mut self) -> ScanwipeResult<()>;
    /// Create or replace `name` with `bytes`.
    fn write_file(&mut self, name: &str, bytes: &[u8]) -> ScanwipeResult<()>;
    /// Run the encoder with `args`, resolving names against the namespace.
    fn exec(&mut self, args: &[&str]) -> ScanwipeResult<()>;
    /// Read `name` back.
    fn read_file(&mut self, name: &str) -> ScanwipeResult<Vec<u8>>;
    /// Remove `name`. Removing a name that does not exist is not an error.
    fn delete_file(&mut self, name: &str) -> ScanwipeResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/encode/service.rs"]
mod tests;
