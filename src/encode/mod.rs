//! Frames-to-video encoding.
//!
//! The core only talks to an [`service::EncoderService`]: a five-operation contract over a private
//! file namespace. [`orchestrator::Encoder`] drives one encode per run on top of it.

/// Encoded video result.
pub mod artifact;
/// `ffmpeg`-backed encoder service (system binary).
pub mod ffmpeg;
/// In-memory encoder service for tests and dry runs.
pub mod memory;
/// Staging, encoding, read-back and cleanup.
pub mod orchestrator;
/// Encoder service contract and the fixed encode command.
pub mod service;
