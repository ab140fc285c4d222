//! Encoding sinks.
//!
//! Sinks consume a frame sequence in display order and produce the artifact bytes.

/// `ffmpeg`-based MP4 sink.
pub(crate) mod ffmpeg;
/// Palette GIF sink.
pub(crate) mod gif;
/// Generic frame sink trait and the in-memory sink.
pub(crate) mod sink;
