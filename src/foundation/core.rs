use std::fmt;
use std::str::FromStr;

use anyhow::Context as _;

use crate::foundation::error::{AnimlabError, AnimlabResult};

/// Straight-alpha RGBA8 pixel buffer used for source images and intermediate results.
pub type Image = image::RgbaImage;

/// Frame-sized RGBA8 compositing target. Always the source image's size, created transparent.
pub type Canvas = image::RgbaImage;

/// Media type of GIF artifacts.
pub const MEDIA_TYPE_GIF: &str = "image/gif";
/// Media type of MP4 artifacts.
pub const MEDIA_TYPE_MP4: &str = "video/mp4";

/// Convert any decoded image into the RGBA8 working format (alpha 255 where absent).
pub fn ingest_image(img: image::DynamicImage) -> AnimlabResult<Image> {
    let rgba = img.into_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(AnimlabError::invalid_parameter(
            "source image must have non-zero width and height",
        ));
    }
    Ok(rgba)
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to RGBA8.
pub fn decode_image(bytes: &[u8]) -> AnimlabResult<Image> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    ingest_image(dyn_img)
}

/// Number of frames requested by a `(duration, fps)` pair: `round(duration * fps)`, at least 1.
pub fn frame_count(duration_secs: f64, fps: u32) -> AnimlabResult<u32> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(AnimlabError::invalid_parameter(format!(
            "duration must be a finite number of seconds > 0 (got {duration_secs})"
        )));
    }
    if fps == 0 {
        return Err(AnimlabError::invalid_parameter("fps must be > 0"));
    }
    let n = (duration_secs * f64::from(fps)).round();
    if n > f64::from(u32::MAX) {
        return Err(AnimlabError::invalid_parameter(format!(
            "duration {duration_secs}s at {fps} fps needs too many frames"
        )));
    }
    Ok((n as u32).max(1))
}

/// Ordered, fully materialized frames of one effect invocation plus their display timing.
///
/// Insertion order is display order. Every frame has the same dimensions.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    width: u32,
    height: u32,
    frames: Vec<Canvas>,
    frame_duration_secs: f64,
}

impl FrameSequence {
    /// Build an untimed sequence. Use [`FrameSequence::retimed`] to attach display timing.
    pub fn new(width: u32, height: u32, frames: Vec<Canvas>) -> Self {
        debug_assert!(
            frames
                .iter()
                .all(|f| f.width() == width && f.height() == height)
        );
        Self {
            width,
            height,
            frames,
            frame_duration_secs: 0.0,
        }
    }

    /// Spread `total_secs` evenly over the frames.
    pub fn retimed(mut self, total_secs: f64) -> Self {
        self.frame_duration_secs = if self.frames.is_empty() {
            0.0
        } else {
            total_secs / self.frames.len() as f64
        };
        self
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Borrow the frames in display order.
    pub fn frames(&self) -> &[Canvas] {
        &self.frames
    }

    /// Consume the sequence, returning the frames in display order.
    pub fn into_frames(self) -> Vec<Canvas> {
        self.frames
    }

    /// Display duration of each frame in seconds (0 while untimed).
    pub fn frame_duration_secs(&self) -> f64 {
        self.frame_duration_secs
    }

    /// Total display duration in seconds.
    pub fn total_duration_secs(&self) -> f64 {
        self.frame_duration_secs * self.frames.len() as f64
    }
}

/// Output container selected by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OutputFormat {
    /// Looping palette animation.
    Gif,
    /// H.264 video in an MP4 container.
    Mp4,
}

impl OutputFormat {
    /// Media type of artifacts produced for this format.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Gif => MEDIA_TYPE_GIF,
            Self::Mp4 => MEDIA_TYPE_MP4,
        }
    }

    /// Conventional file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Mp4 => "mp4",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gif => f.write_str("GIF"),
            Self::Mp4 => f.write_str("MP4"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AnimlabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gif" => Ok(Self::Gif),
            "mp4" => Ok(Self::Mp4),
            other => Err(AnimlabError::invalid_parameter(format!(
                "unknown output format '{other}' (expected GIF or MP4)"
            ))),
        }
    }
}

/// Encoded animation bytes plus their media type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedArtifact {
    /// Encoded payload.
    pub bytes: Vec<u8>,
    /// Media type of `bytes`, e.g. `"image/gif"`.
    pub media_type: &'static str,
}

impl EncodedArtifact {
    /// Split into `(bytes, media_type)`.
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.bytes, self.media_type.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
