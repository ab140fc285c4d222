use crate::foundation::core::{Canvas, EncodedArtifact, FrameSequence};
use crate::foundation::error::{AnimlabError, AnimlabResult};

/// Media type reported by [`InMemorySink`]: tightly packed RGBA8 frames back to back.
pub const MEDIA_TYPE_RAW_RGBA: &str = "application/octet-stream";

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback frames-per-second.
    pub fps: u32,
    /// Display duration of each frame in seconds.
    pub frame_duration_secs: f64,
}

impl SinkConfig {
    /// Derive the sink configuration for a timed sequence played at `fps`.
    ///
    /// Untimed sequences fall back to `1 / fps` per frame.
    pub fn for_sequence(seq: &FrameSequence, fps: u32) -> Self {
        let frame_duration_secs = if seq.frame_duration_secs() > 0.0 {
            seq.frame_duration_secs()
        } else if fps > 0 {
            1.0 / f64::from(fps)
        } else {
            0.0
        };
        Self {
            width: seq.width(),
            height: seq.height(),
            fps,
            frame_duration_secs,
        }
    }
}

/// Sink contract for consuming composed frames in display order.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices, and every frame
/// has the size announced in `begin`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> AnimlabResult<()>;
    /// Push one frame in display order.
    fn push_frame(&mut self, idx: usize, frame: &Canvas) -> AnimlabResult<()>;
    /// Called once after the last frame; returns the encoded payload.
    fn end(&mut self) -> AnimlabResult<Vec<u8>>;
    /// Media type of the payload returned by [`FrameSink::end`].
    fn media_type(&self) -> &'static str;
}

/// Shared bookkeeping for the sink ordering contract.
#[derive(Debug, Default)]
pub(crate) struct FrameOrder {
    last_idx: Option<usize>,
}

impl FrameOrder {
    pub(crate) fn reset(&mut self) {
        self.last_idx = None;
    }

    /// Validate `frame` against `cfg` and record `idx` as the latest index.
    pub(crate) fn accept(
        &mut self,
        cfg: &SinkConfig,
        idx: usize,
        frame: &Canvas,
    ) -> AnimlabResult<()> {
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(AnimlabError::encoding(format!(
                "out-of-order frame index {idx} (last was {last})"
            )));
        }
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(AnimlabError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        self.last_idx = Some(idx);
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    frames: Vec<(usize, Canvas)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(usize, Canvas)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> AnimlabResult<()> {
        self.cfg = Some(cfg);
        self.order.reset();
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Canvas) -> AnimlabResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| AnimlabError::encoding("in-memory sink not started"))?;
        self.order.accept(cfg, idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> AnimlabResult<Vec<u8>> {
        Ok(self
            .frames
            .iter()
            .flat_map(|(_, f)| f.as_raw().iter().copied())
            .collect())
    }

    fn media_type(&self) -> &'static str {
        MEDIA_TYPE_RAW_RGBA
    }
}

/// Drive `sink` over every frame of `seq` and wrap the payload with the sink's media type.
pub fn encode_sequence(
    seq: &FrameSequence,
    fps: u32,
    sink: &mut dyn FrameSink,
) -> AnimlabResult<EncodedArtifact> {
    if seq.is_empty() {
        return Err(AnimlabError::encoding("cannot encode an empty frame sequence"));
    }
    sink.begin(SinkConfig::for_sequence(seq, fps))?;
    for (idx, frame) in seq.frames().iter().enumerate() {
        sink.push_frame(idx, frame)?;
    }
    let bytes = sink.end()?;
    Ok(EncodedArtifact {
        bytes,
        media_type: sink.media_type(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
