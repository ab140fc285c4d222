use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, MEDIA_TYPE_GIF};
use crate::foundation::error::{AnimlabError, AnimlabResult};

/// Options for [`GifSink`] output.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifSinkOpts {
    /// Palette quantizer speed, `1` (best) to `30` (fastest).
    pub speed: i32,
    /// Loop forever instead of playing once.
    pub repeat_forever: bool,
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self {
            speed: 10,
            repeat_forever: true,
        }
    }
}

/// Sink that buffers frames and encodes a looping GIF in memory on `end`.
///
/// Per-frame delay is `frame_duration_secs`, stored by the format in 10 ms units.
pub struct GifSink {
    opts: GifSinkOpts,
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    delay: Delay,
    frames: Vec<Frame>,
}

impl GifSink {
    /// Create a new GIF sink.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            order: FrameOrder::default(),
            delay: Delay::from_saturating_duration(Duration::ZERO),
            frames: Vec::new(),
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> AnimlabResult<()> {
        if !(1..=30).contains(&self.opts.speed) {
            return Err(AnimlabError::invalid_parameter(format!(
                "gif speed must be in 1..=30 (got {})",
                self.opts.speed
            )));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(AnimlabError::encoding("gif width/height must be non-zero"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(AnimlabError::encoding(format!(
                "gif frames are limited to {0}x{0} pixels (got {1}x{2})",
                u16::MAX,
                cfg.width,
                cfg.height
            )));
        }
        let per_frame = Duration::try_from_secs_f64(cfg.frame_duration_secs).map_err(|e| {
            AnimlabError::encoding(format!(
                "invalid frame duration {}s: {e}",
                cfg.frame_duration_secs
            ))
        })?;

        self.delay = Delay::from_saturating_duration(per_frame);
        self.frames.clear();
        self.order.reset();
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Canvas) -> AnimlabResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| AnimlabError::encoding("gif sink not started"))?;
        self.order.accept(cfg, idx, frame)?;
        self.frames
            .push(Frame::from_parts(frame.clone(), 0, 0, self.delay));
        Ok(())
    }

    fn end(&mut self) -> AnimlabResult<Vec<u8>> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| AnimlabError::encoding("gif sink not started"))?;
        if self.frames.is_empty() {
            return Err(AnimlabError::encoding("gif sink received no frames"));
        }
        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            frames = self.frames.len(),
            speed = self.opts.speed,
            "encoding gif"
        );

        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut out, self.opts.speed);
            let repeat = if self.opts.repeat_forever {
                Repeat::Infinite
            } else {
                Repeat::Finite(0)
            };
            encoder
                .set_repeat(repeat)
                .map_err(|e| AnimlabError::encoding(format!("gif repeat setup failed: {e}")))?;
            encoder
                .encode_frames(self.frames.drain(..))
                .map_err(|e| AnimlabError::encoding(format!("gif encoding failed: {e}")))?;
            // Dropping the encoder writes the trailer.
        }
        Ok(out)
    }

    fn media_type(&self) -> &'static str {
        MEDIA_TYPE_GIF
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
