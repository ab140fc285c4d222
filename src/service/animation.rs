use crate::effects::catalog::{EffectCatalog, EffectFamily, EffectOverrides};
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::sink::{FrameSink, encode_sequence};
use crate::foundation::core::{EncodedArtifact, FrameSequence, Image, OutputFormat, frame_count};
use crate::foundation::error::{AnimlabError, AnimlabResult};

/// Everything needed to produce one artifact.
#[derive(Clone, Debug)]
pub struct AnimationRequest<'a> {
    /// Source image, already in RGBA8.
    pub image: &'a Image,
    /// Catalog identifier of the effect.
    pub effect_id: &'a str,
    /// Output container.
    pub format: OutputFormat,
    /// Total animation length in seconds.
    pub duration_secs: f64,
    /// Playback frames-per-second.
    pub fps: u32,
    /// Optional effect parameter overrides.
    pub overrides: EffectOverrides,
}

impl<'a> AnimationRequest<'a> {
    /// Request with default effect parameters.
    pub fn new(
        image: &'a Image,
        effect_id: &'a str,
        format: OutputFormat,
        duration_secs: f64,
        fps: u32,
    ) -> Self {
        Self {
            image,
            effect_id,
            format,
            duration_secs,
            fps,
            overrides: EffectOverrides::default(),
        }
    }

    /// Replace the effect parameter overrides.
    pub fn with_overrides(mut self, overrides: EffectOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Options for [`AnimationService`].
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceOpts {
    /// Upper bound on `round(duration * fps)`; larger requests are rejected.
    pub max_frames: u32,
    /// Compose frames on the rayon pool.
    pub parallel: bool,
    /// GIF encoder options.
    pub gif: GifSinkOpts,
    /// MP4 encoder options.
    pub video: FfmpegSinkOpts,
}

impl Default for ServiceOpts {
    fn default() -> Self {
        Self {
            max_frames: 3600,
            parallel: true,
            gif: GifSinkOpts::default(),
            video: FfmpegSinkOpts::default(),
        }
    }
}

/// Orchestrates catalog lookup, frame generation and encoding for one request at a time.
///
/// The service holds only read-only configuration, so one instance can serve concurrent requests.
#[derive(Clone, Debug, Default)]
pub struct AnimationService {
    opts: ServiceOpts,
}

impl AnimationService {
    /// Create a service with the given options.
    pub fn new(opts: ServiceOpts) -> Self {
        Self { opts }
    }

    /// Borrow the service options.
    pub fn opts(&self) -> &ServiceOpts {
        &self.opts
    }

    /// Generate the timed frame sequence for `req` without encoding it.
    ///
    /// Parameters are validated before the effect id is resolved.
    pub fn frames(&self, req: &AnimationRequest<'_>) -> AnimlabResult<FrameSequence> {
        if req.image.width() == 0 || req.image.height() == 0 {
            return Err(AnimlabError::invalid_parameter(
                "source image must have non-zero width and height",
            ));
        }
        let n = frame_count(req.duration_secs, req.fps)?;
        if n > self.opts.max_frames {
            return Err(AnimlabError::invalid_parameter(format!(
                "{n} frames requested, limit is {}",
                self.opts.max_frames
            )));
        }
        req.overrides.validate()?;

        let spec = EffectCatalog::global().resolve(req.effect_id)?;
        let effect = spec.effect.apply_validated(&req.overrides);
        tracing::debug!(effect = spec.id, requested_frames = n, "generating frames");

        let seq = effect
            .generate(req.image, n, self.opts.parallel)
            .retimed(req.duration_secs);
        tracing::debug!(
            frames = seq.len(),
            frame_duration_secs = seq.frame_duration_secs(),
            "frames ready"
        );
        Ok(seq)
    }

    /// Generate and encode one artifact.
    #[tracing::instrument(
        skip(self, req),
        fields(
            effect = req.effect_id,
            format = %req.format,
            duration_secs = req.duration_secs,
            fps = req.fps
        )
    )]
    pub fn generate(&self, req: &AnimationRequest<'_>) -> AnimlabResult<EncodedArtifact> {
        let seq = self.frames(req)?;
        let mut sink = self.sink_for(req.format);
        let artifact = encode_sequence(&seq, req.fps, sink.as_mut())?;
        tracing::debug!(
            bytes = artifact.bytes.len(),
            media_type = artifact.media_type,
            "encoded"
        );
        Ok(artifact)
    }

    /// `(id, family)` for every catalog entry.
    pub fn list_effects(&self) -> Vec<(&'static str, EffectFamily)> {
        EffectCatalog::global().list()
    }

    fn sink_for(&self, format: OutputFormat) -> Box<dyn FrameSink> {
        match format {
            OutputFormat::Gif => Box::new(GifSink::new(self.opts.gif.clone())),
            OutputFormat::Mp4 => Box::new(FfmpegSink::new(self.opts.video.clone())),
        }
    }
}

/// Generate an artifact with default service options and default effect parameters.
pub fn generate_animation(
    image: &Image,
    effect_id: &str,
    format: OutputFormat,
    duration_secs: f64,
    fps: u32,
) -> AnimlabResult<EncodedArtifact> {
    let req = AnimationRequest::new(image, effect_id, format, duration_secs, fps);
    AnimationService::default().generate(&req)
}

#[cfg(test)]
#[path = "../../tests/unit/service/animation.rs"]
mod tests;
