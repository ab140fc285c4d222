//! animlab turns one still image plus a named effect into an animated GIF or MP4.
//!
//! The pipeline is:
//!
//! - Pick an effect from the closed [`EffectCatalog`]
//! - Generate a [`FrameSequence`] of source-sized RGBA8 canvases
//! - Encode the sequence through a [`FrameSink`] into an [`EncodedArtifact`]
//!
//! [`AnimationService`] runs all three for an [`AnimationRequest`]; [`generate_animation`] is the
//! one-call shortcut with default options.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compositor;
mod effects;
mod encode;
mod foundation;
mod service;

pub use crate::foundation::core::{
    Canvas, EncodedArtifact, FrameSequence, Image, MEDIA_TYPE_GIF, MEDIA_TYPE_MP4, OutputFormat,
    decode_image, frame_count, ingest_image,
};
pub use crate::foundation::error::{AnimlabError, AnimlabResult};

pub use crate::compositor::canvas::{
    Rgba8, blank_canvas, center_offset, over, paste, paste_centered, with_opacity,
};
pub use crate::compositor::resample::{resize, rotate, scaled_dims};

pub use crate::effects::appear::{
    MIN_ZOOM_SCALE, fade_in, fade_in_steps, slide_in_from_left, slide_in_from_left_steps,
    slide_in_from_top, slide_in_from_top_steps, zoom_in, zoom_in_steps,
};
pub use crate::effects::catalog::{
    Effect, EffectCatalog, EffectFamily, EffectOverrides, EffectSpec, effects_in_family,
    list_effects,
};
pub use crate::effects::disappear::{
    fade_out, fade_out_steps, slide_out_to_bottom, slide_out_to_bottom_steps, slide_out_to_right,
    slide_out_to_right_steps, zoom_out, zoom_out_steps,
};
pub use crate::effects::emphasis::{
    DEFAULT_BOUNCE_AMPLITUDE, DEFAULT_PULSE_MAX_SCALE, DEFAULT_SHAKE_AMPLITUDE, FLASH_MIN_CYCLE,
    MAX_PULSE_SCALE, SWING_MAX_DEGREES, bounce, bounce_steps, flash, flash_cycle_len, flash_steps,
    oscillation_offsets, pulse, pulse_steps, shake, shake_steps, spin, spin_steps, swing,
    swing_steps, tada, tada_phase_lengths, tada_steps,
};
pub use crate::effects::schedule::{FrameStep, render_steps};

pub use crate::encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, is_ffmpeg_available, is_ffmpeg_on_path,
};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::sink::{
    FrameSink, InMemorySink, MEDIA_TYPE_RAW_RGBA, SinkConfig, encode_sequence,
};

pub use crate::service::animation::{
    AnimationRequest, AnimationService, ServiceOpts, generate_animation,
};
