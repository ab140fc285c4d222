//! Pixel-buffer primitives shared by every effect: transparent canvases, source-over pasting,
//! resampling and rotation.

pub(crate) mod canvas;
pub(crate) mod resample;
