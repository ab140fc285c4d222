use std::borrow::Cow;

use rayon::prelude::*;

use crate::compositor::canvas::{blank_canvas, paste, paste_centered, with_opacity};
use crate::compositor::resample::{resize, rotate, scaled_dims};
use crate::foundation::core::{Canvas, FrameSequence, Image};

/// How one output frame is composed from the source image.
///
/// Effects are pure schedules of these steps; [`render_steps`] turns a schedule into pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameStep {
    /// Source pasted with its top-left corner at `(x, y)` and alpha scaled by `opacity`.
    Place {
        /// Horizontal offset in pixels.
        x: i64,
        /// Vertical offset in pixels.
        y: i64,
        /// Alpha multiplier in `[0, 1]`.
        opacity: f64,
    },
    /// Source resized by `scale`, rotated by `degrees` counter-clockwise, then centred.
    Transform {
        /// Uniform scale factor applied before rotation.
        scale: f64,
        /// Rotation angle in degrees.
        degrees: f64,
        /// Grow the rotated image to its bounding box before centring.
        expand: bool,
    },
    /// Fully transparent frame.
    Blank,
}

impl FrameStep {
    /// Source at `(0, 0)` with alpha scaled by `opacity`.
    pub fn opacity(opacity: f64) -> Self {
        Self::Place { x: 0, y: 0, opacity }
    }

    /// Fully opaque source at `(x, y)`.
    pub fn offset(x: i64, y: i64) -> Self {
        Self::Place { x, y, opacity: 1.0 }
    }

    /// Centred source at `scale`, no rotation.
    pub fn scale(scale: f64) -> Self {
        Self::Transform {
            scale,
            degrees: 0.0,
            expand: false,
        }
    }

    /// Compose one frame on a fresh canvas sized like `image`.
    pub fn render(&self, image: &Image) -> Canvas {
        let (w, h) = image.dimensions();
        let mut canvas = blank_canvas(w, h);
        match *self {
            Self::Blank => {}
            Self::Place { x, y, opacity } => {
                if opacity >= 1.0 {
                    paste(&mut canvas, image, x, y);
                } else if opacity > 0.0 {
                    paste(&mut canvas, &with_opacity(image, opacity), x, y);
                }
            }
            Self::Transform {
                scale,
                degrees,
                expand,
            } => {
                let scaled: Cow<'_, Image> = if scale == 1.0 {
                    Cow::Borrowed(image)
                } else {
                    let (sw, sh) = scaled_dims(w, h, scale);
                    Cow::Owned(resize(image, sw, sh))
                };
                if degrees == 0.0 {
                    paste_centered(&mut canvas, &scaled);
                } else {
                    paste_centered(&mut canvas, &rotate(&scaled, degrees, expand));
                }
            }
        }
        canvas
    }
}

/// Render every step of a schedule, in order, into a [`FrameSequence`].
///
/// With `parallel` the frames are composed on the rayon pool; order is preserved either way.
pub fn render_steps(image: &Image, steps: &[FrameStep], parallel: bool) -> FrameSequence {
    let frames: Vec<Canvas> = if parallel {
        steps.par_iter().map(|s| s.render(image)).collect()
    } else {
        steps.iter().map(|s| s.render(image)).collect()
    };
    FrameSequence::new(image.width(), image.height(), frames)
}

/// Phase of `step` within a cycle of `period` steps, in radians.
pub(crate) fn cycle_angle(step: usize, period: usize) -> f64 {
    2.0 * std::f64::consts::PI * step as f64 / period as f64
}

#[cfg(test)]
#[path = "../../tests/unit/effects/schedule.rs"]
mod tests;
